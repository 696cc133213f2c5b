// tests/integration_test.rs
use fast_lookback::analytics::lookback_analytic;
use fast_lookback::contract::{LookbackContract, LookbackVariant, MarketParams};
use fast_lookback::mc::mc_engine::LookbackOption;
use fast_lookback::simulation::{BlackScholesSimulation, PathSimulation, SimulationConfig};
use rayon::prelude::*;

const S0: f64 = 100.0;
const R: f64 = 0.1;
const SIGMA: f64 = 0.3;
const T: f64 = 1.0;
const K: f64 = 100.0;

fn fine_simulation() -> BlackScholesSimulation {
    let cfg = SimulationConfig {
        paths: 10_000,
        steps: 1_000,
        s0: S0,
        r: R,
        sigma: SIGMA,
        t: T,
        seed: 1897,
        underlyings: 1,
    };
    BlackScholesSimulation::new(&cfg).expect("Valid configuration")
}

fn contract_for(variant: LookbackVariant) -> LookbackContract {
    match variant {
        LookbackVariant::CallFixedStrike => LookbackContract::call_fixed(K).unwrap(),
        LookbackVariant::PutFixedStrike => LookbackContract::put_fixed(K).unwrap(),
        LookbackVariant::CallFloatingStrike => LookbackContract::call_floating(),
        LookbackVariant::PutFloatingStrike => LookbackContract::put_floating(),
    }
}

#[test]
fn test_mc_vs_analytic_continuous_fixed_call() {
    let sim = fine_simulation();
    let option = LookbackOption::new(LookbackContract::call_fixed(K).unwrap(), T).unwrap();
    let estimate = option.price(&sim).expect("Simulation covers maturity");

    let analytic = lookback_analytic::continuous_call_fixed(S0, R, SIGMA, T, K).unwrap();
    // A 1000-step grid observes the maximum discretely; BGK gives the size of that bias.
    let grid_bias =
        analytic - lookback_analytic::discrete_call_fixed(S0, R, SIGMA, T, K, 1_000).unwrap();

    println!("\nMC Price (1000 steps): {} ± {}", estimate.price, estimate.std_error);
    println!("Analytic Price (continuous): {}", analytic);
    println!("Grid bias (BGK): {}", grid_bias);

    assert!(grid_bias > 0.0);
    let distance = (estimate.price - analytic).abs();
    assert!(
        distance < 3.0 * estimate.std_error + grid_bias,
        "MC {} too far from analytic {} (se {}, bias {})",
        estimate.price,
        analytic,
        estimate.std_error,
        grid_bias
    );
}

#[test]
fn test_mc_matches_bgk_for_all_variants() {
    let sim = fine_simulation();
    let market = MarketParams::new(S0, R, SIGMA, T).unwrap();
    let native_fixings = sim.time_discretization().len() - 1;

    for variant in [
        LookbackVariant::CallFixedStrike,
        LookbackVariant::PutFixedStrike,
        LookbackVariant::CallFloatingStrike,
        LookbackVariant::PutFloatingStrike,
    ] {
        let every_step = contract_for(variant);
        let on_fixings = every_step.with_fixings(100).unwrap();

        // Continuous monitoring on the simulation grid is a discrete
        // lookback with one fixing per step.
        let reference_every_step =
            lookback_analytic::price(&market, &every_step.with_fixings(native_fixings).unwrap())
                .unwrap();
        let reference_fixings = lookback_analytic::price(&market, &on_fixings).unwrap();

        let mc_every_step = LookbackOption::new(every_step, T).unwrap().price(&sim).unwrap();
        let mc_fixings = LookbackOption::new(on_fixings, T).unwrap().price(&sim).unwrap();

        println!(
            "\n{:?}: MC {} ± {} vs BGK {} | 100 fixings: MC {} ± {} vs BGK {}",
            variant,
            mc_every_step.price,
            mc_every_step.std_error,
            reference_every_step,
            mc_fixings.price,
            mc_fixings.std_error,
            reference_fixings
        );

        assert!(
            mc_every_step.z_score(reference_every_step).abs() < 4.0,
            "{:?} every step: z = {}",
            variant,
            mc_every_step.z_score(reference_every_step)
        );
        assert!(
            mc_fixings.z_score(reference_fixings).abs() < 4.0,
            "{:?} 100 fixings: z = {}",
            variant,
            mc_fixings.z_score(reference_fixings)
        );
    }
}

#[test]
fn test_fewer_fixings_lower_lookback_value() {
    // Path by path, a coarser grid can only see a smaller maximum.
    let cfg = SimulationConfig {
        paths: 2_000,
        steps: 200,
        s0: S0,
        r: R,
        sigma: SIGMA,
        t: T,
        ..Default::default()
    };
    let sim = BlackScholesSimulation::new(&cfg).unwrap();

    let continuous = LookbackOption::new(LookbackContract::put_floating(), T).unwrap();
    let coarse = LookbackOption::new(LookbackContract::put_floating().with_fixings(10).unwrap(), T)
        .unwrap();

    let v_cont = continuous.value(0.0, &sim).unwrap();
    let v_coarse = coarse.value(0.0, &sim).unwrap();
    assert!(v_cont.iter().zip(v_coarse.iter()).all(|(c, d)| c >= d));
}

#[test]
fn test_rebase_to_evaluation_time() {
    let cfg = SimulationConfig {
        paths: 1_000,
        steps: 200,
        r: R,
        ..Default::default()
    };
    let sim = BlackScholesSimulation::new(&cfg).unwrap();
    let option = LookbackOption::new(LookbackContract::put_fixed(95.0).unwrap(), 1.0).unwrap();

    let at_zero = option.value(0.0, &sim).unwrap();
    let at_half = option.value(0.5, &sim).unwrap();
    let growth = (R * 0.5).exp();
    for (v0, v_half) in at_zero.iter().zip(at_half.iter()) {
        assert!((v_half - v0 * growth).abs() < 1e-10 * (1.0 + v0.abs()));
    }
}

#[test]
fn test_second_underlying_prices_consistently() {
    let cfg = SimulationConfig {
        paths: 5_000,
        steps: 200,
        s0: S0,
        r: R,
        sigma: SIGMA,
        t: T,
        underlyings: 2,
        ..Default::default()
    };
    let sim = BlackScholesSimulation::new(&cfg).unwrap();

    let first = LookbackOption::new(LookbackContract::call_floating(), T)
        .unwrap()
        .price(&sim)
        .unwrap();
    let second = LookbackOption::new(LookbackContract::call_floating().with_underlying(1), T)
        .unwrap()
        .price(&sim)
        .unwrap();

    assert_ne!(first.price, second.price);
    let combined_se = (first.variance + second.variance).sqrt();
    assert!(
        (first.price - second.price).abs() < 4.0 * combined_se,
        "{} vs {} (se {})",
        first.price,
        second.price,
        combined_se
    );

    let missing = LookbackOption::new(LookbackContract::call_floating().with_underlying(2), T)
        .unwrap()
        .price(&sim);
    assert!(missing.is_err());
}

#[test]
fn test_shared_simulation_prices_in_parallel() {
    let cfg = SimulationConfig {
        paths: 2_000,
        steps: 100,
        ..Default::default()
    };
    let sim = BlackScholesSimulation::new(&cfg).unwrap();
    let variants = [
        LookbackVariant::CallFixedStrike,
        LookbackVariant::PutFixedStrike,
        LookbackVariant::CallFloatingStrike,
        LookbackVariant::PutFloatingStrike,
    ];

    let sequential: Vec<f64> = variants
        .iter()
        .map(|&v| LookbackOption::new(contract_for(v), T).unwrap().price(&sim).unwrap().price)
        .collect();
    let parallel: Vec<f64> = variants
        .par_iter()
        .map(|&v| LookbackOption::new(contract_for(v), T).unwrap().price(&sim).unwrap().price)
        .collect();

    assert_eq!(sequential, parallel);
}
