// tests/analytic_properties_test.rs
use approx::assert_relative_eq;
use fast_lookback::analytics::lookback_analytic::*;
use fast_lookback::contract::{LookbackContract, MarketParams};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_fixed_strike_parity(
        s in 50.0..150.0f64,
        k in 50.0..150.0f64,
        r in -0.05..0.15f64,
        sigma in 0.05..0.8f64,
        t in 0.05..3.0f64,
    ) {
        let discount = (-r * t).exp();
        let call = continuous_call_fixed(s, r, sigma, t, k).unwrap();
        let put = continuous_put_fixed(s, r, sigma, t, k).unwrap();

        let call_from_floating = put_floating_with_max(s, s.max(k), r, sigma, t) + s - k * discount;
        let put_from_floating = call_floating_with_min(s, s.min(k), r, sigma, t) + k * discount - s;

        prop_assert!((call - call_from_floating).abs() <= 1e-12 * (1.0 + call.abs()));
        prop_assert!((put - put_from_floating).abs() <= 1e-12 * (1.0 + put.abs()));
        prop_assert!(
            ((call - put) - (call_from_floating - put_from_floating)).abs() <= 1e-10 * (1.0 + s)
        );
    }

    #[test]
    fn test_prices_are_finite_and_non_negative(
        s in 0.5..1_000.0f64,
        k in 0.5..1_000.0f64,
        r in -0.3..0.5f64,
        sigma in 0.005..2.0f64,
        t in 0.01..10.0f64,
        fixings in 1usize..5_000,
    ) {
        let prices = [
            continuous_call_floating(s, r, sigma, t),
            continuous_put_floating(s, r, sigma, t),
            continuous_call_fixed(s, r, sigma, t, k).unwrap(),
            continuous_put_fixed(s, r, sigma, t, k).unwrap(),
            discrete_call_floating(s, r, sigma, t, fixings).unwrap(),
            discrete_put_floating(s, r, sigma, t, fixings).unwrap(),
            discrete_call_fixed(s, r, sigma, t, k, fixings).unwrap(),
            discrete_put_fixed(s, r, sigma, t, k, fixings).unwrap(),
        ];
        for price in prices {
            prop_assert!(price.is_finite());
            prop_assert!(price >= -1e-9 * s.max(k), "negative price {}", price);
        }
    }

    #[test]
    fn test_discrete_fixed_strike_parity(
        k in 50.0..150.0f64,
        fixings in 1usize..500,
    ) {
        let (s, r, sigma, t): (f64, f64, f64, f64) = (100.0, 0.1, 0.3, 1.0);
        let discount = (-r * t).exp();
        let call = discrete_call_fixed(s, r, sigma, t, k, fixings).unwrap();
        let put = discrete_put_fixed(s, r, sigma, t, k, fixings).unwrap();
        if k <= s {
            let floating_put = discrete_put_floating(s, r, sigma, t, fixings).unwrap();
            prop_assert!((call - (floating_put + s - k * discount)).abs() < 1e-10);
        } else {
            let floating_call = discrete_call_floating(s, r, sigma, t, fixings).unwrap();
            prop_assert!((put - (floating_call + k * discount - s)).abs() < 1e-10);
        }
    }
}

#[test]
fn test_extreme_strike_and_volatility_prices_stay_finite() {
    // (s, k, r, σ): power factors far beyond e^709 in the closed forms
    let cases = [
        (1.0, 200.0, 0.2, 0.05),
        (0.5, 1_000.0, 0.5, 0.005),
        (200.0, 1.0, -0.2, 0.05),
        (1_000.0, 0.5, -0.3, 0.005),
        (100.0, 130.0, 0.1, 0.001),
        (100.0, 70.0, -0.1, 0.001),
    ];
    for &(s, k, r, sigma) in &cases {
        for &t in &[0.01, 1.0, 10.0] {
            let mut prices = vec![
                continuous_call_floating(s, r, sigma, t),
                continuous_put_floating(s, r, sigma, t),
                continuous_call_fixed(s, r, sigma, t, k).unwrap(),
                continuous_put_fixed(s, r, sigma, t, k).unwrap(),
            ];
            for &m in &[1, 12, 252] {
                prices.push(discrete_call_floating(s, r, sigma, t, m).unwrap());
                prices.push(discrete_put_floating(s, r, sigma, t, m).unwrap());
                prices.push(discrete_call_fixed(s, r, sigma, t, k, m).unwrap());
                prices.push(discrete_put_fixed(s, r, sigma, t, k, m).unwrap());
            }
            for price in prices {
                assert!(price.is_finite(), "s={} k={} r={} σ={} t={}", s, k, r, sigma, t);
                assert!(
                    price >= -1e-9 * s.max(k),
                    "s={} k={} r={} σ={} t={}: {}",
                    s,
                    k,
                    r,
                    sigma,
                    t,
                    price
                );
            }
        }
    }
}

#[test]
fn test_zero_rate_continuity() {
    for &(sigma, t) in &[(0.1, 0.25), (0.3, 1.0), (0.6, 2.0), (1.0, 5.0)] {
        let limit = continuous_call_floating(100.0, 0.0, sigma, t);
        let general = continuous_call_floating(100.0, 1e-6, sigma, t);
        let rel = (limit - general).abs() / limit;
        println!("sigma={} t={}: limit {} general {} rel {}", sigma, t, limit, general, rel);
        assert!(rel < 1e-4, "relative gap {} at sigma={}, t={}", rel, sigma, t);

        let limit_put = continuous_put_floating(100.0, 0.0, sigma, t);
        let general_put = continuous_put_floating(100.0, 1e-6, sigma, t);
        assert!((limit_put - general_put).abs() / limit_put < 1e-4);
    }

    // The branch switch itself is seamless.
    let below = continuous_call_floating(100.0, 0.99e-8, 0.3, 1.0);
    let above = continuous_call_floating(100.0, 1.01e-8, 0.3, 1.0);
    assert_relative_eq!(below, above, max_relative = 1e-6);
}

#[test]
fn test_general_branch_smooth_away_from_zero() {
    let a = continuous_call_floating(100.0, 1e-3, 0.3, 1.0);
    let b = continuous_call_floating(100.0, 2e-3, 0.3, 1.0);
    assert!((a - b).abs() < 0.05);
}

#[test]
fn test_degenerate_boundary_all_variants() {
    for &(sigma, t) in &[(0.0, 1.0), (0.3, 0.0), (0.0, 0.0)] {
        let market = MarketParams::new(100.0, 0.1, sigma, t).unwrap();
        let contracts = [
            LookbackContract::call_floating(),
            LookbackContract::put_floating(),
            LookbackContract::call_fixed(80.0).unwrap(),
            LookbackContract::put_fixed(120.0).unwrap(),
            LookbackContract::call_fixed(80.0).unwrap().with_fixings(12).unwrap(),
            LookbackContract::put_floating().with_fixings(12).unwrap(),
        ];
        for contract in contracts {
            assert_eq!(price(&market, &contract).unwrap(), 0.0, "{:?}", contract);
        }
    }
}

#[test]
fn test_floating_call_monotonicity() {
    for &r in &[0.0, 0.05, 0.1] {
        let mut previous = 0.0;
        for i in 1..=40 {
            let sigma = 0.025 * i as f64;
            let price = continuous_call_floating(100.0, r, sigma, 1.0);
            assert!(price >= previous, "r={} sigma={}: {} < {}", r, sigma, price, previous);
            previous = price;
        }

        let mut previous = 0.0;
        for i in 1..=40 {
            let t = 0.125 * i as f64;
            let price = continuous_call_floating(100.0, r, 0.3, t);
            assert!(price >= previous, "r={} t={}: {} < {}", r, t, price, previous);
            previous = price;
        }
    }
}

#[test]
fn test_matches_textbook_formula_at_the_money() {
    // Floating call with S = L = 100, r = 0.1, σ = 0.3, T = 1.
    let d: f64 = (0.1 + 0.045) / 0.3;
    let cdf = |x: f64| fast_lookback::math_utils::norm_cdf(x);
    let expected = 100.0 * cdf(d) - 100.0 * (-0.1_f64).exp() * cdf(d - 0.3)
        + (-0.1_f64).exp() * 0.09 / 0.2
            * 100.0
            * (cdf(-d + 0.2 / 0.3) - 0.1_f64.exp() * cdf(-d));
    assert_relative_eq!(
        continuous_call_floating(100.0, 0.1, 0.3, 1.0),
        expected,
        max_relative = 1e-10
    );
}
