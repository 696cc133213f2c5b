// src/mc/mc_engine.rs
use crate::contract::LookbackContract;
use crate::error::{validation::*, LookbackError, LookbackResult};
use crate::mc::estimate::McEstimate;
use crate::mc::payoffs::Extremum;
use crate::simulation::PathSimulation;
use ndarray::{Array1, Zip};
use tracing::debug;

fn check_paths(operation: &str, values: &Array1<f64>, paths: usize) -> LookbackResult<()> {
    if values.len() != paths {
        return Err(LookbackError::simulation(
            operation,
            format!("returned {} values for {} paths", values.len(), paths),
        ));
    }
    Ok(())
}

/// Path-dependent payoff on every simulated path
///
/// # Algorithm
///
/// 1. Start every path at the fold identity (`+∞` for a minimum, `-∞` for a
///    maximum)
/// 2. For each monitoring time `t`, read `S_min(t, T)` and fold it into the
///    running extremum, in parallel across paths
/// 3. Read the terminal value `S_T` and apply `payoff(extremum, S_T)`
///
/// Monitoring times beyond `maturity` are clamped to it.
///
/// # Errors
///
/// Any simulation error is returned unchanged; a path whose extremum is not
/// finite after the walk (empty grid, NaN or infinite asset values) is a
/// `NumericalInstability`.
pub fn evaluate_path_payoff<S, F>(
    sim: &S,
    monitoring_times: &[f64],
    maturity: f64,
    underlying: usize,
    extremum: Extremum,
    payoff: F,
) -> LookbackResult<Array1<f64>>
where
    S: PathSimulation + ?Sized,
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    let paths = sim.number_of_paths();
    let mut running = extremum.accumulator(paths);

    for &time in monitoring_times {
        let observed = sim.asset_value(time.min(maturity), underlying)?;
        check_paths("asset_value", &observed, paths)?;
        extremum.fold_slice(&mut running, &observed);
    }

    if let Some(bad) = running.iter().find(|v| !v.is_finite()) {
        return Err(LookbackError::NumericalInstability {
            method: "running extremum".to_string(),
            reason: format!(
                "{:?} is {} after {} monitoring times",
                extremum,
                bad,
                monitoring_times.len()
            ),
        });
    }

    let terminal = sim.asset_value(maturity, underlying)?;
    check_paths("asset_value", &terminal, paths)?;

    let mut values = Array1::<f64>::zeros(paths);
    Zip::from(&mut values)
        .and(&running)
        .and(&terminal)
        .par_for_each(|v, &ext, &s_t| *v = payoff(ext, s_t));
    Ok(values)
}

/// Move per-path payoffs paid at `maturity` to `evaluation_time`
///
/// ```text
/// V(t) = X / N(T) * w(T) * N(t) / w(t)
/// ```
/// where `N` is the numeraire and `w` the Monte Carlo weight of each path.
pub fn rebase<S>(
    mut values: Array1<f64>,
    sim: &S,
    maturity: f64,
    evaluation_time: f64,
) -> LookbackResult<Array1<f64>>
where
    S: PathSimulation + ?Sized,
{
    let paths = values.len();
    let numeraire_at_maturity = sim.numeraire(maturity)?;
    let weights_at_maturity = sim.monte_carlo_weights(maturity)?;
    let numeraire_at_eval = sim.numeraire(evaluation_time)?;
    let weights_at_eval = sim.monte_carlo_weights(evaluation_time)?;

    check_paths("numeraire", &numeraire_at_maturity, paths)?;
    check_paths("monte_carlo_weights", &weights_at_maturity, paths)?;
    check_paths("numeraire", &numeraire_at_eval, paths)?;
    check_paths("monte_carlo_weights", &weights_at_eval, paths)?;

    Zip::from(&mut values)
        .and(&numeraire_at_maturity)
        .and(&weights_at_maturity)
        .and(&numeraire_at_eval)
        .and(&weights_at_eval)
        .par_for_each(|v, &n_t, &w_t, &n_eval, &w_eval| {
            *v = *v / n_t * w_t * n_eval / w_eval;
        });
    Ok(values)
}

/// A lookback contract with a maturity, valued on simulated paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookbackOption {
    contract: LookbackContract,
    maturity: f64,
}

impl LookbackOption {
    pub fn new(contract: LookbackContract, maturity: f64) -> LookbackResult<Self> {
        validate_positive("maturity", maturity)?;
        Ok(LookbackOption { contract, maturity })
    }

    pub fn contract(&self) -> &LookbackContract {
        &self.contract
    }

    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Per-path values at `evaluation_time`.
    pub fn value<S>(&self, evaluation_time: f64, sim: &S) -> LookbackResult<Array1<f64>>
    where
        S: PathSimulation + ?Sized,
    {
        validate_finite("evaluation_time", evaluation_time)?;
        validate_non_negative("evaluation_time", evaluation_time)?;

        let grid = self.contract.monitoring().grid(sim.time_discretization())?;
        let contract = self.contract;

        debug!(
            variant = ?contract.variant(),
            monitoring_points = grid.len(),
            maturity = self.maturity,
            evaluation_time,
            "valuing lookback on simulated paths"
        );

        let payoffs = evaluate_path_payoff(
            sim,
            &grid,
            self.maturity,
            contract.underlying(),
            contract.variant().extremum(),
            move |extremum, terminal| contract.payoff(extremum, terminal),
        )?;
        rebase(payoffs, sim, self.maturity, evaluation_time)
    }

    /// Monte Carlo price at time zero with its standard error.
    pub fn price<S>(&self, sim: &S) -> LookbackResult<McEstimate>
    where
        S: PathSimulation + ?Sized,
    {
        let estimate = McEstimate::from_samples(&self.value(0.0, sim)?)?;
        debug!(
            price = estimate.price,
            std_error = estimate.std_error,
            paths = estimate.paths,
            "Monte Carlo lookback price"
        );
        Ok(estimate)
    }
}
