//! Path simulation interface
//!
//! The payoff evaluator only talks to a simulation through [`PathSimulation`]:
//! the native time grid, per-path asset values, the numeraire and the
//! Monte-Carlo weights at a given time. It makes no assumption about the
//! dynamics behind them.

pub mod black_scholes;

use crate::error::{LookbackError, LookbackResult};
use ndarray::Array1;

pub use black_scholes::{BlackScholesSimulation, SimulationConfig};

/// Absolute slack when matching a requested time against the grid ends.
pub const TIME_TOLERANCE: f64 = 1e-12;

/// A set of simulated paths observed on a discrete time grid.
///
/// All per-path vectors have length [`number_of_paths`](Self::number_of_paths).
/// Implementations are shared read-only across pricing threads.
pub trait PathSimulation: Sync {
    /// Native discretization, strictly increasing, at least two points.
    fn time_discretization(&self) -> &[f64];

    fn number_of_paths(&self) -> usize;

    /// Grid index nearest to `time`; fails outside the simulated horizon.
    fn time_index(&self, time: f64) -> LookbackResult<usize> {
        nearest_time_index(self.time_discretization(), time)
    }

    /// Value of asset `underlying` on every path at `time`.
    fn asset_value(&self, time: f64, underlying: usize) -> LookbackResult<Array1<f64>>;

    /// Numeraire on every path at `time`.
    fn numeraire(&self, time: f64) -> LookbackResult<Array1<f64>>;

    /// Probability weight of every path at `time`.
    fn monte_carlo_weights(&self, time: f64) -> LookbackResult<Array1<f64>>;
}

/// Index of the grid time nearest to `time`, ties resolved to the earlier one.
pub fn nearest_time_index(grid: &[f64], time: f64) -> LookbackResult<usize> {
    let (first, last) = match (grid.first(), grid.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return Err(LookbackError::simulation(
                "time_index",
                "time discretization is empty",
            ))
        }
    };

    if !time.is_finite() || time < first - TIME_TOLERANCE || time > last + TIME_TOLERANCE {
        return Err(LookbackError::simulation(
            "time_index",
            format!("time {} is outside the simulated horizon [{}, {}]", time, first, last),
        ));
    }

    let upper = grid.partition_point(|&g| g < time);
    let index = if upper == 0 {
        0
    } else if upper == grid.len() {
        grid.len() - 1
    } else if time - grid[upper - 1] <= grid[upper] - time {
        upper - 1
    } else {
        upper
    };
    Ok(index)
}
