// src/mc/monitoring.rs
//! Monitoring grids
//!
//! A lookback is observed either at every simulated time (continuous
//! monitoring approximation) or at `m` evenly spaced fixing dates. The
//! discrete grid is an evenly spaced subsample of the native grid with both
//! endpoints included:
//! ```text
//! t_i = native[ round(i (N - 1) / m) ],   i = 0..=m
//! ```
//! `round` is `f64::round` (half away from zero). A fixing count of `N` or
//! more would select the same native time twice and is rejected.

use crate::contract::Monitoring;
use crate::error::{LookbackError, LookbackResult};
use tracing::trace;

/// Build the monitoring times for `fixings` fixing dates (`0` = native grid).
///
/// # Errors
///
/// `InvalidConfiguration` when the native grid has fewer than two points or
/// when `fixings >= native.len()`.
pub fn build_monitoring_times(native: &[f64], fixings: usize) -> LookbackResult<Vec<f64>> {
    let n = native.len();
    if n < 2 {
        return Err(LookbackError::configuration(
            "time_discretization",
            format!("needs at least two times, got {}", n),
        ));
    }

    if fixings == 0 {
        trace!(points = n, "continuous monitoring on the native grid");
        return Ok(native.to_vec());
    }

    if fixings >= n {
        return Err(LookbackError::configuration(
            "fixings",
            format!(
                "{} fixing dates exceed the {} intervals of the simulation grid",
                fixings,
                n - 1
            ),
        ));
    }

    let last = (n - 1) as f64;
    let times = (0..=fixings)
        .map(|i| {
            let index = (i as f64 * last / fixings as f64).round() as usize;
            native[index.min(n - 1)]
        })
        .collect::<Vec<_>>();

    trace!(fixings, points = times.len(), "discrete monitoring grid");
    Ok(times)
}

impl Monitoring {
    /// Monitoring times on a simulation's native grid.
    pub fn grid(&self, native: &[f64]) -> LookbackResult<Vec<f64>> {
        build_monitoring_times(native, self.fixings())
    }
}
