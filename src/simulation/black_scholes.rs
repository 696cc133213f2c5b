// src/simulation/black_scholes.rs
//! Reference Black-Scholes path simulation
//!
//! Simulates independent GBM underlyings under the risk-neutral measure on a
//! uniform grid `t_i = i T / steps`, with the exact log-normal step
//! ```text
//! S_{t+dt} = S_t * exp((r - σ²/2)dt + σ√dt * Z)
//! ```
//! The numeraire is the bank account `e^(rt)` and every path carries the
//! weight `1 / paths`.

use super::PathSimulation;
use crate::error::{validation::*, LookbackError, LookbackResult};
use crate::models::gbm::Gbm;
use crate::rng::{self, RngFactory};
use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub paths: usize,
    pub steps: usize,
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
    pub t: f64,
    pub seed: u64,
    pub underlyings: usize,
}

impl SimulationConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> LookbackResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        validate_positive("s0", self.s0)?;
        validate_finite("r", self.r)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("t", self.t)?;

        if self.underlyings == 0 {
            return Err(LookbackError::InvalidConfiguration {
                field: "underlyings".to_string(),
                reason: "must simulate at least one asset".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            paths: 10_000,
            steps: 1_000,
            s0: 100.0,
            r: 0.05,
            sigma: 0.2,
            t: 1.0,
            seed: 1897,
            underlyings: 1,
        }
    }
}

/// Simulated GBM paths, stored per underlying as a `(times × paths)` matrix
/// so a time slice is a contiguous row.
#[derive(Debug, Clone)]
pub struct BlackScholesSimulation {
    times: Vec<f64>,
    rate: f64,
    paths: usize,
    asset_paths: Vec<Array2<f64>>,
}

impl BlackScholesSimulation {
    pub fn new(cfg: &SimulationConfig) -> LookbackResult<Self> {
        cfg.validate()?;

        let dt = cfg.t / cfg.steps as f64;
        let mut times: Vec<f64> = (0..=cfg.steps).map(|i| i as f64 * dt).collect();
        times[cfg.steps] = cfg.t;

        let model = Gbm::new(cfg.s0, cfg.r, cfg.sigma);
        let factory = RngFactory::new(cfg.seed, cfg.paths);

        debug!(
            paths = cfg.paths,
            steps = cfg.steps,
            underlyings = cfg.underlyings,
            seed = cfg.seed,
            "simulating Black-Scholes paths"
        );

        let asset_paths = (0..cfg.underlyings)
            .map(|underlying| {
                let mut values = Array2::<f64>::zeros((times.len(), cfg.paths));
                values
                    .axis_iter_mut(Axis(1))
                    .into_par_iter()
                    .enumerate()
                    .for_each(|(path, mut column)| {
                        let mut rng = factory.create_path_rng(underlying, path);
                        model.fill_path(column.iter_mut(), dt, || rng::get_normal_draw(&mut rng));
                    });
                values
            })
            .collect();

        Ok(BlackScholesSimulation {
            times,
            rate: cfg.r,
            paths: cfg.paths,
            asset_paths,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn number_of_underlyings(&self) -> usize {
        self.asset_paths.len()
    }
}

impl PathSimulation for BlackScholesSimulation {
    fn time_discretization(&self) -> &[f64] {
        &self.times
    }

    fn number_of_paths(&self) -> usize {
        self.paths
    }

    fn asset_value(&self, time: f64, underlying: usize) -> LookbackResult<Array1<f64>> {
        let index = self.time_index(time)?;
        let paths = self.asset_paths.get(underlying).ok_or_else(|| {
            LookbackError::simulation(
                "asset_value",
                format!(
                    "underlying {} requested, {} simulated",
                    underlying,
                    self.asset_paths.len()
                ),
            )
        })?;
        Ok(paths.row(index).to_owned())
    }

    fn numeraire(&self, time: f64) -> LookbackResult<Array1<f64>> {
        let index = self.time_index(time)?;
        Ok(Array1::from_elem(
            self.paths,
            (self.rate * self.times[index]).exp(),
        ))
    }

    fn monte_carlo_weights(&self, time: f64) -> LookbackResult<Array1<f64>> {
        self.time_index(time)?;
        Ok(Array1::from_elem(self.paths, 1.0 / self.paths as f64))
    }
}
