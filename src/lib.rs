//! # fast-lookback: Lookback Option Pricing
//!
//! Prices lookback options, whose payoff depends on the running minimum or
//! maximum of the underlying, under continuous and discrete monitoring.
//!
//! ## Key Features
//!
//! - **Closed forms**: Black-Scholes prices for floating- and fixed-strike
//!   lookbacks, with the `r → 0` limit handled analytically
//! - **Discrete monitoring**: Broadie-Glasserman-Kou continuity correction
//! - **Monte Carlo**: one running-extremum walk shared by all four contract
//!   shapes, parallel across paths, rebased through numeraire and weights
//! - **Pluggable simulations**: any [`PathSimulation`] can drive the
//!   evaluator; [`BlackScholesSimulation`] is provided
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_lookback::analytics::lookback_analytic;
//! use fast_lookback::contract::LookbackContract;
//! use fast_lookback::mc::mc_engine::LookbackOption;
//! use fast_lookback::simulation::{BlackScholesSimulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     paths: 2_000,
//!     steps: 250,
//!     s0: 100.0,
//!     r: 0.1,
//!     sigma: 0.3,
//!     t: 1.0,
//!     ..Default::default()
//! };
//! let sim = BlackScholesSimulation::new(&config).expect("Valid configuration");
//!
//! let contract = LookbackContract::call_fixed(100.0).expect("Valid strike");
//! let option = LookbackOption::new(contract, 1.0).expect("Valid maturity");
//! let estimate = option.price(&sim).expect("Simulation covers maturity");
//!
//! let analytic =
//!     lookback_analytic::continuous_call_fixed(100.0, 0.1, 0.3, 1.0, 100.0).unwrap();
//! println!("MC {:.4} ± {:.4}, analytic {:.4}", estimate.price, estimate.std_error, analytic);
//! ```

// Module declarations
pub mod analytics;
pub mod contract;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod rng;
pub mod simulation;

// Re-export commonly used types for convenience
pub use contract::{LookbackContract, LookbackVariant, MarketParams, Monitoring};
pub use error::{LookbackError, LookbackResult};
pub use mc::estimate::McEstimate;
pub use mc::mc_engine::LookbackOption;
pub use simulation::{BlackScholesSimulation, PathSimulation, SimulationConfig};
