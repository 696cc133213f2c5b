// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! # Design
//!
//! Every simulated path owns its own generator, seeded deterministically from
//! the base seed, the underlying index and the path index:
//! 1. **Reproducibility**: same seed → same paths, whatever the thread count
//! 2. **Parallel safety**: no generator is shared between rayon workers
//!
//! Normal draws come from `rand_distr::StandardNormal`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Hands out one `StdRng` per (underlying, path) pair.
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
    paths_per_underlying: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64, paths_per_underlying: usize) -> Self {
        Self {
            base_seed,
            paths_per_underlying: paths_per_underlying as u64,
        }
    }

    /// Generator for one path of one underlying. Streams of different
    /// underlyings never share a seed.
    pub fn create_path_rng(&self, underlying: usize, path: usize) -> StdRng {
        let offset = (underlying as u64)
            .wrapping_mul(self.paths_per_underlying)
            .wrapping_add(path as u64);
        seed_rng_from_u64(self.base_seed.wrapping_add(offset))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
