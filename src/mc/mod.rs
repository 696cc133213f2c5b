pub mod estimate;
pub mod mc_engine;
pub mod monitoring;
pub mod payoffs;
