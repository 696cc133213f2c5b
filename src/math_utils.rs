// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal CDF through `erfc`, relatively accurate in the lower tail.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / SQRT_2)
}

/// `ln Φ(x)`, finite far below the point where `Φ(x)` underflows.
///
/// Below `x = -30` the asymptotic series
/// ```text
/// Φ(x) ≈ φ(x) / |x| · (1 - 1/x² + 3/x⁴ - 15/x⁶ + 105/x⁸)
/// ```
/// is used in log form.
pub fn log_norm_cdf(x: f64) -> f64 {
    if x > -30.0 {
        return norm_cdf(x).ln();
    }
    let x2 = x * x;
    let series = 1.0 - 1.0 / x2 + 3.0 / x2.powi(2) - 15.0 / x2.powi(3) + 105.0 / x2.powi(4);
    -0.5 * x2 - (-x).ln() - 0.5 * (2.0 * PI).ln() + series.ln()
}

/// Standard normal density φ(x) = exp(-x²/2) / √(2π)
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
