// src/mc/estimate.rs
use crate::error::{LookbackError, LookbackResult};
use ndarray::Array1;

/// Sample statistics of a Monte Carlo price
///
/// - `price`: sample mean of the per-path values
/// - `variance`: variance of the estimator, `s² / n`
/// - `std_error`: `√variance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McEstimate {
    pub price: f64,
    pub variance: f64,
    pub std_error: f64,
    pub paths: usize,
}

impl McEstimate {
    /// Aggregate per-path values with the unbiased two-pass sample variance.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for fewer than two samples, `NumericalInstability`
    /// if the mean or the variance is not finite.
    pub fn from_samples(samples: &Array1<f64>) -> LookbackResult<Self> {
        let n = samples.len();
        if n < 2 {
            return Err(LookbackError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: format!("standard error needs at least two paths, got {}", n),
            });
        }

        let price = samples.sum() / n as f64;
        let sample_variance =
            samples.iter().map(|x| (x - price).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        let variance = sample_variance / n as f64;

        if !price.is_finite() {
            return Err(LookbackError::NumericalInstability {
                method: "Monte Carlo".to_string(),
                reason: format!("Price estimate is not finite: {}", price),
            });
        }

        if !variance.is_finite() {
            return Err(LookbackError::NumericalInstability {
                method: "Monte Carlo".to_string(),
                reason: format!("Variance estimate is not finite: {}", variance),
            });
        }

        Ok(McEstimate {
            price,
            variance,
            std_error: variance.sqrt(),
            paths: n,
        })
    }

    /// Distance to `reference` in standard errors.
    pub fn z_score(&self, reference: f64) -> f64 {
        (self.price - reference) / self.std_error
    }

    /// Symmetric interval `price ± z · std_error`.
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (self.price - z * self.std_error, self.price + z * self.std_error)
    }
}
