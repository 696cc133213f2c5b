//! Running extrema for lookback payoffs
//!
//! # Mathematical Definitions
//!
//! A lookback payoff references the minimum or maximum of the asset over the
//! monitoring times `t_0 < ... < t_m`:
//! ```text
//! m_j = min(m_{j-1}, S_{t_j}),  m_{-1} = +∞
//! M_j = max(M_{j-1}, S_{t_j}),  M_{-1} = -∞
//! ```
//! The identities are true infinities, so the first observation always
//! replaces them.
//!
//! The four contract shapes only differ in which extremum they fold and in
//! their terminal payoff; see [`LookbackVariant`](crate::contract::LookbackVariant).

use ndarray::{Array1, Zip};

/// Direction of the running extremum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    Minimum,
    Maximum,
}

impl Extremum {
    /// Identity element of the fold.
    #[inline]
    pub fn identity(&self) -> f64 {
        match self {
            Extremum::Minimum => f64::INFINITY,
            Extremum::Maximum => f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn fold(&self, acc: f64, value: f64) -> f64 {
        match self {
            Extremum::Minimum => acc.min(value),
            Extremum::Maximum => acc.max(value),
        }
    }

    /// Fresh per-path accumulator.
    pub fn accumulator(&self, paths: usize) -> Array1<f64> {
        Array1::from_elem(paths, self.identity())
    }

    /// Fold one time slice of per-path values into the accumulator, in
    /// parallel across paths.
    pub fn fold_slice(&self, acc: &mut Array1<f64>, values: &Array1<f64>) {
        let extremum = *self;
        Zip::from(acc)
            .and(values)
            .par_for_each(|a, &v| *a = extremum.fold(*a, v));
    }
}

/// Running extremum after each observation of a single path.
///
/// `[100, 90, 120, 80, 110]` gives `[100, 90, 90, 80, 80]` for the minimum.
pub fn running_extremum(values: &[f64], extremum: Extremum) -> Vec<f64> {
    values
        .iter()
        .scan(extremum.identity(), |acc, &v| {
            *acc = extremum.fold(*acc, v);
            Some(*acc)
        })
        .collect()
}
