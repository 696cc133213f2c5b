// src/analytics/lookback_analytic.rs
//! Closed-form lookback prices under Black-Scholes dynamics
//!
//! # Mathematical Foundation
//!
//! The underlying follows risk-neutral GBM without dividends:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! Two floating-strike primitives carry all of the analysis. Each accepts the
//! extremum already observed at valuation time (the running minimum for the
//! call, the running maximum for the put):
//! ```text
//! C(S, L) = e^(-rT) E[S_T - min(L, min S_t)]
//! P(S, H) = e^(-rT) E[max(H, max S_t) - S_T]
//! ```
//!
//! Fixed-strike prices come from lookback put-call parity (Hull):
//! ```text
//! CallFixed(S, K) = P(S, max(S, K)) + S - K e^(-rT)
//! PutFixed(S, K)  = C(S, min(S, K)) + K e^(-rT) - S
//! ```
//!
//! Discretely monitored prices use the Broadie-Glasserman-Kou continuity
//! correction: with `m` fixings the discrete maximum behaves like the
//! continuous one shifted down by `θ = β σ √(T/m)` in log space, the discrete
//! minimum like the continuous one shifted up by `θ`.

use crate::contract::{LookbackContract, LookbackVariant, MarketParams, Monitoring};
use crate::error::{validation::validate_positive, LookbackError, LookbackResult};
use crate::math_utils::{log_norm_cdf, norm_cdf, norm_pdf};

/// `-ζ(1/2) / √(2π)`
pub const LOOKBACK_BETA: f64 = 0.582_597_157_939_010_6;

/// Below this absolute rate the `σ²/(2r)` term is replaced by its limit.
pub const ZERO_RATE_THRESHOLD: f64 = 1e-8;

#[inline]
fn is_degenerate(sigma: f64, t: f64) -> bool {
    t <= 0.0 || sigma <= 0.0
}

/// `e^a Φ(x)` evaluated in log space. For small `σ` the power factor
/// `(S/L)^(∓2r/σ²)` overflows while `Φ(x)` underflows; their product is finite.
#[inline]
fn scaled_norm_cdf(log_scale: f64, x: f64) -> f64 {
    (log_scale + log_norm_cdf(x)).exp()
}

/// Floors a price at zero; NaN is passed through.
#[inline]
fn floor_at_zero(price: f64) -> f64 {
    if price < 0.0 {
        0.0
    } else {
        price
    }
}

/// Continuously monitored floating-strike lookback call with an observed
/// running minimum.
///
/// # Formula
/// ```text
/// d  = [ln(S/L) + (r + σ²/2)T] / (σ√T)
/// C  = S Φ(d) - L e^(-rT) Φ(d - σ√T)
///    + S e^(-rT) σ²/(2r) [ (S/L)^(-2r/σ²) Φ(-d + 2r√T/σ) - e^(rT) Φ(-d) ]
/// ```
///
/// For `|r| < 1e-8` the bracket is evaluated through its limit:
/// ```text
/// u = ln(S/L),  α = (u + σ²T/2) / (σ√T)
/// C = S Φ(α) - L Φ(α - σ√T) + S [ σ√T φ(α) - (σ²T/2 + u) Φ(-α) ]
/// ```
///
/// # Parameters
/// - `s`: Current spot price (must be > 0)
/// - `s_min`: Running minimum observed so far (clamped to `s`, must be > 0)
/// - `r`: Risk-free rate
/// - `sigma`: Volatility
/// - `t`: Time to expiration
///
/// # Returns
/// Present value; `0` when `t <= 0` or `sigma <= 0`.
pub fn call_floating_with_min(s: f64, s_min: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }

    let s_min = s_min.min(s);
    let sqrt_t = t.sqrt();
    let vol_sqrt_t = sigma * sqrt_t;
    let half_var_t = 0.5 * sigma * sigma * t;
    let u = (s / s_min).ln();

    if r.abs() < ZERO_RATE_THRESHOLD {
        let alpha = (u + half_var_t) / vol_sqrt_t;
        let base = s * norm_cdf(alpha) - s_min * norm_cdf(alpha - vol_sqrt_t);
        let limit_term =
            s * (vol_sqrt_t * norm_pdf(alpha) - (half_var_t + u) * norm_cdf(-alpha));
        return base + limit_term;
    }

    let discount = (-r * t).exp();
    let d = (u + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;

    let term1 = s * norm_cdf(d);
    let term2 = -discount * s_min * norm_cdf(d - vol_sqrt_t);
    let bracket = scaled_norm_cdf(
        -2.0 * r * u / (sigma * sigma),
        -d + 2.0 * r * sqrt_t / sigma,
    ) - (r * t).exp() * norm_cdf(-d);
    let term3 = discount * sigma * sigma / (2.0 * r) * s * bracket;

    term1 + term2 + term3
}

/// Continuously monitored floating-strike lookback put with an observed
/// running maximum.
///
/// # Formula
/// ```text
/// d  = [ln(S/H) + (r + σ²/2)T] / (σ√T)
/// P  = H e^(-rT) Φ(-d + σ√T) - S Φ(-d)
///    + S e^(-rT) σ²/(2r) [ e^(rT) Φ(d) - (S/H)^(-2r/σ²) Φ(d - 2r√T/σ) ]
/// ```
///
/// Zero-rate limit, with `v = ln(H/S)` and `β = (σ²T/2 - v) / (σ√T)`:
/// ```text
/// P = H Φ(σ√T - β) - S Φ(-β) + S [ σ√T φ(β) + (σ²T/2 - v) Φ(β) ]
/// ```
///
/// `s` and `s_max` must be positive; the result is NaN otherwise.
pub fn put_floating_with_max(s: f64, s_max: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }

    let s_max = s_max.max(s);
    let sqrt_t = t.sqrt();
    let vol_sqrt_t = sigma * sqrt_t;
    let half_var_t = 0.5 * sigma * sigma * t;
    let v = (s_max / s).ln();

    if r.abs() < ZERO_RATE_THRESHOLD {
        let beta = (half_var_t - v) / vol_sqrt_t;
        let base = s_max * norm_cdf(vol_sqrt_t - beta) - s * norm_cdf(-beta);
        let limit_term = s * (vol_sqrt_t * norm_pdf(beta) + (half_var_t - v) * norm_cdf(beta));
        return base + limit_term;
    }

    let discount = (-r * t).exp();
    let d = (-v + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;

    let term1 = -s * norm_cdf(-d);
    let term2 = discount * s_max * norm_cdf(-d + vol_sqrt_t);
    let bracket = (r * t).exp() * norm_cdf(d)
        - scaled_norm_cdf(2.0 * r * v / (sigma * sigma), d - 2.0 * r * sqrt_t / sigma);
    let term3 = discount * sigma * sigma / (2.0 * r) * s * bracket;

    term1 + term2 + term3
}

/// Floating-strike lookback call, contract starting today (running minimum = spot).
///
/// Expects `s > 0`. [`price`] and the `Result`-returning pricers validate it.
pub fn continuous_call_floating(s: f64, r: f64, sigma: f64, t: f64) -> f64 {
    call_floating_with_min(s, s, r, sigma, t)
}

/// Floating-strike lookback put, contract starting today (running maximum = spot).
pub fn continuous_put_floating(s: f64, r: f64, sigma: f64, t: f64) -> f64 {
    put_floating_with_max(s, s, r, sigma, t)
}

/// Fixed-strike lookback call via parity with the floating put.
///
/// # Errors
/// `InvalidParameters` when `s` or `k` is not positive and finite.
pub fn continuous_call_fixed(s: f64, r: f64, sigma: f64, t: f64, k: f64) -> LookbackResult<f64> {
    validate_positive("spot", s)?;
    validate_positive("strike", k)?;
    if is_degenerate(sigma, t) {
        return Ok(0.0);
    }
    Ok(floor_at_zero(
        put_floating_with_max(s, s.max(k), r, sigma, t) + s - k * (-r * t).exp(),
    ))
}

/// Fixed-strike lookback put via parity with the floating call.
pub fn continuous_put_fixed(s: f64, r: f64, sigma: f64, t: f64, k: f64) -> LookbackResult<f64> {
    validate_positive("spot", s)?;
    validate_positive("strike", k)?;
    if is_degenerate(sigma, t) {
        return Ok(0.0);
    }
    Ok(floor_at_zero(
        call_floating_with_min(s, s.min(k), r, sigma, t) + k * (-r * t).exp() - s,
    ))
}

/// BGK log-space shift `θ = β σ √(T/m)` for `m` fixing dates.
pub fn continuity_correction_shift(sigma: f64, t: f64, fixings: usize) -> f64 {
    LOOKBACK_BETA * sigma * (t / fixings as f64).sqrt()
}

fn validate_fixings(fixings: usize) -> LookbackResult<()> {
    if fixings == 0 {
        return Err(LookbackError::configuration(
            "fixings",
            "discrete monitoring needs at least one fixing date",
        ));
    }
    Ok(())
}

/// Discretely monitored floating put with observed maximum `s_max`.
///
/// ```text
/// P_m(S, H) = e^(-θ) P(S, H e^θ) - (1 - e^(-θ)) S
/// ```
///
/// Callers must pass `fixings > 0`.
fn discrete_put_floating_with_max(
    s: f64,
    s_max: f64,
    r: f64,
    sigma: f64,
    t: f64,
    fixings: usize,
) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }
    let theta = continuity_correction_shift(sigma, t, fixings);
    let shifted_max = s_max.max(s) * theta.exp();
    floor_at_zero(
        (-theta).exp() * put_floating_with_max(s, shifted_max, r, sigma, t)
            - (1.0 - (-theta).exp()) * s,
    )
}

/// Discretely monitored floating call with observed minimum `s_min`.
///
/// ```text
/// C_m(S, L) = e^θ C(S, L e^(-θ)) - (e^θ - 1) S
/// ```
fn discrete_call_floating_with_min(
    s: f64,
    s_min: f64,
    r: f64,
    sigma: f64,
    t: f64,
    fixings: usize,
) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }
    let theta = continuity_correction_shift(sigma, t, fixings);
    let shifted_min = s_min.min(s) * (-theta).exp();
    floor_at_zero(
        theta.exp() * call_floating_with_min(s, shifted_min, r, sigma, t)
            - (theta.exp() - 1.0) * s,
    )
}

pub fn discrete_put_floating(
    s: f64,
    r: f64,
    sigma: f64,
    t: f64,
    fixings: usize,
) -> LookbackResult<f64> {
    validate_positive("spot", s)?;
    validate_fixings(fixings)?;
    Ok(discrete_put_floating_with_max(s, s, r, sigma, t, fixings))
}

pub fn discrete_call_floating(
    s: f64,
    r: f64,
    sigma: f64,
    t: f64,
    fixings: usize,
) -> LookbackResult<f64> {
    validate_positive("spot", s)?;
    validate_fixings(fixings)?;
    Ok(discrete_call_floating_with_min(s, s, r, sigma, t, fixings))
}

pub fn discrete_call_fixed(
    s: f64,
    r: f64,
    sigma: f64,
    t: f64,
    k: f64,
    fixings: usize,
) -> LookbackResult<f64> {
    validate_positive("spot", s)?;
    validate_positive("strike", k)?;
    validate_fixings(fixings)?;
    if is_degenerate(sigma, t) {
        return Ok(0.0);
    }
    Ok(floor_at_zero(
        discrete_put_floating_with_max(s, s.max(k), r, sigma, t, fixings) + s
            - k * (-r * t).exp(),
    ))
}

pub fn discrete_put_fixed(
    s: f64,
    r: f64,
    sigma: f64,
    t: f64,
    k: f64,
    fixings: usize,
) -> LookbackResult<f64> {
    validate_positive("spot", s)?;
    validate_positive("strike", k)?;
    validate_fixings(fixings)?;
    if is_degenerate(sigma, t) {
        return Ok(0.0);
    }
    Ok(floor_at_zero(
        discrete_call_floating_with_min(s, s.min(k), r, sigma, t, fixings) + k * (-r * t).exp()
            - s,
    ))
}

/// Analytic price of a contract, continuous or BGK-corrected discrete.
pub fn price(market: &MarketParams, contract: &LookbackContract) -> LookbackResult<f64> {
    market.validate()?;
    let MarketParams {
        spot: s,
        rate: r,
        volatility: sigma,
        maturity: t,
    } = *market;
    let strike = || {
        contract.strike().ok_or_else(|| {
            LookbackError::configuration("strike", "fixed-strike contract without a strike")
        })
    };

    match (contract.variant(), contract.monitoring()) {
        (LookbackVariant::CallFloatingStrike, Monitoring::Continuous) => {
            Ok(continuous_call_floating(s, r, sigma, t))
        }
        (LookbackVariant::PutFloatingStrike, Monitoring::Continuous) => {
            Ok(continuous_put_floating(s, r, sigma, t))
        }
        (LookbackVariant::CallFixedStrike, Monitoring::Continuous) => {
            continuous_call_fixed(s, r, sigma, t, strike()?)
        }
        (LookbackVariant::PutFixedStrike, Monitoring::Continuous) => {
            continuous_put_fixed(s, r, sigma, t, strike()?)
        }
        (LookbackVariant::CallFloatingStrike, Monitoring::Discrete { fixings }) => {
            discrete_call_floating(s, r, sigma, t, fixings)
        }
        (LookbackVariant::PutFloatingStrike, Monitoring::Discrete { fixings }) => {
            discrete_put_floating(s, r, sigma, t, fixings)
        }
        (LookbackVariant::CallFixedStrike, Monitoring::Discrete { fixings }) => {
            discrete_call_fixed(s, r, sigma, t, strike()?, fixings)
        }
        (LookbackVariant::PutFixedStrike, Monitoring::Discrete { fixings }) => {
            discrete_put_fixed(s, r, sigma, t, strike()?, fixings)
        }
    }
}
