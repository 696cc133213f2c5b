//! Market parameters and lookback contract descriptors
//!
//! Both are plain value types rebuilt for every valuation. Contract
//! descriptors are validated when they are constructed, so the payoff walk
//! and the analytic formulas never see a fixed-strike variant without a
//! strike or a discrete schedule with zero fixings.

use crate::error::{validation::*, LookbackError, LookbackResult};
use crate::mc::payoffs::Extremum;

/// Black-Scholes market parameters: spot, continuously compounded rate,
/// volatility and maturity in years.
///
/// Non-positive volatility or maturity is the degenerate regime (priced at
/// zero) and is accepted here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    pub spot: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
}

impl MarketParams {
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> LookbackResult<Self> {
        let params = MarketParams {
            spot,
            rate,
            volatility,
            maturity,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> LookbackResult<()> {
        validate_positive("spot", self.spot)?;
        validate_finite("rate", self.rate)?;
        validate_finite("volatility", self.volatility)?;
        validate_finite("maturity", self.maturity)?;
        Ok(())
    }
}

/// The four lookback contract shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookbackVariant {
    /// max(max S_t - K, 0)
    CallFixedStrike,
    /// max(K - min S_t, 0)
    PutFixedStrike,
    /// max(S_T - min S_t, 0)
    CallFloatingStrike,
    /// max(max S_t - S_T, 0)
    PutFloatingStrike,
}

impl LookbackVariant {
    #[inline]
    pub fn is_fixed_strike(&self) -> bool {
        matches!(
            self,
            LookbackVariant::CallFixedStrike | LookbackVariant::PutFixedStrike
        )
    }

    /// Which running extremum the payoff references.
    #[inline]
    pub fn extremum(&self) -> Extremum {
        match self {
            LookbackVariant::CallFloatingStrike | LookbackVariant::PutFixedStrike => {
                Extremum::Minimum
            }
            LookbackVariant::PutFloatingStrike | LookbackVariant::CallFixedStrike => {
                Extremum::Maximum
            }
        }
    }

    /// Terminal payoff given the path extremum, the terminal value and the
    /// strike (ignored by floating-strike variants). Floored at zero for all
    /// four variants.
    #[inline]
    pub fn terminal_payoff(&self, extremum: f64, terminal: f64, strike: f64) -> f64 {
        match self {
            LookbackVariant::CallFloatingStrike => (terminal - extremum).max(0.0),
            LookbackVariant::PutFloatingStrike => (extremum - terminal).max(0.0),
            LookbackVariant::CallFixedStrike => (extremum - strike).max(0.0),
            LookbackVariant::PutFixedStrike => (strike - extremum).max(0.0),
        }
    }
}

/// How often the extremum is observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monitoring {
    /// Every simulated time step (the continuous-monitoring approximation)
    Continuous,
    /// A fixed number of evenly spaced fixing dates after time zero
    Discrete { fixings: usize },
}

impl Monitoring {
    /// Fixing count in the grid builder's convention (0 = native grid).
    pub fn fixings(&self) -> usize {
        match self {
            Monitoring::Continuous => 0,
            Monitoring::Discrete { fixings } => *fixings,
        }
    }
}

/// A validated lookback contract
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookbackContract {
    variant: LookbackVariant,
    strike: Option<f64>,
    underlying: usize,
    monitoring: Monitoring,
}

impl LookbackContract {
    pub fn new(
        variant: LookbackVariant,
        strike: Option<f64>,
        monitoring: Monitoring,
    ) -> LookbackResult<Self> {
        match (variant.is_fixed_strike(), strike) {
            (true, None) => {
                return Err(LookbackError::configuration(
                    "strike",
                    format!("{:?} requires a strike", variant),
                ))
            }
            (true, Some(k)) => validate_positive("strike", k)?,
            (false, Some(_)) => {
                return Err(LookbackError::configuration(
                    "strike",
                    format!("{:?} takes its strike from the path", variant),
                ))
            }
            (false, None) => {}
        }

        if let Monitoring::Discrete { fixings: 0 } = monitoring {
            return Err(LookbackError::configuration(
                "fixings",
                "discrete monitoring needs at least one fixing date",
            ));
        }

        Ok(LookbackContract {
            variant,
            strike,
            underlying: 0,
            monitoring,
        })
    }

    pub fn call_floating() -> Self {
        LookbackContract {
            variant: LookbackVariant::CallFloatingStrike,
            strike: None,
            underlying: 0,
            monitoring: Monitoring::Continuous,
        }
    }

    pub fn put_floating() -> Self {
        LookbackContract {
            variant: LookbackVariant::PutFloatingStrike,
            strike: None,
            underlying: 0,
            monitoring: Monitoring::Continuous,
        }
    }

    pub fn call_fixed(strike: f64) -> LookbackResult<Self> {
        Self::new(
            LookbackVariant::CallFixedStrike,
            Some(strike),
            Monitoring::Continuous,
        )
    }

    pub fn put_fixed(strike: f64) -> LookbackResult<Self> {
        Self::new(
            LookbackVariant::PutFixedStrike,
            Some(strike),
            Monitoring::Continuous,
        )
    }

    /// Switch to `fixings` evenly spaced fixing dates.
    pub fn with_fixings(self, fixings: usize) -> LookbackResult<Self> {
        Self::new(self.variant, self.strike, Monitoring::Discrete { fixings })
            .map(|c| c.with_underlying(self.underlying))
    }

    /// Select which simulated asset the contract references.
    pub fn with_underlying(mut self, underlying: usize) -> Self {
        self.underlying = underlying;
        self
    }

    pub fn variant(&self) -> LookbackVariant {
        self.variant
    }

    pub fn strike(&self) -> Option<f64> {
        self.strike
    }

    pub fn underlying(&self) -> usize {
        self.underlying
    }

    pub fn monitoring(&self) -> Monitoring {
        self.monitoring
    }

    /// Payoff for one path; the strike defaults to zero for floating variants.
    #[inline]
    pub fn payoff(&self, extremum: f64, terminal: f64) -> f64 {
        self.variant
            .terminal_payoff(extremum, terminal, self.strike.unwrap_or(0.0))
    }
}
