//! Closed-form future value of a lump sum plus a level periodic contribution
//!
//! FV = P(1 + r/n)^(nt) + PMT((1 + r/n)^(nt) - 1)/(r/n)
//!
//! At r = 0 the annuity term is 0/0; its limit PMT·n·t is used instead.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_periods, ensure_rate, EngineError};
use crate::params::ProjectionParameters;

/// Per-period rates smaller than this are treated as zero
const ZERO_RATE_EPSILON: f64 = 1e-12;

/// Future value split into its two sources
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureValueBreakdown {
    /// Compounded lump sum
    pub principal_growth: f64,
    /// Compounded stream of contributions
    pub contribution_growth: f64,
    /// Sum of both
    pub total: f64,
}

/// Future value after `years` (fractional years allowed)
///
/// # Arguments
/// * `principal` - Starting balance
/// * `periodic_contribution` - Deposit made at the end of each compounding period
/// * `annual_rate_percent` - Nominal annual rate, 7.0 for 7%
/// * `periods_per_year` - Compounding frequency n
/// * `years` - Duration t
pub fn future_value(
    principal: f64,
    periodic_contribution: f64,
    annual_rate_percent: f64,
    periods_per_year: u32,
    years: f64,
) -> Result<f64, EngineError> {
    Ok(future_value_breakdown(
        principal,
        periodic_contribution,
        annual_rate_percent,
        periods_per_year,
        years,
    )?
    .total)
}

/// Validated future value with its principal/contribution split
pub fn future_value_breakdown(
    principal: f64,
    periodic_contribution: f64,
    annual_rate_percent: f64,
    periods_per_year: u32,
    years: f64,
) -> Result<FutureValueBreakdown, EngineError> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("periodic_contribution", periodic_contribution)?;
    ensure_periods(periods_per_year)?;
    ensure_rate(annual_rate_percent, periods_per_year)?;
    ensure_non_negative("years", years)?;

    let rate = annual_rate_percent / 100.0 / periods_per_year as f64;
    Ok(breakdown_unchecked(principal, periodic_contribution, rate, periods_per_year, years))
}

impl ProjectionParameters {
    /// Future value at the end of the projection
    pub fn future_value(&self) -> Result<f64, EngineError> {
        self.future_value_at(self.years as f64)
    }

    /// Future value at an arbitrary (possibly fractional) point in the projection
    pub fn future_value_at(&self, years: f64) -> Result<f64, EngineError> {
        self.validate()?;
        ensure_non_negative("years", years)?;
        Ok(self.future_value_unchecked(years))
    }

    /// Evaluate without re-validating; callers validate once before looping
    pub(crate) fn future_value_unchecked(&self, years: f64) -> f64 {
        breakdown_unchecked(
            self.principal,
            self.periodic_contribution,
            self.periodic_rate(),
            self.periods_per_year,
            years,
        )
        .total
    }
}

fn breakdown_unchecked(
    principal: f64,
    periodic_contribution: f64,
    rate: f64,
    periods_per_year: u32,
    years: f64,
) -> FutureValueBreakdown {
    let periods = periods_per_year as f64 * years;
    let growth = (1.0 + rate).powf(periods);

    let principal_growth = principal * growth;
    let contribution_growth = if periodic_contribution <= 0.0 {
        0.0
    } else if rate.abs() < ZERO_RATE_EPSILON {
        periodic_contribution * periods
    } else {
        periodic_contribution * ((growth - 1.0) / rate)
    };

    FutureValueBreakdown {
        principal_growth,
        contribution_growth,
        total: principal_growth + contribution_growth,
    }
}

/// Growth factor of one unit of contribution per period
///
/// ((1 + r/n)^(nt) - 1)/(r/n), or n·t at r = 0
pub(crate) fn annuity_factor(rate: f64, periods: f64) -> f64 {
    if rate.abs() < ZERO_RATE_EPSILON {
        periods
    } else {
        ((1.0 + rate).powf(periods) - 1.0) / rate
    }
}

/// Round to whole currency units for display
///
/// Never feed the rounded value back into further projections.
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}
