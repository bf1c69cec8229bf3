//! Error types for the projection engine

use thiserror::Error;

/// Errors raised when engine inputs cannot produce a meaningful result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A parameter is non-finite, negative where it must not be, or otherwise out of range
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Ages on a retirement plan are out of order or beyond a human lifespan
    #[error(
        "invalid ages: {reason} (current {current_age}, retirement {retirement_age}, \
         life expectancy {life_expectancy})"
    )]
    InvalidAges {
        current_age: u32,
        retirement_age: u32,
        life_expectancy: u32,
        reason: &'static str,
    },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        EngineError::InvalidParameter { name, value, reason }
    }
}

/// Reject NaN and infinities
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(name, value, "must be a finite number"))
    }
}

/// Reject non-finite and negative amounts
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), EngineError> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(EngineError::invalid(name, value, "must not be negative"));
    }
    Ok(())
}

/// Compounding frequency must be a positive whole number of periods
pub(crate) fn ensure_periods(periods_per_year: u32) -> Result<(), EngineError> {
    if periods_per_year == 0 {
        return Err(EngineError::invalid(
            "periods_per_year",
            0.0,
            "must be at least one period per year",
        ));
    }
    Ok(())
}

/// The per-period rate r/n must stay above -100%, otherwise growth factors go non-positive
pub(crate) fn ensure_rate(
    annual_rate_percent: f64,
    periods_per_year: u32,
) -> Result<(), EngineError> {
    ensure_finite("annual_rate_percent", annual_rate_percent)?;
    if annual_rate_percent / 100.0 / periods_per_year as f64 <= -1.0 {
        return Err(EngineError::invalid(
            "annual_rate_percent",
            annual_rate_percent,
            "per-period rate must be greater than -100%",
        ));
    }
    Ok(())
}
