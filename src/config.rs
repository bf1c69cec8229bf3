//! Engine configuration
//!
//! Numeric policy knobs shared by the solver, the retirement simulator and the
//! advisory rules. Every field has a serde default so partial JSON configs load,
//! and `from_env` lets a deployment override the search and runway limits.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::EngineError;

/// Default step for the time-to-goal forward search (years)
pub const DEFAULT_GOAL_STEP_YEARS: f64 = 0.1;

/// Default horizon for the time-to-goal forward search (years)
pub const DEFAULT_GOAL_HORIZON_YEARS: f64 = 50.0;

/// Hard cap on the depletion loop (50 years of months)
pub const DEFAULT_RUNWAY_CAP_MONTHS: u32 = 600;

/// 4% rule
pub const DEFAULT_SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Finest step the time-to-goal search accepts (years)
pub const MIN_GOAL_STEP_YEARS: f64 = 0.01;

/// Longest horizon the time-to-goal search accepts (years)
pub const MAX_GOAL_HORIZON_YEARS: f64 = 200.0;

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Increment of the trial duration in the time-to-goal search
    #[serde(default = "default_goal_step")]
    pub goal_step_years: f64,

    /// Longest duration the time-to-goal search will try
    #[serde(default = "default_goal_horizon")]
    pub goal_horizon_years: f64,

    /// Maximum months simulated in any depletion loop
    #[serde(default = "default_runway_cap")]
    pub runway_cap_months: u32,

    /// Sustainable annual withdrawal as a fraction of savings
    #[serde(default = "default_safe_withdrawal_rate")]
    pub safe_withdrawal_rate: f64,

    /// Thresholds used by the retirement advisory rules
    #[serde(default)]
    pub advisory: AdvisoryThresholds,
}

/// Thresholds behind each advisory rule and the withdrawal-rate bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryThresholds {
    /// Withdrawal rate (percent) above which the plan is aggressive
    #[serde(default = "default_high_withdrawal_pct")]
    pub high_withdrawal_rate_pct: f64,

    /// Withdrawal rate (percent) above which the plan is moderate
    #[serde(default = "default_moderate_withdrawal_pct")]
    pub moderate_withdrawal_rate_pct: f64,

    /// Age at which catch-up contributions become available
    #[serde(default = "default_catch_up_age")]
    pub catch_up_age: u32,

    /// Monthly contribution below which catch-up is suggested
    #[serde(default = "default_catch_up_contribution")]
    pub catch_up_monthly_contribution: f64,

    /// Assumed annual return (percent) below which returns are called conservative
    #[serde(default = "default_conservative_return_pct")]
    pub conservative_return_pct: f64,

    /// Years to retirement below which the timeline is short
    #[serde(default = "default_short_timeline_years")]
    pub short_timeline_years: u32,
}

fn default_goal_step() -> f64 {
    DEFAULT_GOAL_STEP_YEARS
}

fn default_goal_horizon() -> f64 {
    DEFAULT_GOAL_HORIZON_YEARS
}

fn default_runway_cap() -> u32 {
    DEFAULT_RUNWAY_CAP_MONTHS
}

fn default_safe_withdrawal_rate() -> f64 {
    DEFAULT_SAFE_WITHDRAWAL_RATE
}

fn default_high_withdrawal_pct() -> f64 {
    4.0
}

fn default_moderate_withdrawal_pct() -> f64 {
    3.0
}

fn default_catch_up_age() -> u32 {
    50
}

fn default_catch_up_contribution() -> f64 {
    1000.0
}

fn default_conservative_return_pct() -> f64 {
    6.0
}

fn default_short_timeline_years() -> u32 {
    10
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            high_withdrawal_rate_pct: default_high_withdrawal_pct(),
            moderate_withdrawal_rate_pct: default_moderate_withdrawal_pct(),
            catch_up_age: default_catch_up_age(),
            catch_up_monthly_contribution: default_catch_up_contribution(),
            conservative_return_pct: default_conservative_return_pct(),
            short_timeline_years: default_short_timeline_years(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            goal_step_years: DEFAULT_GOAL_STEP_YEARS,
            goal_horizon_years: DEFAULT_GOAL_HORIZON_YEARS,
            runway_cap_months: DEFAULT_RUNWAY_CAP_MONTHS,
            safe_withdrawal_rate: DEFAULT_SAFE_WITHDRAWAL_RATE,
            advisory: AdvisoryThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by any of the `COMPOUND_*` environment variables that parse
    ///
    /// Recognised: `COMPOUND_GOAL_STEP_YEARS`, `COMPOUND_GOAL_HORIZON_YEARS`,
    /// `COMPOUND_RUNWAY_CAP_MONTHS`, `COMPOUND_SAFE_WITHDRAWAL_RATE`.
    /// Unparseable or non-positive values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(step) = positive_env("COMPOUND_GOAL_STEP_YEARS") {
            config.goal_step_years = step;
        }
        if let Some(horizon) = positive_env("COMPOUND_GOAL_HORIZON_YEARS") {
            config.goal_horizon_years = horizon;
        }
        if let Some(cap) = positive_env("COMPOUND_RUNWAY_CAP_MONTHS") {
            if cap >= 1.0 {
                config.runway_cap_months = cap.round().min(u32::MAX as f64) as u32;
            } else {
                log::warn!("ignoring COMPOUND_RUNWAY_CAP_MONTHS={}: below one month", cap);
            }
        }
        if let Some(rate) = positive_env("COMPOUND_SAFE_WITHDRAWAL_RATE") {
            config.safe_withdrawal_rate = rate;
        }

        config
    }

    /// Reject limits that would stall the goal search or break the runway and 4% rule
    ///
    /// Step: at least [`MIN_GOAL_STEP_YEARS`]. Horizon: positive, at most
    /// [`MAX_GOAL_HORIZON_YEARS`]. Runway cap: at least one month. Safe
    /// withdrawal rate: in (0, 1].
    pub fn validate(&self) -> Result<(), EngineError> {
        let step = self.goal_step_years;
        if !step.is_finite() || step < MIN_GOAL_STEP_YEARS {
            return Err(EngineError::invalid(
                "goal_step_years",
                step,
                "must be at least 0.01 years",
            ));
        }

        let horizon = self.goal_horizon_years;
        if !horizon.is_finite() || horizon <= 0.0 || horizon > MAX_GOAL_HORIZON_YEARS {
            return Err(EngineError::invalid(
                "goal_horizon_years",
                horizon,
                "must be positive and at most 200 years",
            ));
        }

        if self.runway_cap_months == 0 {
            return Err(EngineError::invalid(
                "runway_cap_months",
                0.0,
                "must be at least one month",
            ));
        }

        let rate = self.safe_withdrawal_rate;
        if !rate.is_finite() || rate <= 0.0 || rate > 1.0 {
            return Err(EngineError::invalid(
                "safe_withdrawal_rate",
                rate,
                "must be greater than 0 and at most 1",
            ));
        }

        Ok(())
    }
}

fn positive_env(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => {
            log::warn!("ignoring {}={:?}: expected a positive number", key, raw);
            None
        }
    }
}
