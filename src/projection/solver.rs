//! Goal inversion: contribution needed for a target, and time needed to reach it
//!
//! The required contribution inverts the annuity formula analytically. Time to
//! goal has no closed form once contributions are present, so it is found by a
//! bounded forward search in fixed steps; the step size is part of the contract
//! (answers are multiples of it).

use serde::{Deserialize, Serialize};

use crate::config::{
    EngineConfig, DEFAULT_GOAL_HORIZON_YEARS, DEFAULT_GOAL_STEP_YEARS, MAX_GOAL_HORIZON_YEARS,
    MIN_GOAL_STEP_YEARS,
};
use crate::error::{ensure_non_negative, ensure_periods, ensure_rate, EngineError};
use crate::params::{GoalParameters, ProjectionParameters};
use super::future_value::annuity_factor;

/// Contribution needed to reach a target from a zero balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredContribution {
    /// Deposit per compounding period
    pub per_period: f64,
    /// Same deposit expressed per month
    pub monthly_equivalent: f64,
}

/// Outcome of the time-to-goal search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalTiming {
    /// Starting balance already meets the target
    AlreadyMet,
    /// Target first met or exceeded after this many years
    Reached { years: f64 },
    /// Not reached within the search horizon
    ExceedsHorizon { horizon_years: f64 },
}

impl GoalTiming {
    /// Years as a number; the horizon for an unreachable goal
    pub fn years(&self) -> f64 {
        match *self {
            GoalTiming::AlreadyMet => 0.0,
            GoalTiming::Reached { years } => years,
            GoalTiming::ExceedsHorizon { horizon_years } => horizon_years,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !matches!(self, GoalTiming::ExceedsHorizon { .. })
    }
}

/// Invert FV = PMT·annuity_factor for PMT
///
/// # Arguments
/// * `target_amount` - Balance to reach
/// * `annual_rate_percent` - Nominal annual rate in percent
/// * `periods_per_year` - Compounding frequency n
/// * `years` - Time available
pub fn required_contribution(
    target_amount: f64,
    annual_rate_percent: f64,
    periods_per_year: u32,
    years: u32,
) -> Result<RequiredContribution, EngineError> {
    ensure_non_negative("target_amount", target_amount)?;
    ensure_periods(periods_per_year)?;
    ensure_rate(annual_rate_percent, periods_per_year)?;
    if years == 0 {
        return Err(EngineError::invalid("years", 0.0, "goal timeframe must be at least one year"));
    }

    let n = periods_per_year as f64;
    let rate = annual_rate_percent / 100.0 / n;
    let per_period = target_amount / annuity_factor(rate, n * years as f64);

    Ok(RequiredContribution {
        per_period,
        monthly_equivalent: per_period * n / 12.0,
    })
}

/// Required contribution for a goal at the given rate and frequency
pub fn required_contribution_for(
    goal: &GoalParameters,
    annual_rate_percent: f64,
    periods_per_year: u32,
) -> Result<RequiredContribution, EngineError> {
    goal.validate()?;
    required_contribution(
        goal.target_amount,
        annual_rate_percent,
        periods_per_year,
        goal.target_years,
    )
}

/// Forward search for the first step at which the balance meets a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalSolver {
    step_years: f64,
    horizon_years: f64,
}

impl Default for GoalSolver {
    fn default() -> Self {
        Self {
            step_years: DEFAULT_GOAL_STEP_YEARS,
            horizon_years: DEFAULT_GOAL_HORIZON_YEARS,
        }
    }
}

impl GoalSolver {
    /// Create a solver; non-positive or non-finite limits fall back to defaults
    ///
    /// The step is raised to at least [`MIN_GOAL_STEP_YEARS`] and the horizon
    /// lowered to at most [`MAX_GOAL_HORIZON_YEARS`], which bounds the search.
    pub fn new(step_years: f64, horizon_years: f64) -> Self {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let step_years = if positive(step_years) {
            step_years.max(MIN_GOAL_STEP_YEARS)
        } else {
            DEFAULT_GOAL_STEP_YEARS
        };
        let horizon_years = if positive(horizon_years) {
            horizon_years.min(MAX_GOAL_HORIZON_YEARS)
        } else {
            DEFAULT_GOAL_HORIZON_YEARS
        };
        Self { step_years, horizon_years }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.goal_step_years, config.goal_horizon_years)
    }

    pub fn step_years(&self) -> f64 {
        self.step_years
    }

    pub fn horizon_years(&self) -> f64 {
        self.horizon_years
    }

    /// Years until `params` (principal, contribution, rate, frequency) reach `target_amount`
    ///
    /// The projection's own `years` field is ignored. Trial durations are
    /// `k·step` for k = 1, 2, ... so no floating-point drift accumulates; the
    /// loop runs at most `ceil(horizon/step)` times.
    pub fn time_to_goal(
        &self,
        params: &ProjectionParameters,
        target_amount: f64,
    ) -> Result<GoalTiming, EngineError> {
        params.validate()?;
        ensure_non_negative("target_amount", target_amount)?;

        if params.principal >= target_amount {
            return Ok(GoalTiming::AlreadyMet);
        }

        let max_steps = (self.horizon_years / self.step_years).ceil() as u64;
        for k in 1..=max_steps {
            let years = (k as f64 * self.step_years).min(self.horizon_years);
            if params.future_value_unchecked(years) >= target_amount {
                log::debug!(
                    "goal {:.2} reached after {:.2} years ({} steps)",
                    target_amount,
                    years,
                    k
                );
                return Ok(GoalTiming::Reached { years });
            }
        }

        log::warn!(
            "goal {:.2} not reached within {} years",
            target_amount,
            self.horizon_years
        );
        Ok(GoalTiming::ExceedsHorizon { horizon_years: self.horizon_years })
    }
}

/// Time to goal with the default 0.1-year step and 50-year horizon
///
/// `periodic_contribution` is the deposit per compounding period.
pub fn time_to_goal(
    principal: f64,
    periodic_contribution: f64,
    annual_rate_percent: f64,
    periods_per_year: u32,
    target_amount: f64,
) -> Result<GoalTiming, EngineError> {
    let params = ProjectionParameters::new(
        principal,
        periodic_contribution,
        annual_rate_percent,
        periods_per_year,
        0,
    );
    GoalSolver::default().time_to_goal(&params, target_amount)
}

/// Share of a target already covered by a projected balance, in percent (0..=100)
pub fn goal_progress(projected_balance: f64, target_amount: f64) -> f64 {
    if target_amount <= 0.0 {
        return 100.0;
    }
    (projected_balance / target_amount * 100.0).clamp(0.0, 100.0)
}
