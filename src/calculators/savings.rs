//! Savings calculator: growth summary, goal planning and charts
//!
//! Contributions are entered per month and spread over the compounding
//! periods. The summary, goal search and what-ifs use the closed form; the
//! chart series deposits at the start of each period, so its final point
//! runs slightly ahead of the summary figure.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_rate, EngineError};
use crate::params::{GoalParameters, ProjectionParameters};
use crate::projection::{
    comparison_series, generate_period_series, goal_progress, required_contribution_for,
    ComparisonPoint, ContributionTiming, GoalSolver, GoalTiming, ProjectionSeries,
};

/// Savings calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub initial_savings: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub periods_per_year: u32,
    pub years: u32,
    pub inflation_rate_percent: f64,
    #[serde(default)]
    pub goal: Option<GoalParameters>,
}

impl Default for SavingsPlan {
    fn default() -> Self {
        Self {
            initial_savings: 1_000.0,
            monthly_contribution: 200.0,
            annual_rate_percent: 5.0,
            periods_per_year: 12,
            years: 10,
            inflation_rate_percent: 3.0,
            goal: Some(GoalParameters {
                target_amount: 50_000.0,
                target_years: 5,
            }),
        }
    }
}

impl SavingsPlan {
    /// Projection parameters with the monthly deposit converted to a per-period one
    pub fn projection(&self) -> ProjectionParameters {
        ProjectionParameters::from_monthly(
            self.initial_savings,
            self.monthly_contribution,
            self.annual_rate_percent,
            self.periods_per_year,
            self.years,
        )
    }
}

/// Headline figures over the savings period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub future_value: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,

    /// Future value in today's money
    pub inflation_adjusted_value: f64,

    /// Interest earned spread evenly over every month of the period
    pub average_monthly_growth: f64,
}

/// Contribution needed to hit a goal in its timeframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub required_monthly_contribution: f64,
    pub total_to_save: f64,
    pub interest_accumulated: f64,

    /// Target already held, reached within the timeframe by the current plan,
    /// or the current monthly contribution covers the requirement
    pub on_track: bool,
}

/// Goal planning, progress and timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalOutlook {
    pub goal: GoalPlan,

    /// Projected balance at the end of the savings period against the target, 0..=100
    pub progress_pct: f64,

    pub time_to_goal: GoalTiming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsReport {
    pub summary: SavingsSummary,
    pub goal: Option<GoalOutlook>,
    pub series: ProjectionSeries,
    pub comparison: Vec<ComparisonPoint>,
}

impl SavingsReport {
    pub fn calculate(plan: &SavingsPlan, config: &EngineConfig) -> Result<Self, EngineError> {
        let params = plan.projection();
        params.validate()?;
        ensure_rate(plan.inflation_rate_percent, 1)?;

        let summary = summarize(plan, &params);
        let goal = match &plan.goal {
            Some(goal) => Some(outlook(plan, &params, goal, summary.future_value, config)?),
            None => None,
        };

        Ok(Self {
            summary,
            goal,
            series: generate_period_series(&params, ContributionTiming::StartOfPeriod)?,
            comparison: comparison_series(&params, ContributionTiming::StartOfPeriod)?,
        })
    }
}

fn summarize(plan: &SavingsPlan, params: &ProjectionParameters) -> SavingsSummary {
    let years = params.years as f64;
    let future_value = params.future_value_unchecked(years);
    let total_contributions = params.contributions_after(years);
    let interest_earned = future_value - total_contributions;

    let inflation = (1.0 + plan.inflation_rate_percent / 100.0).powf(years);
    let months = years * 12.0;

    SavingsSummary {
        future_value,
        total_contributions,
        interest_earned,
        inflation_adjusted_value: future_value / inflation,
        average_monthly_growth: if months > 0.0 { interest_earned / months } else { 0.0 },
    }
}

fn outlook(
    plan: &SavingsPlan,
    params: &ProjectionParameters,
    goal: &GoalParameters,
    projected_balance: f64,
    config: &EngineConfig,
) -> Result<GoalOutlook, EngineError> {
    let required =
        required_contribution_for(goal, plan.annual_rate_percent, plan.periods_per_year)?;
    let monthly = required.monthly_equivalent;
    let total_to_save = monthly * 12.0 * goal.target_years as f64;

    let time_to_goal =
        GoalSolver::from_config(config).time_to_goal(params, goal.target_amount)?;

    Ok(GoalOutlook {
        goal: GoalPlan {
            required_monthly_contribution: monthly,
            total_to_save,
            interest_accumulated: goal.target_amount - total_to_save,
            on_track: plan.monthly_contribution >= monthly
                || reached_within(&time_to_goal, goal.target_years),
        },
        progress_pct: goal_progress(projected_balance, goal.target_amount),
        time_to_goal,
    })
}

/// Target already held, or reached by the current plan inside the goal timeframe
fn reached_within(timing: &GoalTiming, target_years: u32) -> bool {
    match *timing {
        GoalTiming::AlreadyMet => true,
        GoalTiming::Reached { years } => years <= target_years as f64,
        GoalTiming::ExceedsHorizon { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report(plan: &SavingsPlan) -> SavingsReport {
        SavingsReport::calculate(plan, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_default_plan_summary() {
        let report = report(&SavingsPlan::default());
        let s = report.summary;

        assert_eq!(s.total_contributions, 1_000.0 + 200.0 * 12.0 * 10.0);
        assert_relative_eq!(
            s.interest_earned,
            s.future_value - s.total_contributions,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            s.inflation_adjusted_value,
            s.future_value / 1.03_f64.powi(10),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            s.average_monthly_growth,
            s.interest_earned / 120.0,
            max_relative = 1e-12
        );
        assert!(s.future_value > 32_000.0 && s.future_value < 33_000.0);
    }

    #[test]
    fn test_goal_plan_for_default_target() {
        let outlook = report(&SavingsPlan::default()).goal.unwrap();
        let goal = outlook.goal;

        // 50k in 5 years at 5% monthly needs roughly $735/month
        let monthly = goal.required_monthly_contribution;
        assert!(monthly > 730.0 && monthly < 740.0);
        assert_relative_eq!(goal.total_to_save, monthly * 60.0, max_relative = 1e-12);
        assert_relative_eq!(
            goal.interest_accumulated,
            50_000.0 - goal.total_to_save,
            max_relative = 1e-12
        );
        assert!(!goal.on_track);

        assert!(outlook.progress_pct < 100.0);
        match outlook.time_to_goal {
            GoalTiming::Reached { years } => assert!(years > 10.0 && years < 15.0),
            other => panic!("expected goal to be reached, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_equal_to_current_savings() {
        let plan = SavingsPlan {
            initial_savings: 50_000.0,
            ..SavingsPlan::default()
        };
        let outlook = report(&plan).goal.unwrap();
        assert_eq!(outlook.progress_pct, 100.0);
        assert_eq!(outlook.time_to_goal, GoalTiming::AlreadyMet);
        assert_eq!(outlook.time_to_goal.years(), 0.0);
        assert!(outlook.goal.on_track);
    }

    #[test]
    fn test_goal_reached_within_timeframe_from_savings() {
        // 45k at 5% passes 50k in a little over two years without deposits
        let plan = SavingsPlan {
            initial_savings: 45_000.0,
            monthly_contribution: 0.0,
            ..SavingsPlan::default()
        };
        let outlook = report(&plan).goal.unwrap();
        assert!(outlook.goal.required_monthly_contribution > 0.0);
        match outlook.time_to_goal {
            GoalTiming::Reached { years } => assert!(years > 2.0 && years < 2.5),
            other => panic!("expected goal to be reached, got {:?}", other),
        }
        assert!(outlook.goal.on_track);
    }

    #[test]
    fn test_quarterly_compounding_spreads_contribution() {
        let plan = SavingsPlan {
            periods_per_year: 4,
            goal: None,
            ..SavingsPlan::default()
        };
        assert_eq!(plan.projection().periodic_contribution, 600.0);

        let report = report(&plan);
        assert!(report.goal.is_none());
        assert_eq!(report.summary.total_contributions, 25_000.0);
    }

    #[test]
    fn test_series_deposits_at_start_of_period() {
        let report = report(&SavingsPlan::default());
        assert_eq!(report.series.len(), 11);
        assert_eq!(report.series[0].balance, 1_000.0);
        assert!(report.series.final_balance() > report.summary.future_value);

        assert_eq!(report.comparison.len(), 11);
        let last = &report.comparison[10];
        assert_relative_eq!(last.without_interest, 25_000.0, max_relative = 1e-12);
        assert_eq!(last.with_interest, report.series.final_balance());
    }

    #[test]
    fn test_zero_rate_plan() {
        let plan = SavingsPlan {
            annual_rate_percent: 0.0,
            ..SavingsPlan::default()
        };
        let report = report(&plan);
        assert_relative_eq!(report.summary.future_value, 25_000.0, max_relative = 1e-12);
        assert_eq!(report.summary.interest_earned, 0.0);

        let goal = report.goal.unwrap().goal;
        assert_relative_eq!(
            goal.required_monthly_contribution,
            50_000.0 / 60.0,
            max_relative = 1e-12
        );
    }
}
