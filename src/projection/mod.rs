//! Compounding projections: future value, series and goal inversion

mod state;
mod engine;
mod series;
mod future_value;
mod solver;

pub use state::{BalanceState, ContributionTiming};
pub use engine::{comparison_series, generate_period_series, generate_series};
pub use series::{
    yearly_breakdown, ComparisonPoint, ProjectionPoint, ProjectionSeries, SeriesSummary,
    YearlyGrowth,
};
pub use future_value::{future_value, future_value_breakdown, round_currency, FutureValueBreakdown};
pub use solver::{
    goal_progress, required_contribution, required_contribution_for, time_to_goal, GoalSolver,
    GoalTiming, RequiredContribution,
};
