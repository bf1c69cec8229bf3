//! Compound Engine - financial projection library for savings and retirement planning
//!
//! This library provides:
//! - Closed-form future value with a principal/contribution split
//! - Yearly and per-period projection series
//! - Goal inversion (required contribution, time to goal)
//! - Two-phase retirement simulation with 4%-rule analysis, runway and advice
//! - Savings calculator assemblies and what-if scenarios
//! - Scientific calculator arithmetic

pub mod error;
pub mod config;
pub mod params;
pub mod projection;
pub mod retirement;
pub mod calculators;
pub mod scenario;
pub mod format;
pub mod arithmetic;

// Re-export commonly used types
pub use error::EngineError;
pub use config::{AdvisoryThresholds, EngineConfig};
pub use params::{GoalParameters, ProjectionParameters, RetirementPlan, RetirementProfile};
pub use projection::{
    future_value, generate_series, required_contribution, time_to_goal, GoalSolver, GoalTiming,
    ProjectionSeries,
};
pub use retirement::{
    months_funds_will_last, RetirementAnalysis, RetirementEngine, RetirementReport,
};
pub use calculators::{CompoundInterestReport, SavingsPlan, SavingsReport};
pub use scenario::ScenarioRunner;
