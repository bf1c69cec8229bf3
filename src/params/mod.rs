//! Parameter value objects and scenario loading

mod data;
pub mod loader;

pub use data::{
    Compounding, DepletionSpec, GoalParameters, ProjectionParameters, RetirementPlan,
    RetirementProfile, MAX_AGE,
};
pub use loader::{load_scenarios, load_scenarios_from_reader, LoadError, ProjectionScenario};
