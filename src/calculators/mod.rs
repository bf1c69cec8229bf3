//! Result assemblies for the compound interest and savings calculators

pub mod compound;
pub mod savings;

pub use compound::CompoundInterestReport;
pub use savings::{GoalOutlook, GoalPlan, SavingsPlan, SavingsReport, SavingsSummary};
