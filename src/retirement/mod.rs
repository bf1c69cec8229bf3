//! Retirement planning
//!
//! A plan accumulates monthly until the retirement date, then draws down an
//! inflation-adjusted withdrawal net of social security and pension until
//! life expectancy. On top of the simulation sit the 4%-rule sufficiency
//! analysis, the funds runway, advisory rules and planning milestones.

mod advisory;
mod milestones;
mod runway;
mod simulator;
mod types;

pub use advisory::recommend;
pub use milestones::milestones;
pub use runway::{months_funds_will_last, months_funds_will_last_capped};
pub use simulator::{net_monthly_withdrawal, RetirementEngine};
pub use types::{
    Milestone, MonthlyBalance, Recommendation, RecommendationKind, RetirementAnalysis,
    RetirementPhase, RetirementProjection, RetirementReport, Urgency, WithdrawalRisk,
    YearlyBalance,
};
