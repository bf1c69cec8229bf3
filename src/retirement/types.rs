//! Core types for retirement projections

use serde::{Deserialize, Serialize};

/// Phase of a retirement plan; a plan moves from accumulation to depletion and never back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetirementPhase {
    /// Working years, contributing each month
    Accumulation,
    /// Retired, withdrawing each month
    Depletion,
}

impl Default for RetirementPhase {
    fn default() -> Self {
        RetirementPhase::Accumulation
    }
}

/// One simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// Months since the start of the plan (1-indexed)
    pub month: u32,

    pub phase: RetirementPhase,

    /// Interest credited this month
    pub growth: f64,

    /// Deposit made this month (accumulation only)
    pub contribution: f64,

    /// Amount actually paid out this month (depletion only)
    pub withdrawal: f64,

    /// Balance at the end of the month, never negative
    pub balance: f64,

    /// Set from the first month the portfolio could not cover the withdrawal onwards
    pub funds_exhausted: bool,
}

/// Balance at a birthday, used for charts and milestone tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub age: u32,

    /// Years since the start of the plan
    pub year: u32,

    pub phase: RetirementPhase,

    pub balance: f64,

    /// Total contributed during the year ending at this age
    pub contributions: f64,

    /// Total withdrawn during the year ending at this age
    pub withdrawals: f64,
}

/// Full month-by-month projection of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub monthly: Vec<MonthlyBalance>,

    /// Index 0 is the opening balance at the current age
    pub yearly: Vec<YearlyBalance>,

    /// Balance on the retirement date, seeding the depletion phase
    pub balance_at_retirement: f64,

    /// Inflation-adjusted withdrawal net of income offsets, per month
    pub net_monthly_withdrawal: f64,

    /// Depletion month (1-indexed from retirement) in which funds ran out;
    /// 0 when the balance was already empty at retirement
    pub exhaustion_month: Option<u32>,

    /// Balance at the end of the simulated horizon
    pub final_balance: f64,
}

impl RetirementProjection {
    /// Age at which funds ran out, if they did
    pub fn exhaustion_age(&self, retirement_age: u32) -> Option<u32> {
        self.exhaustion_month.map(|m| retirement_age + m.saturating_sub(1) / 12)
    }

    /// Months of the depletion phase
    pub fn depletion_months(&self) -> impl Iterator<Item = &MonthlyBalance> {
        self.monthly.iter().filter(|m| m.phase == RetirementPhase::Depletion)
    }

    /// Yearly point at an exact age
    pub fn at_age(&self, age: u32) -> Option<&YearlyBalance> {
        self.yearly.iter().find(|y| y.age == age)
    }
}

/// Risk band of a withdrawal rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalRisk {
    /// At or below the moderate threshold (3% by default)
    Conservative,
    /// Above 3% up to and including 4% by default
    Moderate,
    /// Above 4% by default; high risk of running out
    Aggressive,
}

impl WithdrawalRisk {
    pub fn description(&self) -> &'static str {
        match self {
            WithdrawalRisk::Conservative => "Conservative withdrawal rate",
            WithdrawalRisk::Moderate => "Moderate withdrawal rate",
            WithdrawalRisk::Aggressive => "Above recommended 4% withdrawal rate",
        }
    }
}

/// Sufficiency metrics of a plan, all amounts in retirement-date money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementAnalysis {
    pub years_to_retirement: u32,
    pub retirement_years: u32,

    /// Accumulated balance on the retirement date
    pub total_retirement_savings: f64,

    /// Desired monthly withdrawal grown by inflation to the retirement date
    pub inflation_adjusted_withdrawal: f64,

    pub annual_withdrawal_needed: f64,
    pub social_security_annual: f64,
    pub pension_annual: f64,

    /// Annual need not covered by social security or pension, floored at zero
    pub net_annual_withdrawal_needed: f64,

    /// Savings needed under the safe withdrawal rate (4% rule)
    pub required_savings: f64,

    /// Net annual need as a percentage of savings
    pub withdrawal_rate: f64,
    pub withdrawal_risk: WithdrawalRisk,

    /// Months the savings cover the net need, capped
    pub months_funds_will_last: u32,

    /// True when the runway hit its cap (funds effectively never run out)
    pub runway_capped: bool,

    pub shortfall: f64,
    pub surplus: f64,
}

impl RetirementAnalysis {
    pub fn is_on_track(&self) -> bool {
        self.shortfall <= 0.0
    }

    /// Runway in years
    pub fn years_funds_will_last(&self) -> f64 {
        self.months_funds_will_last as f64 / 12.0
    }
}

/// Category of an advisory recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    HighWithdrawalRate,
    SavingsShortfall,
    CatchUpContributions,
    ConservativeReturns,
    ShortTimeline,
    OnTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A single piece of advice produced by the rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
    pub action: String,
    pub urgency: Urgency,
}

/// Planning checkpoint row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
    pub age: u32,
    pub label: &'static str,
    pub projected_balance: f64,
    pub phase: RetirementPhase,
    /// Contribution made in the year (accumulation) or withdrawals paid (depletion)
    pub annual_flow: f64,
    pub note: &'static str,
}

/// Everything the retirement planner shows for one plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetirementReport {
    pub analysis: RetirementAnalysis,
    pub projection: RetirementProjection,
    pub recommendations: Vec<Recommendation>,
    pub milestones: Vec<Milestone>,
}
