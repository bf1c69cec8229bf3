//! Compound interest calculator result

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::params::ProjectionParameters;
use crate::projection::{
    future_value_breakdown, generate_series, yearly_breakdown, FutureValueBreakdown,
    ProjectionSeries, YearlyGrowth,
};

/// Everything the compound interest calculator displays for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestReport {
    pub future_value: f64,

    /// Principal plus every periodic contribution
    pub total_contributions: f64,

    pub interest_earned: f64,

    pub breakdown: FutureValueBreakdown,

    /// Deposits as a percentage of the future value
    pub principal_share_pct: f64,

    /// Interest as a percentage of the future value
    pub interest_share_pct: f64,

    /// One point per year, index 0 = principal
    pub series: ProjectionSeries,

    pub yearly: Vec<YearlyGrowth>,
}

impl CompoundInterestReport {
    pub fn calculate(params: &ProjectionParameters) -> Result<Self, EngineError> {
        let breakdown = future_value_breakdown(
            params.principal,
            params.periodic_contribution,
            params.annual_rate_percent,
            params.periods_per_year,
            params.years as f64,
        )?;
        let series = generate_series(params)?;
        let yearly = yearly_breakdown(&series);

        let future_value = breakdown.total;
        let total_contributions = params.contributions_after(params.years as f64);
        let interest_earned = future_value - total_contributions;

        Ok(Self {
            future_value,
            total_contributions,
            interest_earned,
            breakdown,
            principal_share_pct: share_of(total_contributions, future_value),
            interest_share_pct: share_of(interest_earned, future_value),
            series,
            yearly,
        })
    }
}

fn share_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
