//! Projection series generators
//!
//! `generate_series` re-evaluates the closed form at every year boundary so each
//! point is independently exact. `generate_period_series` walks every
//! compounding period instead, which is what callers need when deposit timing
//! inside the year matters.

use crate::error::EngineError;
use crate::params::ProjectionParameters;
use super::series::{ComparisonPoint, ProjectionPoint, ProjectionSeries};
use super::state::{BalanceState, ContributionTiming};

/// Yearly series from the closed-form future value, `years + 1` points
pub fn generate_series(params: &ProjectionParameters) -> Result<ProjectionSeries, EngineError> {
    params.validate()?;

    let series = (0..=params.years)
        .map(|year| {
            let t = year as f64;
            ProjectionPoint::new(
                year,
                params.future_value_unchecked(t),
                params.contributions_after(t),
            )
        })
        .collect::<ProjectionSeries>();

    log::debug!(
        "generated {} yearly points, final balance {:.2}",
        series.len(),
        series.final_balance()
    );
    Ok(series)
}

/// Yearly snapshots of a period-by-period simulation
///
/// Interest is credited `periods_per_year` times inside each year at r/n with
/// the deposit placed according to `timing`. With `EndOfPeriod` the result
/// matches `generate_series`.
pub fn generate_period_series(
    params: &ProjectionParameters,
    timing: ContributionTiming,
) -> Result<ProjectionSeries, EngineError> {
    params.validate()?;

    let rate = params.periodic_rate();
    let mut state = BalanceState::opening(params.principal);
    let mut series = ProjectionSeries::with_capacity(params.years as usize + 1);
    series.push(ProjectionPoint::new(0, state.balance, state.contributions));

    for year in 1..=params.years {
        for _period in 0..params.periods_per_year {
            state.advance(rate, params.periodic_contribution, timing);
        }
        series.push(ProjectionPoint::new(year, state.balance, state.contributions));
    }

    Ok(series)
}

/// Balances with compounding against plain deposits with no interest
pub fn comparison_series(
    params: &ProjectionParameters,
    timing: ContributionTiming,
) -> Result<Vec<ComparisonPoint>, EngineError> {
    let with_interest = generate_period_series(params, timing)?;

    Ok(with_interest
        .iter()
        .map(|point| ComparisonPoint {
            year: point.period_index,
            with_interest: point.balance,
            without_interest: point.contributions_to_date,
        })
        .collect())
}
