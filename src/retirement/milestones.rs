//! Planning checkpoints along a retirement projection

use crate::params::RetirementPlan;
use super::types::{Milestone, RetirementPhase, RetirementProjection};

/// Checkpoint rows at fixed offsets from today and from the retirement date
///
/// Ages outside `[current_age, life_expectancy]` are dropped, and an age that
/// falls on two offsets appears once. Rows come back in age order.
pub fn milestones(plan: &RetirementPlan, projection: &RetirementProjection) -> Vec<Milestone> {
    let mut ages: Vec<u32> = [
        Some(plan.current_age + 5),
        Some(plan.current_age + 10),
        plan.retirement_age.checked_sub(10),
        plan.retirement_age.checked_sub(5),
        Some(plan.retirement_age),
        Some(plan.retirement_age + 10),
    ]
    .into_iter()
    .flatten()
    .filter(|age| (plan.current_age..=plan.life_expectancy).contains(age))
    .collect();
    ages.sort_unstable();
    ages.dedup();

    ages.into_iter()
        .filter_map(|age| {
            let point = projection.at_age(age)?;
            let annual_flow = match point.phase {
                RetirementPhase::Accumulation => point.contributions,
                RetirementPhase::Depletion => point.withdrawals,
            };
            Some(Milestone {
                age,
                label: label(plan, age),
                projected_balance: point.balance,
                phase: point.phase,
                annual_flow,
                note: note(plan, age),
            })
        })
        .collect()
}

fn label(plan: &RetirementPlan, age: u32) -> &'static str {
    let retirement = plan.retirement_age;
    if age == retirement {
        "Retirement Start Date"
    } else if age == plan.current_age + 5 {
        "5-Year Planning Checkpoint"
    } else if age == plan.current_age + 10 {
        "10-Year Planning Checkpoint"
    } else if retirement.checked_sub(10) == Some(age) {
        "10 Years to Retirement"
    } else if retirement.checked_sub(5) == Some(age) {
        "5 Years to Retirement - Final Planning Stage"
    } else if age == retirement + 10 {
        "10 Years into Retirement"
    } else {
        "Retirement Planning Milestone"
    }
}

fn note(plan: &RetirementPlan, age: u32) -> &'static str {
    if age == plan.retirement_age {
        "Begin retirement withdrawals and social security"
    } else if age < plan.retirement_age {
        "Accumulation phase - focus on saving and investment growth"
    } else {
        "Retirement phase - monitor withdrawal rate and portfolio performance"
    }
}
