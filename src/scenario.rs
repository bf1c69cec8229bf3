//! What-if runner for savings plans
//!
//! Holds one base plan, then projects variations of it and reports each
//! against the base future value.

use serde::{Deserialize, Serialize};

use crate::calculators::SavingsPlan;
use crate::error::EngineError;
use crate::format::{format_currency, format_percent};

/// A single change applied to the base plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WhatIf {
    /// Scale the monthly contribution, 1.1 = +10%
    ContributionFactor(f64),
    /// Add percentage points to the annual rate
    RateIncrease(f64),
    /// Save for additional whole years
    ExtendYears(u32),
    /// Scale the initial savings, 1.2 = +20%
    InitialSavingsFactor(f64),
}

impl WhatIf {
    /// +10% contribution, +1 point rate, +5 years, +20% initial savings
    pub fn standard() -> [WhatIf; 4] {
        [
            WhatIf::ContributionFactor(1.1),
            WhatIf::RateIncrease(1.0),
            WhatIf::ExtendYears(5),
            WhatIf::InitialSavingsFactor(1.2),
        ]
    }

    pub fn apply(&self, base: &SavingsPlan) -> SavingsPlan {
        let mut plan = base.clone();
        match *self {
            WhatIf::ContributionFactor(f) => plan.monthly_contribution *= f,
            WhatIf::RateIncrease(points) => plan.annual_rate_percent += points,
            WhatIf::ExtendYears(years) => plan.years += years,
            WhatIf::InitialSavingsFactor(f) => plan.initial_savings *= f,
        }
        plan
    }

    pub fn title(&self) -> String {
        match *self {
            WhatIf::ContributionFactor(f) => {
                format!("Increase contributions by {:.0}%", (f - 1.0) * 100.0)
            }
            WhatIf::RateIncrease(points) => format!("Increase interest rate by {}%", points),
            WhatIf::ExtendYears(years) => format!("Extend by {} years", years),
            WhatIf::InitialSavingsFactor(f) => format!("Start with {:.0}% more", (f - 1.0) * 100.0),
        }
    }

    fn describe(&self, base: &SavingsPlan, varied: &SavingsPlan) -> String {
        match self {
            WhatIf::ContributionFactor(_) => format!(
                "Save {} more per month",
                format_currency(varied.monthly_contribution - base.monthly_contribution)
            ),
            WhatIf::RateIncrease(_) => format!(
                "From {} to {} annual return",
                format_percent(base.annual_rate_percent),
                format_percent(varied.annual_rate_percent)
            ),
            WhatIf::ExtendYears(_) => format!("{} → {} years", base.years, varied.years),
            WhatIf::InitialSavingsFactor(_) => format!(
                "Initial: {} → {}",
                format_currency(base.initial_savings),
                format_currency(varied.initial_savings)
            ),
        }
    }
}

/// Outcome of one what-if against the base plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub what_if: WhatIf,
    pub title: String,
    pub description: String,
    pub future_value: f64,
    /// Future value gained over the base plan
    pub gain: f64,
}

/// Pre-validated base plan that variations are projected against
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: SavingsPlan,
    base_future_value: f64,
}

impl ScenarioRunner {
    pub fn new(base: SavingsPlan) -> Result<Self, EngineError> {
        let base_future_value = base.projection().future_value()?;
        Ok(Self { base, base_future_value })
    }

    pub fn base(&self) -> &SavingsPlan {
        &self.base
    }

    pub fn base_future_value(&self) -> f64 {
        self.base_future_value
    }

    /// Project a single variation
    pub fn run(&self, what_if: WhatIf) -> Result<ScenarioOutcome, EngineError> {
        let varied = what_if.apply(&self.base);
        let future_value = varied.projection().future_value()?;

        Ok(ScenarioOutcome {
            what_if,
            title: what_if.title(),
            description: what_if.describe(&self.base, &varied),
            future_value,
            gain: future_value - self.base_future_value,
        })
    }

    /// Project several variations, each against the same base
    pub fn run_scenarios(&self, what_ifs: &[WhatIf]) -> Result<Vec<ScenarioOutcome>, EngineError> {
        what_ifs.iter().map(|w| self.run(*w)).collect()
    }

    /// The four standard variations
    pub fn run_standard(&self) -> Result<Vec<ScenarioOutcome>, EngineError> {
        self.run_scenarios(&WhatIf::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_what_ifs_all_gain() {
        let runner = ScenarioRunner::new(SavingsPlan::default()).unwrap();
        let outcomes = runner.run_standard().unwrap();

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|o| o.gain > 0.0));
        assert_eq!(outcomes[0].title, "Increase contributions by 10%");
        assert_eq!(outcomes[1].title, "Increase interest rate by 1%");
        assert_eq!(outcomes[2].title, "Extend by 5 years");
        assert_eq!(outcomes[3].title, "Start with 20% more");
        assert_eq!(outcomes[2].description, "10 → 15 years");
        assert_eq!(outcomes[3].description, "Initial: $1,000 → $1,200");
    }

    #[test]
    fn test_initial_savings_gain_is_compounded_delta() {
        let runner = ScenarioRunner::new(SavingsPlan::default()).unwrap();
        let outcome = runner.run(WhatIf::InitialSavingsFactor(1.2)).unwrap();
        // Only the extra $200 lump sum differs: 200 * (1 + 0.05/12)^120
        let expected = 200.0 * (1.0 + 0.05 / 12.0_f64).powi(120);
        assert_relative_eq!(outcome.gain, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_base_unchanged_by_runs() {
        let runner = ScenarioRunner::new(SavingsPlan::default()).unwrap();
        let before = runner.base_future_value();
        runner.run_standard().unwrap();
        assert_eq!(runner.base(), &SavingsPlan::default());
        assert_eq!(runner.base_future_value(), before);
    }

    #[test]
    fn test_invalid_base_rejected() {
        let plan = SavingsPlan {
            periods_per_year: 0,
            ..SavingsPlan::default()
        };
        assert!(ScenarioRunner::new(plan).is_err());
    }
}
