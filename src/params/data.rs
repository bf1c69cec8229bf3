//! Parameter value objects passed into the engine
//!
//! Callers build these fresh from their current inputs on every recompute;
//! the engine never mutates them.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_periods, ensure_rate, EngineError};

/// Oldest age accepted anywhere in a retirement plan
pub const MAX_AGE: u32 = 150;

/// Common compounding frequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compounding {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

impl Compounding {
    /// Number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Compounding::Annually => 1,
            Compounding::SemiAnnually => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
            Compounding::Daily => 365,
        }
    }

    /// Map a period count back to a named frequency, if it is one
    pub fn from_periods(periods_per_year: u32) -> Option<Self> {
        match periods_per_year {
            1 => Some(Compounding::Annually),
            2 => Some(Compounding::SemiAnnually),
            4 => Some(Compounding::Quarterly),
            12 => Some(Compounding::Monthly),
            365 => Some(Compounding::Daily),
            _ => None,
        }
    }
}

/// Inputs to a single compounding projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Lump sum at the start of the projection
    pub principal: f64,

    /// Deposit made each compounding period
    pub periodic_contribution: f64,

    /// Nominal annual rate in percent (7.0 = 7%)
    pub annual_rate_percent: f64,

    /// Compounding periods per year (n)
    pub periods_per_year: u32,

    /// Whole years projected
    pub years: u32,
}

impl ProjectionParameters {
    pub fn new(
        principal: f64,
        periodic_contribution: f64,
        annual_rate_percent: f64,
        periods_per_year: u32,
        years: u32,
    ) -> Self {
        Self {
            principal,
            periodic_contribution,
            annual_rate_percent,
            periods_per_year,
            years,
        }
    }

    /// Build parameters from a monthly deposit, spreading it across compounding periods
    ///
    /// With quarterly compounding a $200/month saver deposits $600 per period.
    pub fn from_monthly(
        principal: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        periods_per_year: u32,
        years: u32,
    ) -> Self {
        let per_period = if periods_per_year == 0 {
            monthly_contribution
        } else {
            monthly_contribution * 12.0 / periods_per_year as f64
        };
        Self::new(principal, per_period, annual_rate_percent, periods_per_year, years)
    }

    /// Check every field; run this once before handing the parameters to a loop
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_non_negative("principal", self.principal)?;
        ensure_non_negative("periodic_contribution", self.periodic_contribution)?;
        ensure_periods(self.periods_per_year)?;
        ensure_rate(self.annual_rate_percent, self.periods_per_year)?;
        Ok(())
    }

    /// Rate applied each compounding period (r/n as a decimal)
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / self.periods_per_year as f64
    }

    /// Total deposits (principal plus contributions) after `years`
    pub fn contributions_after(&self, years: f64) -> f64 {
        self.principal + self.periodic_contribution * self.periods_per_year as f64 * years
    }

    /// Monthly equivalent of the per-period contribution
    pub fn monthly_contribution(&self) -> f64 {
        self.periodic_contribution * self.periods_per_year as f64 / 12.0
    }

    /// Same parameters over a different duration
    pub fn with_years(&self, years: u32) -> Self {
        Self { years, ..self.clone() }
    }
}

/// A savings target used to invert the future-value formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalParameters {
    pub target_amount: f64,
    pub target_years: u32,
}

impl GoalParameters {
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_non_negative("target_amount", self.target_amount)?;
        if self.target_years == 0 {
            return Err(EngineError::invalid(
                "target_years",
                0.0,
                "goal timeframe must be at least one year",
            ));
        }
        Ok(())
    }
}

/// Retirement inputs as a planner form collects them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementProfile {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Expected annual return in percent
    pub annual_return_percent: f64,
    /// Expected annual inflation in percent
    pub inflation_rate_percent: f64,
    /// Desired monthly income in today's money
    pub monthly_withdrawal: f64,
    /// Monthly social security benefit in today's money
    pub social_security: f64,
    /// Monthly pension in today's money
    pub pension: f64,
}

impl Default for RetirementProfile {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 65,
            life_expectancy: 85,
            current_savings: 50_000.0,
            monthly_contribution: 500.0,
            annual_return_percent: 7.0,
            inflation_rate_percent: 3.0,
            monthly_withdrawal: 3_000.0,
            social_security: 1_500.0,
            pension: 0.0,
        }
    }
}

impl RetirementProfile {
    /// Validate and split the profile into its accumulation and depletion halves
    pub fn plan(&self) -> Result<RetirementPlan, EngineError> {
        check_ages(self.current_age, self.retirement_age, self.life_expectancy)?;
        ensure_non_negative("monthly_withdrawal", self.monthly_withdrawal)?;
        ensure_non_negative("social_security", self.social_security)?;
        ensure_non_negative("pension", self.pension)?;
        ensure_rate(self.inflation_rate_percent, 1)?;

        let accumulation = ProjectionParameters::new(
            self.current_savings,
            self.monthly_contribution,
            self.annual_return_percent,
            12,
            self.retirement_age - self.current_age,
        );
        accumulation.validate()?;

        Ok(RetirementPlan {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            life_expectancy: self.life_expectancy,
            accumulation,
            depletion: DepletionSpec {
                monthly_withdrawal: self.monthly_withdrawal,
                social_security: self.social_security,
                pension: self.pension,
                inflation_rate_percent: self.inflation_rate_percent,
                retirement_years: self.life_expectancy - self.retirement_age,
            },
        })
    }
}

/// Ages must be ordered current <= retirement <= life expectancy and no older than [`MAX_AGE`]
fn check_ages(
    current_age: u32,
    retirement_age: u32,
    life_expectancy: u32,
) -> Result<(), EngineError> {
    let reason = if retirement_age < current_age {
        "retirement age is before current age"
    } else if life_expectancy < retirement_age {
        "life expectancy is before retirement age"
    } else if life_expectancy > MAX_AGE {
        "ages must not exceed 150"
    } else {
        return Ok(());
    };

    Err(EngineError::InvalidAges {
        current_age,
        retirement_age,
        life_expectancy,
        reason,
    })
}

/// Withdrawal side of a retirement plan, amounts in today's money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionSpec {
    pub monthly_withdrawal: f64,
    pub social_security: f64,
    pub pension: f64,
    pub inflation_rate_percent: f64,
    pub retirement_years: u32,
}

impl DepletionSpec {
    /// Guaranteed monthly income that offsets portfolio withdrawals
    pub fn monthly_income_offsets(&self) -> f64 {
        self.social_security + self.pension
    }
}

/// Validated two-phase retirement plan
///
/// The accumulation parameters always compound monthly with a monthly
/// contribution; the depletion half seeds from the accumulation's final balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub accumulation: ProjectionParameters,
    pub depletion: DepletionSpec,
}

impl RetirementPlan {
    /// Re-check the ages and accumulation inputs of a plan built by hand
    pub fn validate(&self) -> Result<(), EngineError> {
        check_ages(self.current_age, self.retirement_age, self.life_expectancy)?;
        self.accumulation.validate()
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age - self.current_age
    }

    pub fn retirement_years(&self) -> u32 {
        self.depletion.retirement_years
    }

    /// Monthly growth rate shared by both phases
    pub fn monthly_rate(&self) -> f64 {
        self.accumulation.annual_rate_percent / 100.0 / 12.0
    }

    /// Growth of prices between today and the retirement date
    pub fn inflation_factor(&self) -> f64 {
        (1.0 + self.depletion.inflation_rate_percent / 100.0)
            .powi(self.years_to_retirement() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_monthly_spreads_contribution() {
        let quarterly = ProjectionParameters::from_monthly(0.0, 200.0, 5.0, 4, 10);
        assert_eq!(quarterly.periodic_contribution, 600.0);
        assert_eq!(quarterly.monthly_contribution(), 200.0);

        let daily = ProjectionParameters::from_monthly(0.0, 365.0, 5.0, 365, 1);
        assert!((daily.periodic_contribution - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        assert!(ProjectionParameters::new(-1.0, 0.0, 5.0, 12, 10).validate().is_err());
        assert!(ProjectionParameters::new(0.0, f64::NAN, 5.0, 12, 10).validate().is_err());
        assert!(ProjectionParameters::new(0.0, 0.0, 5.0, 0, 10).validate().is_err());
        assert!(ProjectionParameters::new(0.0, 0.0, f64::INFINITY, 12, 10).validate().is_err());
        assert!(ProjectionParameters::new(1000.0, 100.0, 0.0, 12, 0).validate().is_ok());
    }

    #[test]
    fn test_compounding_round_trip() {
        for c in [
            Compounding::Annually,
            Compounding::SemiAnnually,
            Compounding::Quarterly,
            Compounding::Monthly,
            Compounding::Daily,
        ] {
            assert_eq!(Compounding::from_periods(c.periods_per_year()), Some(c));
        }
        assert_eq!(Compounding::from_periods(52), None);
    }

    #[test]
    fn test_profile_splits_into_plan() {
        let plan = RetirementProfile::default().plan().unwrap();
        assert_eq!(plan.years_to_retirement(), 35);
        assert_eq!(plan.retirement_years(), 20);
        assert_eq!(plan.accumulation.periods_per_year, 12);
        assert_eq!(plan.accumulation.principal, 50_000.0);
        assert_eq!(plan.depletion.monthly_income_offsets(), 1_500.0);
    }

    #[test]
    fn test_profile_rejects_inverted_ages() {
        let profile = RetirementProfile {
            current_age: 70,
            ..RetirementProfile::default()
        };
        assert!(matches!(profile.plan(), Err(EngineError::InvalidAges { .. })));

        let profile = RetirementProfile {
            life_expectancy: 60,
            ..RetirementProfile::default()
        };
        assert!(matches!(profile.plan(), Err(EngineError::InvalidAges { .. })));
    }

    #[test]
    fn test_profile_rejects_ages_beyond_lifespan() {
        let profile = RetirementProfile {
            current_age: 0,
            retirement_age: 400_000_000,
            life_expectancy: 400_000_000,
            ..RetirementProfile::default()
        };
        match profile.plan() {
            Err(EngineError::InvalidAges { reason, .. }) => {
                assert_eq!(reason, "ages must not exceed 150")
            }
            other => panic!("expected InvalidAges, got {:?}", other),
        }

        let oldest = RetirementProfile {
            current_age: 100,
            retirement_age: 120,
            life_expectancy: MAX_AGE,
            ..RetirementProfile::default()
        };
        let plan = oldest.plan().unwrap();
        assert_eq!(plan.retirement_years(), 30);

        let mut tampered = plan;
        tampered.life_expectancy = MAX_AGE + 1;
        assert!(matches!(tampered.validate(), Err(EngineError::InvalidAges { .. })));
    }

    #[test]
    fn test_goal_requires_timeframe() {
        let goal = GoalParameters { target_amount: 50_000.0, target_years: 0 };
        assert!(goal.validate().is_err());
    }
}
