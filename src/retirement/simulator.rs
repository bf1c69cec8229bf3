//! Two-phase retirement simulation and sufficiency analysis

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::params::RetirementPlan;
use crate::projection::BalanceState;
use super::advisory::recommend;
use super::milestones::milestones;
use super::runway::months_funds_will_last_capped;
use super::types::{
    MonthlyBalance, RetirementAnalysis, RetirementPhase, RetirementProjection, RetirementReport,
    WithdrawalRisk, YearlyBalance,
};

/// Retirement planner engine
///
/// Holds only configuration; every call recomputes from the plan it is given.
#[derive(Debug, Clone, Default)]
pub struct RetirementEngine {
    config: EngineConfig,
}

impl RetirementEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analysis, projection, advice and milestones in one pass
    pub fn report(&self, plan: &RetirementPlan) -> Result<RetirementReport, EngineError> {
        let analysis = self.analyze(plan)?;
        let projection = self.simulate(plan)?;
        let recommendations = recommend(plan, &analysis, &self.config.advisory);
        let milestones = milestones(plan, &projection);

        Ok(RetirementReport {
            analysis,
            projection,
            recommendations,
            milestones,
        })
    }

    /// Simulate the plan month by month through both phases
    ///
    /// Accumulation: grow by the monthly rate, then deposit the contribution.
    /// Depletion: grow, then withdraw the net need; once the balance cannot
    /// cover a withdrawal it is pinned at zero for the rest of the horizon.
    /// Depletion stops at life expectancy or the runway cap, whichever is first.
    /// An empty balance at retirement is exhausted in depletion month 0.
    pub fn simulate(&self, plan: &RetirementPlan) -> Result<RetirementProjection, EngineError> {
        self.config.validate()?;
        plan.validate()?;

        let monthly_rate = plan.monthly_rate();
        let contribution = plan.accumulation.periodic_contribution;
        let accumulation_months = plan.years_to_retirement() * 12;
        let depletion_months = (plan.retirement_years() * 12).min(self.config.runway_cap_months);
        let net_monthly_withdrawal = net_monthly_withdrawal(plan);

        let mut state = BalanceState::opening(plan.accumulation.principal);
        let mut monthly = Vec::with_capacity((accumulation_months + depletion_months) as usize);
        let mut yearly = vec![YearlyBalance {
            age: plan.current_age,
            year: 0,
            phase: RetirementPhase::Accumulation,
            balance: state.balance,
            contributions: 0.0,
            withdrawals: 0.0,
        }];

        let mut phase = RetirementPhase::Accumulation;
        let mut exhausted = false;
        let mut exhaustion_month = None;
        let mut year_contributions = 0.0;
        let mut year_withdrawals = 0.0;
        let mut balance_at_retirement = state.balance;

        for month in 1..=accumulation_months + depletion_months {
            if phase == RetirementPhase::Accumulation && month > accumulation_months {
                phase = RetirementPhase::Depletion;
                balance_at_retirement = state.balance;
                log::debug!("retirement reached with balance {:.2}", balance_at_retirement);
                if net_monthly_withdrawal > 0.0 && state.balance <= 0.0 {
                    state.balance = 0.0;
                    exhausted = true;
                    exhaustion_month = Some(0);
                }
            }

            let mut row = MonthlyBalance {
                month,
                phase,
                growth: 0.0,
                contribution: 0.0,
                withdrawal: 0.0,
                balance: 0.0,
                funds_exhausted: exhausted,
            };

            match phase {
                RetirementPhase::Accumulation => {
                    row.growth = state.grow(monthly_rate);
                    state.deposit(contribution);
                    row.contribution = contribution;
                }
                RetirementPhase::Depletion if !exhausted => {
                    row.growth = state.grow(monthly_rate);
                    row.withdrawal = state.withdraw(net_monthly_withdrawal);
                    if net_monthly_withdrawal > 0.0 && state.balance <= 0.0 {
                        state.balance = 0.0;
                        exhausted = true;
                        row.funds_exhausted = true;
                        exhaustion_month = Some(month - accumulation_months);
                    }
                }
                RetirementPhase::Depletion => {}
            }
            row.balance = state.balance;
            year_contributions += row.contribution;
            year_withdrawals += row.withdrawal;
            monthly.push(row);

            if month % 12 == 0 {
                let year = month / 12;
                yearly.push(YearlyBalance {
                    age: plan.current_age + year,
                    year,
                    phase,
                    balance: state.balance,
                    contributions: year_contributions,
                    withdrawals: year_withdrawals,
                });
                year_contributions = 0.0;
                year_withdrawals = 0.0;
            }
        }

        if phase == RetirementPhase::Accumulation {
            // No depletion months were simulated
            balance_at_retirement = state.balance;
        }

        if let Some(m) = exhaustion_month {
            log::debug!("funds exhausted in depletion month {}", m);
        }

        Ok(RetirementProjection {
            monthly,
            yearly,
            balance_at_retirement,
            net_monthly_withdrawal,
            exhaustion_month,
            final_balance: state.balance,
        })
    }

    /// Sufficiency metrics: 4%-rule target, withdrawal rate, runway, shortfall or surplus
    pub fn analyze(&self, plan: &RetirementPlan) -> Result<RetirementAnalysis, EngineError> {
        self.config.validate()?;
        plan.validate()?;

        let years_to_retirement = plan.years_to_retirement();
        let total_retirement_savings =
            plan.accumulation.future_value_unchecked(years_to_retirement as f64);

        let inflation = plan.inflation_factor();
        let inflation_adjusted_withdrawal = plan.depletion.monthly_withdrawal * inflation;
        let annual_withdrawal_needed = inflation_adjusted_withdrawal * 12.0;
        let social_security_annual = plan.depletion.social_security * 12.0 * inflation;
        let pension_annual = plan.depletion.pension * 12.0 * inflation;
        let net_annual_withdrawal_needed =
            (annual_withdrawal_needed - social_security_annual - pension_annual).max(0.0);

        let required_savings = net_annual_withdrawal_needed / self.config.safe_withdrawal_rate;
        let withdrawal_rate =
            withdrawal_rate(net_annual_withdrawal_needed, total_retirement_savings);
        let withdrawal_risk = self.classify(withdrawal_rate);

        let cap = self.config.runway_cap_months;
        let months_funds_will_last = months_funds_will_last_capped(
            total_retirement_savings,
            net_annual_withdrawal_needed / 12.0,
            plan.monthly_rate(),
            cap,
        );

        Ok(RetirementAnalysis {
            years_to_retirement,
            retirement_years: plan.retirement_years(),
            total_retirement_savings,
            inflation_adjusted_withdrawal,
            annual_withdrawal_needed,
            social_security_annual,
            pension_annual,
            net_annual_withdrawal_needed,
            required_savings,
            withdrawal_rate,
            withdrawal_risk,
            months_funds_will_last,
            runway_capped: months_funds_will_last >= cap,
            shortfall: (required_savings - total_retirement_savings).max(0.0),
            surplus: (total_retirement_savings - required_savings).max(0.0),
        })
    }

    /// Band a withdrawal rate (percent) against the configured thresholds
    pub fn classify(&self, withdrawal_rate: f64) -> WithdrawalRisk {
        let thresholds = &self.config.advisory;
        if withdrawal_rate > thresholds.high_withdrawal_rate_pct {
            WithdrawalRisk::Aggressive
        } else if withdrawal_rate > thresholds.moderate_withdrawal_rate_pct {
            WithdrawalRisk::Moderate
        } else {
            WithdrawalRisk::Conservative
        }
    }
}

/// Desired withdrawal minus social security and pension, in retirement-date money, floored at zero
pub fn net_monthly_withdrawal(plan: &RetirementPlan) -> f64 {
    let inflation = plan.inflation_factor();
    let gross = plan.depletion.monthly_withdrawal * inflation;
    let offsets = plan.depletion.monthly_income_offsets() * inflation;
    (gross - offsets).max(0.0)
}

/// Annual need as a percentage of savings
///
/// Zero savings with a positive need is an infinite rate; zero need is 0%.
fn withdrawal_rate(net_annual_need: f64, savings: f64) -> f64 {
    if net_annual_need <= 0.0 {
        0.0
    } else if savings <= 0.0 {
        f64::INFINITY
    } else {
        net_annual_need / savings * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RetirementProfile;
    use crate::retirement::months_funds_will_last;
    use approx::assert_relative_eq;

    fn default_plan() -> RetirementPlan {
        RetirementProfile::default().plan().unwrap()
    }

    #[test]
    fn test_default_plan_analysis() {
        let engine = RetirementEngine::default();
        let analysis = engine.analyze(&default_plan()).unwrap();

        assert_eq!(analysis.years_to_retirement, 35);
        assert_eq!(analysis.retirement_years, 20);
        assert_relative_eq!(
            analysis.total_retirement_savings,
            1_475_834.892661415,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            analysis.net_annual_withdrawal_needed,
            50_649.52417868746,
            max_relative = 1e-9
        );
        assert_relative_eq!(analysis.required_savings, 1_266_238.1044671866, max_relative = 1e-9);
        assert_relative_eq!(analysis.withdrawal_rate, 3.431923478062626, max_relative = 1e-9);
        assert_eq!(analysis.withdrawal_risk, WithdrawalRisk::Moderate);

        assert_eq!(analysis.shortfall, 0.0);
        assert!(analysis.surplus > 209_000.0 && analysis.surplus < 210_000.0);
        assert!(analysis.is_on_track());

        assert_eq!(analysis.months_funds_will_last, 600);
        assert!(analysis.runway_capped);
    }

    #[test]
    fn test_projection_matches_closed_form_at_retirement() {
        let engine = RetirementEngine::default();
        let plan = default_plan();
        let projection = engine.simulate(&plan).unwrap();
        let analysis = engine.analyze(&plan).unwrap();

        assert_relative_eq!(
            projection.balance_at_retirement,
            analysis.total_retirement_savings,
            max_relative = 1e-9
        );
        assert_eq!(projection.monthly.len(), (35 + 20) * 12);
        assert_eq!(projection.yearly.len(), 35 + 20 + 1);
        assert_eq!(projection.yearly[0].balance, 50_000.0);
        assert_eq!(projection.at_age(65).unwrap().phase, RetirementPhase::Accumulation);
        assert_eq!(projection.at_age(66).unwrap().phase, RetirementPhase::Depletion);
        assert_eq!(projection.exhaustion_month, None);
    }

    #[test]
    fn test_phase_never_returns_to_accumulation() {
        let projection = RetirementEngine::default().simulate(&default_plan()).unwrap();
        let first_depletion = projection
            .monthly
            .iter()
            .position(|m| m.phase == RetirementPhase::Depletion)
            .unwrap();
        assert_eq!(first_depletion, 35 * 12);
        assert!(projection.monthly[first_depletion..]
            .iter()
            .all(|m| m.phase == RetirementPhase::Depletion));
    }

    fn depleting_plan() -> RetirementPlan {
        RetirementProfile {
            current_age: 60,
            retirement_age: 62,
            life_expectancy: 95,
            current_savings: 100_000.0,
            monthly_contribution: 0.0,
            annual_return_percent: 4.0,
            inflation_rate_percent: 0.0,
            monthly_withdrawal: 2_000.0,
            social_security: 0.0,
            pension: 0.0,
        }
        .plan()
        .unwrap()
    }

    #[test]
    fn test_exhaustion_pins_balance_at_zero() {
        let engine = RetirementEngine::default();
        let plan = depleting_plan();
        let projection = engine.simulate(&plan).unwrap();

        let month = projection.exhaustion_month.expect("plan should deplete");
        let depletion: Vec<_> = projection.depletion_months().collect();
        let index = (month - 1) as usize;

        assert!(!depletion[index - 1].funds_exhausted);
        assert!(depletion[index..].iter().all(|m| m.funds_exhausted && m.balance == 0.0));
        assert!(depletion[index].withdrawal < 2_000.0);
        assert!(depletion[index + 1..].iter().all(|m| m.withdrawal == 0.0));
        assert!(projection.monthly.iter().all(|m| m.balance >= 0.0));
        assert_eq!(projection.final_balance, 0.0);
        assert!(projection.exhaustion_age(plan.retirement_age).unwrap() < plan.life_expectancy);
    }

    #[test]
    fn test_exhaustion_consistent_with_runway() {
        let engine = RetirementEngine::default();
        let plan = depleting_plan();
        let projection = engine.simulate(&plan).unwrap();
        let analysis = engine.analyze(&plan).unwrap();

        let runway = months_funds_will_last(
            projection.balance_at_retirement,
            projection.net_monthly_withdrawal,
            plan.monthly_rate(),
        );
        assert_eq!(projection.exhaustion_month, Some(runway));
        assert_eq!(analysis.months_funds_will_last, runway);
        assert!(!analysis.runway_capped);
        assert_eq!(analysis.withdrawal_risk, WithdrawalRisk::Aggressive);
    }

    #[test]
    fn test_income_offsets_cover_withdrawal() {
        let plan = RetirementProfile {
            social_security: 2_000.0,
            pension: 1_500.0,
            ..RetirementProfile::default()
        }
        .plan()
        .unwrap();
        let engine = RetirementEngine::default();

        assert_eq!(net_monthly_withdrawal(&plan), 0.0);
        let analysis = engine.analyze(&plan).unwrap();
        assert_eq!(analysis.net_annual_withdrawal_needed, 0.0);
        assert_eq!(analysis.withdrawal_rate, 0.0);
        assert_eq!(analysis.withdrawal_risk, WithdrawalRisk::Conservative);
        assert_eq!(analysis.months_funds_will_last, 600);

        let projection = engine.simulate(&plan).unwrap();
        assert!(projection.depletion_months().all(|m| m.withdrawal == 0.0 && !m.funds_exhausted));
    }

    #[test]
    fn test_zero_savings_zero_return() {
        let plan = RetirementProfile {
            current_age: 65,
            retirement_age: 65,
            life_expectancy: 70,
            current_savings: 0.0,
            monthly_contribution: 0.0,
            annual_return_percent: 0.0,
            ..RetirementProfile::default()
        }
        .plan()
        .unwrap();
        let engine = RetirementEngine::default();

        let analysis = engine.analyze(&plan).unwrap();
        assert_eq!(analysis.total_retirement_savings, 0.0);
        assert!(analysis.withdrawal_rate.is_infinite());
        assert_eq!(analysis.withdrawal_risk, WithdrawalRisk::Aggressive);
        assert_eq!(analysis.months_funds_will_last, 0);

        // Nothing to draw on: exhausted on the retirement date, matching the zero runway
        let projection = engine.simulate(&plan).unwrap();
        assert_eq!(projection.exhaustion_month, Some(0));
        assert_eq!(
            projection.exhaustion_month,
            Some(months_funds_will_last(0.0, projection.net_monthly_withdrawal, 0.0))
        );
        assert_eq!(projection.exhaustion_age(65), Some(65));
        assert!(projection.depletion_months().all(|m| m.funds_exhausted && m.balance == 0.0));
        assert_eq!(projection.final_balance, 0.0);
    }

    #[test]
    fn test_oversized_ages_rejected_before_simulating() {
        let mut plan = RetirementProfile::default().plan().unwrap();
        plan.retirement_age = 400_000_000;
        plan.life_expectancy = 400_000_000;
        let engine = RetirementEngine::default();
        assert!(matches!(engine.simulate(&plan), Err(EngineError::InvalidAges { .. })));
        assert!(matches!(engine.analyze(&plan), Err(EngineError::InvalidAges { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let engine = RetirementEngine::new(EngineConfig {
            safe_withdrawal_rate: 0.0,
            ..EngineConfig::default()
        });
        let plan = RetirementProfile::default().plan().unwrap();
        assert!(matches!(
            engine.analyze(&plan),
            Err(EngineError::InvalidParameter { name: "safe_withdrawal_rate", .. })
        ));

        let engine = RetirementEngine::new(EngineConfig {
            runway_cap_months: 0,
            ..EngineConfig::default()
        });
        assert!(engine.simulate(&plan).is_err());
    }

    #[test]
    fn test_depletion_capped_by_runway_limit() {
        let plan = RetirementProfile {
            current_age: 20,
            retirement_age: 21,
            life_expectancy: 100,
            ..RetirementProfile::default()
        }
        .plan()
        .unwrap();
        let projection = RetirementEngine::default().simulate(&plan).unwrap();
        assert_eq!(projection.depletion_months().count(), 600);
    }

    #[test]
    fn test_classify_boundaries() {
        let engine = RetirementEngine::default();
        assert_eq!(engine.classify(4.0), WithdrawalRisk::Moderate);
        assert_eq!(engine.classify(4.01), WithdrawalRisk::Aggressive);
        assert_eq!(engine.classify(3.0), WithdrawalRisk::Conservative);
        assert_eq!(engine.classify(3.5), WithdrawalRisk::Moderate);
    }
}
