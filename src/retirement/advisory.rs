//! Advisory rule engine
//!
//! Each rule is an independent predicate over the plan and its analysis. Rules
//! run in a fixed order, every match is reported, and a single on-track
//! recommendation is returned when nothing matches.

use crate::config::AdvisoryThresholds;
use crate::format::format_currency;
use crate::params::RetirementPlan;
use super::types::{Recommendation, RecommendationKind, RetirementAnalysis, Urgency};

type Rule = fn(&RetirementPlan, &RetirementAnalysis, &AdvisoryThresholds) -> Option<Recommendation>;

/// Evaluation order is presentation order
const RULES: [Rule; 5] = [
    high_withdrawal_rate,
    savings_shortfall,
    catch_up_contributions,
    conservative_returns,
    short_timeline,
];

/// All recommendations that apply to a plan
pub fn recommend(
    plan: &RetirementPlan,
    analysis: &RetirementAnalysis,
    thresholds: &AdvisoryThresholds,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter_map(|rule| rule(plan, analysis, thresholds))
        .collect();

    if recommendations.is_empty() {
        recommendations.push(on_track());
    }
    recommendations
}

fn high_withdrawal_rate(
    _plan: &RetirementPlan,
    analysis: &RetirementAnalysis,
    thresholds: &AdvisoryThresholds,
) -> Option<Recommendation> {
    if analysis.withdrawal_rate <= thresholds.high_withdrawal_rate_pct {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::HighWithdrawalRate,
        title: "High Withdrawal Rate".to_string(),
        message: format!(
            "Your planned withdrawal rate ({:.1}%) is above the recommended {}%. \
             Consider increasing savings or reducing retirement expenses.",
            analysis.withdrawal_rate, thresholds.high_withdrawal_rate_pct
        ),
        action: "Adjust plan".to_string(),
        urgency: Urgency::High,
    })
}

fn savings_shortfall(
    _plan: &RetirementPlan,
    analysis: &RetirementAnalysis,
    _thresholds: &AdvisoryThresholds,
) -> Option<Recommendation> {
    if analysis.shortfall <= 0.0 {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::SavingsShortfall,
        title: "Savings Shortfall".to_string(),
        message: format!(
            "You may need an additional {} to meet your retirement goals based on the 4% rule.",
            format_currency(analysis.shortfall)
        ),
        action: "Increase contributions".to_string(),
        urgency: Urgency::High,
    })
}

fn catch_up_contributions(
    plan: &RetirementPlan,
    _analysis: &RetirementAnalysis,
    thresholds: &AdvisoryThresholds,
) -> Option<Recommendation> {
    let monthly = plan.accumulation.monthly_contribution();
    if plan.current_age < thresholds.catch_up_age
        || monthly >= thresholds.catch_up_monthly_contribution
    {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::CatchUpContributions,
        title: "Catch-up Opportunity".to_string(),
        message: format!(
            "Consider taking advantage of catch-up contributions available to those {} and older.",
            thresholds.catch_up_age
        ),
        action: "Maximize contributions".to_string(),
        urgency: Urgency::Medium,
    })
}

fn conservative_returns(
    plan: &RetirementPlan,
    _analysis: &RetirementAnalysis,
    thresholds: &AdvisoryThresholds,
) -> Option<Recommendation> {
    if plan.accumulation.annual_rate_percent >= thresholds.conservative_return_pct {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::ConservativeReturns,
        title: "Conservative Returns".to_string(),
        message: "Your assumed returns may be conservative. Ensure your investment strategy \
                  aligns with your risk tolerance and timeline."
            .to_string(),
        action: "Review investments".to_string(),
        urgency: Urgency::Medium,
    })
}

fn short_timeline(
    plan: &RetirementPlan,
    _analysis: &RetirementAnalysis,
    thresholds: &AdvisoryThresholds,
) -> Option<Recommendation> {
    if plan.years_to_retirement() >= thresholds.short_timeline_years {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::ShortTimeline,
        title: "Short Timeline".to_string(),
        message: format!(
            "With less than {} years to retirement, \
             focus on capital preservation and reducing risk.",
            thresholds.short_timeline_years
        ),
        action: "Adjust strategy".to_string(),
        urgency: Urgency::Medium,
    })
}

fn on_track() -> Recommendation {
    Recommendation {
        kind: RecommendationKind::OnTrack,
        title: "On Track".to_string(),
        message: "Your retirement plan appears to be on track! \
                  Continue with your current strategy."
            .to_string(),
        action: "Maintain course".to_string(),
        urgency: Urgency::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RetirementProfile;
    use crate::retirement::RetirementEngine;

    fn kinds_for(profile: RetirementProfile) -> Vec<RecommendationKind> {
        let plan = profile.plan().unwrap();
        let engine = RetirementEngine::default();
        let analysis = engine.analyze(&plan).unwrap();
        recommend(&plan, &analysis, &engine.config().advisory)
            .into_iter()
            .map(|r| r.kind)
            .collect()
    }

    #[test]
    fn test_default_profile_is_on_track() {
        assert_eq!(kinds_for(RetirementProfile::default()), vec![RecommendationKind::OnTrack]);
    }

    #[test]
    fn test_all_matching_rules_reported_in_order() {
        let kinds = kinds_for(RetirementProfile {
            current_age: 58,
            retirement_age: 63,
            life_expectancy: 90,
            current_savings: 100_000.0,
            monthly_contribution: 400.0,
            annual_return_percent: 5.0,
            inflation_rate_percent: 3.0,
            monthly_withdrawal: 5_000.0,
            social_security: 1_000.0,
            pension: 0.0,
        });
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::HighWithdrawalRate,
                RecommendationKind::SavingsShortfall,
                RecommendationKind::CatchUpContributions,
                RecommendationKind::ConservativeReturns,
                RecommendationKind::ShortTimeline,
            ]
        );
    }

    #[test]
    fn test_single_rule() {
        let kinds = kinds_for(RetirementProfile {
            annual_return_percent: 5.5,
            current_savings: 500_000.0,
            ..RetirementProfile::default()
        });
        assert_eq!(kinds, vec![RecommendationKind::ConservativeReturns]);
    }

    #[test]
    fn test_catch_up_needs_age_and_low_contribution() {
        let base = RetirementProfile {
            current_age: 50,
            retirement_age: 65,
            current_savings: 2_000_000.0,
            ..RetirementProfile::default()
        };
        assert!(kinds_for(base.clone()).contains(&RecommendationKind::CatchUpContributions));

        let generous = RetirementProfile { monthly_contribution: 1_000.0, ..base.clone() };
        assert!(!kinds_for(generous).contains(&RecommendationKind::CatchUpContributions));

        let younger = RetirementProfile { current_age: 49, ..base };
        assert!(!kinds_for(younger).contains(&RecommendationKind::CatchUpContributions));
    }

    #[test]
    fn test_shortfall_message_formats_amount() {
        let plan = RetirementProfile {
            current_savings: 0.0,
            monthly_contribution: 100.0,
            ..RetirementProfile::default()
        }
        .plan()
        .unwrap();
        let engine = RetirementEngine::default();
        let analysis = engine.analyze(&plan).unwrap();
        let recs = recommend(&plan, &analysis, &engine.config().advisory);
        let shortfall = recs
            .iter()
            .find(|r| r.kind == RecommendationKind::SavingsShortfall)
            .expect("shortfall expected");
        assert!(shortfall.message.contains(&format_currency(analysis.shortfall)));
        assert_eq!(shortfall.urgency, Urgency::High);
    }
}
