//! How long a balance lasts under a level monthly withdrawal

use crate::config::DEFAULT_RUNWAY_CAP_MONTHS;

/// Months until `opening_balance` is used up, capped at 600
///
/// Each month the balance grows by `monthly_rate` and then pays
/// `monthly_withdrawal`; the month in which it reaches zero counts. When the
/// withdrawal never drains the balance the cap is returned, which callers
/// read as "effectively indefinite".
pub fn months_funds_will_last(
    opening_balance: f64,
    monthly_withdrawal: f64,
    monthly_rate: f64,
) -> u32 {
    months_funds_will_last_capped(
        opening_balance,
        monthly_withdrawal,
        monthly_rate,
        DEFAULT_RUNWAY_CAP_MONTHS,
    )
}

/// Same as [`months_funds_will_last`] with an explicit cap
pub fn months_funds_will_last_capped(
    opening_balance: f64,
    monthly_withdrawal: f64,
    monthly_rate: f64,
    cap_months: u32,
) -> u32 {
    if opening_balance <= 0.0 {
        return 0;
    }
    if monthly_withdrawal <= 0.0 {
        return cap_months;
    }

    let mut remaining = opening_balance;
    let mut months = 0;
    while remaining > 0.0 && months < cap_months {
        remaining = remaining * (1.0 + monthly_rate) - monthly_withdrawal;
        months += 1;
    }

    if remaining > 0.0 {
        log::debug!("runway capped at {} months with {:.2} remaining", cap_months, remaining);
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_withdrawal_never_depletes() {
        assert_eq!(months_funds_will_last(100_000.0, 0.0, 0.005), 600);
        assert_eq!(months_funds_will_last_capped(100_000.0, 0.0, 0.0, 360), 360);
    }

    #[test]
    fn test_empty_balance() {
        assert_eq!(months_funds_will_last(0.0, 1_000.0, 0.005), 0);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        assert_eq!(months_funds_will_last(12_000.0, 1_000.0, 0.0), 12);
        // Partial final month still counts
        assert_eq!(months_funds_will_last(12_500.0, 1_000.0, 0.0), 13);
    }

    #[test]
    fn test_interest_covering_withdrawal_hits_cap() {
        // 0.5% of 300k = 1,500 per month of growth
        assert_eq!(months_funds_will_last(300_000.0, 1_400.0, 0.005), 600);
    }

    #[test]
    fn test_growth_extends_runway() {
        let flat = months_funds_will_last(100_000.0, 1_000.0, 0.0);
        let growing = months_funds_will_last(100_000.0, 1_000.0, 0.004);
        assert_eq!(flat, 100);
        assert!(growing > flat);
        assert!(growing <= 600);
    }
}
