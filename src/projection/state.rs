//! Running balance tracked through an iterative projection

use serde::{Deserialize, Serialize};

/// When the periodic deposit lands relative to interest crediting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionTiming {
    /// Deposit, then credit interest on the new balance (annuity due)
    StartOfPeriod,
    /// Credit interest, then deposit (ordinary annuity, matches the closed form)
    EndOfPeriod,
}

/// Balance state at a point in an iterative projection
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceState {
    /// Periods elapsed since the opening balance
    pub period: u32,

    /// Current balance
    pub balance: f64,

    /// Cumulative deposits including the opening balance
    pub contributions: f64,

    /// Cumulative interest credited
    pub interest: f64,

    /// Cumulative withdrawals paid out
    pub withdrawals: f64,
}

impl BalanceState {
    /// State before any period has run
    pub fn opening(balance: f64) -> Self {
        Self {
            period: 0,
            balance,
            contributions: balance,
            interest: 0.0,
            withdrawals: 0.0,
        }
    }

    /// Credit one period of interest at `rate`; returns the interest credited
    pub fn grow(&mut self, rate: f64) -> f64 {
        let grown = self.balance * (1.0 + rate);
        let credited = grown - self.balance;
        self.balance = grown;
        self.interest += credited;
        credited
    }

    pub fn deposit(&mut self, amount: f64) {
        self.balance += amount;
        self.contributions += amount;
    }

    /// Withdraw up to `amount`, never taking the balance below zero; returns the amount paid
    pub fn withdraw(&mut self, amount: f64) -> f64 {
        let paid = amount.min(self.balance).max(0.0);
        self.balance -= paid;
        self.withdrawals += paid;
        paid
    }

    /// Run one full compounding period with a deposit
    pub fn advance(&mut self, rate: f64, deposit: f64, timing: ContributionTiming) {
        match timing {
            ContributionTiming::StartOfPeriod => {
                self.deposit(deposit);
                self.grow(rate);
            }
            ContributionTiming::EndOfPeriod => {
                self.grow(rate);
                self.deposit(deposit);
            }
        }
        self.period += 1;
    }
}
