//! Compound Engine CLI
//!
//! Command-line front end for the projection engine: compound interest,
//! savings plans, goal inversion, retirement planning and calculator arithmetic.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use compound_engine::arithmetic::{
    evaluate_binary, evaluate_unary, AngleMode, BinaryOperator, UnaryFunction,
};
use compound_engine::calculators::{CompoundInterestReport, SavingsPlan, SavingsReport};
use compound_engine::format::{format_currency, format_percent};
use compound_engine::params::{GoalParameters, ProjectionParameters, RetirementProfile};
use compound_engine::projection::{required_contribution, GoalSolver, GoalTiming};
use compound_engine::retirement::RetirementEngine;
use compound_engine::scenario::ScenarioRunner;
use compound_engine::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "compound-engine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// JSON engine config; missing fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Future value of a lump sum plus a contribution every compounding period
    Compound {
        #[arg(long, default_value_t = 10_000.0)]
        principal: f64,
        /// Deposit per compounding period
        #[arg(long, default_value_t = 200.0)]
        contribution: f64,
        /// Annual rate in percent
        #[arg(long, default_value_t = 7.0)]
        rate: f64,
        /// Compounding periods per year
        #[arg(long, default_value_t = 12)]
        frequency: u32,
        #[arg(long, default_value_t = 30)]
        years: u32,
    },

    /// Savings growth, goal progress and what-if scenarios
    Savings {
        #[arg(long, default_value_t = 1_000.0)]
        initial: f64,
        #[arg(long, default_value_t = 200.0)]
        monthly: f64,
        #[arg(long, default_value_t = 5.0)]
        rate: f64,
        #[arg(long, default_value_t = 12)]
        frequency: u32,
        #[arg(long, default_value_t = 10)]
        years: u32,
        #[arg(long, default_value_t = 3.0)]
        inflation: f64,
        /// Savings target
        #[arg(long)]
        goal: Option<f64>,
        /// Years to reach the target
        #[arg(long, default_value_t = 5)]
        goal_years: u32,
    },

    /// Contribution needed for a target, and time to reach it from a starting point
    Goal {
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 5)]
        years: u32,
        #[arg(long, default_value_t = 5.0)]
        rate: f64,
        #[arg(long, default_value_t = 12)]
        frequency: u32,
        #[arg(long, default_value_t = 0.0)]
        principal: f64,
        /// Current monthly deposit, for the time-to-goal search
        #[arg(long, default_value_t = 0.0)]
        monthly: f64,
    },

    /// Two-phase retirement plan with analysis, advice and milestones
    Retire {
        #[arg(long, default_value_t = 30)]
        current_age: u32,
        #[arg(long, default_value_t = 65)]
        retirement_age: u32,
        #[arg(long, default_value_t = 85)]
        life_expectancy: u32,
        #[arg(long, default_value_t = 50_000.0)]
        savings: f64,
        #[arg(long, default_value_t = 500.0)]
        monthly: f64,
        #[arg(long, default_value_t = 7.0)]
        rate: f64,
        #[arg(long, default_value_t = 3.0)]
        inflation: f64,
        /// Desired monthly income in today's money
        #[arg(long, default_value_t = 3_000.0)]
        withdrawal: f64,
        #[arg(long, default_value_t = 1_500.0)]
        social_security: f64,
        #[arg(long, default_value_t = 0.0)]
        pension: f64,
    },

    /// Calculator arithmetic: `calc 2 ^ 10` or `calc sin 30 --degrees`
    Calc {
        #[arg(num_args = 2..=3, allow_hyphen_values = true)]
        expression: Vec<String>,
        /// Trigonometry in degrees
        #[arg(long, default_value_t = false)]
        degrees: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config: EngineConfig = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::from_env(),
    };
    config.validate().context("Invalid engine config")?;

    match cli.command {
        Command::Compound { principal, contribution, rate, frequency, years } => {
            let params = ProjectionParameters::new(principal, contribution, rate, frequency, years);
            let report =
                CompoundInterestReport::calculate(&params).context("Invalid projection inputs")?;
            if cli.json {
                return print_json(&report);
            }
            print_compound(&report);
        }

        Command::Savings {
            initial,
            monthly,
            rate,
            frequency,
            years,
            inflation,
            goal,
            goal_years,
        } => {
            let plan = SavingsPlan {
                initial_savings: initial,
                monthly_contribution: monthly,
                annual_rate_percent: rate,
                periods_per_year: frequency,
                years,
                inflation_rate_percent: inflation,
                goal: goal.map(|target_amount| GoalParameters {
                    target_amount,
                    target_years: goal_years,
                }),
            };
            let report =
                SavingsReport::calculate(&plan, &config).context("Invalid savings inputs")?;
            let scenarios = ScenarioRunner::new(plan)?.run_standard()?;
            if cli.json {
                return print_json(&serde_json::json!({ "report": report, "scenarios": scenarios }));
            }
            print_savings(&report);
            println!("\nWhat if:");
            for s in &scenarios {
                println!("  {:<32} +{:>12}  ({})", s.title, format_currency(s.gain), s.description);
            }
        }

        Command::Goal { target, years, rate, frequency, principal, monthly } => {
            let required = required_contribution(target, rate, frequency, years)?;
            let params = ProjectionParameters::from_monthly(principal, monthly, rate, frequency, 0);
            let timing = GoalSolver::from_config(&config).time_to_goal(&params, target)?;
            if cli.json {
                return print_json(&serde_json::json!({
                    "required": required,
                    "time_to_goal": timing,
                }));
            }
            println!("Target:               {}", format_currency(target));
            println!("Required per period:  {}", format_currency(required.per_period));
            println!("Required per month:   {}", format_currency(required.monthly_equivalent));
            println!("Time to goal:         {}", describe_timing(&timing));
        }

        Command::Retire {
            current_age,
            retirement_age,
            life_expectancy,
            savings,
            monthly,
            rate,
            inflation,
            withdrawal,
            social_security,
            pension,
        } => {
            let profile = RetirementProfile {
                current_age,
                retirement_age,
                life_expectancy,
                current_savings: savings,
                monthly_contribution: monthly,
                annual_return_percent: rate,
                inflation_rate_percent: inflation,
                monthly_withdrawal: withdrawal,
                social_security,
                pension,
            };
            let plan = profile.plan()?;
            let report = RetirementEngine::new(config).report(&plan)?;
            if cli.json {
                return print_json(&report);
            }
            print_retirement(&report);
        }

        Command::Calc { expression, degrees } => {
            let mode = if degrees { AngleMode::Degrees } else { AngleMode::Radians };
            let result = match expression.as_slice() {
                [lhs, op, rhs] => evaluate_binary(
                    parse_number(lhs)?,
                    op.parse::<BinaryOperator>()?,
                    parse_number(rhs)?,
                )?,
                [function, value] => {
                    evaluate_unary(function.parse::<UnaryFunction>()?, parse_number(value)?, mode)?
                }
                _ => bail!("expected `<lhs> <op> <rhs>` or `<function> <value>`"),
            };
            if cli.json {
                return print_json(&result);
            }
            println!("{}", result);
        }
    }

    Ok(())
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.parse::<f64>().with_context(|| format!("Not a number: {}", raw))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe_timing(timing: &GoalTiming) -> String {
    match timing {
        GoalTiming::AlreadyMet => "already reached".to_string(),
        GoalTiming::Reached { years } => format!("{:.1} years", years),
        GoalTiming::ExceedsHorizon { horizon_years } => {
            format!("more than {} years", horizon_years)
        }
    }
}

fn print_compound(report: &CompoundInterestReport) {
    println!("Future value:         {}", format_currency(report.future_value));
    println!("Total contributions:  {}", format_currency(report.total_contributions));
    println!("Interest earned:      {}", format_currency(report.interest_earned));
    println!(
        "Principal / interest: {} / {}",
        format_percent(report.principal_share_pct),
        format_percent(report.interest_share_pct)
    );

    println!("\n{:>5} {:>16} {:>14}", "Year", "Balance", "Growth");
    println!("{}", "-".repeat(37));
    for row in &report.yearly {
        println!(
            "{:>5} {:>16} {:>14}",
            row.year,
            format_currency(row.value),
            format_currency(row.growth)
        );
    }
}

fn print_savings(report: &SavingsReport) {
    let s = &report.summary;
    println!("Future value:         {}", format_currency(s.future_value));
    println!("Total contributions:  {}", format_currency(s.total_contributions));
    println!("Interest earned:      {}", format_currency(s.interest_earned));
    println!("In today's money:     {}", format_currency(s.inflation_adjusted_value));
    println!("Avg monthly growth:   {}", format_currency(s.average_monthly_growth));

    if let Some(outlook) = &report.goal {
        println!("\nGoal:");
        let goal = &outlook.goal;
        println!("  Required monthly:   {}", format_currency(goal.required_monthly_contribution));
        println!("  Total to save:      {}", format_currency(goal.total_to_save));
        println!("  Interest:           {}", format_currency(goal.interest_accumulated));
        println!("  On track:           {}", if goal.on_track { "yes" } else { "no" });
        println!("  Progress:           {}", format_percent(outlook.progress_pct));
        println!("  Time to goal:       {}", describe_timing(&outlook.time_to_goal));
    }

    println!("\n{:>5} {:>16} {:>16}", "Year", "With interest", "Deposits only");
    println!("{}", "-".repeat(39));
    for row in &report.comparison {
        println!(
            "{:>5} {:>16} {:>16}",
            row.year,
            format_currency(row.with_interest),
            format_currency(row.without_interest)
        );
    }
}

fn print_retirement(report: &compound_engine::RetirementReport) {
    let a = &report.analysis;
    println!("Savings at retirement:    {}", format_currency(a.total_retirement_savings));
    println!("Net annual need:          {}", format_currency(a.net_annual_withdrawal_needed));
    println!("Required (4% rule):       {}", format_currency(a.required_savings));
    println!(
        "Withdrawal rate:          {} ({})",
        format_percent(a.withdrawal_rate),
        a.withdrawal_risk.description()
    );
    if a.runway_capped {
        println!("Funds last:               {}+ years", a.years_funds_will_last());
    } else {
        println!("Funds last:               {:.1} years", a.years_funds_will_last());
    }
    if a.is_on_track() {
        println!("Surplus:                  {}", format_currency(a.surplus));
    } else {
        println!("Shortfall:                {}", format_currency(a.shortfall));
    }

    println!("\nMilestones:");
    for m in &report.milestones {
        println!(
            "  {:>3} {:<46} {:>14}  {}",
            m.age,
            m.label,
            format_currency(m.projected_balance),
            m.note
        );
    }

    println!("\nRecommendations:");
    for r in &report.recommendations {
        println!("  [{:?}] {}: {}", r.urgency, r.title, r.message);
    }
}
