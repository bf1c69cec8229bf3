//! Run projections for every scenario in a CSV file
//!
//! Writes one result row per scenario: future value, deposits, interest and,
//! where a target is given, goal progress and time to goal.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use compound_engine::params::{load_scenarios, ProjectionScenario};
use compound_engine::projection::{goal_progress, GoalSolver, GoalTiming};
use compound_engine::{EngineConfig, EngineError};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "run-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario CSV (Label,Principal,PeriodicContribution,RatePercent,PeriodsPerYear,Years,Target)
    #[arg(short, long, default_value = "data/scenarios.csv")]
    input: PathBuf,

    /// Where to write the results
    #[arg(short, long, default_value = "batch_projection_output.csv")]
    output: PathBuf,
}

/// One output row per scenario
#[derive(Debug, Serialize)]
struct BatchRow {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "FutureValue")]
    future_value: f64,
    #[serde(rename = "TotalContributions")]
    total_contributions: f64,
    #[serde(rename = "InterestEarned")]
    interest_earned: f64,
    #[serde(rename = "Target")]
    target: Option<f64>,
    #[serde(rename = "GoalProgressPct")]
    goal_progress_pct: Option<f64>,
    /// Empty when there is no target or it is out of reach
    #[serde(rename = "YearsToGoal")]
    years_to_goal: Option<f64>,
}

fn project(scenario: &ProjectionScenario, solver: &GoalSolver) -> Result<BatchRow, EngineError> {
    let params = &scenario.params;
    let years = params.years as f64;
    let future_value = params.future_value()?;
    let total_contributions = params.contributions_after(years);

    let (goal_progress_pct, years_to_goal) = match scenario.target {
        Some(target) => {
            let timing = solver.time_to_goal(params, target)?;
            let years = match timing {
                GoalTiming::ExceedsHorizon { .. } => None,
                reached => Some(reached.years()),
            };
            (Some(goal_progress(future_value, target)), years)
        }
        None => (None, None),
    };

    Ok(BatchRow {
        label: scenario.label.clone(),
        future_value,
        total_contributions,
        interest_earned: future_value - total_contributions,
        target: scenario.target,
        goal_progress_pct,
        years_to_goal,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("Failed to load scenarios: {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let config = EngineConfig::from_env();
    config.validate().context("Invalid engine config")?;
    let solver = GoalSolver::from_config(&config);

    println!("Running projections...");
    let proj_start = Instant::now();

    // Run projections in parallel
    let rows: Vec<BatchRow> = scenarios
        .par_iter()
        .map(|scenario| {
            project(scenario, &solver)
                .with_context(|| format!("Scenario `{}` failed", scenario.label))
        })
        .collect::<Result<_>>()?;

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create output file: {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let total: f64 = rows.iter().map(|r| r.future_value).sum();
    log::info!("combined future value across scenarios: {:.2}", total);
    println!("Results written to: {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
