//! Load projection scenarios from CSV
//!
//! Expected header:
//! `Label,Principal,PeriodicContribution,RatePercent,PeriodsPerYear,Years,Target`
//! where `Target` may be left empty.

use super::ProjectionParameters;
use crate::error::EngineError;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failures while reading a scenario file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario `{label}` (row {row}): {source}")]
    Parameter {
        label: String,
        row: usize,
        #[source]
        source: EngineError,
    },
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "PeriodicContribution")]
    periodic_contribution: f64,
    #[serde(rename = "RatePercent")]
    rate_percent: f64,
    #[serde(rename = "PeriodsPerYear")]
    periods_per_year: u32,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "Target", default)]
    target: Option<f64>,
}

/// One named projection, optionally with a savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionScenario {
    pub label: String,
    pub params: ProjectionParameters,
    pub target: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self, row: usize) -> Result<ProjectionScenario, LoadError> {
        let params = ProjectionParameters::new(
            self.principal,
            self.periodic_contribution,
            self.rate_percent,
            self.periods_per_year,
            self.years,
        );

        let checked = params.validate().and_then(|_| match self.target {
            Some(t) => crate::error::ensure_non_negative("target", t),
            None => Ok(()),
        });
        if let Err(source) = checked {
            return Err(LoadError::Parameter { label: self.label, row, source });
        }

        Ok(ProjectionScenario {
            label: self.label,
            params,
            target: self.target,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectionScenario>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ProjectionScenario>, LoadError> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<ProjectionScenario>, LoadError> {
    let mut scenarios = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // +2: header line, 1-indexed rows
        scenarios.push(row.into_scenario(index + 2)?);
    }

    log::debug!("loaded {} projection scenarios", scenarios.len());
    Ok(scenarios)
}
