//! Projection output structures

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Balance snapshot at a whole-year boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Years elapsed (0 = opening balance, no growth)
    pub period_index: u32,
    pub balance: f64,
    /// Principal plus all deposits so far
    pub contributions_to_date: f64,
    /// Balance minus contributions
    pub interest_to_date: f64,
}

impl ProjectionPoint {
    pub fn new(period_index: u32, balance: f64, contributions_to_date: f64) -> Self {
        Self {
            period_index,
            balance,
            contributions_to_date,
            interest_to_date: balance - contributions_to_date,
        }
    }
}

/// Eagerly materialised sequence of yearly points, index 0 first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionSeries {
    points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity) }
    }

    /// Append the next point
    pub fn push(&mut self, point: ProjectionPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProjectionPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionPoint> {
        self.points.iter()
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn final_balance(&self) -> f64 {
        self.points.last().map(|p| p.balance).unwrap_or(0.0)
    }

    /// Largest balance, used for chart scaling
    pub fn max_balance(&self) -> f64 {
        self.points.iter().map(|p| p.balance).fold(0.0, f64::max)
    }

    /// Summary statistics
    pub fn summary(&self) -> SeriesSummary {
        let last = self.points.last();
        SeriesSummary {
            years: last.map(|p| p.period_index).unwrap_or(0),
            final_balance: self.final_balance(),
            total_contributions: last.map(|p| p.contributions_to_date).unwrap_or(0.0),
            total_interest: last.map(|p| p.interest_to_date).unwrap_or(0.0),
        }
    }
}

impl Index<usize> for ProjectionSeries {
    type Output = ProjectionPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectionPoint;
    type IntoIter = std::slice::Iter<'a, ProjectionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<ProjectionPoint> for ProjectionSeries {
    fn from_iter<I: IntoIterator<Item = ProjectionPoint>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

/// Summary statistics for a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub years: u32,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

/// Growth within a single year of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyGrowth {
    /// 1-indexed year
    pub year: u32,
    /// Balance at the end of the year
    pub value: f64,
    /// Change from the end of the previous year
    pub growth: f64,
}

/// Balance with and without interest at a year boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub year: u32,
    pub with_interest: f64,
    pub without_interest: f64,
}

impl ComparisonPoint {
    /// Extra balance owed to compounding
    pub fn interest_advantage(&self) -> f64 {
        self.with_interest - self.without_interest
    }
}

/// Year-over-year growth rows (one per year after the opening point)
pub fn yearly_breakdown(series: &ProjectionSeries) -> Vec<YearlyGrowth> {
    series
        .points()
        .windows(2)
        .map(|pair| YearlyGrowth {
            year: pair[1].period_index,
            value: pair[1].balance,
            growth: pair[1].balance - pair[0].balance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectionSeries {
        [(0, 100.0, 100.0), (1, 215.0, 200.0), (2, 340.0, 300.0)]
            .into_iter()
            .map(|(i, b, c)| ProjectionPoint::new(i, b, c))
            .collect()
    }

    #[test]
    fn test_point_derives_interest() {
        let p = ProjectionPoint::new(3, 1_500.0, 1_200.0);
        assert_eq!(p.interest_to_date, 300.0);
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.years, 2);
        assert_eq!(summary.final_balance, 340.0);
        assert_eq!(summary.total_contributions, 300.0);
        assert_eq!(summary.total_interest, 40.0);
    }

    #[test]
    fn test_yearly_breakdown() {
        let rows = yearly_breakdown(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], YearlyGrowth { year: 1, value: 215.0, growth: 115.0 });
        assert_eq!(rows[1].growth, 125.0);
    }

    #[test]
    fn test_series_is_restartable() {
        let series = sample();
        let first: f64 = series.iter().map(|p| p.balance).sum();
        let second: f64 = (&series).into_iter().map(|p| p.balance).sum();
        assert_eq!(first, second);
        assert_eq!(series[1].period_index, 1);
        assert_eq!(series.max_balance(), 340.0);
    }

    #[test]
    fn test_empty_series() {
        let series = ProjectionSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.final_balance(), 0.0);
        assert!(yearly_breakdown(&series).is_empty());
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["balance"], 215.0);
    }
}
