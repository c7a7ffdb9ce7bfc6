//! Chart-ready series types.

use serde::{Deserialize, Serialize};

use super::standings::StandingsSnapshot;
use super::statistic::Statistic;
use super::team::Team;

/// One point of a yearly series: `name` is the season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint<T> {
    pub name: i32,
    pub value: T,
}

impl<T> TimeSeriesPoint<T> {
    pub fn new(name: i32, value: T) -> Self {
        Self { name, value }
    }
}

/// A season's full standings, as produced by a range build and cached.
pub type YearSnapshot = TimeSeriesPoint<StandingsSnapshot>;

/// A labeled line on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<TimeSeriesPoint<f64>>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest value in the series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// What the presentation layer asks for when charting a team's history.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesQuery {
    pub team: Team,
    pub statistic: Statistic,
    pub start_year: i32,
    pub end_year: i32,
    pub exclude_years: Vec<i32>,
}

/// The series for one query, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub team: Team,
    pub statistic: Statistic,
    pub series: Vec<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serializes_as_name_value() {
        let point = TimeSeriesPoint::new(2021, 92.0);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"name":2021,"value":92.0}"#);
    }

    #[test]
    fn test_series_bounds() {
        let series = Series {
            label: "Wins".to_string(),
            points: vec![
                TimeSeriesPoint::new(2019, 103.0),
                TimeSeriesPoint::new(2020, 33.0),
                TimeSeriesPoint::new(2021, 92.0),
            ],
        };
        assert_eq!(series.bounds(), Some((33.0, 103.0)));

        let empty = Series {
            label: "Wins".to_string(),
            points: vec![],
        };
        assert_eq!(empty.bounds(), None);
    }
}
