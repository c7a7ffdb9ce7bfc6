//! Pure reshaping of standings into chart series.

use crate::error::{Result, StandingsError};
use crate::models::{
    Field, Series, StandingsSnapshot, TeamYearRecord, TimeSeriesPoint, YearSnapshot,
};

/// Find a team's record in one season's standings.
///
/// A team id must appear at most once per snapshot; a repeat is reported as
/// `DuplicateTeam` rather than silently picking one.
pub fn locate_team(
    snapshot: &StandingsSnapshot,
    team_id: u32,
    season: i32,
) -> Result<Option<TeamYearRecord>> {
    let mut found: Option<TeamYearRecord> = None;

    for division in &snapshot.records {
        for record in division.team_records.iter().filter(|r| r.team.id == team_id) {
            if found.is_some() {
                return Err(StandingsError::DuplicateTeam { team_id, season });
            }
            found = Some(TeamYearRecord {
                division_name: division.name(),
                record: record.clone(),
            });
        }
    }

    Ok(found)
}

/// Read one typed field off a record. Missing data is `None`, never zero.
pub fn project_field(record: &TeamYearRecord, field: Field) -> Option<f64> {
    field.resolve(record)
}

/// Keep points with `start <= name <= end` that aren't excluded, in order.
pub fn filter_range<T: Clone>(
    series: &[TimeSeriesPoint<T>],
    start: i32,
    end: i32,
    exclude_years: &[i32],
) -> Vec<TimeSeriesPoint<T>> {
    series
        .iter()
        .filter(|p| p.name >= start && p.name <= end)
        .filter(|p| !exclude_years.contains(&p.name))
        .cloned()
        .collect()
}

/// The team's record for every season it appears in.
pub fn team_history(
    snapshots: &[YearSnapshot],
    team_id: u32,
) -> Result<Vec<TimeSeriesPoint<TeamYearRecord>>> {
    let mut history = Vec::with_capacity(snapshots.len());
    for year in snapshots {
        if let Some(record) = locate_team(&year.value, team_id, year.name)? {
            history.push(TimeSeriesPoint::new(year.name, record));
        }
    }
    Ok(history)
}

/// Project one field across a team history, dropping seasons without data.
pub fn project_series(history: &[TimeSeriesPoint<TeamYearRecord>], field: Field) -> Series {
    let points = history
        .iter()
        .filter_map(|p| project_field(&p.value, field).map(|v| TimeSeriesPoint::new(p.name, v)))
        .collect();

    Series {
        label: field.label(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standings::fixtures;
    use crate::models::{DivisionRef, DivisionStandings, Venue};

    fn snapshot() -> StandingsSnapshot {
        let mut snapshot = fixtures::snapshot(
            201,
            vec![
                fixtures::team(147, "New York Yankees", 94, 68),
                fixtures::team(110, "Baltimore Orioles", 91, 71),
            ],
        );
        snapshot.records.push(DivisionStandings {
            division: DivisionRef { id: 203 },
            team_records: vec![fixtures::team(119, "Los Angeles Dodgers", 98, 64)],
        });
        snapshot
    }

    fn points(years: &[i32]) -> Vec<TimeSeriesPoint<f64>> {
        years.iter().map(|&y| TimeSeriesPoint::new(y, f64::from(y))).collect()
    }

    #[test]
    fn test_locate_team_resolves_division() {
        let found = locate_team(&snapshot(), 119, 2024).unwrap().unwrap();
        assert_eq!(found.record.team.name, "Los Angeles Dodgers");
        assert_eq!(found.division_name, "National League West");
    }

    #[test]
    fn test_locate_team_absent() {
        assert_eq!(locate_team(&snapshot(), 999, 2024).unwrap(), None);
        assert_eq!(locate_team(&StandingsSnapshot::default(), 147, 2024).unwrap(), None);
    }

    #[test]
    fn test_locate_team_duplicate_fails() {
        let mut snap = snapshot();
        snap.records[1]
            .team_records
            .push(fixtures::team(147, "New York Yankees", 1, 1));

        match locate_team(&snap, 147, 2019) {
            Err(StandingsError::DuplicateTeam { team_id, season }) => {
                assert_eq!(team_id, 147);
                assert_eq!(season, 2019);
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_project_field_missing_is_none() {
        let mut record = locate_team(&snapshot(), 147, 2024).unwrap().unwrap();
        record.record.records = None;
        assert_eq!(project_field(&record, Field::SplitWins(Venue::Home)), None);
        assert_eq!(project_field(&record, Field::Wins), Some(94.0));
    }

    #[test]
    fn test_project_field_without_counts_is_none() {
        let payload = r#"{
            "records": [{
                "division": {"id": 201},
                "teamRecords": [{"team": {"id": 147, "name": "New York Yankees"}}]
            }]
        }"#;
        let snapshot: StandingsSnapshot = serde_json::from_str(payload).unwrap();
        let record = locate_team(&snapshot, 147, 2024).unwrap().unwrap();

        assert_eq!(project_field(&record, Field::Wins), None);
        assert_eq!(project_field(&record, Field::Losses), None);

        let history = vec![TimeSeriesPoint::new(2024, record)];
        assert!(project_series(&history, Field::Wins).is_empty());
    }

    #[test]
    fn test_filter_range_bounds_inclusive() {
        let series = points(&[2018, 2019, 2020, 2021, 2022]);
        let filtered = filter_range(&series, 2019, 2021, &[]);
        let years: Vec<i32> = filtered.iter().map(|p| p.name).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_filter_range_excludes_and_keeps_order() {
        let series = points(&[2019, 2020, 2021, 2022]);
        let filtered = filter_range(&series, 2000, 2030, &[2020]);
        let years: Vec<i32> = filtered.iter().map(|p| p.name).collect();
        assert_eq!(years, vec![2019, 2021, 2022]);
    }

    #[test]
    fn test_team_history_skips_missing_seasons() {
        let years = vec![
            TimeSeriesPoint::new(2022, snapshot()),
            TimeSeriesPoint::new(2023, StandingsSnapshot::default()),
            TimeSeriesPoint::new(2024, snapshot()),
        ];
        let history = team_history(&years, 110).unwrap();
        let names: Vec<i32> = history.iter().map(|p| p.name).collect();
        assert_eq!(names, vec![2022, 2024]);
    }

    #[test]
    fn test_project_series_drops_absent_values() {
        let mut with_splits = locate_team(&snapshot(), 147, 2023).unwrap().unwrap();
        let mut without_splits = with_splits.clone();
        without_splits.record.records = None;
        with_splits.record.wins = Some(82);

        let history = vec![
            TimeSeriesPoint::new(2022, without_splits),
            TimeSeriesPoint::new(2023, with_splits),
        ];
        let series = project_series(&history, Field::SplitWins(Venue::Home));
        assert_eq!(series.label, "Home Wins");
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].name, 2023);
    }
}
