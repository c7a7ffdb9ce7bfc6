//! Standings payloads as returned by the MLB stats API.
//!
//! Only the fields the tables and charts consume are modeled; everything
//! else in the response is ignored on deserialization.

use serde::{Deserialize, Serialize};

use super::team::division_name;

/// Games in a full regular season.
pub const REGULAR_SEASON_GAMES: u32 = 162;

/// One season's standings: every division with its ordered team records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsSnapshot {
    #[serde(default)]
    pub records: Vec<DivisionStandings>,
}

impl StandingsSnapshot {
    pub fn team_count(&self) -> usize {
        self.records.iter().map(|d| d.team_records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.team_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionStandings {
    pub division: DivisionRef,
    #[serde(default)]
    pub team_records: Vec<TeamRecord>,
}

impl DivisionStandings {
    pub fn name(&self) -> String {
        division_name(self.division.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionRef {
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

/// A team's line in the standings.
///
/// The API reports percentages, games back and ranks as strings
/// (`".617"`, `"-"`, `"1"`); they are kept verbatim and parsed on demand.
/// Win and loss counts stay `None` when the payload omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team: TeamRef,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub winning_percentage: Option<String>,
    pub games_back: Option<String>,
    pub division_rank: Option<String>,
    pub run_differential: Option<i32>,
    pub league_record: Option<LeagueRecord>,
    pub records: Option<RecordBreakdown>,
}

impl TeamRecord {
    /// Find a split record by its type (`"home"`, `"away"`, ...).
    pub fn split(&self, kind: &str) -> Option<&SplitRecord> {
        self.records
            .as_ref()?
            .split_records
            .iter()
            .find(|s| s.kind == kind)
    }

    /// Games back for display; the API uses `"-"` for the division leader.
    pub fn games_back_display(&self) -> &str {
        self.games_back.as_deref().unwrap_or("-")
    }

    pub fn games_played(&self) -> Option<u32> {
        Some(self.wins? + self.losses?)
    }

    /// Games left in a regular season, never below zero.
    pub fn remaining_games(&self) -> Option<u32> {
        self.games_played()
            .map(|played| REGULAR_SEASON_GAMES.saturating_sub(played))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub wins: u32,
    pub losses: u32,
    pub pct: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBreakdown {
    #[serde(default)]
    pub split_records: Vec<SplitRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: Option<String>,
}

/// A team's record for one season, decorated with its division name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamYearRecord {
    pub division_name: String,
    #[serde(flatten)]
    pub record: TeamRecord,
}

impl TeamYearRecord {
    /// League name derived from the division name.
    pub fn league_name(&self) -> Option<&'static str> {
        if self.division_name.starts_with("American League") {
            Some("American League")
        } else if self.division_name.starts_with("National League") {
            Some("National League")
        } else {
            None
        }
    }
}

/// Parse an API percentage string such as `".617"` or `"1.000"`.
pub fn parse_pct(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn team(id: u32, name: &str, wins: u32, losses: u32) -> TeamRecord {
        TeamRecord {
            team: TeamRef {
                id,
                name: name.to_string(),
            },
            wins: Some(wins),
            losses: Some(losses),
            winning_percentage: Some(format!("{:.3}", wins as f64 / (wins + losses) as f64)),
            games_back: Some("-".to_string()),
            division_rank: Some("1".to_string()),
            run_differential: Some(wins as i32 - losses as i32),
            league_record: None,
            records: Some(RecordBreakdown {
                split_records: vec![
                    SplitRecord {
                        kind: "home".to_string(),
                        wins: wins / 2 + 1,
                        losses: losses / 2,
                        pct: Some(".550".to_string()),
                    },
                    SplitRecord {
                        kind: "away".to_string(),
                        wins: (wins / 2).saturating_sub(1),
                        losses: losses / 2,
                        pct: Some(".480".to_string()),
                    },
                ],
            }),
        }
    }

    pub fn snapshot(division_id: u32, teams: Vec<TeamRecord>) -> StandingsSnapshot {
        StandingsSnapshot {
            records: vec![DivisionStandings {
                division: DivisionRef { id: division_id },
                team_records: teams,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "copyright": "Copyright 2024 MLB Advanced Media, L.P.",
        "records": [{
            "standingsType": "regularSeason",
            "league": {"id": 103},
            "division": {"id": 201, "link": "/api/v1/divisions/201"},
            "teamRecords": [{
                "team": {"id": 147, "name": "New York Yankees", "link": "/api/v1/teams/147"},
                "season": "2024",
                "divisionRank": "1",
                "gamesBack": "-",
                "leagueRecord": {"wins": 94, "losses": 68, "ties": 0, "pct": ".580"},
                "records": {
                    "splitRecords": [
                        {"wins": 44, "losses": 37, "type": "home", "pct": ".543"},
                        {"wins": 50, "losses": 31, "type": "away", "pct": ".617"}
                    ]
                },
                "runDifferential": 153,
                "wins": 94,
                "losses": 68,
                "winningPercentage": ".580"
            }]
        }]
    }"#;

    #[test]
    fn test_parse_api_payload() {
        let snapshot: StandingsSnapshot =
            serde_json::from_str(SAMPLE).expect("Failed to parse standings test JSON");
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.team_count(), 1);

        let division = &snapshot.records[0];
        assert_eq!(division.name(), "American League East");

        let yankees = &division.team_records[0];
        assert_eq!(yankees.team.id, 147);
        assert_eq!(yankees.wins, Some(94));
        assert_eq!(yankees.games_played(), Some(162));
        assert_eq!(yankees.remaining_games(), Some(0));
        assert_eq!(yankees.run_differential, Some(153));
        assert_eq!(yankees.games_back_display(), "-");
        assert_eq!(yankees.split("away").map(|s| s.wins), Some(50));
        assert!(yankees.split("night").is_none());
    }

    #[test]
    fn test_parse_missing_records_is_empty() {
        let snapshot: StandingsSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_team_year_record_flattens() {
        let record = TeamYearRecord {
            division_name: "National League West".to_string(),
            record: fixtures::team(119, "Los Angeles Dodgers", 98, 64),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["divisionName"], "National League West");
        assert_eq!(json["wins"], 98);
    }

    #[test]
    fn test_missing_counts_stay_absent() {
        let record: TeamRecord =
            serde_json::from_str(r#"{"team": {"id": 147, "name": "New York Yankees"}}"#).unwrap();
        assert_eq!(record.wins, None);
        assert_eq!(record.losses, None);
        assert_eq!(record.games_played(), None);
        assert_eq!(record.remaining_games(), None);
    }

    #[test]
    fn test_games_played_and_remaining() {
        let midseason = fixtures::team(147, "New York Yankees", 50, 40);
        assert_eq!(midseason.games_played(), Some(90));
        assert_eq!(midseason.remaining_games(), Some(72));

        // Tiebreaker games push past a full season
        let extra = fixtures::team(147, "New York Yankees", 82, 81);
        assert_eq!(extra.remaining_games(), Some(0));
    }

    #[test]
    fn test_league_name_from_division() {
        let mut record = TeamYearRecord {
            division_name: "American League East".to_string(),
            record: fixtures::team(147, "New York Yankees", 94, 68),
        };
        assert_eq!(record.league_name(), Some("American League"));

        record.division_name = "National League Central".to_string();
        assert_eq!(record.league_name(), Some("National League"));

        record.division_name = "Division 999".to_string();
        assert_eq!(record.league_name(), None);
    }

    #[test]
    fn test_parse_pct() {
        assert_eq!(parse_pct(".617"), Some(0.617));
        assert_eq!(parse_pct("1.000"), Some(1.0));
        assert_eq!(parse_pct("-"), None);
        assert_eq!(parse_pct(""), None);
        assert_eq!(parse_pct("n/a"), None);
    }
}
