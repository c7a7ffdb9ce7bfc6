//! Chartable statistics and the typed fields they read from a team record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::standings::{parse_pct, TeamYearRecord};

/// Home or away split of a team's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// Split record type as reported by the API.
    pub fn split_type(&self) -> &'static str {
        match self {
            Venue::Home => "home",
            Venue::Away => "away",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Venue::Home => "Home",
            Venue::Away => "Away",
        }
    }
}

/// A single numeric value that can be read off a `TeamYearRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Wins,
    Losses,
    WinningPercentage,
    RunDifferential,
    DivisionRank,
    SplitWins(Venue),
    SplitLosses(Venue),
    SplitWinningPercentage(Venue),
}

impl Field {
    /// Read the field, returning `None` when the record doesn't carry it.
    pub fn resolve(&self, record: &TeamYearRecord) -> Option<f64> {
        let team = &record.record;
        match self {
            Field::Wins => team.wins.map(f64::from),
            Field::Losses => team.losses.map(f64::from),
            // Prefer leagueRecord.pct; fall back to
            // the top-level percentage for payloads without a league record
            Field::WinningPercentage => team
                .league_record
                .as_ref()
                .and_then(|r| r.pct.as_deref())
                .or(team.winning_percentage.as_deref())
                .and_then(parse_pct),
            Field::RunDifferential => team.run_differential.map(f64::from),
            Field::DivisionRank => team
                .division_rank
                .as_deref()
                .and_then(|r| r.trim().parse::<u32>().ok())
                .map(f64::from),
            Field::SplitWins(venue) => team.split(venue.split_type()).map(|s| f64::from(s.wins)),
            Field::SplitLosses(venue) => {
                team.split(venue.split_type()).map(|s| f64::from(s.losses))
            }
            Field::SplitWinningPercentage(venue) => team
                .split(venue.split_type())
                .and_then(|s| s.pct.as_deref())
                .and_then(parse_pct),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Field::Wins => "Wins".to_string(),
            Field::Losses => "Losses".to_string(),
            Field::WinningPercentage => "Win Percentage".to_string(),
            Field::RunDifferential => "Run Differential".to_string(),
            Field::DivisionRank => "Division Rank".to_string(),
            Field::SplitWins(v) => format!("{} Wins", v.label()),
            Field::SplitLosses(v) => format!("{} Losses", v.label()),
            Field::SplitWinningPercentage(v) => format!("{} Win Percentage", v.label()),
        }
    }
}

/// The statistics a user can chart.
///
/// The `HomeVsAway*` variants yield two parallel series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    #[default]
    Wins,
    Losses,
    WinPercentage,
    RunDifferential,
    DivisionRank,
    HomeWins,
    HomeLosses,
    HomeWinPercentage,
    AwayWins,
    AwayLosses,
    AwayWinPercentage,
    HomeVsAwayWins,
    HomeVsAwayWinPercentage,
}

impl Statistic {
    pub const ALL: [Statistic; 13] = [
        Statistic::Wins,
        Statistic::Losses,
        Statistic::WinPercentage,
        Statistic::RunDifferential,
        Statistic::DivisionRank,
        Statistic::HomeWins,
        Statistic::HomeLosses,
        Statistic::HomeWinPercentage,
        Statistic::AwayWins,
        Statistic::AwayLosses,
        Statistic::AwayWinPercentage,
        Statistic::HomeVsAwayWins,
        Statistic::HomeVsAwayWinPercentage,
    ];

    /// Fields plotted for this statistic, one per series.
    pub fn fields(&self) -> Vec<Field> {
        use Venue::{Away, Home};
        match self {
            Statistic::Wins => vec![Field::Wins],
            Statistic::Losses => vec![Field::Losses],
            Statistic::WinPercentage => vec![Field::WinningPercentage],
            Statistic::RunDifferential => vec![Field::RunDifferential],
            Statistic::DivisionRank => vec![Field::DivisionRank],
            Statistic::HomeWins => vec![Field::SplitWins(Home)],
            Statistic::HomeLosses => vec![Field::SplitLosses(Home)],
            Statistic::HomeWinPercentage => vec![Field::SplitWinningPercentage(Home)],
            Statistic::AwayWins => vec![Field::SplitWins(Away)],
            Statistic::AwayLosses => vec![Field::SplitLosses(Away)],
            Statistic::AwayWinPercentage => vec![Field::SplitWinningPercentage(Away)],
            Statistic::HomeVsAwayWins => vec![Field::SplitWins(Home), Field::SplitWins(Away)],
            Statistic::HomeVsAwayWinPercentage => vec![
                Field::SplitWinningPercentage(Home),
                Field::SplitWinningPercentage(Away),
            ],
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Statistic::Wins => "wins",
            Statistic::Losses => "losses",
            Statistic::WinPercentage => "win-percentage",
            Statistic::RunDifferential => "run-differential",
            Statistic::DivisionRank => "division-rank",
            Statistic::HomeWins => "home-wins",
            Statistic::HomeLosses => "home-losses",
            Statistic::HomeWinPercentage => "home-win-percentage",
            Statistic::AwayWins => "away-wins",
            Statistic::AwayLosses => "away-losses",
            Statistic::AwayWinPercentage => "away-win-percentage",
            Statistic::HomeVsAwayWins => "home-vs-away-wins",
            Statistic::HomeVsAwayWinPercentage => "home-vs-away-win-percentage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Statistic::Wins => "Wins",
            Statistic::Losses => "Losses",
            Statistic::WinPercentage => "Win Percentage",
            Statistic::RunDifferential => "Run Differential",
            Statistic::DivisionRank => "Division Rank",
            Statistic::HomeWins => "Home Wins",
            Statistic::HomeLosses => "Home Losses",
            Statistic::HomeWinPercentage => "Home Win Percentage",
            Statistic::AwayWins => "Away Wins",
            Statistic::AwayLosses => "Away Losses",
            Statistic::AwayWinPercentage => "Away Win Percentage",
            Statistic::HomeVsAwayWins => "Home vs Away Wins",
            Statistic::HomeVsAwayWinPercentage => "Home vs Away Win Percentage",
        }
    }

    /// Whether values are fractions (rendered with three decimals).
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            Statistic::WinPercentage
                | Statistic::HomeWinPercentage
                | Statistic::AwayWinPercentage
                | Statistic::HomeVsAwayWinPercentage
        )
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Statistic::ALL
            .iter()
            .copied()
            .find(|stat| stat.key() == wanted)
            .ok_or_else(|| format!("unknown statistic '{}'", s))
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standings::{fixtures, LeagueRecord};

    fn record() -> TeamYearRecord {
        TeamYearRecord {
            division_name: "American League East".to_string(),
            record: fixtures::team(147, "New York Yankees", 94, 68),
        }
    }

    #[test]
    fn test_resolve_top_level_fields() {
        let r = record();
        assert_eq!(Field::Wins.resolve(&r), Some(94.0));
        assert_eq!(Field::Losses.resolve(&r), Some(68.0));
        assert_eq!(Field::RunDifferential.resolve(&r), Some(26.0));
        assert_eq!(Field::DivisionRank.resolve(&r), Some(1.0));
        assert_eq!(Field::WinningPercentage.resolve(&r), Some(0.580));
    }

    #[test]
    fn test_winning_percentage_prefers_league_record() {
        let mut r = record();
        r.record.league_record = Some(LeagueRecord {
            wins: 94,
            losses: 68,
            pct: Some(".581".to_string()),
        });
        assert_eq!(Field::WinningPercentage.resolve(&r), Some(0.581));
    }

    #[test]
    fn test_resolve_splits() {
        let r = record();
        assert_eq!(Field::SplitWins(Venue::Home).resolve(&r), Some(48.0));
        assert_eq!(Field::SplitWins(Venue::Away).resolve(&r), Some(46.0));
        assert_eq!(Field::SplitWinningPercentage(Venue::Away).resolve(&r), Some(0.48));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let mut r = record();
        r.record.records = None;
        r.record.run_differential = None;
        r.record.division_rank = Some("".to_string());
        assert_eq!(Field::SplitWins(Venue::Home).resolve(&r), None);
        assert_eq!(Field::RunDifferential.resolve(&r), None);
        assert_eq!(Field::DivisionRank.resolve(&r), None);
    }

    #[test]
    fn test_statistic_keys_round_trip() {
        for stat in Statistic::ALL {
            assert_eq!(stat.key().parse::<Statistic>().unwrap(), stat);
        }
        assert_eq!("HOME_VS_AWAY_WINS".parse::<Statistic>().unwrap(), Statistic::HomeVsAwayWins);
        assert!("saves".parse::<Statistic>().is_err());
    }

    #[test]
    fn test_home_vs_away_has_two_fields() {
        assert_eq!(Statistic::HomeVsAwayWins.fields().len(), 2);
        assert_eq!(Statistic::Wins.fields(), vec![Field::Wins]);
    }
}
