//! Data models for standings and chart series.
//!
//! - `StandingsSnapshot`, `TeamRecord`: standings payloads from the stats API
//! - `TeamYearRecord`: one team's season, with its division name resolved
//! - `Team`, `League`: the club catalog and league selection
//! - `Statistic`, `Field`: typed accessors for chartable values
//! - `TimeSeriesPoint`, `Series`, `Chart`: reshaped output for rendering

pub mod series;
pub mod standings;
pub mod statistic;
pub mod team;

pub use series::{Chart, Series, SeriesQuery, TimeSeriesPoint, YearSnapshot};
pub use standings::{
    parse_pct, DivisionRef, DivisionStandings, LeagueRecord, RecordBreakdown, SplitRecord,
    StandingsSnapshot, TeamRecord, TeamRef, TeamYearRecord,
};
pub use statistic::{Field, Statistic, Venue};
pub use team::{division_name, League, Team, TEAMS};
