//! Year-range assembly and reshaping into chart series.

pub mod builder;
pub mod reshape;

pub use builder::{range_key, TimeSeriesBuilder, DEFAULT_EXPIRY_DAYS};
pub use reshape::{filter_range, locate_team, project_field, project_series, team_history};
