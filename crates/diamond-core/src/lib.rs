//! Core library for diamond: MLB standings with an expiring local cache.
//!
//! - `api`: stats API client behind the `StandingsSource` trait
//! - `cache`: two-tier storage, fallback store and JSON stats cache
//! - `series`: year-range builder and reshaping into chart series
//! - `models`: standings payloads, team catalog, statistics, series types
//! - `config`: on-disk configuration

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod series;
pub mod utils;

pub use api::{ApiClient, ApiError, StandingsSource};
pub use cache::StatsCache;
pub use config::Config;
pub use error::{Result, StandingsError};
pub use series::TimeSeriesBuilder;
