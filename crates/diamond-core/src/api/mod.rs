//! REST client for the MLB stats API.
//!
//! This module provides the `ApiClient` for fetching regular-season
//! standings, and the `StandingsSource` trait the time-series builder
//! depends on so it can be driven without the network.

pub mod client;
pub mod error;
pub mod source;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use source::StandingsSource;
