//! API client for the public MLB stats API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, StandingsSource};
use crate::models::{League, StandingsSnapshot};

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the public stats API
pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com";

/// Path of the standings endpoint
const STANDINGS_PATH: &str = "/api/v1/standings";

/// Standings type requested; postseason and spring tables are not charted.
const STANDINGS_TYPE: &str = "regularSeason";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for standings data.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the public API
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against another host serving the same API
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the standings URL for a league and season.
    pub fn standings_url(&self, league: League, season: i32) -> String {
        format!(
            "{}{}?leagueId={}&season={}&standingsTypes={}",
            self.base_url,
            STANDINGS_PATH,
            league.api_ids(),
            season,
            STANDINGS_TYPE
        )
    }

    /// Turn a status and body into a parsed value or a typed error.
    fn parse_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(status, body));
        }
        Ok(serde_json::from_str(body)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .header(header::ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status().as_u16();
            if status == 429 {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(ApiError::RateLimited);
                }
                warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2; // Exponential backoff
                continue;
            }

            let body = response.text().await?;
            return Self::parse_body(status, &body);
        }
    }
}

#[async_trait]
impl StandingsSource for ApiClient {
    async fn fetch_standings(
        &self,
        league: League,
        season: Option<i32>,
    ) -> Result<StandingsSnapshot, ApiError> {
        let season = season.unwrap_or_else(|| Utc::now().year());
        let url = self.standings_url(league, season);
        debug!(league = %league, season = season, "Fetching standings");

        let snapshot: StandingsSnapshot = self.get(&url).await?;
        debug!(
            league = %league,
            season = season,
            teams = snapshot.team_count(),
            "Fetched standings"
        );
        Ok(snapshot)
    }
}
