use async_trait::async_trait;

use super::ApiError;
use crate::models::{League, StandingsSnapshot};

/// Anything that can produce a season's standings.
#[async_trait]
pub trait StandingsSource: Send + Sync {
    /// Fetch regular-season standings for `league`.
    ///
    /// `season` of `None` means the current season.
    async fn fetch_standings(
        &self,
        league: League,
        season: Option<i32>,
    ) -> Result<StandingsSnapshot, ApiError>;
}

#[async_trait]
impl<S: StandingsSource + ?Sized> StandingsSource for std::sync::Arc<S> {
    async fn fetch_standings(
        &self,
        league: League,
        season: Option<i32>,
    ) -> Result<StandingsSnapshot, ApiError> {
        (**self).fetch_standings(league, season).await
    }
}
