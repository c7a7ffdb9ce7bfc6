use chrono::{Datelike, Utc};
use tracing::{debug, info, warn};

use super::reshape::{filter_range, locate_team, project_series, team_history};
use crate::api::StandingsSource;
use crate::cache::StatsCache;
use crate::error::{Result, StandingsError};
use crate::models::{
    Chart, League, SeriesQuery, StandingsSnapshot, TeamYearRecord, TimeSeriesPoint, YearSnapshot,
};

/// Default lifetime of cached ranges, in days.
pub const DEFAULT_EXPIRY_DAYS: u32 = 30;

/// Cache key for a fetched range of seasons.
pub fn range_key(league: League, start: i32, end: i32) -> String {
    format!("standings_{}_{}_{}", league.key(), start, end)
}

/// Builds yearly standings ranges and reshapes them into chart series.
///
/// Ranges are cached whole under one composite key. Single-season entries are
/// consulted while assembling a range, but a range is only ever written once
/// every season in it has been obtained.
pub struct TimeSeriesBuilder<S> {
    source: S,
    cache: StatsCache,
    expiry_days: u32,
}

impl<S: StandingsSource> TimeSeriesBuilder<S> {
    pub fn new(source: S, cache: StatsCache) -> Self {
        Self {
            source,
            cache,
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    pub fn with_expiry_days(mut self, expiry_days: u32) -> Self {
        self.expiry_days = expiry_days;
        self
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Standings for every season in `[start, end]`, oldest first.
    ///
    /// Seasons are fetched one at a time. Any fetch failure aborts the build
    /// and leaves the composite cache entry untouched.
    pub async fn build_year_range(
        &self,
        league: League,
        start: i32,
        end: i32,
    ) -> Result<Vec<YearSnapshot>> {
        if start > end {
            return Err(StandingsError::InvalidRange { start, end });
        }

        let key = range_key(league, start, end);
        let span = i64::from(end) - i64::from(start) + 1;
        let expected = usize::try_from(span).unwrap_or(usize::MAX);
        if let Some(cached) = self.cache.load::<Vec<YearSnapshot>>(&key, self.expiry_days) {
            if cached.len() == expected {
                debug!(key = %key, "Year range served from cache");
                return Ok(cached);
            }
            warn!(key = %key, found = cached.len(), expected = expected, "Ignoring incomplete cached range");
        }

        let mut years = Vec::new();
        let mut fetched = 0;
        for year in start..=end {
            if start != end {
                if let Some(snapshot) = self.cached_season(league, year) {
                    years.push(TimeSeriesPoint::new(year, snapshot));
                    continue;
                }
            }

            let snapshot = self
                .source
                .fetch_standings(league, Some(year))
                .await
                .map_err(|e| {
                    warn!(league = %league, season = year, error = %e, "Range build aborted");
                    e
                })?;
            fetched += 1;
            years.push(TimeSeriesPoint::new(year, snapshot));
        }

        info!(key = %key, seasons = years.len(), fetched = fetched, "Year range assembled");
        self.cache.save(&years, &key, self.expiry_days);
        Ok(years)
    }

    /// A single season previously cached as its own one-year range.
    fn cached_season(&self, league: League, year: i32) -> Option<StandingsSnapshot> {
        self.cache
            .load::<Vec<YearSnapshot>>(&range_key(league, year, year), self.expiry_days)?
            .into_iter()
            .find(|p| p.name == year)
            .map(|p| p.value)
    }

    /// Series for a team and statistic across the query's seasons.
    pub async fn chart(&self, query: &SeriesQuery) -> Result<Chart> {
        let years = self
            .build_year_range(League::Mlb, query.start_year, query.end_year)
            .await?;
        let history = team_history(&years, query.team.id)?;
        let history = filter_range(
            &history,
            query.start_year,
            query.end_year,
            &query.exclude_years,
        );

        let series = query
            .statistic
            .fields()
            .into_iter()
            .map(|field| project_series(&history, field))
            .collect();

        Ok(Chart {
            team: query.team,
            statistic: query.statistic,
            series,
        })
    }

    /// The team's line in the current standings.
    ///
    /// A team missing from the current season is `TeamNotFound`: the id is
    /// bad, so retrying won't help.
    pub async fn current_record(&self, team_id: u32) -> Result<TeamYearRecord> {
        let snapshot = self.source.fetch_standings(League::Mlb, None).await?;
        let season = Utc::now().year();
        locate_team(&snapshot, team_id, season)?
            .ok_or(StandingsError::TeamNotFound { team_id })
    }

    /// Current standings for display. Always fetched fresh.
    pub async fn current_standings(&self, league: League) -> Result<StandingsSnapshot> {
        Ok(self.source.fetch_standings(league, None).await?)
    }

    /// Standings for one season. The season in progress is always fetched
    /// fresh; finished seasons go through the range cache.
    pub async fn season_standings(
        &self,
        league: League,
        season: Option<i32>,
    ) -> Result<StandingsSnapshot> {
        match season {
            Some(year) if year != Utc::now().year() => Ok(self
                .build_year_range(league, year, year)
                .await?
                .into_iter()
                .next()
                .map(|p| p.value)
                .unwrap_or_default()),
            _ => self.current_standings(league).await,
        }
    }

    /// How long ago a range was cached, if it is.
    pub fn range_age(&self, league: League, start: i32, end: i32) -> Option<String> {
        self.cache.age(&range_key(league, start, end))
    }
}
