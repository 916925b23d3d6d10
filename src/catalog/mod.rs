//! Normalization adapter: turns provider responses into canonical records.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::models::{
    ChartKind, PersonRecord, Review, SearchResults, SearchScope, TitleRecord, TitleSummary,
};
use crate::tmdb::TmdbApi;

mod map;
mod text;

#[derive(Clone)]
pub struct Catalog {
    tmdb: Arc<dyn TmdbApi>,
}

impl Catalog {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        Self { tmdb }
    }

    /// Resolve an identifier whose content type is unknown. The movie path is
    /// tried first; any failure there falls through to the series path.
    pub async fn resolve_title(&self, id: &str) -> Result<TitleRecord> {
        let id = require_non_empty(id, "title id")?;

        let movie_err = match self.tmdb.fetch_movie(id).await {
            Ok(movie) => {
                debug!(id, "Resolved as movie");
                return Ok(map::map_movie(movie));
            }
            Err(e) => e,
        };
        debug!(id, error = %movie_err, "Movie lookup failed, trying series");

        match self.tmdb.fetch_series(id).await {
            Ok(series) => {
                debug!(id, "Resolved as series");
                Ok(map::map_series(series))
            }
            Err(series_err) => {
                warn!(id, movie = %movie_err, series = %series_err, "Title not resolvable");
                if movie_err.is_miss() && series_err.is_miss() {
                    return Err(CatalogError::NotFound(id.to_string()));
                }
                let upstream = if movie_err.is_miss() { series_err } else { movie_err };
                Err(CatalogError::UpstreamUnavailable(upstream.to_string()))
            }
        }
    }

    pub async fn resolve_chart_list(&self, chart: ChartKind) -> Result<Vec<TitleSummary>> {
        let items = self
            .tmdb
            .fetch_chart(chart)
            .await
            .map_err(|e| CatalogError::from_fetch(e, chart.as_str()))?;
        let release_state = chart.release_state();
        Ok(items
            .into_iter()
            .zip(1..)
            .map(|(item, rank)| map::map_list_item(item, rank, release_state))
            .collect())
    }

    /// Fetch several chart lists concurrently. Each list succeeds or fails on
    /// its own; results come back in the order of `charts`.
    pub async fn resolve_charts(
        &self,
        charts: &[ChartKind],
    ) -> Vec<(ChartKind, Result<Vec<TitleSummary>>)> {
        let mut set = JoinSet::new();
        for (slot, chart) in charts.iter().copied().enumerate() {
            let catalog = self.clone();
            set.spawn(async move { (slot, chart, catalog.resolve_chart_list(chart).await) });
        }

        let mut results: Vec<Option<(ChartKind, Result<Vec<TitleSummary>>)>> =
            charts.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((slot, chart, result)) => results[slot] = Some((chart, result)),
                Err(e) => warn!("Chart task failed to complete: {}", e),
            }
        }
        charts
            .iter()
            .copied()
            .zip(results)
            .map(|(chart, result)| {
                result.unwrap_or_else(|| {
                    (
                        chart,
                        Err(CatalogError::UpstreamUnavailable(format!(
                            "{} fetch aborted",
                            chart
                        ))),
                    )
                })
            })
            .collect()
    }

    pub async fn search(&self, query: &str, scope: SearchScope) -> Result<SearchResults> {
        let query = require_non_empty(query, "search query")?;
        let items = self
            .tmdb
            .search(scope, query)
            .await
            .map_err(|e| CatalogError::UpstreamUnavailable(e.to_string()))?;
        let results: Vec<_> = items
            .into_iter()
            .filter_map(|item| map::map_search_item(item, scope))
            .collect();
        info!(query, ?scope, count = results.len(), "Search completed");
        Ok(SearchResults {
            search_type: scope.label().to_string(),
            expression: query.to_string(),
            error_message: results
                .is_empty()
                .then(|| scope.empty_message().to_string()),
            results,
        })
    }

    pub async fn resolve_person(&self, id: &str) -> Result<PersonRecord> {
        let id = require_non_empty(id, "person id")?;
        let person = self
            .tmdb
            .fetch_person(id)
            .await
            .map_err(|e| CatalogError::from_fetch(e, id))?;
        Ok(map::map_person(person))
    }

    pub async fn reviews(&self, id: &str) -> Result<Vec<Review>> {
        let id = require_non_empty(id, "title id")?;
        let reviews = self
            .tmdb
            .fetch_reviews(id)
            .await
            .map_err(|e| CatalogError::from_fetch(e, id))?;
        Ok(reviews.into_iter().map(map::map_review).collect())
    }
}

fn require_non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(trimmed)
}
