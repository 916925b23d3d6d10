use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::payload::{Paged, ReviewPayload};
use super::{
    ListItem, MoviePayload, PersonPayload, SearchItem, SeriesPayload, TmdbApi, MOVIE_APPEND,
    SERIES_APPEND,
};
use crate::config::Config;
use crate::error::FetchError;
use crate::models::{ChartKind, SearchScope};

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let user_agent = format!("moviefinder/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_timeout,
        )
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, path, self.api_key);
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        debug!(path, "TMDB request");
        let res = self.client.get(self.url(path, params)).send().await?;
        let status = res.status();
        let text = res.text().await?;
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn fetch_movie(&self, id: &str) -> Result<MoviePayload, FetchError> {
        let path = format!("/movie/{}", urlencoding::encode(id));
        self.get_json(&path, &[("append_to_response", MOVIE_APPEND)])
            .await
    }

    async fn fetch_series(&self, id: &str) -> Result<SeriesPayload, FetchError> {
        let path = format!("/tv/{}", urlencoding::encode(id));
        self.get_json(&path, &[("append_to_response", SERIES_APPEND)])
            .await
    }

    async fn fetch_chart(&self, chart: ChartKind) -> Result<Vec<ListItem>, FetchError> {
        let page: Paged<ListItem> = self.get_json(chart.path(), &[("page", "1")]).await?;
        Ok(page.into_results())
    }

    async fn search(&self, scope: SearchScope, query: &str) -> Result<Vec<SearchItem>, FetchError> {
        let page: Paged<SearchItem> = self.get_json(scope.path(), &[("query", query)]).await?;
        Ok(page.into_results())
    }

    async fn fetch_person(&self, id: &str) -> Result<PersonPayload, FetchError> {
        let path = format!("/person/{}", urlencoding::encode(id));
        self.get_json(&path, &[("append_to_response", "combined_credits")])
            .await
    }

    async fn fetch_reviews(&self, id: &str) -> Result<Vec<ReviewPayload>, FetchError> {
        let path = format!("/movie/{}/reviews", urlencoding::encode(id));
        let page: Paged<ReviewPayload> = self.get_json(&path, &[]).await?;
        Ok(page.into_results())
    }
}
