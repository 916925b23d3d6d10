use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{ChartKind, SearchScope};

mod client;
pub mod payload;

pub use client::TmdbClient;
pub use payload::{
    ListItem, MoviePayload, PersonPayload, ReviewPayload, SearchItem, SeriesPayload,
};

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";

pub const MOVIE_APPEND: &str = "credits,videos,images,similar,releases";
pub const SERIES_APPEND: &str = "credits,videos,images,similar,content_ratings";

/// Raw access to the provider. Every call is exactly one outbound request.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn fetch_movie(&self, id: &str) -> Result<MoviePayload, FetchError>;
    async fn fetch_series(&self, id: &str) -> Result<SeriesPayload, FetchError>;
    async fn fetch_chart(&self, chart: ChartKind) -> Result<Vec<ListItem>, FetchError>;
    async fn search(&self, scope: SearchScope, query: &str) -> Result<Vec<SearchItem>, FetchError>;
    async fn fetch_person(&self, id: &str) -> Result<PersonPayload, FetchError>;
    async fn fetch_reviews(&self, id: &str) -> Result<Vec<ReviewPayload>, FetchError>;
}
