use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleKind {
    Movie,
    Series,
}

impl TitleKind {
    /// Provider path segment for this kind.
    pub fn path(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series => "tv",
        }
    }
}

/// A `key`/`value` pair as the provider lists genres, countries and languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: String,
    pub name: String,
    pub as_character: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trailer {
    pub video_id: String,
    pub video_title: String,
    pub thumbnail_url: String,
    pub link: String,
    pub link_embed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub link: String,
    pub aspect_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    pub posters: Vec<ImageRef>,
    pub backdrops: Vec<ImageRef>,
}

/// Rating source name to one-decimal score. Sources the provider does not
/// supply are absent from the map.
pub type RatingSummary = BTreeMap<String, String>;

pub const RATING_SOURCE_TMDB: &str = "theMovieDb";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxOffice {
    pub budget: String,
    pub cumulative_worldwide_gross: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesInfo {
    pub year_end: String,
    pub creators: Vec<Person>,
    pub seasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    pub id: String,
    pub kind: TitleKind,
    pub title: String,
    pub original_title: String,
    pub full_title: String,
    pub year: String,
    pub release_date: String,
    pub image: String,
    pub runtime_mins: Option<u32>,
    pub runtime_str: String,
    pub plot: String,
    pub content_rating: Option<String>,
    pub genres: Vec<Tag>,
    pub countries: Vec<Tag>,
    pub languages: Vec<Tag>,
    pub ratings: RatingSummary,
    pub rating_votes: Option<u64>,
    pub actors: Vec<CastMember>,
    pub stars: Vec<Person>,
    pub directors: Vec<Person>,
    pub writers: Vec<Person>,
    pub trailer: Option<Trailer>,
    pub images: ImageSet,
    pub similars: Vec<TitleSummary>,
    pub box_office: Option<BoxOffice>,
    pub series_info: Option<SeriesInfo>,
}

/// Reduced projection used by chart lists and "similar" rails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSummary {
    pub id: String,
    pub rank: u32,
    pub title: String,
    pub full_title: String,
    pub year: String,
    pub image: String,
    pub rating: Option<String>,
    pub rating_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_state: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    TopMovies,
    TopSeries,
    TrendingMovies,
    TrendingSeries,
    NowShowing,
    Upcoming,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::TopMovies,
        ChartKind::TopSeries,
        ChartKind::TrendingMovies,
        ChartKind::TrendingSeries,
        ChartKind::NowShowing,
        ChartKind::Upcoming,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ChartKind::TopMovies => "/movie/top_rated",
            ChartKind::TopSeries => "/tv/top_rated",
            ChartKind::TrendingMovies => "/movie/popular",
            ChartKind::TrendingSeries => "/tv/popular",
            ChartKind::NowShowing => "/movie/now_playing",
            ChartKind::Upcoming => "/movie/upcoming",
        }
    }

    pub fn kind(&self) -> TitleKind {
        match self {
            ChartKind::TopSeries | ChartKind::TrendingSeries => TitleKind::Series,
            _ => TitleKind::Movie,
        }
    }

    pub fn release_state(&self) -> Option<&'static str> {
        match self {
            ChartKind::NowShowing => Some("In Theaters"),
            ChartKind::Upcoming => Some("Coming Soon"),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::TopMovies => "top-movies",
            ChartKind::TopSeries => "top-series",
            ChartKind::TrendingMovies => "trending-movies",
            ChartKind::TrendingSeries => "trending-series",
            ChartKind::NowShowing => "now-showing",
            ChartKind::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown chart list '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Movies,
    Series,
    People,
}

impl SearchScope {
    pub fn path(&self) -> &'static str {
        match self {
            SearchScope::All => "/search/multi",
            SearchScope::Movies => "/search/movie",
            SearchScope::Series => "/search/tv",
            SearchScope::People => "/search/person",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchScope::All => "All",
            SearchScope::Movies => "Movie",
            SearchScope::Series => "Series",
            SearchScope::People => "Person",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            SearchScope::All => "No results found",
            SearchScope::Movies => "No movies found",
            SearchScope::Series => "No TV series found",
            SearchScope::People => "No people found",
        }
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(SearchScope::All),
            "movies" | "movie" => Ok(SearchScope::Movies),
            "series" | "tv" => Ok(SearchScope::Series),
            "people" | "person" | "names" => Ok(SearchScope::People),
            _ => Err(format!("unknown search scope '{}'", s)),
        }
    }
}

/// One search hit, tagged by `resultType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resultType")]
pub enum SearchResult {
    Movie(SearchHit),
    Series(SearchHit),
    Person(SearchHit),
}

impl SearchResult {
    pub fn hit(&self) -> &SearchHit {
        match self {
            SearchResult::Movie(h) | SearchResult::Series(h) | SearchResult::Person(h) => h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub search_type: String,
    pub expression: String,
    pub results: Vec<SearchResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownFor {
    pub id: String,
    pub title: String,
    pub full_title: String,
    pub year: String,
    pub role: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastCredit {
    pub id: String,
    pub role: String,
    pub title: String,
    pub year: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub image: String,
    pub summary: String,
    pub birth_date: String,
    pub death_date: String,
    pub known_for: Vec<KnownFor>,
    pub cast_movies: Vec<CastCredit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub username: String,
    pub link: String,
    pub date: String,
    pub rate: Option<String>,
    pub content: String,
}
