//! Provider response shapes. Everything the provider may omit or null out is
//! an `Option`; only the fields that identify a record are required, so a
//! response for the wrong resource type fails to decode.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub results: Option<Vec<T>>,
}

impl<T> Paged<T> {
    pub fn into_results(self) -> Vec<T> {
        self.results.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub english_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastCredit {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewCredit {
    pub id: u64,
    pub name: String,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credits {
    pub cast: Option<Vec<CastCredit>>,
    pub crew: Option<Vec<CrewCredit>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub video_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub file_path: String,
    pub aspect_ratio: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Images {
    pub posters: Option<Vec<Image>>,
    pub backdrops: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseCountry {
    pub iso_3166_1: String,
    pub certification: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Releases {
    pub countries: Option<Vec<ReleaseCountry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRating {
    pub iso_3166_1: String,
    pub rating: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
    pub season_number: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoviePayload {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub poster_path: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub production_countries: Option<Vec<ProductionCountry>>,
    pub spoken_languages: Option<Vec<SpokenLanguage>>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub credits: Option<Credits>,
    pub videos: Option<Paged<Video>>,
    pub images: Option<Images>,
    pub similar: Option<Paged<ListItem>>,
    pub releases: Option<Releases>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesPayload {
    pub id: u64,
    pub name: String,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub episode_run_time: Option<Vec<u32>>,
    pub poster_path: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub production_countries: Option<Vec<ProductionCountry>>,
    pub spoken_languages: Option<Vec<SpokenLanguage>>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub created_by: Option<Vec<Creator>>,
    pub seasons: Option<Vec<Season>>,
    pub credits: Option<Credits>,
    pub videos: Option<Paged<Video>>,
    pub images: Option<Images>,
    pub similar: Option<Paged<ListItem>>,
    pub content_ratings: Option<Paged<ContentRating>>,
}

/// Entry of a chart list or a "similar" rail. Movies carry `title` and
/// `release_date`, series carry `name` and `first_air_date`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListItem {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: u64,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub profile_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub known_for_department: Option<String>,
    pub known_for: Option<Vec<ListItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonCredit {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub character: Option<String>,
    pub job: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombinedCredits {
    pub cast: Option<Vec<PersonCredit>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonPayload {
    pub id: u64,
    pub name: String,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub combined_credits: Option<CombinedCredits>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorDetails {
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPayload {
    pub author: String,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub content: Option<String>,
    pub author_details: Option<AuthorDetails>,
}
