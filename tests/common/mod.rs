#![allow(dead_code)]

use moviefinder::error::FetchError;
use moviefinder::models::{ChartKind, SearchScope};
use moviefinder::tmdb::payload::Paged;
use moviefinder::tmdb::{
    ListItem, MoviePayload, PersonPayload, ReviewPayload, SearchItem, SeriesPayload, TmdbApi,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

pub enum Reply {
    Json(Value),
    NotFound,
    Unavailable,
    Status(u16),
}

/// Answers by request path and records every path it was asked for.
#[derive(Default)]
pub struct FakeTmdb {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

impl FakeTmdb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, reply: Reply) -> Self {
        self.replies.insert(path.to_string(), reply);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn reply<T: DeserializeOwned>(&self, path: String) -> Result<T, FetchError> {
        self.requests.lock().unwrap().push(path.clone());
        match self.replies.get(&path) {
            Some(Reply::Json(v)) => Ok(serde_json::from_value(v.clone())?),
            Some(Reply::Unavailable) => Err(FetchError::Status {
                path,
                status: 503,
                message: "service unavailable".to_string(),
            }),
            Some(Reply::Status(status)) => Err(FetchError::Status {
                path,
                status: *status,
                message: format!("status {}", status),
            }),
            Some(Reply::NotFound) | None => Err(FetchError::NotFound(path)),
        }
    }
}

#[async_trait::async_trait]
impl TmdbApi for FakeTmdb {
    async fn fetch_movie(&self, id: &str) -> Result<MoviePayload, FetchError> {
        self.reply(format!("/movie/{}", id))
    }

    async fn fetch_series(&self, id: &str) -> Result<SeriesPayload, FetchError> {
        self.reply(format!("/tv/{}", id))
    }

    async fn fetch_chart(&self, chart: ChartKind) -> Result<Vec<ListItem>, FetchError> {
        let page: Paged<ListItem> = self.reply(chart.path().to_string())?;
        Ok(page.into_results())
    }

    async fn search(&self, scope: SearchScope, _query: &str) -> Result<Vec<SearchItem>, FetchError> {
        let page: Paged<SearchItem> = self.reply(scope.path().to_string())?;
        Ok(page.into_results())
    }

    async fn fetch_person(&self, id: &str) -> Result<PersonPayload, FetchError> {
        self.reply(format!("/person/{}", id))
    }

    async fn fetch_reviews(&self, id: &str) -> Result<Vec<ReviewPayload>, FetchError> {
        let page: Paged<ReviewPayload> = self.reply(format!("/movie/{}/reviews", id))?;
        Ok(page.into_results())
    }
}

pub fn inception() -> Value {
    json!({
        "id": 27205,
        "title": "Inception",
        "original_title": "Inception",
        "overview": "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets.",
        "release_date": "2010-07-15",
        "runtime": 148,
        "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
        "vote_average": 8.369,
        "vote_count": 35000,
        "budget": 160000000,
        "revenue": 825532764,
        "genres": [
            { "id": 28, "name": "Action" },
            { "id": 878, "name": "Science Fiction" },
            { "id": 12, "name": "Adventure" }
        ],
        "production_countries": [
            { "iso_3166_1": "GB", "name": "United Kingdom" },
            { "iso_3166_1": "US", "name": "United States of America" }
        ],
        "spoken_languages": [
            { "iso_639_1": "en", "english_name": "English", "name": "English" },
            { "iso_639_1": "ja", "english_name": "Japanese", "name": "日本語" }
        ],
        "credits": {
            "cast": [
                { "id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb", "profile_path": "/leo.jpg" },
                { "id": 24045, "name": "Joseph Gordon-Levitt", "character": "Arthur" }
            ],
            "crew": [
                { "id": 525, "name": "Christopher Nolan", "job": "Director" },
                { "id": 525, "name": "Christopher Nolan", "job": "Writer" }
            ]
        },
        "videos": { "results": [
            { "key": "YoHD9XEInc0", "name": "Inception Trailer", "site": "YouTube", "type": "Trailer" }
        ]},
        "images": {
            "posters": [ { "file_path": "/poster1.jpg", "aspect_ratio": 0.667 } ],
            "backdrops": [ { "file_path": "/back1.jpg", "aspect_ratio": 1.778 } ]
        },
        "similar": { "results": [
            { "id": 155, "title": "The Dark Knight", "release_date": "2008-07-16", "vote_average": 8.5 }
        ]},
        "releases": { "countries": [ { "iso_3166_1": "US", "certification": "PG-13" } ] }
    })
}

pub fn game_of_thrones() -> Value {
    json!({
        "id": 1399,
        "name": "Game of Thrones",
        "original_name": "Game of Thrones",
        "first_air_date": "2011-04-17",
        "last_air_date": "2019-05-19",
        "episode_run_time": [],
        "vote_average": 8.4,
        "created_by": [
            { "id": 9813, "name": "David Benioff" },
            { "id": 228068, "name": "D. B. Weiss" }
        ],
        "seasons": [ { "season_number": 1 }, { "season_number": 2 } ],
        "content_ratings": { "results": [ { "iso_3166_1": "US", "rating": "TV-MA" } ] }
    })
}

pub fn chart(titles: &[(u64, &str)]) -> Value {
    let results: Vec<Value> = titles
        .iter()
        .map(|(id, title)| json!({ "id": id, "title": title, "release_date": "2020-01-01", "vote_average": 7.26 }))
        .collect();
    json!({ "page": 1, "results": results })
}

pub fn series_chart(titles: &[(u64, &str)]) -> Value {
    let results: Vec<Value> = titles
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name, "first_air_date": "2019-09-01" }))
        .collect();
    json!({ "page": 1, "results": results })
}
