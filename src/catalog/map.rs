use tracing::debug;

use super::text::{
    backdrop_url, format_dollars, format_rating, format_runtime, full_title, image_url, non_empty,
    review_date, year_from_date,
};
use crate::models::{
    BoxOffice, CastCredit, CastMember, ImageRef, ImageSet, KnownFor, Person, PersonRecord,
    RatingSummary, Review, SearchHit, SearchResult, SearchScope, SeriesInfo, Tag, TitleKind,
    TitleRecord, TitleSummary, Trailer, RATING_SOURCE_TMDB,
};
use crate::tmdb::payload::{
    Credits, Genre, Image, Images, ListItem, Paged, PersonCredit, ProductionCountry,
    SpokenLanguage, Video,
};
use crate::tmdb::{MoviePayload, PersonPayload, ReviewPayload, SearchItem, SeriesPayload};

const MAX_ACTORS: usize = 20;
const MAX_STARS: usize = 3;
const MAX_POSTERS: usize = 10;
const MAX_BACKDROPS: usize = 10;
const MAX_SIMILARS: usize = 10;
const MAX_KNOWN_FOR: usize = 10;
const WRITER_JOBS: [&str; 3] = ["Writer", "Screenplay", "Story"];

/// Names of optional sections the provider left out, reported once per record.
#[derive(Default)]
struct Defaulted(Vec<&'static str>);

impl Defaulted {
    fn list<T>(&mut self, field: &'static str, value: Option<Vec<T>>) -> Vec<T> {
        match value {
            Some(v) => v,
            None => {
                self.0.push(field);
                Vec::new()
            }
        }
    }

    fn section<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.0.push(field);
        }
        value
    }

    fn report(&self, kind: TitleKind, id: &str) {
        if !self.0.is_empty() {
            debug!(?kind, id, fields = ?self.0, "Provider omitted fields, using defaults");
        }
    }
}

pub(crate) fn map_movie(movie: MoviePayload) -> TitleRecord {
    let mut defaulted = Defaulted::default();
    let id = movie.id.to_string();
    let year = year_from_date(movie.release_date.as_deref());
    let credits = defaulted.section("credits", movie.credits);
    let CrewLists {
        actors,
        stars,
        directors,
        writers,
    } = crew_lists(credits);
    let images = defaulted.section("images", movie.images);
    let videos = defaulted.section("videos", movie.videos);
    let similar = defaulted.section("similar", movie.similar);
    let runtime_mins = movie.runtime.filter(|r| *r > 0);

    let content_rating = movie
        .releases
        .and_then(|r| r.countries)
        .unwrap_or_default()
        .into_iter()
        .filter(|c| c.iso_3166_1 == "US")
        .find_map(|c| non_empty(c.certification.as_deref()).map(str::to_string));

    let record = TitleRecord {
        full_title: full_title(&movie.title, &year),
        original_title: movie
            .original_title
            .unwrap_or_else(|| movie.title.clone()),
        title: movie.title,
        kind: TitleKind::Movie,
        year,
        release_date: movie.release_date.unwrap_or_default(),
        image: image_url(movie.poster_path.as_deref()),
        runtime_str: runtime_mins.map(format_runtime).unwrap_or_default(),
        runtime_mins,
        plot: movie.overview.unwrap_or_default(),
        content_rating,
        genres: genre_tags(defaulted.list("genres", movie.genres)),
        countries: country_tags(defaulted.list("production_countries", movie.production_countries)),
        languages: language_tags(defaulted.list("spoken_languages", movie.spoken_languages)),
        ratings: ratings(movie.vote_average),
        rating_votes: movie.vote_count,
        actors,
        stars,
        directors,
        writers,
        trailer: select_trailer(videos),
        images: image_set(images),
        similars: similar_summaries(similar),
        box_office: Some(BoxOffice {
            budget: format_dollars(movie.budget),
            cumulative_worldwide_gross: format_dollars(movie.revenue),
        }),
        series_info: None,
        id,
    };
    defaulted.report(record.kind, &record.id);
    record
}

pub(crate) fn map_series(series: SeriesPayload) -> TitleRecord {
    let mut defaulted = Defaulted::default();
    let id = series.id.to_string();
    let year = year_from_date(series.first_air_date.as_deref());
    let credits = defaulted.section("credits", series.credits);
    let CrewLists { actors, stars, .. } = crew_lists(credits);
    let images = defaulted.section("images", series.images);
    let videos = defaulted.section("videos", series.videos);
    let similar = defaulted.section("similar", series.similar);
    let creators: Vec<Person> = defaulted
        .list("created_by", series.created_by)
        .into_iter()
        .map(|c| Person {
            id: c.id.to_string(),
            name: c.name,
        })
        .collect();
    let runtime_mins = series
        .episode_run_time
        .as_ref()
        .and_then(|r| r.first().copied())
        .filter(|r| *r > 0);

    let content_rating = series
        .content_ratings
        .map(Paged::into_results)
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.iso_3166_1 == "US")
        .find_map(|r| non_empty(r.rating.as_deref()).map(str::to_string));

    let seasons = defaulted
        .list("seasons", series.seasons)
        .into_iter()
        .map(|s| s.season_number.to_string())
        .collect();

    let record = TitleRecord {
        full_title: full_title(&series.name, &year),
        original_title: series
            .original_name
            .unwrap_or_else(|| series.name.clone()),
        title: series.name,
        kind: TitleKind::Series,
        year,
        release_date: series.first_air_date.unwrap_or_default(),
        image: image_url(series.poster_path.as_deref()),
        runtime_str: runtime_mins
            .map(|r| format!("{} min/episode", r))
            .unwrap_or_default(),
        runtime_mins,
        plot: series.overview.unwrap_or_default(),
        content_rating,
        genres: genre_tags(defaulted.list("genres", series.genres)),
        countries: country_tags(defaulted.list("production_countries", series.production_countries)),
        languages: language_tags(defaulted.list("spoken_languages", series.spoken_languages)),
        ratings: ratings(series.vote_average),
        rating_votes: series.vote_count,
        actors,
        stars,
        directors: creators.clone(),
        writers: creators.clone(),
        trailer: select_trailer(videos),
        images: image_set(images),
        similars: similar_summaries(similar),
        box_office: None,
        series_info: Some(SeriesInfo {
            year_end: year_from_date(series.last_air_date.as_deref()),
            creators,
            seasons,
        }),
        id,
    };
    defaulted.report(record.kind, &record.id);
    record
}

/// Rank is the 1-based position in the provider response.
pub(crate) fn map_list_item(item: ListItem, rank: u32, release_state: Option<&str>) -> TitleSummary {
    let title = item.title.or(item.name).unwrap_or_default();
    let year = year_from_date(
        item.release_date
            .as_deref()
            .or(item.first_air_date.as_deref()),
    );
    TitleSummary {
        id: item.id.to_string(),
        rank,
        full_title: full_title(&title, &year),
        title,
        year,
        image: image_url(item.poster_path.as_deref()),
        rating: format_rating(item.vote_average),
        rating_count: item.vote_count,
        plot: release_state.map(|_| item.overview.unwrap_or_default()),
        release_state: release_state.map(str::to_string),
    }
}

/// `None` for multi-search entries of an unknown media type.
pub(crate) fn map_search_item(item: SearchItem, scope: SearchScope) -> Option<SearchResult> {
    let media = match scope {
        SearchScope::Movies => "movie",
        SearchScope::Series => "tv",
        SearchScope::People => "person",
        SearchScope::All => item.media_type.as_deref()?,
    };
    let id = item.id.to_string();
    let title = item
        .title
        .clone()
        .or_else(|| item.name.clone())
        .unwrap_or_default();
    match media {
        "movie" => {
            let description = non_empty(item.overview.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("Released: {}", year_from_date(item.release_date.as_deref()))
                });
            Some(SearchResult::Movie(SearchHit {
                id,
                title,
                image: image_url(item.poster_path.as_deref()),
                description,
            }))
        }
        "tv" => {
            let description = non_empty(item.overview.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!(
                        "First aired: {}",
                        year_from_date(item.first_air_date.as_deref())
                    )
                });
            Some(SearchResult::Series(SearchHit {
                id,
                title,
                image: image_url(item.poster_path.as_deref()),
                description,
            }))
        }
        "person" => {
            let description = non_empty(item.known_for_department.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    item.known_for
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|w| w.title.or(w.name))
                        .collect::<Vec<_>>()
                        .join(", ")
                });
            Some(SearchResult::Person(SearchHit {
                id,
                title,
                image: image_url(item.profile_path.as_deref()),
                description,
            }))
        }
        _ => None,
    }
}

pub(crate) fn map_person(person: PersonPayload) -> PersonRecord {
    let credits: Vec<PersonCredit> = person
        .combined_credits
        .and_then(|c| c.cast)
        .unwrap_or_default();
    let known_for = credits
        .iter()
        .take(MAX_KNOWN_FOR)
        .map(|c| {
            let title = credit_title(c);
            let year = credit_year(c);
            KnownFor {
                id: c.id.to_string(),
                full_title: full_title(&title, &year),
                title,
                year,
                role: c
                    .character
                    .clone()
                    .filter(|s| !s.is_empty())
                    .or_else(|| c.job.clone())
                    .unwrap_or_default(),
                image: image_url(c.poster_path.as_deref()),
            }
        })
        .collect();
    let cast_movies = credits
        .iter()
        .map(|c| CastCredit {
            id: c.id.to_string(),
            role: c.character.clone().unwrap_or_default(),
            title: credit_title(c),
            year: credit_year(c),
            description: c.overview.clone().unwrap_or_default(),
        })
        .collect();

    PersonRecord {
        id: person.id.to_string(),
        name: person.name,
        role: person.known_for_department.unwrap_or_default(),
        image: image_url(person.profile_path.as_deref()),
        summary: person.biography.unwrap_or_default(),
        birth_date: person.birthday.unwrap_or_default(),
        death_date: person.deathday.unwrap_or_default(),
        known_for,
        cast_movies,
    }
}

pub(crate) fn map_review(review: ReviewPayload) -> Review {
    Review {
        link: review.url.unwrap_or_default(),
        date: review_date(review.created_at.as_deref()),
        rate: review
            .author_details
            .and_then(|d| d.rating)
            .map(|r| r.to_string()),
        content: review.content.unwrap_or_default(),
        username: review.author,
    }
}

fn credit_title(c: &PersonCredit) -> String {
    c.title.clone().or_else(|| c.name.clone()).unwrap_or_default()
}

fn credit_year(c: &PersonCredit) -> String {
    year_from_date(c.release_date.as_deref().or(c.first_air_date.as_deref()))
}

struct CrewLists {
    actors: Vec<CastMember>,
    stars: Vec<Person>,
    directors: Vec<Person>,
    writers: Vec<Person>,
}

fn crew_lists(credits: Option<Credits>) -> CrewLists {
    let (cast, crew) = match credits {
        Some(c) => (c.cast.unwrap_or_default(), c.crew.unwrap_or_default()),
        None => (Vec::new(), Vec::new()),
    };
    let stars = cast
        .iter()
        .take(MAX_STARS)
        .map(|a| Person {
            id: a.id.to_string(),
            name: a.name.clone(),
        })
        .collect();
    let actors = cast
        .into_iter()
        .take(MAX_ACTORS)
        .map(|a| CastMember {
            id: a.id.to_string(),
            image: image_url(a.profile_path.as_deref()),
            as_character: a.character.unwrap_or_default(),
            name: a.name,
        })
        .collect();
    let with_jobs = |jobs: &[&str]| -> Vec<Person> {
        crew.iter()
            .filter(|c| c.job.as_deref().is_some_and(|j| jobs.contains(&j)))
            .map(|c| Person {
                id: c.id.to_string(),
                name: c.name.clone(),
            })
            .collect()
    };
    CrewLists {
        actors,
        stars,
        directors: with_jobs(&["Director"]),
        writers: with_jobs(&WRITER_JOBS),
    }
}

fn ratings(vote_average: Option<f64>) -> RatingSummary {
    let mut summary = RatingSummary::new();
    if let Some(score) = format_rating(vote_average) {
        summary.insert(RATING_SOURCE_TMDB.to_string(), score);
    }
    summary
}

fn genre_tags(genres: Vec<Genre>) -> Vec<Tag> {
    genres
        .into_iter()
        .map(|g| Tag {
            key: g.id.to_string(),
            value: g.name,
        })
        .collect()
}

fn country_tags(countries: Vec<ProductionCountry>) -> Vec<Tag> {
    countries
        .into_iter()
        .map(|c| Tag {
            value: c.name.unwrap_or_else(|| c.iso_3166_1.clone()),
            key: c.iso_3166_1,
        })
        .collect()
}

fn language_tags(languages: Vec<SpokenLanguage>) -> Vec<Tag> {
    languages
        .into_iter()
        .map(|l| Tag {
            value: l
                .english_name
                .filter(|n| !n.is_empty())
                .or(l.name)
                .unwrap_or_else(|| l.iso_639_1.clone()),
            key: l.iso_639_1,
        })
        .collect()
}

fn select_trailer(videos: Option<Paged<Video>>) -> Option<Trailer> {
    videos
        .map(Paged::into_results)
        .unwrap_or_default()
        .into_iter()
        .find(|v| {
            v.video_type.as_deref() == Some("Trailer") && v.site.as_deref() == Some("YouTube")
        })
        .map(|v| Trailer {
            thumbnail_url: format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", v.key),
            link: format!("https://www.youtube.com/watch?v={}", v.key),
            link_embed: format!("https://www.youtube.com/embed/{}", v.key),
            video_title: v.name.unwrap_or_default(),
            video_id: v.key,
        })
}

fn image_set(images: Option<Images>) -> ImageSet {
    let Some(images) = images else {
        return ImageSet::default();
    };
    let refs = |list: Option<Vec<Image>>, max: usize, url: fn(&str) -> String| -> Vec<ImageRef> {
        list.unwrap_or_default()
            .into_iter()
            .take(max)
            .map(|img| ImageRef {
                link: url(&img.file_path),
                aspect_ratio: img.aspect_ratio.unwrap_or_default(),
            })
            .collect()
    };
    ImageSet {
        posters: refs(images.posters, MAX_POSTERS, |p| image_url(Some(p))),
        backdrops: refs(images.backdrops, MAX_BACKDROPS, backdrop_url),
    }
}

fn similar_summaries(similar: Option<Paged<ListItem>>) -> Vec<TitleSummary> {
    similar
        .map(Paged::into_results)
        .unwrap_or_default()
        .into_iter()
        .take(MAX_SIMILARS)
        .zip(1..)
        .map(|(item, rank)| map_list_item(item, rank, None))
        .collect()
}
