//! Kinowood API Data Structures
//!
//! Typed views of the listing and detail responses. Every field is decoded
//! leniently so one malformed value never discards the rest of a document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;

/// Quality label such as `"720"` or `"1080"`.
pub type QualityLabel = String;

/// Quality preferred when a title is first opened.
pub const PREFERRED_QUALITY: &str = "720";

fn asset_url(api_base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{api_base}{p}"))
}

/// Movie summary as it appears in listings.
///
/// Identity is `id`; two records with the same id are the same movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MovieWire")]
pub struct Movie {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// Asset path fields under every spelling the backend has used.
///
/// Each spelling is its own field so a document carrying two of them decodes
/// instead of tripping serde's duplicate-field check. The first one present wins.
#[derive(Debug, Default, Deserialize)]
struct AssetPaths {
    #[serde(default, deserialize_with = "lenient::text")]
    image: Option<String>,
    #[serde(default, rename = "imagePath", deserialize_with = "lenient::text")]
    image_camel: Option<String>,
    #[serde(default, rename = "image_path", deserialize_with = "lenient::text")]
    image_snake: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    poster: Option<String>,
    #[serde(default, rename = "posterPath", deserialize_with = "lenient::text")]
    poster_camel: Option<String>,
    #[serde(default, rename = "poster_path", deserialize_with = "lenient::text")]
    poster_snake: Option<String>,
}

impl AssetPaths {
    fn image(&mut self) -> Option<String> {
        self.image
            .take()
            .or_else(|| self.image_camel.take())
            .or_else(|| self.image_snake.take())
    }

    fn poster(&mut self) -> Option<String> {
        self.poster
            .take()
            .or_else(|| self.poster_camel.take())
            .or_else(|| self.poster_snake.take())
    }
}

#[derive(Debug, Deserialize)]
struct MovieWire {
    #[serde(deserialize_with = "lenient::id")]
    id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    year: Option<String>,
    #[serde(flatten)]
    assets: AssetPaths,
}

impl From<MovieWire> for Movie {
    fn from(mut wire: MovieWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            year: wire.year,
            image: wire.assets.image(),
            poster: wire.assets.poster(),
        }
    }
}

impl Movie {
    /// Create a summary with only an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            year: None,
            image: None,
            poster: None,
        }
    }

    /// Absolute image URL (plain concatenation with `api_base`).
    #[must_use]
    pub fn image_url(&self, api_base: &str) -> Option<String> {
        asset_url(api_base, self.image.as_deref())
    }

    /// Absolute poster URL (plain concatenation with `api_base`).
    #[must_use]
    pub fn poster_url(&self, api_base: &str) -> Option<String> {
        asset_url(api_base, self.poster.as_deref())
    }
}

/// Quality label → upstream playback URL, in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Video {
    urls: IndexMap<QualityLabel, String>,
}

impl Video {
    /// Accepts `{"urls": {q: url}}` or a bare `{q: url}` object.
    /// Anything else, and any non-string URL, contributes nothing.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let urls = match map.remove("urls") {
            Some(Value::Object(urls)) => urls,
            Some(_) => return Self::default(),
            None => map,
        };

        urls.into_iter()
            .filter_map(|(quality, url)| match url {
                Value::String(url) => Some((quality, url)),
                _ => None,
            })
            .collect()
    }

    /// Upstream URL for a quality.
    #[must_use]
    pub fn url(&self, quality: &str) -> Option<&str> {
        self.urls.get(quality).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, quality: &str) -> bool {
        self.urls.contains_key(quality)
    }

    /// Quality labels in backend order.
    pub fn qualities(&self) -> impl Iterator<Item = &str> {
        self.urls.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.urls.iter().map(|(q, u)| (q.as_str(), u.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Apply `f` to every upstream URL, keeping quality order.
    pub(crate) fn map_urls(self, mut f: impl FnMut(&str) -> String) -> Self {
        self.urls
            .into_iter()
            .map(|(quality, url)| {
                let url = f(&url);
                (quality, url)
            })
            .collect()
    }
}

impl<Q: Into<String>, U: Into<String>> FromIterator<(Q, U)> for Video {
    fn from_iter<I: IntoIterator<Item = (Q, U)>>(iter: I) -> Self {
        Self {
            urls: iter
                .into_iter()
                .map(|(q, u)| (q.into(), u.into()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Video {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?
            .map(Self::from_value)
            .unwrap_or_default())
    }
}

/// Full metadata for a single title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DetailedMovieWire")]
pub struct DetailedMovie {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub video: Video,
}

#[derive(Debug, Deserialize)]
struct DetailedMovieWire {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    original_title: Option<String>,
    #[serde(default, rename = "originalTitle", deserialize_with = "lenient::text")]
    original_title_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    year: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    director: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    writer: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    actors: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    genres: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    duration: Option<String>,
    #[serde(flatten)]
    assets: AssetPaths,
    #[serde(default)]
    video: Video,
}

impl From<DetailedMovieWire> for DetailedMovie {
    fn from(mut wire: DetailedMovieWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            original_title: wire.original_title.or(wire.original_title_camel),
            year: wire.year,
            description: wire.description,
            director: wire.director,
            writer: wire.writer,
            actors: wire.actors,
            genres: wire.genres,
            duration: wire.duration,
            image: wire.assets.image(),
            poster: wire.assets.poster(),
            video: wire.video,
        }
    }
}

impl DetailedMovie {
    /// The listing-level view of this title.
    #[must_use]
    pub fn summary(&self) -> Movie {
        Movie {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            image: self.image.clone(),
            poster: self.poster.clone(),
        }
    }

    #[must_use]
    pub fn poster_url(&self, api_base: &str) -> Option<String> {
        asset_url(api_base, self.poster.as_deref())
    }
}

/// Pagination counters carried through from the listing response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: Option<u64>,
    pub total_pages: Option<u64>,
    pub current_page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Decoded listing or search response.
///
/// Any of the three groupings may be absent; absence contributes nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "CatalogPayloadWire")]
pub struct CatalogPayload {
    pub films: Option<Vec<Movie>>,
    pub no_poster_films: Option<Vec<Movie>>,
    pub genre_films: Option<IndexMap<String, Vec<Movie>>>,
    pub total: Option<u64>,
    pub total_pages: Option<u64>,
    pub current_page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Listing fields under both spellings; snake_case wins when both are present.
#[derive(Debug, Deserialize)]
struct CatalogPayloadWire {
    #[serde(default, deserialize_with = "lenient::movies")]
    films: Option<Vec<Movie>>,
    #[serde(default, deserialize_with = "lenient::movies")]
    no_poster_films: Option<Vec<Movie>>,
    #[serde(default, rename = "noPosterFilms", deserialize_with = "lenient::movies")]
    no_poster_films_camel: Option<Vec<Movie>>,
    #[serde(default, deserialize_with = "lenient::genre_groups")]
    genre_films: Option<IndexMap<String, Vec<Movie>>>,
    #[serde(default, rename = "genreFilms", deserialize_with = "lenient::genre_groups")]
    genre_films_camel: Option<IndexMap<String, Vec<Movie>>>,
    #[serde(default, deserialize_with = "lenient::counter")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::counter")]
    total_pages: Option<u64>,
    #[serde(default, rename = "totalPages", deserialize_with = "lenient::counter")]
    total_pages_camel: Option<u64>,
    #[serde(default, deserialize_with = "lenient::counter")]
    current_page: Option<u64>,
    #[serde(default, rename = "currentPage", deserialize_with = "lenient::counter")]
    current_page_camel: Option<u64>,
    #[serde(default, deserialize_with = "lenient::counter")]
    per_page: Option<u64>,
    #[serde(default, rename = "perPage", deserialize_with = "lenient::counter")]
    per_page_camel: Option<u64>,
}

impl From<CatalogPayloadWire> for CatalogPayload {
    fn from(wire: CatalogPayloadWire) -> Self {
        Self {
            films: wire.films,
            no_poster_films: wire.no_poster_films.or(wire.no_poster_films_camel),
            genre_films: wire.genre_films.or(wire.genre_films_camel),
            total: wire.total,
            total_pages: wire.total_pages.or(wire.total_pages_camel),
            current_page: wire.current_page.or(wire.current_page_camel),
            per_page: wire.per_page.or(wire.per_page_camel),
        }
    }
}

impl CatalogPayload {
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination {
            total: self.total,
            total_pages: self.total_pages,
            current_page: self.current_page,
            per_page: self.per_page,
        }
    }
}

/// Decoded detail response. `similar` is passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPayload {
    pub film: DetailedMovie,
    pub similar: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_numeric_fields() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 17,
            "title": "Solaris",
            "year": 1972,
            "image": "img/17.jpg",
            "rating": 8.1
        }))
        .unwrap();
        assert_eq!(movie.id, "17");
        assert_eq!(movie.year.as_deref(), Some("1972"));
        assert_eq!(movie.image.as_deref(), Some("img/17.jpg"));
        assert_eq!(movie.poster, None);
    }

    #[test]
    fn test_movie_camel_case_paths() {
        let movie: Movie = serde_json::from_value(json!({
            "id": "3",
            "imagePath": "a.jpg",
            "posterPath": "b.jpg"
        }))
        .unwrap();
        assert_eq!(movie.image.as_deref(), Some("a.jpg"));
        assert_eq!(movie.poster.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn test_movie_with_both_path_spellings() {
        let movie: Movie = serde_json::from_value(json!({
            "id": "1",
            "imagePath": "b.jpg",
            "image": "a.jpg",
            "poster_path": "p2.jpg",
            "posterPath": "p1.jpg"
        }))
        .unwrap();
        assert_eq!(movie.image.as_deref(), Some("a.jpg"));
        assert_eq!(movie.poster.as_deref(), Some("p1.jpg"));
    }

    #[test]
    fn test_detailed_movie_with_both_title_spellings() {
        let film: DetailedMovie = serde_json::from_value(json!({
            "id": 9,
            "originalTitle": "camel",
            "original_title": "snake",
            "image": "a.jpg",
            "imagePath": "b.jpg"
        }))
        .unwrap();
        assert_eq!(film.original_title.as_deref(), Some("snake"));
        assert_eq!(film.image.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn test_catalog_payload_with_both_counter_spellings() {
        let payload: CatalogPayload = serde_json::from_value(json!({
            "totalPages": 3,
            "total_pages": 2,
            "perPage": 24,
            "noPosterFilms": [{"id": "x"}],
            "no_poster_films": "broken"
        }))
        .unwrap();
        assert_eq!(payload.total_pages, Some(2));
        assert_eq!(payload.per_page, Some(24));
        let ids: Vec<_> = payload
            .no_poster_films
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["x"]);
    }

    #[test]
    fn test_movie_without_id_is_rejected() {
        assert!(serde_json::from_value::<Movie>(json!({"title": "No id"})).is_err());
        assert!(serde_json::from_value::<Movie>(json!({"id": null})).is_err());
    }

    #[test]
    fn test_movie_wrong_typed_field_becomes_absent() {
        let movie: Movie =
            serde_json::from_value(json!({"id": "1", "title": ["x"], "year": {"y": 1}})).unwrap();
        assert_eq!(movie.title, None);
        assert_eq!(movie.year, None);
    }

    #[test]
    fn test_asset_urls() {
        let mut movie = Movie::new("1", "Stalker");
        movie.image = Some("uploads/1.jpg".to_string());
        movie.poster = Some(String::new());
        assert_eq!(
            movie.image_url("https://kinowood.ru/").as_deref(),
            Some("https://kinowood.ru/uploads/1.jpg")
        );
        assert_eq!(movie.poster_url("https://kinowood.ru/"), None);
    }

    #[test]
    fn test_video_nested_urls_keep_order() {
        let video = Video::from_value(json!({
            "urls": {"1080": "https://h/a", "480": "https://h/b", "720": "https://h/c"}
        }));
        assert_eq!(video.qualities().collect::<Vec<_>>(), ["1080", "480", "720"]);
        assert_eq!(video.url("480"), Some("https://h/b"));
    }

    #[test]
    fn test_video_bare_map_and_bad_entries() {
        let video = Video::from_value(json!({"720": "https://h/a", "1080": 5}));
        assert_eq!(video.len(), 1);
        assert!(video.contains("720"));
        assert!(!video.contains("1080"));

        assert!(Video::from_value(json!("nope")).is_empty());
        assert!(Video::from_value(json!({"urls": []})).is_empty());
    }

    #[test]
    fn test_detailed_movie_missing_video() {
        let film: DetailedMovie = serde_json::from_value(json!({"id": "5"})).unwrap();
        assert!(film.video.is_empty());
        assert_eq!(film.summary().id, "5");
    }

    #[test]
    fn test_catalog_payload_counters() {
        let payload: CatalogPayload = serde_json::from_value(json!({
            "total": 120,
            "total_pages": "6",
            "currentPage": 2,
            "per_page": "many"
        }))
        .unwrap();
        assert_eq!(
            payload.pagination(),
            Pagination {
                total: Some(120),
                total_pages: Some(6),
                current_page: Some(2),
                per_page: None,
            }
        );
        assert!(payload.films.is_none());
    }

    #[test]
    fn test_catalog_payload_skips_bad_entries() {
        let payload: CatalogPayload = serde_json::from_value(json!({
            "films": [{"id": "1"}, {"title": "no id"}, 7, {"id": 2}],
            "no_poster_films": "not a list",
            "genre_films": []
        }))
        .unwrap();
        let ids: Vec<_> = payload.films.unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, ["1", "2"]);
        assert!(payload.no_poster_films.is_none());
        assert!(payload.genre_films.is_none());
    }
}
