//! Catalog normalization
//!
//! A listing response can describe the same movie in several groupings. This
//! module flattens them into one duplicate-free sequence.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{CatalogPayload, Movie, Pagination};

/// Flatten a listing payload into unique movies in first-seen order.
///
/// Sources are visited in a fixed order: `films`, then `no_poster_films`, then
/// each genre group in the order the backend emitted them. The first record
/// seen for an id wins; later records with that id are dropped. The seen-set
/// lives only for the duration of this call.
#[must_use]
pub fn normalize(payload: CatalogPayload) -> Vec<Movie> {
    let CatalogPayload {
        films,
        no_poster_films,
        genre_films,
        ..
    } = payload;

    let sources = films
        .into_iter()
        .chain(no_poster_films)
        .chain(genre_films.into_iter().flat_map(|groups| groups.into_values()))
        .flatten();

    let mut seen = HashSet::new();
    sources
        .filter(|movie| seen.insert(movie.id.clone()))
        .collect()
}

/// Normalized listing ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub movies: Vec<Movie>,
    pub pagination: Pagination,
}

impl CatalogPage {
    /// Normalize a decoded payload, keeping its pagination counters.
    #[must_use]
    pub fn from_payload(payload: CatalogPayload) -> Self {
        let pagination = payload.pagination();
        Self {
            movies: normalize(payload),
            pagination,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn movies(ids: Vec<&str>) -> Vec<Movie> {
        ids.into_iter()
            .map(|id| Movie::new(id, format!("Movie {id}")))
            .collect()
    }

    fn ids(list: &[Movie]) -> Vec<&str> {
        list.iter().map(|m| m.id.as_str()).collect()
    }

    fn payload(
        films: Option<Vec<&str>>,
        no_poster: Option<Vec<&str>>,
        genres: Option<Vec<(&str, Vec<&str>)>>,
    ) -> CatalogPayload {
        CatalogPayload {
            films: films.map(movies),
            no_poster_films: no_poster.map(movies),
            genre_films: genres.map(|groups| {
                groups
                    .into_iter()
                    .map(|(genre, list)| (genre.to_string(), movies(list)))
                    .collect::<IndexMap<_, _>>()
            }),
            ..CatalogPayload::default()
        }
    }

    #[test]
    fn test_all_sources_absent() {
        assert!(normalize(CatalogPayload::default()).is_empty());
    }

    #[test]
    fn test_empty_lists() {
        let p = payload(Some(vec![]), Some(vec![]), Some(vec![]));
        assert!(normalize(p).is_empty());
    }

    #[test]
    fn test_traversal_order() {
        let p = payload(
            Some(vec!["a", "b"]),
            Some(vec!["c"]),
            Some(vec![("drama", vec!["d", "e"]), ("comedy", vec!["f"])]),
        );
        assert_eq!(ids(&normalize(p)), ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let mut p = payload(
            Some(vec!["a", "b", "a"]),
            Some(vec!["b", "c"]),
            Some(vec![("drama", vec!["c", "d"]), ("comedy", vec!["a", "d", "e"])]),
        );
        if let Some(films) = p.films.as_mut() {
            films[0].title = Some("first".to_string());
            films[2].title = Some("second".to_string());
        }

        let out = normalize(p);
        assert_eq!(ids(&out), ["a", "b", "c", "d", "e"]);
        assert_eq!(out[0].title.as_deref(), Some("first"));
    }

    #[test]
    fn test_primary_precedes_genre_only() {
        let p = payload(Some(vec!["x"]), None, Some(vec![("thriller", vec!["y", "x"])]));
        let out = normalize(p);
        assert_eq!(ids(&out), ["x", "y"]);
    }

    #[test]
    fn test_only_genres_present() {
        let p = payload(None, None, Some(vec![("b", vec!["2"]), ("a", vec!["1", "2"])]));
        assert_eq!(ids(&normalize(p)), ["2", "1"]);
    }

    #[test]
    fn test_id_set_is_union_of_sources() {
        let p = payload(
            Some(vec!["1", "2", "3"]),
            Some(vec!["3", "4"]),
            Some(vec![("g1", vec!["5", "1"]), ("g2", vec!["6", "4", "6"])]),
        );
        let out = normalize(p);
        let unique: HashSet<_> = out.iter().map(|m| m.id.clone()).collect();
        assert_eq!(unique.len(), out.len());
        let expected: HashSet<_> = ["1", "2", "3", "4", "5", "6"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_fresh_calls_are_identical() {
        let p = payload(
            Some(vec!["a", "b"]),
            Some(vec!["b", "c"]),
            Some(vec![("g", vec!["c", "d"])]),
        );
        let first = normalize(p.clone());
        let second = normalize(p);
        assert_eq!(first, second);
    }

    #[test]
    fn test_catalog_page_keeps_pagination() {
        let mut p = payload(Some(vec!["a", "a"]), None, None);
        p.total = Some(40);
        p.current_page = Some(2);

        let page = CatalogPage::from_payload(p);
        assert_eq!(page.len(), 1);
        assert_eq!(page.pagination.total, Some(40));
        assert_eq!(page.pagination.current_page, Some(2));
        assert_eq!(page.pagination.per_page, None);
    }
}
