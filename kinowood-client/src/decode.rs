//! Payload decoding
//!
//! Turns raw response text into typed payloads. The detail endpoint can prefix
//! its JSON with PHP notices, so only the outermost `{ ... }` span is decoded.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::endpoint::rewrite_direct_endpoint;
use crate::error::ClientError;
use crate::lenient;
use crate::types::{CatalogPayload, DetailPayload, DetailedMovie, Movie};

#[derive(Debug, Deserialize)]
struct RawDetail {
    #[serde(default, deserialize_with = "lenient::record")]
    film: Option<DetailedMovie>,
    #[serde(default, deserialize_with = "lenient::movies")]
    similar: Option<Vec<Movie>>,
}

/// Slice from the first `{` through the last `}`.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_object(text: &str) -> Result<Value, ClientError> {
    if text.trim().is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    match serde_json::from_str::<Value>(text)? {
        value @ Value::Object(_) => Ok(value),
        other => Err(ClientError::Decode(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a listing or search response.
pub fn decode_catalog(text: &str) -> Result<CatalogPayload, ClientError> {
    let payload: CatalogPayload = serde_json::from_value(parse_object(text)?)?;

    debug!(
        films = payload.films.as_ref().map(Vec::len),
        no_poster_films = payload.no_poster_films.as_ref().map(Vec::len),
        genre_groups = payload.genre_films.as_ref().map(|g| g.len()),
        total = payload.total,
        total_pages = payload.total_pages,
        current_page = payload.current_page,
        per_page = payload.per_page,
        "Decoded catalog payload"
    );

    Ok(payload)
}

/// Decode a detail response, tolerating wrapper text around the JSON.
///
/// Video URLs that name the direct-serve script are rewritten to the proxy
/// script before the payload is returned.
pub fn decode_detail(text: &str) -> Result<DetailPayload, ClientError> {
    if text.trim().is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    let json = extract_json_object(text).ok_or(ClientError::NoJsonSpan)?;
    if json.len() != text.len() {
        debug!(
            skipped = text.len() - json.len(),
            "Ignoring text around detail JSON"
        );
    }

    let raw: RawDetail = serde_json::from_value(parse_object(json)?)?;
    let mut film = raw.film.ok_or(ClientError::MissingFilm)?;
    film.video = film.video.map_urls(rewrite_direct_endpoint);

    let similar = raw.similar.unwrap_or_default();
    debug!(
        id = %film.id,
        title = film.title.as_deref().unwrap_or_default(),
        qualities = film.video.len(),
        similar = similar.len(),
        "Decoded detail payload"
    );

    Ok(DetailPayload { film, similar })
}
