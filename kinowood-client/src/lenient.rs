//! Tolerant field decoders for backend payloads
//!
//! The backend is a PHP application whose JSON is loosely typed: ids arrive as
//! numbers or strings, empty maps arrive as `[]`, and individual list entries can
//! be malformed. These helpers turn a bad field into an absent one instead of
//! failing the whole document.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::types::Movie;

/// Decode a value into `T`, logging and discarding it on failure.
pub(crate) fn entry<T: DeserializeOwned>(value: Value, what: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!(error = %e, "Skipping undecodable {what}");
            None
        }
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn movies_of(value: Value) -> Option<Vec<Movie>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| entry::<Movie>(item, "movie"))
                .collect(),
        ),
        _ => None,
    }
}

/// Required identifier: a string or a number.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    text_of(Value::deserialize(deserializer)?)
        .ok_or_else(|| D::Error::custom("expected string or number id"))
}

/// Optional text; numbers and booleans become their textual form.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(text_of))
}

/// Text that falls back to an empty string.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Optional counter: an unsigned integer or a numeric string.
pub(crate) fn counter<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Optional movie list; entries that fail to decode are dropped.
pub(crate) fn movies<'de, D>(deserializer: D) -> Result<Option<Vec<Movie>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(movies_of))
}

/// Optional genre → movies mapping in document order.
///
/// An empty JSON array is how PHP encodes an empty associative array and is
/// treated as absent. Groups whose value is not a list are dropped.
pub(crate) fn genre_groups<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, Vec<Movie>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(groups)) => Some(
            groups
                .into_iter()
                .filter_map(|(genre, list)| movies_of(list).map(|movies| (genre, movies)))
                .collect(),
        ),
        _ => None,
    })
}

/// Optional nested record of type `T`; undecodable records become absent.
pub(crate) fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| entry::<T>(value, "record")))
}
