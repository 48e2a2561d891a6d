//! Stream resolution
//!
//! Turns the opaque upstream links of a [`Video`] into proxy playback URLs.

use tracing::debug;

use crate::endpoint::proxy_url;
use crate::error::ResolveError;
use crate::query::{parse_query, query_of};
use crate::types::{Video, PREFERRED_QUALITY};

/// Identifiers the proxy needs to locate a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamIds {
    pub group_id: String,
    pub video_id: String,
}

impl StreamIds {
    /// Extract `group_id` and `video_id` from an upstream URL's query string.
    /// Both must be present and non-empty.
    #[must_use]
    pub fn from_upstream(url: &str) -> Option<Self> {
        let mut params = parse_query(query_of(url));
        let group_id = params.remove("group_id").filter(|v| !v.is_empty())?;
        let video_id = params.remove("video_id").filter(|v| !v.is_empty())?;
        Some(Self { group_id, video_id })
    }

    /// Proxy playback URL for these identifiers at `quality`.
    #[must_use]
    pub fn playback_url(&self, api_base: &str, quality: &str) -> String {
        proxy_url(api_base, &self.group_id, &self.video_id, quality)
    }
}

/// Quality to start playback with: `"720"` when offered, otherwise the first
/// quality in backend order. `None` when the video has no qualities.
#[must_use]
pub fn select_default_quality(video: &Video) -> Option<&str> {
    if video.contains(PREFERRED_QUALITY) {
        return Some(PREFERRED_QUALITY);
    }
    video.qualities().next()
}

/// Build the proxy playback URL for `quality`.
///
/// The resulting URL always carries the requested quality, even when the
/// upstream link names a different one.
pub fn resolve_playback_url(
    video: &Video,
    quality: &str,
    api_base: &str,
) -> Result<String, ResolveError> {
    let upstream = video
        .url(quality)
        .ok_or_else(|| ResolveError::QualityUnavailable(quality.to_string()))?;

    let ids = StreamIds::from_upstream(upstream).ok_or_else(|| {
        ResolveError::MissingStreamIdentifiers {
            quality: quality.to_string(),
        }
    })?;

    let url = ids.playback_url(api_base, quality);
    debug!(quality, %url, "Resolved playback URL");
    Ok(url)
}
