//! Playback state for an open detail view
//!
//! A session starts in [`PlaybackState::NoVideoSelected`] and moves to
//! [`PlaybackState::QualityChosen`] on the first successful resolution. A failed
//! resolution never changes the state.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::stream::{resolve_playback_url, select_default_quality};
use crate::types::{QualityLabel, Video};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
    NoVideoSelected,
    QualityChosen { quality: QualityLabel, url: String },
}

/// Outcome of a quality request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The active stream now points at the new URL.
    Changed,
    /// Resolution failed; the previous stream stays active.
    Unchanged(ResolveError),
}

impl Transition {
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Playback state of one detail view.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    video: Video,
    api_base: String,
    state: PlaybackState,
}

impl PlaybackSession {
    /// Open a session and attempt to start at the default quality.
    pub fn open(video: Video, api_base: impl Into<String>) -> Self {
        let mut session = Self {
            video,
            api_base: api_base.into(),
            state: PlaybackState::NoVideoSelected,
        };

        match select_default_quality(&session.video).map(str::to_owned) {
            Some(quality) => {
                session.change_quality(&quality);
            }
            None => debug!("No qualities available, playback stays unselected"),
        }

        session
    }

    /// Switch to `quality`. On failure the current state is kept.
    pub fn change_quality(&mut self, quality: &str) -> Transition {
        match resolve_playback_url(&self.video, quality, &self.api_base) {
            Ok(url) => {
                self.state = PlaybackState::QualityChosen {
                    quality: quality.to_string(),
                    url,
                };
                Transition::Changed
            }
            Err(e) => {
                warn!(quality, error = %e, "Keeping current stream");
                Transition::Unchanged(e)
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// URL of the active stream, if any.
    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::QualityChosen { url, .. } => Some(url.as_str()),
            PlaybackState::NoVideoSelected => None,
        }
    }

    #[must_use]
    pub fn current_quality(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::QualityChosen { quality, .. } => Some(quality.as_str()),
            PlaybackState::NoVideoSelected => None,
        }
    }

    /// Qualities offered for this title, in backend order.
    pub fn qualities(&self) -> impl Iterator<Item = &str> {
        self.video.qualities()
    }

    #[must_use]
    pub const fn video(&self) -> &Video {
        &self.video
    }
}
