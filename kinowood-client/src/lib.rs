// Kinowood Catalog Client
//
// Client-side core for the Kinowood movie backend:
// - catalog: merges the overlapping listing groupings into one unique sequence
// - stream / session: proxy playback URLs and per-title quality state
// - decode / types: lenient typing of listing and detail responses
// - client / transport: endpoint URLs and HTTP fetches
// - sequence: last-request-wins handling for concurrent catalog loads

pub mod catalog;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod sequence;
pub mod session;
pub mod stream;
pub mod transport;
pub mod types;

mod lenient;

pub use catalog::{normalize, CatalogPage};
pub use client::KinowoodClient;
pub use config::ClientConfig;
pub use error::{ClientError, ResolveError};
pub use sequence::{Fetched, LatestCatalog, RequestSequencer};
pub use session::{PlaybackSession, PlaybackState, Transition};
pub use stream::{resolve_playback_url, select_default_quality, StreamIds};
pub use transport::{HttpTransport, Transport};
pub use types::{CatalogPayload, DetailPayload, DetailedMovie, Movie, Pagination, Video};
