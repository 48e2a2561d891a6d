//! Last-request-wins sequencing for catalog loads
//!
//! Two listing or search requests can be in flight at once, for example while
//! the user types. Each request takes a ticket; a response whose ticket is no
//! longer the newest is reported as superseded so the caller can drop it.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::catalog::CatalogPage;
use crate::client::KinowoodClient;
use crate::error::ClientError;
use crate::transport::{HttpTransport, Transport};

/// Ticket identifying one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues increasing tickets and remembers the newest.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Start a request; every earlier ticket becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether no request was started after `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// Result of a sequenced request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Current(T),
    /// A newer request was started while this one was in flight.
    Superseded,
}

impl<T> Fetched<T> {
    /// The value if it is still current.
    pub fn current(self) -> Option<T> {
        match self {
            Self::Current(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

/// Catalog loader whose results are only current for the newest request.
pub struct LatestCatalog<T = HttpTransport> {
    client: KinowoodClient<T>,
    sequencer: RequestSequencer,
}

impl<T: Transport> LatestCatalog<T> {
    #[must_use]
    pub const fn new(client: KinowoodClient<T>) -> Self {
        Self {
            client,
            sequencer: RequestSequencer::new(),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &KinowoodClient<T> {
        &self.client
    }

    fn settle(
        &self,
        ticket: Ticket,
        result: Result<CatalogPage, ClientError>,
    ) -> Result<Fetched<CatalogPage>, ClientError> {
        if !self.sequencer.is_current(ticket) {
            debug!(?ticket, "Discarding superseded catalog result");
            return Ok(Fetched::Superseded);
        }
        result.map(Fetched::Current)
    }

    /// Load the default listing.
    pub async fn load(&self) -> Result<Fetched<CatalogPage>, ClientError> {
        let ticket = self.sequencer.begin();
        let result = self.client.fetch_catalog().await;
        self.settle(ticket, result)
    }

    /// Run a search; a blank query loads the default listing.
    pub async fn search(&self, query: &str) -> Result<Fetched<CatalogPage>, ClientError> {
        let ticket = self.sequencer.begin();
        let result = self.client.search(query).await;
        self.settle(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[test]
    fn test_sequencer_tracks_latest() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        assert!(sequencer.is_current(first));

        let second = sequencer.begin();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_fetched_current() {
        assert_eq!(Fetched::Current(3).current(), Some(3));
        assert_eq!(Fetched::<i32>::Superseded.current(), None);
    }

    /// Search for "slow" blocks until released; everything else answers at once.
    struct GatedTransport {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn fetch_text(&self, url: &str) -> Result<String, ClientError> {
            if url.ends_with("q=slow") {
                self.gate.notified().await;
                return Ok(r#"{"films": [{"id": "slow"}]}"#.to_string());
            }
            Ok(r#"{"films": [{"id": "fast"}]}"#.to_string())
        }
    }

    #[tokio::test]
    async fn test_stale_result_is_superseded() {
        let gate = Arc::new(Notify::new());
        let client = KinowoodClient::with_transport(
            ClientConfig::default(),
            GatedTransport { gate: gate.clone() },
        )
        .unwrap();
        let catalog = LatestCatalog::new(client);

        let slow = catalog.search("slow");
        let fast = async {
            let result = catalog.search("fast").await;
            gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap(), Fetched::Superseded);
        let page = fast.unwrap().current().unwrap();
        assert_eq!(page.movies[0].id, "fast");
    }

    #[tokio::test]
    async fn test_sequential_requests_are_current() {
        let client = KinowoodClient::with_transport(
            ClientConfig::default(),
            GatedTransport {
                gate: Arc::new(Notify::new()),
            },
        )
        .unwrap();
        let catalog = LatestCatalog::new(client);

        assert!(matches!(catalog.load().await.unwrap(), Fetched::Current(_)));
        assert!(matches!(catalog.search("x").await.unwrap(), Fetched::Current(_)));
    }
}
