//! Time-bounded cache around the upstream position request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::cache::position::PositionSlot;
use crate::domain::{PositionRecord, ResponseMapping};
use crate::error::{FetchError, NotAvailable};
use crate::port::inbound::position::PositionFeed;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::transport::PositionTransport;

/// Freshness window used when none is configured.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(10);

/// Produces the latest known satellite position with as few upstream
/// requests as possible.
///
/// A successful fetch is memoized for the freshness window. Failures are
/// reported as [`NotAvailable`] and clear the memo, so a stale record is
/// never served after a failed attempt.
///
/// The memo lock is held across the whole check, request, update sequence:
/// concurrent callers never issue more than one request at a time, and
/// callers that queue behind an in-flight request share its result.
pub struct PositionProvider {
    transport: Arc<dyn PositionTransport>,
    mapping: ResponseMapping,
    clock: Arc<dyn Clock>,
    freshness: Duration,
    slot: Mutex<PositionSlot>,
}

impl PositionProvider {
    /// Create a provider using the system clock.
    #[must_use]
    pub fn new(
        transport: Arc<dyn PositionTransport>,
        mapping: ResponseMapping,
        freshness: Duration,
    ) -> Self {
        Self {
            transport,
            mapping,
            clock: Arc::new(SystemClock),
            freshness,
            slot: Mutex::new(PositionSlot::new()),
        }
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn freshness_window(&self) -> Duration {
        self.freshness
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    #[must_use]
    pub const fn mapping(&self) -> &ResponseMapping {
        &self.mapping
    }

    /// Latest position, from the memo when it is still fresh.
    ///
    /// # Errors
    ///
    /// Returns [`NotAvailable`] when the upstream request fails for any
    /// reason: network, HTTP status, or an undecodable body.
    pub async fn fetch(&self) -> Result<Arc<PositionRecord>, NotAvailable> {
        self.load(false).await
    }

    /// Forget the memoized record so the next fetch goes upstream.
    pub async fn invalidate(&self) {
        self.slot.lock().await.clear();
        debug!("Position cache invalidated");
    }

    /// Peek at the memo without fetching.
    ///
    /// Returns `None` when the memo is empty or older than the window.
    pub async fn cached(&self) -> Option<Arc<PositionRecord>> {
        let now = self.clock.now();
        self.slot.lock().await.fresh(now, self.freshness)
    }

    async fn load(&self, force: bool) -> Result<Arc<PositionRecord>, NotAvailable> {
        let mut slot = self.slot.lock().await;

        if force {
            slot.clear();
        } else {
            let now = self.clock.now();
            if let Some(record) = slot.fresh(now, self.freshness) {
                debug!(age = ?slot.age(now), "Serving cached position");
                return Ok(record);
            }
        }

        match self.request().await {
            Ok(record) => {
                info!(
                    latitude = record.latitude,
                    longitude = record.longitude,
                    timestamp = record.timestamp,
                    "Fetched position"
                );
                Ok(slot.store(record, self.clock.now()))
            }
            Err(err) => {
                slot.clear();
                warn!(
                    endpoint = %self.transport.endpoint(),
                    kind = err.kind(),
                    error = %err,
                    "Position fetch failed"
                );
                Err(err.into())
            }
        }
    }

    async fn request(&self) -> Result<PositionRecord, FetchError> {
        debug!(
            endpoint = %self.transport.endpoint(),
            mapping = self.mapping.name(),
            "Requesting position"
        );
        let body = self.transport.get_json().await?;
        self.mapping.decode(&body)
    }
}

#[async_trait]
impl PositionFeed for PositionProvider {
    async fn get_position(&self) -> Result<Arc<PositionRecord>, NotAvailable> {
        self.fetch().await
    }

    async fn refresh_now(&self) -> Result<Arc<PositionRecord>, NotAvailable> {
        self.load(true).await
    }
}
