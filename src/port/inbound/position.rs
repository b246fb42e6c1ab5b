//! Position feed consumed by renderers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::PositionRecord;
use crate::error::NotAvailable;

/// Source of the latest satellite position for a front end.
///
/// A renderer calls [`get_position`](Self::get_position) on its own refresh
/// cadence and [`refresh_now`](Self::refresh_now) when the user asks for an
/// immediate update. Neither call depends on how the front end re-renders.
#[async_trait]
pub trait PositionFeed: Send + Sync {
    /// Latest position, possibly served from a short-lived cache.
    async fn get_position(&self) -> Result<Arc<PositionRecord>, NotAvailable>;

    /// Drop any cached position and fetch a new one.
    async fn refresh_now(&self) -> Result<Arc<PositionRecord>, NotAvailable>;
}
