//! Position fetching use case.

mod provider;

pub use provider::{PositionProvider, DEFAULT_FRESHNESS};
