//! Satwatch - live satellite position on a terminal map.
//!
//! The crate fetches the current ground position of a satellite from a JSON
//! HTTP endpoint, memoizes it for a short freshness window, and renders it
//! as a world map with a marker, an info panel and a summary table.
//!
//! # Architecture
//!
//! - **`domain`** - `PositionRecord` and the declarative `ResponseMapping`
//!   that turns an upstream body into a record
//! - **`port`** - `PositionFeed` (inbound), `PositionTransport` and `Clock`
//!   (outbound)
//! - **`application`** - `PositionProvider`, the time-bounded cache with at
//!   most one request in flight
//! - **`adapter`** - reqwest transport and the terminal front end
//! - **`infrastructure`** - TOML configuration, logging and wiring
//!
//! # Example
//!
//! ```no_run
//! use satwatch::infrastructure::bootstrap::build_provider;
//! use satwatch::infrastructure::config::Config;
//! use satwatch::port::inbound::position::PositionFeed;
//!
//! # async fn demo() -> satwatch::error::Result<()> {
//! let config = Config::load_or_default("satwatch.toml")?;
//! let provider = build_provider(&config.provider)?;
//! let record = provider.get_position().await?;
//! println!("{record}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
