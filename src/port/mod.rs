//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the position core and the outside world.
//!
//! ```text
//!      ┌──────────┐     PositionFeed      ┌────────────────────┐
//!      │   CLI    │ ────────────────────▶ │  PositionProvider  │
//!      └──────────┘                       └─────────┬──────────┘
//!                                  PositionTransport│  Clock
//!                                                   ▼
//!                                         ┌────────────────────┐
//!                                         │  HTTP adapter      │
//!                                         └────────────────────┘
//! ```
//!
//! - [`inbound`]: capabilities offered to front ends
//! - [`outbound`]: dependencies the provider drives (network, time)

pub mod inbound;
pub mod outbound;
