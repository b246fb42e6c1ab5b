//! In-memory memo used by the position provider.
//!
//! - [`position::PositionSlot`]: single-slot record cache aged by fetch time

pub mod position;
