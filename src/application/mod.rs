//! Application services (use cases).
//!
//! These services combine domain logic with outbound ports to implement the
//! position feed offered to front ends.

pub mod cache;
pub mod position;
