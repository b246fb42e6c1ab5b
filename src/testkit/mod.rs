//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`] - [`StubTransport`](transport::StubTransport), a scripted
//!   [`PositionTransport`](crate::port::outbound::transport::PositionTransport)
//!   that counts calls.
//! - [`clock`] - [`ManualClock`](clock::ManualClock), advanced by hand.
//! - [`payload`] - Canonical upstream response bodies.

pub mod clock;
pub mod payload;
pub mod transport;
