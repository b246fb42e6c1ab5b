//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! domain logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for provider wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
