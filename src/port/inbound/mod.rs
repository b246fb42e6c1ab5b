//! Inbound (driving) ports consumed by front ends such as the CLI.

pub mod position;
