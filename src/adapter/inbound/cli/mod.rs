//! Terminal front end: argument parsing, rendering and command handlers.

pub mod check;
pub mod command;
pub mod map;
pub mod output;
pub mod presets;
pub mod show;
pub mod view;
pub mod watch;
