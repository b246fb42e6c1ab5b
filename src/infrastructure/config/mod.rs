//! Infrastructure configuration modules.

pub mod display;
pub mod logging;
pub mod provider;
pub mod settings;

pub use display::DisplayConfig;
pub use logging::LoggingConfig;
pub use provider::ProviderConfig;
pub use settings::{Config, DEFAULT_CONFIG_PATH};
