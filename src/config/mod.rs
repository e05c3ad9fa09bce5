//! Configuration management for the MOTDPlayer client
//!
//! This module handles loading and managing configuration settings
//! for the library and the command-line tool.

pub mod loader;
pub mod settings;

pub use loader::{CONFIG_ENV_VAR, ConfigLoader, ConfigSource};
pub use settings::{ClientSettings, IndicatorPolicy, LoggingSettings, NetworkSettings, Settings};

// Tests touching process environment variables serialize on this
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
