//! Command-line front end
//!
//! Shared setup for the `motdplayer` subcommands: configuration loading,
//! logging and the console browsing context.

pub mod exchange;
pub mod links;

use crate::{Settings, config::ConfigLoader, session::Navigator};
use anyhow::Context;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct CommonArgs {
    pub config: Option<String>,
    pub csrf_token: Option<String>,
    pub verbose: bool,
}

/// Load settings and install the tracing subscriber
///
/// Configuration precedence:
/// 1. Command line arguments (highest priority)
/// 2. Environment variables
/// 3. Configuration file (from --config, MOTDPLAYER_CONFIG or default location)
/// 4. Default values (lowest priority)
///
/// A file or environment value that does not load is an error rather than
/// a silent fallback, so a bad variable cannot drop the CSRF token.
pub fn prepare(args: &CommonArgs) -> anyhow::Result<Settings> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::with_file(path),
        None => ConfigLoader::new(),
    };

    let (mut settings, source) = loader
        .load()
        .context("Failed to load configuration")?;

    if let Some(csrf_token) = &args.csrf_token {
        settings.client.csrf_token = Some(csrf_token.clone());
    }
    settings.logging.verbose |= args.verbose;

    init_logging(&settings);
    debug!("{}", crate::utils::banner());
    debug!("Configuration from {}", source);
    Ok(settings)
}

/// Logging precedence: --verbose, then RUST_LOG, then logging.level
fn init_logging(settings: &Settings) {
    let env_filter = if settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.logging.level)
    };

    // stdout carries command output only
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Browsing context of the terminal: loads print the address, alerts go to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn load(&self, url: &Url) {
        println!("{}", url);
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}
