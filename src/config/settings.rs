//! Configuration settings
//!
//! Settings are read from a TOML file and environment variables, then
//! overridden by command-line flags.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// Helper functions for serde defaults
fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

/// Main configuration settings for the MOTDPlayer client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Session client configuration
    #[serde(default)]
    pub client: ClientSettings,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How the loading indicator reacts to overlapping requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPolicy {
    /// One indicator, dismissed by the first successful completion
    #[default]
    Shared,
    /// Dismissed once the last outstanding request completes
    Counted,
}

impl std::str::FromStr for IndicatorPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(IndicatorPolicy::Shared),
            "counted" => Ok(IndicatorPolicy::Counted),
            other => Err(crate::Error::config(
                "indicator_policy",
                &format!("Unknown indicator policy: {}", other),
            )),
        }
    }
}

/// Session client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientSettings {
    /// Server origin; defaults to the origin of the hosting page address
    #[serde(default)]
    pub base_url: Option<String>,
    /// Value sent in the `X-CSRFToken` header
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// Loading indicator policy under overlapping requests
    #[serde(default)]
    pub indicator_policy: IndicatorPolicy,
}

/// Network and proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// HTTPS proxy URL
    #[serde(default)]
    pub https_proxy: Option<String>,
    /// HTTP proxy URL
    #[serde(default)]
    pub http_proxy: Option<String>,
    /// All protocols proxy URL
    #[serde(default)]
    pub all_proxy: Option<String>,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Disable TLS certificate verification
    #[serde(default)]
    pub disable_tls_verification: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            disable_tls_verification: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

impl NetworkSettings {
    /// Connection timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables over defaults
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Overlay every environment variable that is set
    ///
    /// A variable that is present wins even when its value equals the
    /// default, so `MOTDPLAYER_INDICATOR_POLICY=shared` undoes a `counted`
    /// from the file.
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        let var = |name: &str| std::env::var(name).ok();

        // Client settings
        if let Some(base_url) = var("MOTDPLAYER_BASE_URL") {
            self.client.base_url = Some(base_url);
        }
        if let Some(csrf_token) = var("MOTDPLAYER_CSRF_TOKEN") {
            self.client.csrf_token = Some(csrf_token);
        }
        if let Some(policy) = var("MOTDPLAYER_INDICATOR_POLICY") {
            self.client.indicator_policy = policy.parse()?;
        }

        // Network/proxy settings
        if let Some(proxy) = var("HTTPS_PROXY") {
            self.network.https_proxy = Some(proxy);
        }
        if let Some(proxy) = var("HTTP_PROXY") {
            self.network.http_proxy = Some(proxy);
        }
        if let Some(proxy) = var("ALL_PROXY") {
            self.network.all_proxy = Some(proxy);
        }
        if let Some(timeout) = var("MOTDPLAYER_REQUEST_TIMEOUT") {
            self.network.request_timeout = timeout.parse().map_err(|e| {
                crate::Error::config(
                    "request_timeout",
                    &format!("Invalid MOTDPLAYER_REQUEST_TIMEOUT '{}': {}", timeout, e),
                )
            })?;
        }

        // Logging settings
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(verbose) = var("VERBOSE") {
            self.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(self)
    }

    /// Get effective proxy URL based on priority
    pub fn get_proxy_url(&self) -> Option<String> {
        self.network
            .https_proxy
            .as_ref()
            .or(self.network.http_proxy.as_ref())
            .or(self.network.all_proxy.as_ref())
            .cloned()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(base_url) = &self.client.base_url {
            let parsed = url::Url::parse(base_url).map_err(|e| {
                crate::Error::config("base_url", &format!("Invalid base URL '{}': {}", base_url, e))
            })?;
            if parsed.cannot_be_a_base() {
                return Err(crate::Error::config(
                    "base_url",
                    &format!("Base URL cannot be used as a base: {}", base_url),
                ));
            }
        }

        if self.network.connect_timeout == 0 {
            return Err(crate::Error::config(
                "connect_timeout",
                "Invalid connect timeout: cannot be 0",
            ));
        }

        if self.network.request_timeout == 0 {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        for (name, proxy_url) in [
            ("https_proxy", &self.network.https_proxy),
            ("http_proxy", &self.network.http_proxy),
            ("all_proxy", &self.network.all_proxy),
        ]
        .iter()
        {
            if let Some(url_str) = proxy_url
                && let Err(e) = url::Url::parse(url_str)
            {
                return Err(crate::Error::config(
                    *name,
                    &format!("Invalid proxy URL '{}': {}", url_str, e),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.client.base_url.is_none());
        assert!(settings.client.csrf_token.is_none());
        assert_eq!(settings.client.indicator_policy, IndicatorPolicy::Shared);
        assert_eq!(settings.network.connect_timeout, 30);
        assert_eq!(settings.network.request_timeout(), Duration::from_secs(60));
        assert_eq!(settings.logging.level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[client]
base_url = "http://motd.example.com:5000"
csrf_token = "csrf-abc"
indicator_policy = "counted"

[network]
request_timeout = 15
        "#
        )
        .unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();
        assert_eq!(
            settings.client.base_url.as_deref(),
            Some("http://motd.example.com:5000")
        );
        assert_eq!(settings.client.csrf_token.as_deref(), Some("csrf-abc"));
        assert_eq!(settings.client.indicator_policy, IndicatorPolicy::Counted);
        assert_eq!(settings.network.request_timeout, 15);
        // Untouched sections keep their defaults
        assert_eq!(settings.network.connect_timeout, 30);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_unknown_policy_in_file_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[client]\nindicator_policy = \"sometimes\"").unwrap();

        let result = Settings::from_file(temp_file.path());
        assert!(matches!(result, Err(crate::Error::Config { .. })));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Shared".parse::<IndicatorPolicy>().unwrap(), IndicatorPolicy::Shared);
        assert_eq!("counted".parse::<IndicatorPolicy>().unwrap(), IndicatorPolicy::Counted);
        assert!("other".parse::<IndicatorPolicy>().is_err());
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.client.base_url = Some("not a url".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.client.base_url = Some("mailto:admin@example.com".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.network.request_timeout = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.network.http_proxy = Some("::bad::".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_proxy_priority() {
        let mut settings = Settings::default();
        settings.network.https_proxy = Some("https://proxy1:8080".to_string());
        settings.network.http_proxy = Some("http://proxy2:8080".to_string());
        settings.network.all_proxy = Some("socks5://proxy3:1080".to_string());

        assert_eq!(settings.get_proxy_url().unwrap(), "https://proxy1:8080");

        settings.network.https_proxy = None;
        assert_eq!(settings.get_proxy_url().unwrap(), "http://proxy2:8080");

        settings.network.http_proxy = None;
        assert_eq!(settings.get_proxy_url().unwrap(), "socks5://proxy3:1080");
    }
}
