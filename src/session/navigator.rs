//! Browsing context abstraction
//!
//! A successful navigation replaces the current page (and the client bound
//! to it); a failed one is reported to the user with a blocking alert.

use tracing::{info, warn};
use url::Url;

/// Where page navigations and user-facing alerts go
pub trait Navigator: Send + Sync {
    /// Load `url` as the new page
    fn load(&self, url: &Url);

    /// Show `message` to the user
    fn alert(&self, message: &str);
}

/// Navigator that only records what would happen in the logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn load(&self, url: &Url) {
        info!("Navigating to page {}", url.path());
    }

    fn alert(&self, message: &str) {
        warn!("Navigation failed: {}", message);
    }
}
