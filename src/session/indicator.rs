//! Loading indicator shown while exchanges are outstanding
//!
//! The page renders at most one indicator, identified by the
//! [`LOADING_SCREEN_CLASS`] styling hook. [`LoadingIndicator`] decides when it
//! appears and disappears and delegates the rendering to an [`IndicatorHost`].

use crate::config::IndicatorPolicy;
use std::sync::Mutex;
use tracing::debug;

/// Class name of the loading screen element
pub const LOADING_SCREEN_CLASS: &str = "motdplayer-ajax-loading-screen";

/// Renders or removes the loading screen
pub trait IndicatorHost: Send + Sync {
    /// Append the loading screen element
    fn attach(&self);

    /// Remove the loading screen element
    fn detach(&self);
}

/// Host that only traces indicator changes
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingIndicatorHost;

impl IndicatorHost for TracingIndicatorHost {
    fn attach(&self) {
        debug!("Showing {}", LOADING_SCREEN_CLASS);
    }

    fn detach(&self) {
        debug!("Hiding {}", LOADING_SCREEN_CLASS);
    }
}

#[derive(Debug, Default)]
struct IndicatorState {
    visible: bool,
    outstanding: usize,
}

/// At-most-one loading indicator
pub struct LoadingIndicator {
    host: Box<dyn IndicatorHost>,
    policy: IndicatorPolicy,
    state: Mutex<IndicatorState>,
}

impl LoadingIndicator {
    /// Create an indicator rendered by `host`
    pub fn new(host: impl IndicatorHost + 'static, policy: IndicatorPolicy) -> Self {
        Self {
            host: Box::new(host),
            policy,
            state: Mutex::new(IndicatorState::default()),
        }
    }

    /// A request is about to be dispatched
    pub fn begin(&self) {
        let mut state = self.lock();
        state.outstanding += 1;
        if !state.visible {
            state.visible = true;
            self.host.attach();
        }
    }

    /// A request completed
    ///
    /// Under [`IndicatorPolicy::Shared`] any success removes the indicator and
    /// failures leave it in place. Under [`IndicatorPolicy::Counted`] it is
    /// removed once nothing is outstanding. Finishing when nothing is shown
    /// is a no-op.
    pub fn finish(&self, success: bool) {
        let mut state = self.lock();
        state.outstanding = state.outstanding.saturating_sub(1);

        let dismiss = match self.policy {
            IndicatorPolicy::Shared => success,
            IndicatorPolicy::Counted => state.outstanding == 0,
        };

        if dismiss && state.visible {
            state.visible = false;
            self.host.detach();
        }
    }

    /// Whether the indicator is currently shown
    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// Requests dispatched but not yet completed
    pub fn outstanding(&self) -> usize {
        self.lock().outstanding
    }

    /// Active policy
    pub fn policy(&self) -> IndicatorPolicy {
        self.policy
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndicatorState> {
        // State stays consistent even if a host panicked mid-update
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for LoadingIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingIndicator")
            .field("policy", &self.policy)
            .field("state", &*self.lock())
            .finish()
    }
}
