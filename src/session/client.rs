//! # Session Client
//!
//! [`SessionClientGeneric`] holds one MOTD page session: who the player is,
//! which page is displayed, and the credential that authenticates the next
//! exchange.
//!
//! ## Credential rotation
//!
//! A page is first opened with a one-time token issued by the game server
//! (auth method 1). Every successful exchange answers with a renewed web
//! token, and the client switches to auth method 2 with that token for all
//! following exchanges. The method-1 token cannot be replayed.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use motdplayer_client::{SessionClient, Settings};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let client = SessionClient::from_page_url(
//!     "http://motd.example.com/srv/shop/main/76561198000000000/1/token/42/",
//!     &Settings::default(),
//! )?;
//!
//! match client.send(json!({"buy": "knife"})).await {
//!     Ok(answer) => println!("Plugin answered: {}", answer),
//!     Err(status) => eprintln!("Exchange failed: {}", status),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

use crate::{
    Error, ExchangeError, Result,
    config::Settings,
    session::{
        address::{self, PageAddress},
        indicator::{IndicatorHost, LoadingIndicator, TracingIndicatorHost},
        links::GotoLink,
        navigator::{Navigator, TracingNavigator},
        transport::{HttpTransport, Transport, TransportResponse},
    },
    types::{AuthMethod, Credential, ExchangeRequest, ExchangeResponse, Identity},
};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};
use url::Url;

/// Convenience type alias for the client over HTTP
pub type SessionClient = SessionClientGeneric<HttpTransport>;

/// Parameters a MOTD page embeds for its client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    /// Game server identifier
    pub server_id: String,
    /// Plugin that owns the page
    pub plugin_id: String,
    /// Page being displayed
    pub page_id: String,
    /// Platform identifier of the player
    pub steamid: String,
    /// Token the page was opened with
    pub auth_token: String,
    /// Game-side session number
    pub session_id: String,
}

impl From<PageAddress> for PageParams {
    fn from(address: PageAddress) -> Self {
        Self {
            server_id: address.identity.server_id,
            plugin_id: address.identity.plugin_id,
            page_id: address.page_id,
            steamid: address.identity.steamid,
            auth_token: address.credential.token().to_string(),
            session_id: address.identity.session_id,
        }
    }
}

#[derive(Debug, Clone)]
struct SessionState {
    page_id: String,
    credential: Credential,
}

/// MOTD page session client
pub struct SessionClientGeneric<T: Transport = HttpTransport> {
    /// Server, plugin, steamid and session
    identity: Identity,
    /// Origin (and optional path prefix) routes are resolved against
    base_url: Url,
    /// Displayed page and current credential, replaced together
    state: Mutex<SessionState>,
    /// Network seam
    transport: T,
    /// Loading screen bookkeeping
    indicator: LoadingIndicator,
    /// Browsing context used by navigations
    navigator: Box<dyn Navigator>,
}

impl SessionClientGeneric<HttpTransport> {
    /// Creates a client for a page opened at `current_address`.
    ///
    /// The initial auth method is read from `current_address`, which must
    /// have the MOTD route shape.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAddress`] when the address does not match, and
    /// configuration errors when no usable base URL or HTTP client can be
    /// built.
    pub fn new(params: PageParams, current_address: &str, settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings)?;
        Self::with_transport(params, current_address, settings, transport)
    }

    /// Creates a client from the hosting page address alone.
    pub fn from_page_url(address: &str, settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings)?;
        Self::from_page_url_with_transport(address, settings, transport)
    }
}

impl<T: Transport> SessionClientGeneric<T> {
    /// Creates a client over a custom transport.
    pub fn with_transport(
        params: PageParams,
        current_address: &str,
        settings: &Settings,
        transport: T,
    ) -> Result<Self> {
        let address = PageAddress::parse(current_address)?;
        let base_url = resolve_base_url(settings, address.origin.as_ref())?;
        let method = address.credential.method();

        debug!(
            "Session client for {}/{} page {} starts with auth method {}",
            params.server_id, params.plugin_id, params.page_id, method
        );

        Ok(Self {
            identity: Identity::new(
                params.server_id,
                params.plugin_id,
                params.steamid,
                params.session_id,
            ),
            base_url,
            state: Mutex::new(SessionState {
                page_id: params.page_id,
                credential: Credential::new(method, params.auth_token),
            }),
            transport,
            indicator: LoadingIndicator::new(TracingIndicatorHost, settings.client.indicator_policy),
            navigator: Box::new(TracingNavigator),
        })
    }

    /// Creates a client over a custom transport from the hosting page address alone.
    pub fn from_page_url_with_transport(
        address: &str,
        settings: &Settings,
        transport: T,
    ) -> Result<Self> {
        let params = PageParams::from(PageAddress::parse(address)?);
        Self::with_transport(params, address, settings, transport)
    }

    /// Render the loading screen through `host`
    pub fn with_indicator_host(mut self, host: impl IndicatorHost + 'static) -> Self {
        let policy = self.indicator.policy();
        self.indicator = LoadingIndicator::new(host, policy);
        self
    }

    /// Send navigations and alerts to `navigator`
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    /// Session identity
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Base URL routes are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Page currently displayed
    pub fn page_id(&self) -> String {
        self.lock_state().page_id.clone()
    }

    /// Credential the next exchange will present
    pub fn credential(&self) -> Credential {
        self.lock_state().credential.clone()
    }

    /// Auth method the next exchange will present
    pub fn auth_method(&self) -> AuthMethod {
        self.lock_state().credential.method()
    }

    /// Whether the loading screen is shown
    pub fn indicator_visible(&self) -> bool {
        self.indicator.is_visible()
    }

    /// Authenticated address of the current page
    pub fn page_url(&self) -> Result<Url> {
        let state = self.lock_state().clone();
        address::page_route(
            &self.base_url,
            &self.identity,
            &state.page_id,
            &state.credential,
        )
    }

    /// Hand `payload` to the page's plugin and return its answer.
    ///
    /// On success the credential is renewed and the plugin's `custom_data`
    /// is returned (JSON null when the server sent none).
    pub async fn send(
        &self,
        payload: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, ExchangeError> {
        let state = self.lock_state().clone();
        let url = address::page_route(
            &self.base_url,
            &self.identity,
            &state.page_id,
            &state.credential,
        );

        self.exchange(url, ExchangeRequest::custom_data(payload), |_| {})
            .await
    }

    /// Re-authenticate the session against `new_page_id`.
    ///
    /// On success the credential is renewed and `new_page_id` becomes the
    /// current page. On failure both stay as they were.
    pub async fn retarget(&self, new_page_id: &str) -> std::result::Result<(), ExchangeError> {
        let state = self.lock_state().clone();
        let url = address::retarget_route(
            &self.base_url,
            &self.identity,
            new_page_id,
            &state.page_id,
            &state.credential,
        );

        let new_page = new_page_id.to_string();
        self.exchange(url, ExchangeRequest::retarget(), move |state| {
            info!("Session retargeted from page {} to {}", state.page_id, new_page);
            state.page_id = new_page;
        })
        .await
        .map(|_| ())
    }

    /// Retarget to `new_page_id` and load it.
    ///
    /// The destination address carries the renewed credential and, when
    /// given and non-empty, `query_args` as its query string. Once loaded,
    /// the destination page builds its own client. A failure is shown to
    /// the user through the navigator's alert.
    pub async fn navigate_to(
        &self,
        new_page_id: &str,
        query_args: Option<&str>,
    ) -> std::result::Result<Url, ExchangeError> {
        let destination = match self.retarget(new_page_id).await {
            Ok(()) => self.destination(new_page_id, query_args),
            Err(e) => Err(e),
        };

        match destination {
            Ok(url) => {
                self.navigator.load(&url);
                Ok(url)
            }
            Err(e) => {
                self.navigator.alert(e.status());
                Err(e)
            }
        }
    }

    fn destination(
        &self,
        page_id: &str,
        query_args: Option<&str>,
    ) -> std::result::Result<Url, ExchangeError> {
        let credential = self.credential();
        let mut url = address::page_route(&self.base_url, &self.identity, page_id, &credential)
            .map_err(|e| {
                error!("Failed to build destination address: {}", e);
                ExchangeError::AjaxFailure
            })?;

        if let Some(args) = query_args.filter(|args| !args.is_empty()) {
            url.set_query(Some(args));
        }

        Ok(url)
    }

    /// Follow a wired goto anchor
    pub async fn follow(&self, link: &GotoLink) -> std::result::Result<Url, ExchangeError> {
        self.navigate_to(&link.page_id, link.args.as_deref()).await
    }

    async fn exchange<F>(
        &self,
        url: Result<Url>,
        request: ExchangeRequest,
        on_success: F,
    ) -> std::result::Result<serde_json::Value, ExchangeError>
    where
        F: FnOnce(&mut SessionState),
    {
        let url = url.map_err(|e| {
            error!("Failed to build exchange URL: {}", e);
            ExchangeError::AjaxFailure
        })?;
        let body = serde_json::to_value(&request).map_err(|e| {
            error!("Failed to serialize {} request: {}", request.action(), e);
            ExchangeError::AjaxFailure
        })?;

        self.indicator.begin();
        debug!("Dispatching {} to {}", request.action(), url.path());

        match self.interpret(self.transport.post_json(&url, &body).await) {
            Ok(response) => {
                {
                    let mut state = self.lock_state();
                    match response.web_auth_token {
                        Some(token) => {
                            if state.credential.is_single_use() {
                                info!("Game server token spent, switching to web auth");
                            }
                            state.credential = Credential::renewed(token);
                        }
                        None => warn!(
                            "{} accepted without a renewed token, keeping the current one",
                            request.action()
                        ),
                    }
                    on_success(&mut state);
                }
                debug!("{} succeeded", request.action());
                self.indicator.finish(true);
                Ok(response.custom_data)
            }
            Err(e) => {
                self.indicator.finish(false);
                Err(e)
            }
        }
    }

    fn interpret(
        &self,
        outcome: Result<TransportResponse>,
    ) -> std::result::Result<ExchangeResponse, ExchangeError> {
        let response = outcome.map_err(|e| {
            error!("Exchange transport failure: {}", e);
            ExchangeError::AjaxFailure
        })?;

        if response.status != 200 {
            error!("MOTD server returned HTTP {}", response.status);
            return Err(ExchangeError::AjaxFailure);
        }

        let parsed: ExchangeResponse = serde_json::from_str(&response.body).map_err(|e| {
            error!("Unreadable exchange response: {}", e);
            ExchangeError::AjaxFailure
        })?;

        if !parsed.is_ok() {
            warn!("MOTD server rejected exchange: {}", parsed.status);
            return Err(ExchangeError::Rejected(parsed.status));
        }

        Ok(parsed)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Transport> std::fmt::Debug for SessionClientGeneric<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("identity", &self.identity)
            .field("base_url", &self.base_url.as_str())
            .field("state", &*self.lock_state())
            .field("indicator", &self.indicator)
            .finish()
    }
}

fn resolve_base_url(settings: &Settings, origin: Option<&Url>) -> Result<Url> {
    let base = match (&settings.client.base_url, origin) {
        (Some(configured), _) => Url::parse(configured)?,
        (None, Some(origin)) => origin.clone(),
        (None, None) => {
            return Err(Error::config(
                "base_url",
                "Hosting address is relative and no base URL is configured",
            ));
        }
    };

    if base.cannot_be_a_base() {
        return Err(Error::config(
            "base_url",
            &format!("URL cannot be used as a base: {}", base),
        ));
    }

    Ok(base)
}
