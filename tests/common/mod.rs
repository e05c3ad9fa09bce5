//! Common test utilities and helpers
//!
//! Shared fixtures for integration tests: page addresses, server answers and
//! a mock MOTD server.

#![allow(dead_code)]

use motdplayer_client::config::Settings;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SERVER: &str = "srv";
pub const PLUGIN: &str = "shop";
pub const STEAMID: &str = "76561198000000000";
pub const SESSION: &str = "42";

/// Test data factory
pub struct MockData;

impl MockData {
    /// Path of a page as the given credential sees it
    pub fn page_path(page_id: &str, method: u8, token: &str) -> String {
        format!(
            "/{}/{}/{}/{}/{}/{}/{}/",
            SERVER, PLUGIN, page_id, STEAMID, method, token, SESSION
        )
    }

    /// Path of the retarget endpoint
    pub fn retarget_path(new_page_id: &str, page_id: &str, method: u8, token: &str) -> String {
        format!(
            "/json/retarget/{}/{}/{}/{}/{}/{}/{}/{}/",
            SERVER, PLUGIN, new_page_id, page_id, STEAMID, method, token, SESSION
        )
    }

    /// Successful answer carrying a renewed token
    pub fn ok(token: &str, custom_data: Value) -> Value {
        json!({
            "status": "OK",
            "web_auth_token": token,
            "custom_data": custom_data,
        })
    }

    /// Answer rejecting the exchange
    pub fn rejected(status: &str) -> Value {
        json!({ "status": status })
    }
}

/// Test configuration factory
pub struct TestConfig;

impl TestConfig {
    /// Short timeouts, no CSRF token
    pub fn minimal() -> Settings {
        let mut settings = Settings::default();
        settings.logging.level = "debug".to_string();
        settings.network.connect_timeout = 5;
        settings.network.request_timeout = 10;
        settings
    }

    /// Settings sending a CSRF token
    pub fn with_csrf(token: &str) -> Settings {
        let mut settings = Self::minimal();
        settings.client.csrf_token = Some(token.to_string());
        settings
    }
}

/// Mock server factory
pub struct MockServerFactory;

impl MockServerFactory {
    /// Create new mock server
    pub async fn new() -> MockServer {
        MockServer::start().await
    }

    /// Absolute address of a page on `server`
    pub fn page_url(server: &MockServer, page_id: &str, method: u8, token: &str) -> String {
        format!("{}{}", server.uri(), MockData::page_path(page_id, method, token))
    }

    /// Answer POSTs to `route` with `body`, exactly `times` times
    pub async fn answer(server: &MockServer, route: &str, body: Value, times: u64) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(server)
            .await;
    }

    /// Answer POSTs to `route` with an HTTP error
    pub async fn fail(server: &MockServer, route: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string("Internal Server Error"))
            .mount(server)
            .await;
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logging
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }
}
