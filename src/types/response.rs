//! Response type definitions
//!
//! Bodies returned by the MOTD server.

use crate::error::STATUS_OK;
use serde::{Deserialize, Serialize};

/// JSON body answering any exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    /// `OK` or a server-defined error status
    pub status: String,

    /// Renewed web token; sent with `OK` and with some rejections
    #[serde(default)]
    pub web_auth_token: Option<String>,

    /// Plugin answer for custom data exchanges
    #[serde(default)]
    pub custom_data: serde_json::Value,
}

impl ExchangeResponse {
    /// Create a successful response
    pub fn ok(web_auth_token: impl Into<String>, custom_data: serde_json::Value) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            web_auth_token: Some(web_auth_token.into()),
            custom_data,
        }
    }

    /// Create a rejection
    pub fn rejected(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            web_auth_token: None,
            custom_data: serde_json::Value::Null,
        }
    }

    /// Whether the server accepted the exchange
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ok_response() {
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "OK",
            "web_auth_token": "T2",
            "custom_data": {"y": 2}
        }))
        .unwrap();

        assert!(response.is_ok());
        assert_eq!(response.web_auth_token.as_deref(), Some("T2"));
        assert_eq!(response.custom_data, json!({"y": 2}));
    }

    #[test]
    fn test_parse_rejection_with_null_token() {
        // The server sends `web_auth_token: null` alongside auth errors
        let response: ExchangeResponse = serde_json::from_value(json!({
            "status": "INVALID_AUTH",
            "web_auth_token": null
        }))
        .unwrap();

        assert!(!response.is_ok());
        assert!(response.web_auth_token.is_none());
        assert!(response.custom_data.is_null());
    }

    #[test]
    fn test_missing_status_is_an_error() {
        let result = serde_json::from_value::<ExchangeResponse>(json!({"custom_data": 1}));
        assert!(result.is_err());
    }
}
