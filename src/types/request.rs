//! Request type definitions
//!
//! Bodies posted to the MOTD server.

use serde::{Deserialize, Serialize};

/// JSON body of an exchange, discriminated by its `action` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ExchangeRequest {
    /// Hand page data to the plugin and receive its answer
    ReceiveCustomData {
        /// Arbitrary plugin-defined payload
        custom_data: serde_json::Value,
    },
    /// Re-authenticate the session against another page
    Retarget,
}

impl ExchangeRequest {
    /// Create a custom data request
    pub fn custom_data(payload: serde_json::Value) -> Self {
        Self::ReceiveCustomData {
            custom_data: payload,
        }
    }

    /// Create a retarget request
    pub fn retarget() -> Self {
        Self::Retarget
    }

    /// Action name as sent on the wire
    pub fn action(&self) -> &'static str {
        match self {
            Self::ReceiveCustomData { .. } => "receive-custom-data",
            Self::Retarget => "retarget",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_data_body() {
        let request = ExchangeRequest::custom_data(json!({"x": 1}));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"action": "receive-custom-data", "custom_data": {"x": 1}})
        );
        assert_eq!(request.action(), "receive-custom-data");
    }

    #[test]
    fn test_retarget_body() {
        let request = ExchangeRequest::retarget();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"action": "retarget"})
        );
    }

    #[test]
    fn test_null_payload_is_kept() {
        let request = ExchangeRequest::custom_data(serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"action": "receive-custom-data", "custom_data": null})
        );
    }
}
