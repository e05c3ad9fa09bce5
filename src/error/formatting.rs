//! Error formatting utilities
//!
//! Renders crate errors with their nested causes for the CLI and for
//! structured log records.

use crate::{Error, ExchangeError};
use std::error::Error as StdError;

/// Format error for display, appending nested causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::Config { field, message } => {
            format!("Configuration error in {}: {}", field, message)
        }

        Error::InvalidAddress { address } => format!(
            "'{}' is not a MOTD page address (expected /server/plugin/page/steamid/method/token/session/)",
            address
        ),

        Error::Validation { field, message } => {
            format!("Validation failed for {}: {}", field, message)
        }

        // For standard errors, use their Display implementation
        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
    });

    match error {
        Error::Config { field, .. } | Error::Validation { field, .. } => {
            log_data["field"] = serde_json::Value::String(field.clone());
        }
        Error::Http(e) => {
            if let Some(status) = e.status() {
                log_data["http_status"] = serde_json::Value::Number(status.as_u16().into());
            }
        }
        _ => {}
    }

    log_data
}

/// Format an exchange failure for logging with structured data
pub fn format_exchange_error_for_logging(error: &ExchangeError) -> serde_json::Value {
    serde_json::json!({
        "status": error.status(),
        "category": error.category(),
        "auth_rejection": error.is_auth_rejection(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let wrapped_error = Error::Io(io_error);

        let formatted = format_error(&wrapped_error);
        assert!(formatted.contains("File not found"));
    }

    #[test]
    fn test_config_error_formatting() {
        let error = Error::config("base_url", "Invalid URL format");
        let formatted = format_error(&error);

        assert!(formatted.contains("Configuration error in base_url"));
        assert!(formatted.contains("Invalid URL format"));
    }

    #[test]
    fn test_invalid_address_formatting() {
        let error = Error::invalid_address("http://localhost/index.html");
        let formatted = format_error(&error);

        assert!(formatted.contains("http://localhost/index.html"));
        assert!(formatted.contains("/server/plugin/page/steamid/method/token/session/"));
    }

    #[test]
    fn test_logging_error_formatting() {
        let error = Error::validation("page_id", "must not be empty");
        let log_data = format_error_for_logging(&error);

        assert!(
            log_data["message"]
                .as_str()
                .unwrap()
                .contains("Validation failed for page_id")
        );
        assert_eq!(log_data["category"].as_str().unwrap(), "validation");
        assert_eq!(log_data["field"].as_str().unwrap(), "page_id");
    }

    #[test]
    fn test_exchange_error_logging() {
        let log_data =
            format_exchange_error_for_logging(&ExchangeError::Rejected("INVALID_AUTH".into()));

        assert_eq!(log_data["status"], "INVALID_AUTH");
        assert_eq!(log_data["category"], "auth");
        assert_eq!(log_data["auth_rejection"], true);
    }
}
