//! Error handling for the MOTDPlayer client
//!
//! This module defines error types and handling patterns used throughout the application.

pub mod formatting;
pub mod types;

pub use formatting::{format_error, format_error_for_logging, format_exchange_error_for_logging};
pub use types::{
    Error, ExchangeError, Result, STATUS_AJAX_FAILURE, STATUS_OK,
    server_status,
};
