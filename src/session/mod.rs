//! Session handling for MOTD pages
//!
//! This module holds the session client and everything it talks through:
//! page address parsing and route building, the HTTP transport, the loading
//! indicator, the browsing context and goto link wiring.

pub mod address;
pub mod client;
pub mod indicator;
pub mod links;
pub mod navigator;
pub mod transport;

pub use address::PageAddress;
pub use client::{PageParams, SessionClient, SessionClientGeneric};
pub use indicator::{IndicatorHost, LOADING_SCREEN_CLASS, LoadingIndicator, TracingIndicatorHost};
pub use links::{GotoLink, LinkTable};
pub use navigator::{Navigator, TracingNavigator};
pub use transport::{HttpTransport, Transport, TransportResponse};
