//! Type definitions for the MOTDPlayer client
//!
//! Session identity, credentials, and the JSON bodies exchanged with the server.

pub mod identity;
pub mod request;
pub mod response;

pub use identity::{AuthMethod, Credential, Identity};
pub use request::ExchangeRequest;
pub use response::ExchangeResponse;
