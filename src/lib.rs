//! MOTDPlayer Client - Rust Implementation
//!
//! A client for MOTDPlayer pages: server-hosted pages shown inside a game
//! client's embedded browser. It authenticates a page session against the
//! MOTDPlayer web server with an evolving token, exchanges small JSON
//! payloads with the page's plugin, and moves the session between pages.
//!
//! # Features
//!
//! - **Credential rotation**: starts from the one-time token issued by the
//!   game server and switches to renewed web tokens after the first exchange
//! - **Custom data exchange**: arbitrary JSON to and from the page's plugin
//! - **Retargeting**: re-authenticates against another page before navigating
//! - **Goto links**: wires `data-motdplayer-goto` anchors of a page
//! - **Command line tool**: the same operations from a terminal
//!
//! # Usage
//!
//! ```bash
//! motdplayer send --page-url "http://motd.example.com/srv/shop/main/765/1/token/42/" --data '{"x":1}'
//! ```
//!
//! # Examples
//!
//! ```rust
//! use motdplayer_client::{SessionClient, Settings, types::AuthMethod};
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = SessionClient::from_page_url(
//!     "http://motd.example.com/srv/shop/main/76561198000000000/1/token/42/",
//!     &Settings::default(),
//! )?;
//! assert_eq!(client.auth_method(), AuthMethod::Srcds);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, ExchangeError, Result};
pub use session::{LinkTable, SessionClient, SessionClientGeneric};
pub use types::{AuthMethod, Credential, ExchangeRequest, ExchangeResponse, Identity};
