//! Session identity and credential types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is talking to which plugin on which server, in which game session
///
/// Fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Game server identifier
    pub server_id: String,
    /// Plugin that owns the pages
    pub plugin_id: String,
    /// Platform identifier of the player
    pub steamid: String,
    /// Game-side session number
    pub session_id: String,
}

impl Identity {
    /// Create a new identity
    pub fn new(
        server_id: impl Into<String>,
        plugin_id: impl Into<String>,
        steamid: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            server_id: server_id.into(),
            plugin_id: plugin_id.into(),
            steamid: steamid.into(),
            session_id: session_id.into(),
        }
    }
}

/// How the current token was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AuthMethod {
    /// One-time token handed out by the game server
    Srcds = 1,
    /// Renewable token issued by the web server
    Web = 2,
}

impl AuthMethod {
    /// Numeric form used in routes
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AuthMethod {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        match value {
            1 => Ok(AuthMethod::Srcds),
            2 => Ok(AuthMethod::Web),
            other => Err(crate::Error::validation(
                "auth_method",
                &format!("Unknown auth method: {}", other),
            )),
        }
    }
}

impl From<AuthMethod> for u8 {
    fn from(method: AuthMethod) -> u8 {
        method.as_u8()
    }
}

impl std::str::FromStr for AuthMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let value: u8 = s.parse().map_err(|_| {
            crate::Error::validation("auth_method", &format!("Not a number: {}", s))
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The auth method and token presented with every exchange
///
/// Never mutated in place: a successful exchange replaces the whole value
/// with [`Credential::renewed`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    method: AuthMethod,
    token: String,
}

impl Credential {
    /// Create a credential from its parts
    pub fn new(method: AuthMethod, token: impl Into<String>) -> Self {
        Self {
            method,
            token: token.into(),
        }
    }

    /// The credential that replaces any other after a successful exchange
    pub fn renewed(web_auth_token: impl Into<String>) -> Self {
        Self::new(AuthMethod::Web, web_auth_token)
    }

    /// Auth method
    pub fn method(&self) -> AuthMethod {
        self.method
    }

    /// Auth token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether the token is a single-use game server token
    pub fn is_single_use(&self) -> bool {
        self.method == AuthMethod::Srcds
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("method", &self.method)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_method_parsing() {
        assert_eq!("1".parse::<AuthMethod>().unwrap(), AuthMethod::Srcds);
        assert_eq!("2".parse::<AuthMethod>().unwrap(), AuthMethod::Web);
        assert!("3".parse::<AuthMethod>().is_err());
        assert!("web".parse::<AuthMethod>().is_err());
        assert_eq!(AuthMethod::Web.to_string(), "2");
    }

    #[test]
    fn test_auth_method_serde() {
        assert_eq!(serde_json::to_string(&AuthMethod::Srcds).unwrap(), "1");
        let method: AuthMethod = serde_json::from_str("2").unwrap();
        assert_eq!(method, AuthMethod::Web);
        assert!(serde_json::from_str::<AuthMethod>("7").is_err());
    }

    #[test]
    fn test_renewed_credential_is_web() {
        let initial = Credential::new(AuthMethod::Srcds, "T1");
        assert!(initial.is_single_use());

        let renewed = Credential::renewed("T2");
        assert_eq!(renewed.method(), AuthMethod::Web);
        assert_eq!(renewed.token(), "T2");
        assert!(!renewed.is_single_use());
    }

    #[test]
    fn test_credential_debug_hides_token() {
        let credential = Credential::new(AuthMethod::Web, "super-secret");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("Web"));
    }
}
