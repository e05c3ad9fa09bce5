//! MOTD page addresses
//!
//! Every MOTD page lives at
//! `/{server}/{plugin}/{page}/{steamid}/{method}/{token}/{session}/` and the
//! retarget endpoint at `/json/retarget/{server}/{plugin}/{new_page}/{page}/...`.
//! This module parses the former out of a hosting page address and builds
//! both routes from client state.
//!
//! Parsing looks at the address path first. When the path holds no route,
//! the whole address is searched, so a route carried in the query string
//! (`/index.html?next=/srv/...`) is still found.

use crate::{
    Error, Result,
    types::{AuthMethod, Credential, Identity},
};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// First path prefix of the retarget endpoint
const RETARGET_PREFIX: [&str; 2] = ["json", "retarget"];

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/([A-Za-z0-9_-]+)/([A-Za-z0-9_]+)/([A-Za-z0-9_-]+)/([0-9]+)/(1|2)/([A-Za-z0-9_]+)/([0-9]+)/",
    )
    .expect("address pattern is valid")
});

/// Components of a hosting page address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress {
    /// Server, plugin, steamid and session
    pub identity: Identity,
    /// Page the address points at
    pub page_id: String,
    /// Auth method and token embedded in the address
    pub credential: Credential,
    /// Scheme, host and port when the address was absolute
    pub origin: Option<Url>,
}

impl PageAddress {
    /// Parse a hosting page address
    ///
    /// Accepts absolute URLs and bare paths. The route may be preceded by
    /// other path segments; the first match wins. Anything that does not
    /// contain the route is an [`Error::InvalidAddress`].
    pub fn parse(address: &str) -> Result<Self> {
        let (path, origin) = match Url::parse(address) {
            Ok(url) => {
                let path = url.path().to_string();
                (path, origin_of(&url))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let path = address
                    .split(['?', '#'])
                    .next()
                    .unwrap_or_default()
                    .to_string();
                (path, None)
            }
            Err(_) => return Err(Error::invalid_address(address)),
        };

        let captures = ADDRESS_PATTERN
            .captures(&path)
            .or_else(|| ADDRESS_PATTERN.captures(address))
            .ok_or_else(|| Error::invalid_address(address))?;

        let method: AuthMethod = captures[5].parse()?;

        Ok(Self {
            identity: Identity::new(&captures[1], &captures[2], &captures[4], &captures[7]),
            page_id: captures[3].to_string(),
            credential: Credential::new(method, &captures[6]),
            origin,
        })
    }

    /// Parse only the auth method out of an address
    pub fn auth_method(address: &str) -> Result<AuthMethod> {
        Ok(Self::parse(address)?.credential.method())
    }
}

/// Strip path, query and fragment, keeping scheme, host and port
pub fn origin_of(url: &Url) -> Option<Url> {
    if url.cannot_be_a_base() {
        return None;
    }
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    Some(origin)
}

/// Address of a page as the given credential sees it
pub fn page_route(
    base: &Url,
    identity: &Identity,
    page_id: &str,
    credential: &Credential,
) -> Result<Url> {
    let method = credential.method().to_string();
    build_route(
        base,
        &[
            identity.server_id.as_str(),
            identity.plugin_id.as_str(),
            page_id,
            identity.steamid.as_str(),
            method.as_str(),
            credential.token(),
            identity.session_id.as_str(),
        ],
    )
}

/// Endpoint that moves a session from `page_id` to `new_page_id`
pub fn retarget_route(
    base: &Url,
    identity: &Identity,
    new_page_id: &str,
    page_id: &str,
    credential: &Credential,
) -> Result<Url> {
    let method = credential.method().to_string();
    build_route(
        base,
        &[
            RETARGET_PREFIX[0],
            RETARGET_PREFIX[1],
            identity.server_id.as_str(),
            identity.plugin_id.as_str(),
            new_page_id,
            page_id,
            identity.steamid.as_str(),
            method.as_str(),
            credential.token(),
            identity.session_id.as_str(),
        ],
    )
}

fn build_route(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::config("base_url", "URL cannot be used as a base"))?;
        path.pop_if_empty();
        path.extend(segments);
        // Routes end with a slash
        path.push("");
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn base() -> Url {
        Url::parse("http://motd.example.com:5000/").unwrap()
    }

    #[test]
    fn test_parse_absolute_address() {
        let address = PageAddress::parse(
            "http://motd.example.com:5000/srv-1/shop/main-page/76561198000000000/1/abc123/42/?tab=2",
        )
        .unwrap();

        assert_eq!(
            address.identity,
            Identity::new("srv-1", "shop", "76561198000000000", "42")
        );
        assert_eq!(address.page_id, "main-page");
        assert_eq!(address.credential.method(), AuthMethod::Srcds);
        assert_eq!(address.credential.token(), "abc123");
        assert_eq!(
            address.origin.unwrap().as_str(),
            "http://motd.example.com:5000/"
        );
    }

    #[test]
    fn test_parse_relative_address_with_prefix() {
        let address = PageAddress::parse("/motd/srv/plugin/page/1/2/tok/7/#top").unwrap();

        // "/motd/srv/plugin/page/1/..." cannot match from /motd/ since
        // the steamid slot would hold "page"
        assert_eq!(address.identity.server_id, "srv");
        assert_eq!(address.identity.plugin_id, "plugin");
        assert_eq!(address.page_id, "page");
        assert_eq!(address.credential.method(), AuthMethod::Web);
        assert_eq!(address.identity.session_id, "7");
        assert!(address.origin.is_none());
    }

    #[rstest]
    #[case("http://host/srv/plugin/page/123/3/tok/1/")] // unknown method
    #[case("http://host/srv/plugin/page/123/1/tok/1")] // no trailing slash
    #[case("http://host/srv/plu-gin/page/123/1/tok/1/")] // dash in plugin id
    #[case("http://host/srv/plugin/page/abc/1/tok/1/")] // non-numeric steamid
    #[case("http://host/index.html")]
    #[case("")]
    fn test_parse_rejects_malformed(#[case] address: &str) {
        let err = PageAddress::parse(address).unwrap_err();
        assert!(matches!(err, Error::InvalidAddress { .. }));
    }

    #[test]
    fn test_parse_route_in_query_string() {
        let address =
            PageAddress::parse("http://h/index.html?next=/srv/shop/main/765/1/T1/42/").unwrap();

        assert_eq!(address.identity, Identity::new("srv", "shop", "765", "42"));
        assert_eq!(address.page_id, "main");
        assert_eq!(address.credential.token(), "T1");
        assert_eq!(address.origin.unwrap().as_str(), "http://h/");
    }

    #[test]
    fn test_path_match_wins_over_query() {
        let address = PageAddress::parse(
            "http://h/srv/shop/main/765/2/T2/42/?next=/other/shop/x/1/1/T9/9/",
        )
        .unwrap();

        assert_eq!(address.identity.server_id, "srv");
        assert_eq!(address.credential.token(), "T2");
    }

    #[test]
    fn test_auth_method_only() {
        assert_eq!(
            PageAddress::auth_method("/s/p/page/1/2/t/3/").unwrap(),
            AuthMethod::Web
        );
    }

    #[test]
    fn test_page_route() {
        let identity = Identity::new("srv", "shop", "765", "42");
        let credential = Credential::new(AuthMethod::Web, "T2");

        let url = page_route(&base(), &identity, "main", &credential).unwrap();
        assert_eq!(
            url.as_str(),
            "http://motd.example.com:5000/srv/shop/main/765/2/T2/42/"
        );
    }

    #[test]
    fn test_retarget_route() {
        let identity = Identity::new("srv", "shop", "765", "42");
        let credential = Credential::new(AuthMethod::Srcds, "T1");

        let url = retarget_route(&base(), &identity, "checkout", "main", &credential).unwrap();
        assert_eq!(
            url.as_str(),
            "http://motd.example.com:5000/json/retarget/srv/shop/checkout/main/765/1/T1/42/"
        );
    }

    #[test]
    fn test_route_keeps_base_prefix_and_drops_query() {
        let base = Url::parse("https://example.com/motd/?x=1#frag").unwrap();
        let identity = Identity::new("srv", "shop", "765", "42");
        let credential = Credential::new(AuthMethod::Web, "T2");

        let url = page_route(&base, &identity, "main", &credential).unwrap();
        assert_eq!(url.as_str(), "https://example.com/motd/srv/shop/main/765/2/T2/42/");
    }

    #[test]
    fn test_route_encodes_segments() {
        let identity = Identity::new("srv", "shop", "765", "42");
        let credential = Credential::new(AuthMethod::Web, "T2");

        let url = page_route(&base(), &identity, "a page/x", &credential).unwrap();
        assert!(url.path().contains("/a%20page%2Fx/"));
    }

    #[test]
    fn test_route_roundtrips_through_parse() {
        let identity = Identity::new("srv", "shop", "765", "42");
        let credential = Credential::new(AuthMethod::Web, "T2");

        let url = page_route(&base(), &identity, "main", &credential).unwrap();
        let parsed = PageAddress::parse(url.as_str()).unwrap();
        assert_eq!(parsed.identity, identity);
        assert_eq!(parsed.credential, credential);
    }
}
