//! Anchors that navigate through the session client
//!
//! Page templates mark links with `data-motdplayer-goto="<page>"` and an
//! optional `data-motdplayer-args="<query>"`. Such links must not be followed
//! directly since their target needs a retarget exchange first. The scan runs
//! once over the document as parsed; anchors added later are not wired.

use crate::{Error, Result};
use scraper::{Html, Selector};
use tracing::debug;

/// Attribute naming the destination page
pub const GOTO_ATTRIBUTE: &str = "data-motdplayer-goto";

/// Attribute carrying the query string for the destination page
pub const ARGS_ATTRIBUTE: &str = "data-motdplayer-args";

/// A wired anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoLink {
    /// Destination page id
    pub page_id: String,
    /// Query string appended to the destination address
    pub args: Option<String>,
    /// Visible link text, whitespace-trimmed
    pub text: String,
}

/// All anchors wired when the document structure was ready
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    links: Vec<GotoLink>,
}

impl LinkTable {
    /// Scan `html` for goto anchors, in document order
    ///
    /// Empty attribute values count as absent: an anchor with an empty
    /// goto attribute is left alone, and an empty args attribute adds no
    /// query string.
    pub fn wire(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("a")
            .map_err(|e| Error::internal(format!("Invalid anchor selector: {:?}", e)))?;

        let links: Vec<GotoLink> = document
            .select(&selector)
            .filter_map(|element| {
                let page_id = element
                    .value()
                    .attr(GOTO_ATTRIBUTE)
                    .filter(|page| !page.is_empty())?;
                let args = element
                    .value()
                    .attr(ARGS_ATTRIBUTE)
                    .filter(|args| !args.is_empty())
                    .map(str::to_string);

                Some(GotoLink {
                    page_id: page_id.to_string(),
                    args,
                    text: element.text().collect::<String>().trim().to_string(),
                })
            })
            .collect();

        debug!("Wired {} goto link(s)", links.len());
        Ok(Self { links })
    }

    /// Wired links in document order
    pub fn links(&self) -> &[GotoLink] {
        &self.links
    }

    /// First wired link pointing at `page_id`
    pub fn find(&self, page_id: &str) -> Option<&GotoLink> {
        self.links.iter().find(|link| link.page_id == page_id)
    }

    /// Number of wired links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no link was wired
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
