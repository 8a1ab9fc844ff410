//! Element lookup strategies understood by the remote script library.
//!
//! Each strategy carries a canonical wire key. Lookup scripts receive their
//! query as a single-entry map from that key to the lookup value:
//!
//! ```text
//! Locator::CssSelector + "#submit"  ──►  {"css": "#submit"}
//! ```
//!
//! The map shape is the remote library's calling convention and is
//! reproduced exactly; it is not a general argument-building pattern.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::result::{AtomError, AtomResult};

/// Supported element lookup strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    /// By CSS class name
    #[serde(rename = "className")]
    ClassName,
    /// By CSS selector
    #[serde(rename = "css")]
    CssSelector,
    /// By `id` attribute
    #[serde(rename = "id")]
    Id,
    /// By exact anchor text
    #[serde(rename = "linkText")]
    LinkText,
    /// By `name` attribute
    #[serde(rename = "name")]
    Name,
    /// By anchor text substring
    #[serde(rename = "partialLinkText")]
    PartialLinkText,
    /// By tag name
    #[serde(rename = "tagName")]
    TagName,
    /// By XPath expression
    #[serde(rename = "xpath")]
    XPath,
}

impl Locator {
    /// All strategies, in declaration order
    pub const ALL: [Self; 8] = [
        Self::ClassName,
        Self::CssSelector,
        Self::Id,
        Self::LinkText,
        Self::Name,
        Self::PartialLinkText,
        Self::TagName,
        Self::XPath,
    ];

    /// Resolve a wire key (exact, case-sensitive)
    pub fn for_type(wire_key: &str) -> AtomResult<Self> {
        Self::ALL
            .into_iter()
            .find(|locator| locator.get_type() == wire_key)
            .ok_or_else(|| AtomError::UnknownLocator {
                wire_key: wire_key.to_string(),
            })
    }

    /// Wire key used in lookup arguments
    #[must_use]
    pub const fn get_type(self) -> &'static str {
        match self {
            Self::ClassName => "className",
            Self::CssSelector => "css",
            Self::Id => "id",
            Self::LinkText => "linkText",
            Self::Name => "name",
            Self::PartialLinkText => "partialLinkText",
            Self::TagName => "tagName",
            Self::XPath => "xpath",
        }
    }

    /// Constant-style name used in diagnostics (`CSS_SELECTOR`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClassName => "CLASS_NAME",
            Self::CssSelector => "CSS_SELECTOR",
            Self::Id => "ID",
            Self::LinkText => "LINK_TEXT",
            Self::Name => "NAME",
            Self::PartialLinkText => "PARTIAL_LINK_TEXT",
            Self::TagName => "TAG_NAME",
            Self::XPath => "XPATH",
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Locator {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_type(s)
    }
}

/// Build the lookup argument `{"<wire key>": "<value>"}`
#[must_use]
pub fn locator_json(locator: Locator, value: &str) -> Map<String, Value> {
    let mut map = Map::with_capacity(1);
    map.insert(
        locator.get_type().to_string(),
        Value::String(value.to_string()),
    );
    map
}
