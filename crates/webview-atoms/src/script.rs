//! Remote script identifiers and their arguments.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::locator::{locator_json, Locator};
use crate::reference::{ElementReference, WindowReference};

/// Scripts of the remote WebDriver atom library.
///
/// Only the identifier lives here; the script bodies are owned by the
/// execution bridge, which resolves an id to the code it injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptId {
    /// Simulate a click
    #[serde(rename = "CLICK_ANDROID")]
    Click,
    /// Clear editable content
    #[serde(rename = "CLEAR_ANDROID")]
    Clear,
    /// Simulate typed input
    #[serde(rename = "SEND_KEYS_ANDROID")]
    SendKeys,
    /// Scroll an element into the viewport
    #[serde(rename = "SCROLL_INTO_VIEW_ANDROID")]
    ScrollIntoView,
    /// Read visible text
    #[serde(rename = "GET_VISIBLE_TEXT_ANDROID")]
    GetVisibleText,
    /// Single element lookup
    #[serde(rename = "FIND_ELEMENT_ANDROID")]
    FindElement,
    /// Multiple element lookup
    #[serde(rename = "FIND_ELEMENTS_ANDROID")]
    FindElements,
    /// Focused element of the document
    #[serde(rename = "ACTIVE_ELEMENT_ANDROID")]
    ActiveElement,
    /// Child frame by index
    #[serde(rename = "FRAME_BY_INDEX_ANDROID")]
    FrameByIndex,
    /// Child frame by name or id
    #[serde(rename = "FRAME_BY_ID_OR_NAME_ANDROID")]
    FrameByIdOrName,
}

impl ScriptId {
    /// Identifier understood by the bridge
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "CLICK_ANDROID",
            Self::Clear => "CLEAR_ANDROID",
            Self::SendKeys => "SEND_KEYS_ANDROID",
            Self::ScrollIntoView => "SCROLL_INTO_VIEW_ANDROID",
            Self::GetVisibleText => "GET_VISIBLE_TEXT_ANDROID",
            Self::FindElement => "FIND_ELEMENT_ANDROID",
            Self::FindElements => "FIND_ELEMENTS_ANDROID",
            Self::ActiveElement => "ACTIVE_ELEMENT_ANDROID",
            Self::FrameByIndex => "FRAME_BY_INDEX_ANDROID",
            Self::FrameByIdOrName => "FRAME_BY_ID_OR_NAME_ANDROID",
        }
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a leaf atom puts the caller's active element reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementPlacement {
    /// The script never receives the active element
    #[default]
    None,
    /// Appended after the literal arguments
    AppendLast,
}

/// A literal script argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptArg {
    /// Text literal
    Text {
        /// The text
        value: String,
    },
    /// Integer literal
    Index {
        /// The index
        value: i32,
    },
    /// Lookup query, sent as `{"<wire key>": "<value>"}`
    Locator {
        /// Lookup strategy
        locator: Locator,
        /// Lookup value
        value: String,
    },
    /// Element handle
    Element {
        /// The handle
        reference: ElementReference,
    },
    /// Window/frame handle
    Window {
        /// The handle
        reference: WindowReference,
    },
}

impl ScriptArg {
    /// Text argument
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Integer argument
    #[must_use]
    pub const fn index(value: i32) -> Self {
        Self::Index { value }
    }

    /// Locator query argument
    #[must_use]
    pub fn locator(locator: Locator, value: impl Into<String>) -> Self {
        Self::Locator {
            locator,
            value: value.into(),
        }
    }

    /// Element handle argument
    #[must_use]
    pub const fn element(reference: ElementReference) -> Self {
        Self::Element { reference }
    }

    /// Window handle argument
    #[must_use]
    pub const fn window(reference: WindowReference) -> Self {
        Self::Window { reference }
    }

    /// JSON form handed to the remote script
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text { value } => Value::String(value.clone()),
            Self::Index { value } => Value::from(*value),
            Self::Locator { locator, value } => Value::Object(locator_json(*locator, value)),
            Self::Element { reference } => reference.to_json(),
            Self::Window { reference } => reference.to_json(),
        }
    }
}

/// Encode an argument list for the bridge
#[must_use]
pub fn arguments_json(args: &[ScriptArg]) -> Value {
    Value::Array(args.iter().map(ScriptArg::to_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_id_serde_matches_as_str() {
        let ids = [
            ScriptId::Click,
            ScriptId::Clear,
            ScriptId::SendKeys,
            ScriptId::ScrollIntoView,
            ScriptId::GetVisibleText,
            ScriptId::FindElement,
            ScriptId::FindElements,
            ScriptId::ActiveElement,
            ScriptId::FrameByIndex,
            ScriptId::FrameByIdOrName,
        ];
        for id in ids {
            assert_eq!(serde_json::to_value(id).unwrap(), json!(id.as_str()));
        }
    }

    #[test]
    fn test_placement_default_is_none() {
        assert_eq!(ElementPlacement::default(), ElementPlacement::None);
    }

    #[test]
    fn test_argument_json_forms() {
        let args = vec![
            ScriptArg::text("hello"),
            ScriptArg::index(2),
            ScriptArg::locator(Locator::Id, "main"),
            ScriptArg::element(ElementReference::new("e")),
            ScriptArg::window(WindowReference::new("w")),
        ];
        assert_eq!(
            arguments_json(&args),
            json!(["hello", 2, {"id": "main"}, {"ELEMENT": "e"}, {"WINDOW": "w"}])
        );
    }

    #[test]
    fn test_argument_message_form() {
        let arg = ScriptArg::locator(Locator::CssSelector, "#x");
        let msg = serde_json::to_value(&arg).unwrap();
        assert_eq!(msg, json!({"kind": "locator", "locator": "css", "value": "#x"}));
        let back: ScriptArg = serde_json::from_value(msg).unwrap();
        assert_eq!(back, arg);
    }
}
