//! Opaque handles into the remote page.
//!
//! The remote script library hands back DOM elements and browsing contexts
//! as tagged JSON objects: `{"ELEMENT": "<id>"}` and `{"WINDOW": "<id>"}`.
//! Locally they are plain identifiers with equality semantics; they are
//! never dereferenced or mutated here, and their lifetime is owned by the
//! remote browsing context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// JSON key tagging an element handle
pub const ELEMENT_KEY: &str = "ELEMENT";

/// JSON key tagging a window/frame handle
pub const WINDOW_KEY: &str = "WINDOW";

/// Handle to a DOM element inside the remote page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementReference {
    #[serde(rename = "ELEMENT")]
    id: String,
}

impl ElementReference {
    /// Wrap a remote element id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The remote element id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tagged JSON form passed to remote scripts
    #[must_use]
    pub fn to_json(&self) -> Value {
        tagged(ELEMENT_KEY, &self.id)
    }

    /// Recognise `{"ELEMENT": "<id>"}`; anything else is not an element
    #[must_use]
    pub fn from_json_object(obj: &Map<String, Value>) -> Option<Self> {
        untag(obj, ELEMENT_KEY).map(Self::new)
    }
}

impl fmt::Display for ElementReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementReference({})", self.id)
    }
}

/// Handle to a window or frame inside the remote page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowReference {
    #[serde(rename = "WINDOW")]
    id: String,
}

impl WindowReference {
    /// Wrap a remote window id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The remote window id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tagged JSON form passed to remote scripts
    #[must_use]
    pub fn to_json(&self) -> Value {
        tagged(WINDOW_KEY, &self.id)
    }

    /// Recognise `{"WINDOW": "<id>"}`; anything else is not a window
    #[must_use]
    pub fn from_json_object(obj: &Map<String, Value>) -> Option<Self> {
        untag(obj, WINDOW_KEY).map(Self::new)
    }
}

impl fmt::Display for WindowReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowReference({})", self.id)
    }
}

fn tagged(key: &str, id: &str) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), Value::String(id.to_string()));
    Value::Object(map)
}

// Exactly one entry, keyed by the tag, holding a string id.
fn untag<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    if obj.len() != 1 {
        return None;
    }
    obj.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod element_reference_tests {
        use super::*;

        #[test]
        fn test_to_json_is_tagged() {
            let elem = ElementReference::new(":wdc:1");
            assert_eq!(elem.to_json(), json!({"ELEMENT": ":wdc:1"}));
        }

        #[test]
        fn test_from_json_object() {
            let value = json!({"ELEMENT": ":wdc:7"});
            let obj = value.as_object().unwrap();
            assert_eq!(
                ElementReference::from_json_object(obj),
                Some(ElementReference::new(":wdc:7"))
            );
        }

        #[test]
        fn test_extra_keys_rejected() {
            let value = json!({"ELEMENT": ":wdc:7", "other": 1});
            assert!(ElementReference::from_json_object(value.as_object().unwrap()).is_none());
        }

        #[test]
        fn test_non_string_id_rejected() {
            let value = json!({"ELEMENT": 7});
            assert!(ElementReference::from_json_object(value.as_object().unwrap()).is_none());
        }

        #[test]
        fn test_serde_matches_wire_form() {
            let elem = ElementReference::new("abc");
            assert_eq!(serde_json::to_value(&elem).unwrap(), elem.to_json());
            let back: ElementReference = serde_json::from_value(elem.to_json()).unwrap();
            assert_eq!(back, elem);
        }
    }

    mod window_reference_tests {
        use super::*;

        #[test]
        fn test_to_json_is_tagged() {
            let win = WindowReference::new(":wdc:2");
            assert_eq!(win.to_json(), json!({"WINDOW": ":wdc:2"}));
        }

        #[test]
        fn test_element_tag_is_not_window() {
            let value = json!({"ELEMENT": ":wdc:2"});
            assert!(WindowReference::from_json_object(value.as_object().unwrap()).is_none());
        }

        #[test]
        fn test_equality_by_id() {
            assert_eq!(WindowReference::new("a"), WindowReference::new("a"));
            assert_ne!(WindowReference::new("a"), WindowReference::new("b"));
        }
    }
}
