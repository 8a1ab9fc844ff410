//! Raw results of remote script execution.
//!
//! The execution bridge returns a JSON document `{"status": <int>, "value": <any>}`.
//! [`Evaluation`] is that document decoded into a proper sum type: while
//! decoding, tagged handle objects become [`ElementReference`] and
//! [`WindowReference`] values, recursively through sequences and maps, so
//! transformers narrow by discriminant instead of probing JSON shapes.
//!
//! ```text
//! {"status":0,"value":[{"ELEMENT":":wdc:1"},{"ELEMENT":":wdc:2"}]}
//!          │
//!          ▼
//! Evaluation { status: 0, value: Sequence([Element(:wdc:1), Element(:wdc:2)]) }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::reference::{ElementReference, WindowReference};
use crate::result::{AtomError, AtomResult};

const STATUS_KEY: &str = "status";
const VALUE_KEY: &str = "value";
const MESSAGE_KEY: &str = "message";

/// Status code the remote side uses for success
pub const STATUS_SUCCESS: i64 = 0;

/// Dynamically-typed value produced by a remote script
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// JSON null (also: script returned nothing)
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar, kept as the JSON number that was sent
    Number(Number),
    /// String scalar
    String(String),
    /// Ordered sequence of values
    Sequence(Vec<RawValue>),
    /// Untagged JSON object
    Map(BTreeMap<String, RawValue>),
    /// Element handle
    Element(ElementReference),
    /// Window/frame handle
    Window(WindowReference),
}

/// Discriminant of a [`RawValue`], used to name expected result types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `null`
    Null,
    /// boolean
    Bool,
    /// number
    Number,
    /// string
    String,
    /// sequence
    Sequence,
    /// map
    Map,
    /// element reference
    Element,
    /// window reference
    Window,
}

impl ValueKind {
    /// Human readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::Element => "element reference",
            Self::Window => "window reference",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RawValue {
    /// Discriminant of this value
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Map(_) => ValueKind::Map,
            Self::Element(_) => ValueKind::Element,
            Self::Window(_) => ValueKind::Window,
        }
    }

    /// Is this `null`?
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Decode a JSON value, replacing tagged handle objects with references
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from_json).collect()),
            Value::Object(obj) => {
                if let Some(elem) = ElementReference::from_json_object(&obj) {
                    Self::Element(elem)
                } else if let Some(win) = WindowReference::from_json_object(&obj) {
                    Self::Window(win)
                } else {
                    Self::Map(
                        obj.into_iter()
                            .map(|(k, v)| (k, Self::from_json(v)))
                            .collect(),
                    )
                }
            }
        }
    }

    /// Encode back into JSON (handles become their tagged objects)
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Element(elem) => elem.to_json(),
            Self::Window(win) => win.to_json(),
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl From<ElementReference> for RawValue {
    fn from(elem: ElementReference) -> Self {
        Self::Element(elem)
    }
}

impl From<WindowReference> for RawValue {
    fn from(win: WindowReference) -> Self {
        Self::Window(win)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// Result of executing a script in the remote page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    status: i64,
    value: RawValue,
}

impl Evaluation {
    /// Create an evaluation with an explicit status
    #[must_use]
    pub fn new(status: i64, value: impl Into<RawValue>) -> Self {
        Self {
            status,
            value: value.into(),
        }
    }

    /// Successful evaluation carrying `value`
    #[must_use]
    pub fn success(value: impl Into<RawValue>) -> Self {
        Self::new(STATUS_SUCCESS, value)
    }

    /// Failed evaluation in the remote library's error shape: `{"message": ...}`
    #[must_use]
    pub fn failure(status: i64, message: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(MESSAGE_KEY.to_string(), RawValue::String(message.into()));
        Self::new(status, RawValue::Map(entries))
    }

    /// Decode the bridge's JSON document
    pub fn from_json(json: &str) -> AtomResult<Self> {
        let doc: Value = serde_json::from_str(json)?;
        Self::from_json_value(doc)
    }

    /// Decode an already parsed JSON document
    pub fn from_json_value(doc: Value) -> AtomResult<Self> {
        let mut obj = match doc {
            Value::Object(obj) => obj,
            other => {
                return Err(AtomError::MalformedEvaluation {
                    message: format!("not a JSON object: {other}"),
                })
            }
        };
        if obj.len() != 2 {
            let keys: Vec<&String> = obj.keys().collect();
            return Err(AtomError::MalformedEvaluation {
                message: format!("expected exactly status and value, got keys {keys:?}"),
            });
        }
        let status = obj
            .get(STATUS_KEY)
            .and_then(Value::as_i64)
            .ok_or_else(|| AtomError::MalformedEvaluation {
                message: "missing integer status".to_string(),
            })?;
        let value = obj
            .remove(VALUE_KEY)
            .ok_or_else(|| AtomError::MalformedEvaluation {
                message: "missing value".to_string(),
            })?;
        Ok(Self::new(status, RawValue::from_json(value)))
    }

    /// Encode as the bridge's JSON document
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut obj = Map::with_capacity(2);
        obj.insert(STATUS_KEY.to_string(), Value::from(self.status));
        obj.insert(VALUE_KEY.to_string(), self.value.to_json());
        Value::Object(obj)
    }

    /// Remote status code
    #[must_use]
    pub const fn status(&self) -> i64 {
        self.status
    }

    /// Did the script complete without error?
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Raw value
    #[must_use]
    pub const fn value(&self) -> &RawValue {
        &self.value
    }

    /// Take ownership of the raw value
    #[must_use]
    pub fn into_value(self) -> RawValue {
        self.value
    }

    /// Error message of a failed evaluation (`value.message`), if one was sent
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        if self.is_success() {
            return None;
        }
        match &self.value {
            RawValue::Map(entries) if entries.len() == 1 => match entries.get(MESSAGE_KEY) {
                Some(RawValue::String(msg)) => Some(msg),
                _ => None,
            },
            _ => None,
        }
    }

    /// Turn a non-zero status into [`AtomError::EvaluationFailed`]
    pub fn check_status(self) -> AtomResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .message()
            .map_or_else(|| self.value.to_string(), str::to_string);
        Err(AtomError::EvaluationFailed {
            status: self.status,
            message,
        })
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Evaluation: status: {} value: {}", self.status, self.value)
    }
}
