//! Result transformers: narrowing a raw [`Evaluation`] to a typed value.
//!
//! - [`CastOrDie`] checks the evaluation's discriminant against the target
//!   type and fails with [`AtomError::ResultTypeMismatch`] otherwise.
//! - [`ElementReferenceList`] turns a multi-element lookup into an ordered
//!   list of handles, rejecting anything that is not a handle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use crate::atom::Transformer;
use crate::evaluation::{Evaluation, RawValue, ValueKind};
use crate::locator::Locator;
use crate::reference::{ElementReference, WindowReference};
use crate::result::{AtomError, AtomResult};

/// Types a raw value can be narrowed to
pub trait Castable: Sized {
    /// Discriminant a value must carry to cast
    const KIND: ValueKind;

    /// Narrow, handing the value back untouched on mismatch
    fn cast(value: RawValue) -> Result<Self, RawValue>;
}

impl Castable for String {
    const KIND: ValueKind = ValueKind::String;

    fn cast(value: RawValue) -> Result<Self, RawValue> {
        match value {
            RawValue::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl Castable for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn cast(value: RawValue) -> Result<Self, RawValue> {
        match value {
            RawValue::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl Castable for ElementReference {
    const KIND: ValueKind = ValueKind::Element;

    fn cast(value: RawValue) -> Result<Self, RawValue> {
        match value {
            RawValue::Element(elem) => Ok(elem),
            other => Err(other),
        }
    }
}

impl Castable for WindowReference {
    const KIND: ValueKind = ValueKind::Window;

    fn cast(value: RawValue) -> Result<Self, RawValue> {
        match value {
            RawValue::Window(win) => Ok(win),
            other => Err(other),
        }
    }
}

/// Narrow an evaluation's value to `T` or fail
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CastOrDie<T> {
    #[serde(skip)]
    target: PhantomData<fn() -> T>,
}

impl<T> CastOrDie<T> {
    /// Transformer targeting `T`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: PhantomData,
        }
    }
}

impl<T> Default for CastOrDie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CastOrDie<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CastOrDie<T> {}

impl<T> PartialEq for CastOrDie<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for CastOrDie<T> {}

impl<T: Castable> fmt::Debug for CastOrDie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastOrDie<{}>", T::KIND)
    }
}

impl<T: Castable> Transformer<Evaluation> for CastOrDie<T> {
    type Output = T;

    fn apply(&self, input: Evaluation) -> AtomResult<T> {
        T::cast(input.into_value()).map_err(|actual| AtomError::ResultTypeMismatch {
            expected: T::KIND,
            actual,
        })
    }
}

/// Interpret a multi-element lookup as an ordered list of handles.
///
/// `null` is an empty list. A sequence must hold only element handles; the
/// first offender aborts the whole transformation. Anything else is not a
/// lookup result at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementReferenceList {
    locator: Locator,
    value: String,
}

impl ElementReferenceList {
    /// Transformer for a lookup of `value` by `locator` (used in diagnostics)
    #[must_use]
    pub fn new(locator: Locator, value: impl Into<String>) -> Self {
        Self {
            locator,
            value: value.into(),
        }
    }

    /// Lookup strategy this list was produced by
    #[must_use]
    pub const fn locator(&self) -> Locator {
        self.locator
    }

    /// Lookup value this list was produced by
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Transformer<Evaluation> for ElementReferenceList {
    type Output = Vec<ElementReference>;

    fn apply(&self, input: Evaluation) -> AtomResult<Vec<ElementReference>> {
        let items = match input.value() {
            RawValue::Null => return Ok(Vec::new()),
            RawValue::Sequence(items) => items,
            _ => {
                return Err(AtomError::NonIterableResult {
                    locator: self.locator,
                    value: self.value.clone(),
                    evaluation: input,
                })
            }
        };

        let mut references = Vec::with_capacity(items.len());
        for item in items {
            match item {
                RawValue::Element(elem) => references.push(elem.clone()),
                other => {
                    return Err(AtomError::NonReferenceElement {
                        locator: self.locator,
                        value: self.value.clone(),
                        element: other.clone(),
                        evaluation: input.clone(),
                    })
                }
            }
        }
        Ok(references)
    }
}
