//! Atoms: typed units of remote script execution.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  TransformingAtom<A, T>                                          │
//! │                                                                  │
//! │   ┌────────────────────┐   Evaluation   ┌──────────────────────┐ │
//! │   │  SimpleAtom (A)    │ ─────────────► │  Transformer (T)     │ │
//! │   │  script id         │                │  CastOrDie<T>        │ │
//! │   │  literal args      │                │  ElementReferenceList│ │
//! │   │  element placement │                └──────────┬───────────┘ │
//! │   └────────────────────┘                           │ T::Output   │
//! └────────────────────────────────────────────────────┼─────────────┘
//!                                                      ▼
//!                                             typed result
//! ```
//!
//! A leaf [`SimpleAtom`] knows which script to run and how to build its
//! argument list. A [`TransformingAtom`] pairs any atom with a
//! [`Transformer`] and exposes the transformer's output as its own result.
//! New capabilities are built by pairing, never by re-implementing
//! execution. Atoms hold no state across evaluations and are safe to
//! evaluate repeatedly.

use serde::{Deserialize, Serialize};

use crate::evaluation::Evaluation;
use crate::locator::Locator;
use crate::reference::{ElementReference, WindowReference};
use crate::result::{AtomError, AtomResult};
use crate::script::{ElementPlacement, ScriptArg, ScriptId};

/// A unit of work: run a script remotely, then interpret the result.
pub trait Atom {
    /// Typed result of this atom
    type Output;

    /// Script to execute
    fn script(&self) -> ScriptId;

    /// Full argument list given the caller's active element (if any).
    ///
    /// Fails with [`AtomError::MissingElementContext`] when the atom needs
    /// an element and none was supplied.
    fn arguments(&self, element: Option<&ElementReference>) -> AtomResult<Vec<ScriptArg>>;

    /// Interpret the raw evaluation
    fn transform(&self, evaluation: Evaluation) -> AtomResult<Self::Output>;

    /// Wrap this atom with a transformer applied to its result
    fn then<T>(self, transformer: T) -> TransformingAtom<Self, T>
    where
        Self: Sized,
        T: Transformer<Self::Output>,
    {
        TransformingAtom::new(self, transformer)
    }
}

/// Pure mapping from one atom result to another
pub trait Transformer<In> {
    /// Result type after transformation
    type Output;

    /// Apply the mapping
    fn apply(&self, input: In) -> AtomResult<Self::Output>;
}

/// Arguments of the send-keys leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebKeysArgs {
    /// Text to type
    pub text: String,
}

/// Arguments of the lookup leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorArgs {
    /// Lookup strategy
    pub locator: Locator,
    /// Lookup value
    pub value: String,
}

/// Arguments of the frame-by-index leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameByIndexArgs {
    /// Child frame index
    pub index: i32,
    /// Window to search from (current window when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<WindowReference>,
}

/// Arguments of the frame-by-name-or-id leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameByIdOrNameArgs {
    /// Frame name or id attribute
    pub id_or_name: String,
    /// Window to search from (current window when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<WindowReference>,
}

/// Leaf atoms of the WebDriver script library.
///
/// A closed set: each variant is bound to one script and carries its own
/// typed literal arguments, so atoms marshal as plain tagged messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "atom", rename_all = "snake_case")]
pub enum SimpleAtom {
    /// Click the active element
    WebClick,
    /// Clear the active element
    ClearElement,
    /// Type into the active element
    WebKeys(WebKeysArgs),
    /// Scroll the active element into view
    ScrollIntoView,
    /// Visible text of the active element (or the document)
    GetVisibleText,
    /// Find one element
    FindElement(LocatorArgs),
    /// Find all matching elements
    FindElements(LocatorArgs),
    /// Focused element of the document
    ActiveElement,
    /// Child frame by index
    FrameByIndex(FrameByIndexArgs),
    /// Child frame by name or id
    FrameByIdOrName(FrameByIdOrNameArgs),
}

impl SimpleAtom {
    /// Name used in diagnostics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WebClick => "webClick",
            Self::ClearElement => "clearElement",
            Self::WebKeys(_) => "webKeys",
            Self::ScrollIntoView => "scrollIntoView",
            Self::GetVisibleText => "getVisibleText",
            Self::FindElement(_) => "findElement",
            Self::FindElements(_) => "findElements",
            Self::ActiveElement => "activeElement",
            Self::FrameByIndex(_) => "frameByIndex",
            Self::FrameByIdOrName(_) => "frameByIdOrName",
        }
    }

    /// Where the active element goes in the argument list.
    ///
    /// The active-element and frame-selection leaves never take the element,
    /// so an element selected on the interaction is not passed to them.
    #[must_use]
    pub const fn placement(&self) -> ElementPlacement {
        match self {
            Self::ActiveElement | Self::FrameByIndex(_) | Self::FrameByIdOrName(_) => {
                ElementPlacement::None
            }
            _ => ElementPlacement::AppendLast,
        }
    }

    /// Does this atom refuse to run without an active element?
    #[must_use]
    pub const fn requires_element(&self) -> bool {
        matches!(
            self,
            Self::WebClick | Self::ClearElement | Self::WebKeys(_) | Self::ScrollIntoView
        )
    }

    /// Caller-supplied literal arguments, in script order
    #[must_use]
    pub fn non_contextual_arguments(&self) -> Vec<ScriptArg> {
        match self {
            Self::WebClick
            | Self::ClearElement
            | Self::ScrollIntoView
            | Self::GetVisibleText
            | Self::ActiveElement => Vec::new(),
            Self::WebKeys(args) => vec![ScriptArg::text(args.text.clone())],
            Self::FindElement(args) | Self::FindElements(args) => {
                vec![ScriptArg::locator(args.locator, args.value.clone())]
            }
            Self::FrameByIndex(args) => {
                let mut out = vec![ScriptArg::index(args.index)];
                out.extend(args.root.clone().map(ScriptArg::window));
                out
            }
            Self::FrameByIdOrName(args) => {
                let mut out = vec![ScriptArg::text(args.id_or_name.clone())];
                out.extend(args.root.clone().map(ScriptArg::window));
                out
            }
        }
    }
}

impl Atom for SimpleAtom {
    type Output = Evaluation;

    fn script(&self) -> ScriptId {
        match self {
            Self::WebClick => ScriptId::Click,
            Self::ClearElement => ScriptId::Clear,
            Self::WebKeys(_) => ScriptId::SendKeys,
            Self::ScrollIntoView => ScriptId::ScrollIntoView,
            Self::GetVisibleText => ScriptId::GetVisibleText,
            Self::FindElement(_) => ScriptId::FindElement,
            Self::FindElements(_) => ScriptId::FindElements,
            Self::ActiveElement => ScriptId::ActiveElement,
            Self::FrameByIndex(_) => ScriptId::FrameByIndex,
            Self::FrameByIdOrName(_) => ScriptId::FrameByIdOrName,
        }
    }

    fn arguments(&self, element: Option<&ElementReference>) -> AtomResult<Vec<ScriptArg>> {
        if element.is_none() && self.requires_element() {
            tracing::debug!(atom = self.name(), "refusing to run without an element");
            return Err(AtomError::MissingElementContext { atom: self.name() });
        }
        let mut args = self.non_contextual_arguments();
        if let (ElementPlacement::AppendLast, Some(elem)) = (self.placement(), element) {
            args.push(ScriptArg::element(elem.clone()));
        }
        Ok(args)
    }

    fn transform(&self, evaluation: Evaluation) -> AtomResult<Evaluation> {
        evaluation.check_status()
    }
}

/// An atom whose result is re-interpreted by a transformer.
///
/// Script and arguments come from the wrapped atom unchanged; failures of
/// the wrapped atom propagate as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformingAtom<A, T> {
    atom: A,
    transformer: T,
}

impl<A, T> TransformingAtom<A, T> {
    /// Pair an atom with a transformer
    pub const fn new(atom: A, transformer: T) -> Self {
        Self { atom, transformer }
    }

    /// The wrapped atom
    pub const fn atom(&self) -> &A {
        &self.atom
    }

    /// The bound transformer
    pub const fn transformer(&self) -> &T {
        &self.transformer
    }
}

impl<A, T> Atom for TransformingAtom<A, T>
where
    A: Atom,
    T: Transformer<A::Output>,
{
    type Output = T::Output;

    fn script(&self) -> ScriptId {
        self.atom.script()
    }

    fn arguments(&self, element: Option<&ElementReference>) -> AtomResult<Vec<ScriptArg>> {
        self.atom.arguments(element)
    }

    fn transform(&self, evaluation: Evaluation) -> AtomResult<T::Output> {
        let raw = self.atom.transform(evaluation)?;
        self.transformer.apply(raw)
    }
}

impl<A: Atom + ?Sized> Atom for &A {
    type Output = A::Output;

    fn script(&self) -> ScriptId {
        (**self).script()
    }

    fn arguments(&self, element: Option<&ElementReference>) -> AtomResult<Vec<ScriptArg>> {
        (**self).arguments(element)
    }

    fn transform(&self, evaluation: Evaluation) -> AtomResult<A::Output> {
        (**self).transform(evaluation)
    }
}
