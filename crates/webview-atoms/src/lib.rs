//! WebView Atoms: typed WebDriver atoms for Android web views
//!
//! An atom is a small unit of work: a named JavaScript script from the
//! WebDriver library, a list of arguments, and a transformer that narrows
//! the raw evaluation into a typed result. Atoms compose by pairing, never
//! by re-implementing execution.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   WEBVIEW ATOMS Architecture                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Driver     │    │ Web        │    │ Script     │            │
//! │   │ Atoms      │───►│ Interaction│───►│ Executor   │──► page    │
//! │   │ (factories)│    │ (window,   │    │ (host      │            │
//! │   │            │    │  element)  │    │  bridge)   │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │         ▲                                   │ Evaluation        │
//! │         │           ┌────────────┐          ▼                   │
//! │         └───────────│Transformers│◄─── {status, value}          │
//! │                     └────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use webview_atoms::prelude::*;
//!
//! let mut bridge = MockExecutor::new();
//! bridge.push_evaluation(Evaluation::success(json!({"ELEMENT": "e1"})));
//! bridge.push_evaluation(Evaluation::success(json!("Socrates")));
//!
//! let text = WebInteraction::new(&mut bridge)
//!     .with_element_atom(&find_element(Locator::Id, "author"))?
//!     .perform(&get_text())?
//!     .into_result()?;
//! assert_eq!(text, "Socrates");
//! # Ok::<(), AtomError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod atom;
mod bridge;
pub mod driver_atoms;
mod evaluation;
mod interaction;
mod locator;
mod reference;
mod result;
mod script;
mod transform;

pub use atom::{
    Atom, FrameByIdOrNameArgs, FrameByIndexArgs, LocatorArgs, SimpleAtom, TransformingAtom,
    Transformer, WebKeysArgs,
};
pub use bridge::{
    evaluate, prepare, EvaluationContext, MockExecutor, MockResponse, ScriptExecutor,
    ScriptRequest,
};
pub use evaluation::{Evaluation, RawValue, ValueKind, STATUS_SUCCESS};
pub use interaction::{InteractionConfig, WebInteraction};
pub use locator::{locator_json, Locator};
pub use reference::{ElementReference, WindowReference, ELEMENT_KEY, WINDOW_KEY};
pub use result::{AtomError, AtomResult};
pub use script::{arguments_json, ElementPlacement, ScriptArg, ScriptId};
pub use transform::{CastOrDie, Castable, ElementReferenceList};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::driver_atoms::*;
    pub use super::{
        evaluate, Atom, AtomError, AtomResult, CastOrDie, ElementReference,
        ElementReferenceList, Evaluation, EvaluationContext, InteractionConfig, Locator,
        MockExecutor, RawValue, ScriptExecutor, ScriptId, SimpleAtom, Transformer,
        TransformingAtom, WebInteraction, WindowReference,
    };
}
