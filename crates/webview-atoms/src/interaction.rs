//! Addressing chain for driving a web view.
//!
//! A [`WebInteraction`] carries the current window and element selection
//! and evaluates atoms against it:
//!
//! ```ignore
//! let text = WebInteraction::new(&mut bridge)
//!     .with_element_atom(&find_element(Locator::Id, "author"))?
//!     .with_contextual_element(&find_element(Locator::Id, "person_name"))?
//!     .perform(&get_text())?
//!     .into_result()?;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::atom::Atom;
use crate::bridge::{evaluate, EvaluationContext, ScriptExecutor};
use crate::reference::{ElementReference, WindowReference};
use crate::result::{AtomError, AtomResult};

/// Configuration for web interactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Window used when none is selected (`None` = main window)
    #[serde(default)]
    pub default_window: Option<WindowReference>,
    /// Include argument payloads (typed text, lookup values) in trace events
    #[serde(default)]
    pub log_arguments: bool,
}

impl InteractionConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback window
    #[must_use]
    pub fn default_window(mut self, window: WindowReference) -> Self {
        self.default_window = Some(window);
        self
    }

    /// Enable argument logging
    #[must_use]
    pub const fn log_arguments(mut self, enabled: bool) -> Self {
        self.log_arguments = enabled;
        self
    }
}

/// Window/element selection plus the result of the last atom.
///
/// Every step consumes the interaction and returns the next one, so a
/// selection can't change underneath a pending evaluation.
pub struct WebInteraction<'e, E: ScriptExecutor + ?Sized, R = ()> {
    executor: &'e mut E,
    config: InteractionConfig,
    window: Option<WindowReference>,
    element: Option<ElementReference>,
    result: Option<R>,
}

impl<'e, E: ScriptExecutor + ?Sized> WebInteraction<'e, E> {
    /// Fresh interaction on the main window
    pub fn new(executor: &'e mut E) -> Self {
        Self::with_config(executor, InteractionConfig::default())
    }

    /// Fresh interaction with explicit configuration
    pub fn with_config(executor: &'e mut E, config: InteractionConfig) -> Self {
        Self {
            executor,
            config,
            window: None,
            element: None,
            result: None,
        }
    }
}

impl<'e, E: ScriptExecutor + ?Sized, R> WebInteraction<'e, E, R> {
    /// Currently selected window
    pub fn window(&self) -> Option<&WindowReference> {
        self.window.as_ref()
    }

    /// Currently selected element
    pub fn element(&self) -> Option<&ElementReference> {
        self.element.as_ref()
    }

    /// Active configuration
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Drop the window and element selection.
    ///
    /// Needed after an action (a click, say) navigates and invalidates the
    /// handles.
    pub fn reset(mut self) -> Self {
        tracing::debug!("resetting window and element selection");
        self.window = None;
        self.element = None;
        self
    }

    /// Evaluate subsequent atoms in `window`
    pub fn in_window(mut self, window: WindowReference) -> Self {
        tracing::debug!(window = window.id(), "selecting window");
        self.window = Some(window);
        self
    }

    /// Pick the window with an atom evaluated in the main window
    pub fn in_window_atom<A>(self, picker: &A) -> AtomResult<Self>
    where
        A: Atom<Output = WindowReference> + ?Sized,
    {
        let context = self.context(None, None);
        let window = evaluate(picker, self.executor, &context)?;
        Ok(self.in_window(window))
    }

    /// Supply `element` to subsequent atoms (replaces any previous element)
    pub fn with_element(mut self, element: ElementReference) -> Self {
        tracing::debug!(element = element.id(), "selecting element");
        self.element = Some(element);
        self
    }

    /// Pick the element with an atom evaluated in the current window
    pub fn with_element_atom<A>(self, picker: &A) -> AtomResult<Self>
    where
        A: Atom<Output = ElementReference> + ?Sized,
    {
        let context = self.context(self.window.clone(), None);
        let element = evaluate(picker, self.executor, &context)?;
        Ok(self.with_element(element))
    }

    /// Pick the element with an atom evaluated against the current element
    pub fn with_contextual_element<A>(self, picker: &A) -> AtomResult<Self>
    where
        A: Atom<Output = ElementReference> + ?Sized,
    {
        let context = self.context(self.window.clone(), self.element.clone());
        let element = evaluate(picker, self.executor, &context)?;
        Ok(self.with_element(element))
    }

    /// Evaluate `atom` in the current window with the current element
    pub fn perform<A>(self, atom: &A) -> AtomResult<WebInteraction<'e, E, A::Output>>
    where
        A: Atom + ?Sized,
    {
        let context = self.context(self.window.clone(), self.element.clone());
        let result = evaluate(atom, self.executor, &context)?;
        Ok(WebInteraction {
            executor: self.executor,
            config: self.config,
            window: self.window,
            element: self.element,
            result: Some(result),
        })
    }

    /// Result of the last `perform`
    pub fn get(&self) -> AtomResult<&R> {
        self.result.as_ref().ok_or(AtomError::NoResult)
    }

    /// Take the result of the last `perform`
    pub fn into_result(self) -> AtomResult<R> {
        self.result.ok_or(AtomError::NoResult)
    }

    fn context(
        &self,
        window: Option<WindowReference>,
        element: Option<ElementReference>,
    ) -> EvaluationContext {
        EvaluationContext {
            window: window.or_else(|| self.config.default_window.clone()),
            element,
            log_arguments: self.config.log_arguments,
        }
    }
}

impl<E: ScriptExecutor + ?Sized, R: fmt::Debug> fmt::Debug for WebInteraction<'_, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebInteraction")
            .field("config", &self.config)
            .field("window", &self.window)
            .field("element", &self.element)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}
