//! Execution bridge seam.
//!
//! The host test runner owns the web view and its JavaScript bridge. It
//! plugs in here through [`ScriptExecutor`]: given a [`ScriptRequest`] it
//! runs the script in page context and returns the raw [`Evaluation`].
//!
//! ```text
//! Atom ──arguments()──► ScriptRequest ──execute()──► Evaluation ──transform()──► T
//!        (fail fast)                    (host bridge)               (local only)
//! ```
//!
//! Evaluation is synchronous request/response. The bridge is expected to
//! serialize access to the web view; timeouts and cancellation are its
//! business too.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::VecDeque;

use crate::atom::Atom;
use crate::evaluation::Evaluation;
use crate::reference::{ElementReference, WindowReference};
use crate::result::{AtomError, AtomResult};
use crate::script::{arguments_json, ScriptArg, ScriptId};

/// A fully resolved script invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Script to run
    pub script: ScriptId,
    /// Ordered argument list (active element already placed)
    pub arguments: Vec<ScriptArg>,
    /// Window/frame to evaluate in (main window when absent)
    pub window: Option<WindowReference>,
}

impl ScriptRequest {
    /// JSON form: `{"script": ..., "args": [...], "window": ...}`
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "script": self.script.as_str(),
            "args": arguments_json(&self.arguments),
            "window": self.window.as_ref().map(WindowReference::to_json),
        })
    }
}

/// Runs scripts in the remote page
pub trait ScriptExecutor {
    /// Execute one request and return its raw evaluation
    fn execute(&mut self, request: &ScriptRequest) -> AtomResult<Evaluation>;
}

impl<F> ScriptExecutor for F
where
    F: FnMut(&ScriptRequest) -> AtomResult<Evaluation>,
{
    fn execute(&mut self, request: &ScriptRequest) -> AtomResult<Evaluation> {
        self(request)
    }
}

/// Addressing context an atom is evaluated in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Window/frame to evaluate in
    pub window: Option<WindowReference>,
    /// Active element handed to atoms that take one
    pub element: Option<ElementReference>,
    /// Emit argument payloads in trace events
    pub log_arguments: bool,
}

impl EvaluationContext {
    /// Main window, no element
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate in `window`
    #[must_use]
    pub fn in_window(mut self, window: WindowReference) -> Self {
        self.window = Some(window);
        self
    }

    /// Supply `element` as the active element
    #[must_use]
    pub fn with_element(mut self, element: ElementReference) -> Self {
        self.element = Some(element);
        self
    }

    /// Emit argument payloads in trace events
    #[must_use]
    pub const fn log_arguments(mut self, enabled: bool) -> Self {
        self.log_arguments = enabled;
        self
    }
}

/// Resolve `atom` against `context` without contacting the remote side
pub fn prepare<A>(atom: &A, context: &EvaluationContext) -> AtomResult<ScriptRequest>
where
    A: Atom + ?Sized,
{
    let arguments = atom.arguments(context.element.as_ref())?;
    Ok(ScriptRequest {
        script: atom.script(),
        arguments,
        window: context.window.clone(),
    })
}

/// Evaluate `atom` through `executor` and transform the result.
///
/// A missing required element fails before the executor is called. Bridge
/// failures and transformer failures propagate unchanged.
pub fn evaluate<A, E>(atom: &A, executor: &mut E, context: &EvaluationContext) -> AtomResult<A::Output>
where
    A: Atom + ?Sized,
    E: ScriptExecutor + ?Sized,
{
    let request = prepare(atom, context)?;
    tracing::debug!(
        script = %request.script,
        args = request.arguments.len(),
        window = request.window.as_ref().map(WindowReference::id),
        "dispatching atom"
    );
    if context.log_arguments {
        tracing::trace!(arguments = %arguments_json(&request.arguments), "atom arguments");
    }

    let evaluation = executor.execute(&request)?;
    if !evaluation.is_success() {
        tracing::warn!(
            script = %request.script,
            status = evaluation.status(),
            message = evaluation.message().unwrap_or_default(),
            "remote script reported an error"
        );
    }
    atom.transform(evaluation)
}

/// Canned response of a [`MockExecutor`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    /// Return this evaluation
    Evaluation(Evaluation),
    /// Fail as the bridge would
    Failure(String),
}

/// Mock executor for unit testing
///
/// Responses are served in queue order; every request is recorded.
#[derive(Debug, Default)]
pub struct MockExecutor {
    /// Queued responses
    pub responses: VecDeque<MockResponse>,
    /// Requests received, in order
    pub requests: Vec<ScriptRequest>,
}

impl MockExecutor {
    /// Create an empty mock executor
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an evaluation
    pub fn push_evaluation(&mut self, evaluation: Evaluation) {
        self.responses.push_back(MockResponse::Evaluation(evaluation));
    }

    /// Queue a bridge JSON document
    pub fn push_json(&mut self, json: &str) -> AtomResult<()> {
        let evaluation = Evaluation::from_json(json)?;
        self.push_evaluation(evaluation);
        Ok(())
    }

    /// Queue a bridge failure
    pub fn push_failure(&mut self, message: impl Into<String>) {
        self.responses.push_back(MockResponse::Failure(message.into()));
    }

    /// Requests received so far
    #[must_use]
    pub fn history(&self) -> &[ScriptRequest] {
        &self.requests
    }

    /// Check if a script was run
    #[must_use]
    pub fn was_called(&self, script: ScriptId) -> bool {
        self.requests.iter().any(|r| r.script == script)
    }

    /// Most recent request
    #[must_use]
    pub fn last_request(&self) -> Option<&ScriptRequest> {
        self.requests.last()
    }
}

impl ScriptExecutor for MockExecutor {
    fn execute(&mut self, request: &ScriptRequest) -> AtomResult<Evaluation> {
        self.requests.push(request.clone());
        match self.responses.pop_front() {
            Some(MockResponse::Evaluation(evaluation)) => Ok(evaluation),
            Some(MockResponse::Failure(message)) => Err(AtomError::remote(message)),
            None => Err(AtomError::remote(format!(
                "no mock evaluation queued for {}",
                request.script
            ))),
        }
    }
}
