use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::parser::IntentDef;

/// Where a session stands between turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The next message is routed through the intent classifier
    Idle,
    /// The next message is the answer to an `ask`
    AwaitingInput {
        /// Variable that will receive the answer
        variable: String,
    },
}

/// Which block of the bot a session is executing
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IntentSlot {
    /// An `intent "name"` block
    Named(String),
    /// The `default` block
    Default,
}

/// One conversation's mutable state
///
/// Only the [`Interpreter`](crate::Interpreter) changes a session; callers
/// read it through the accessors.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Random id used to correlate log lines
    id: Uuid,
    /// Bound variables
    variables: HashMap<String, String>,
    /// Idle or awaiting an answer
    phase: SessionPhase,
    /// Block being executed, if any
    current: Option<IntentSlot>,
    /// Index of the next action to run in the current block
    cursor: usize,
}

impl SessionState {
    /// Creates an idle session with no variables
    pub fn new() -> Self {
        SessionState {
            id: Uuid::new_v4(),
            variables: HashMap::new(),
            phase: SessionPhase::Idle,
            current: None,
            cursor: 0,
        }
    }

    /// Session id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current phase
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// True while an `ask` is waiting for its answer
    pub fn is_awaiting_input(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingInput { .. })
    }

    /// Value bound to `name`
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// All bound variables
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    /// Name of the block being executed ([`IntentDef::DEFAULT_NAME`] for the
    /// default block)
    pub fn current_intent(&self) -> Option<&str> {
        match &self.current {
            Some(IntentSlot::Named(name)) => Some(name.as_str()),
            Some(IntentSlot::Default) => Some(IntentDef::DEFAULT_NAME),
            None => None,
        }
    }

    /// Index of the next action to run in the current block
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns to the initial state, keeping the id
    pub fn reset(&mut self) {
        self.variables.clear();
        self.phase = SessionPhase::Idle;
        self.current = None;
        self.cursor = 0;
    }

    // Transitions driven by the interpreter

    pub(crate) fn current_slot(&self) -> Option<&IntentSlot> {
        self.current.as_ref()
    }

    /// Starts a block from its first action
    pub(crate) fn begin(&mut self, slot: IntentSlot) {
        self.current = Some(slot);
        self.cursor = 0;
    }

    /// Moves the cursor past the action it points at
    pub(crate) fn advance_cursor(&mut self) {
        self.cursor += 1;
    }

    /// Suspends on an `ask`; the cursor already points past it
    pub(crate) fn suspend_on(&mut self, variable: String) {
        self.phase = SessionPhase::AwaitingInput { variable };
    }

    /// Binds `answer` to the pending variable and returns to `Idle`.
    /// Returns false if nothing was pending.
    pub(crate) fn bind_answer(&mut self, answer: &str) -> bool {
        match std::mem::replace(&mut self.phase, SessionPhase::Idle) {
            SessionPhase::AwaitingInput { variable } => {
                self.variables.insert(variable, answer.to_string());
                true
            }
            SessionPhase::Idle => false,
        }
    }

    pub(crate) fn assign(&mut self, variable: String, value: String) {
        self.variables.insert(variable, value);
    }

    /// Leaves the current block (after `end`, or when no block applies)
    pub(crate) fn finish(&mut self) {
        self.current = None;
        self.cursor = 0;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
