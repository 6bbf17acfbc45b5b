use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A complete bot: every intent block plus the optional fallback block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotDef {
    /// Bot name from `bot "Name" { ... }`
    pub name: String,
    /// Intent blocks keyed by intent name
    pub intents: HashMap<String, IntentDef>,
    /// The `default { ... }` block, if declared
    pub default_intent: Option<IntentDef>,
}

impl BotDef {
    /// Looks up an intent block by name
    pub fn intent(&self, name: &str) -> Option<&IntentDef> {
        self.intents.get(name)
    }

    /// The fallback block, if declared
    pub fn default_intent(&self) -> Option<&IntentDef> {
        self.default_intent.as_ref()
    }

    /// Looks up `name`, falling back to the default block on a miss
    pub fn resolve(&self, name: &str) -> Option<&IntentDef> {
        self.intent(name).or(self.default_intent.as_ref())
    }

    /// Intent names in sorted order
    pub fn intent_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.intents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// A named, ordered sequence of dialogue actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDef {
    /// Intent name ([`IntentDef::DEFAULT_NAME`] for the fallback block)
    pub name: String,
    /// Actions in execution order
    pub actions: Vec<Action>,
}

impl IntentDef {
    /// Reserved name carried by the `default` block
    pub const DEFAULT_NAME: &'static str = "__default__";

    /// Creates an intent block
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        IntentDef {
            name: name.into(),
            actions,
        }
    }

    /// Creates the fallback block
    pub fn default_block(actions: Vec<Action>) -> Self {
        IntentDef::new(Self::DEFAULT_NAME, actions)
    }

    /// True for the fallback block
    pub fn is_default(&self) -> bool {
        self.name == Self::DEFAULT_NAME
    }
}

/// Dialogue actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// `say "text"`: emit rendered text
    Say {
        /// Template text
        text: String,
    },

    /// `ask "prompt" as var`: emit rendered prompt, then bind the next user input
    Ask {
        /// Template prompt
        prompt: String,
        /// Variable receiving the answer
        variable: String,
    },

    /// `set var = value`: assign a literal or another variable's value
    Set {
        /// Target variable
        variable: String,
        /// Assigned value
        value: SetValue,
    },

    /// `end`: stop the current intent
    End,
}

/// Right-hand side of a `set` action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetValue {
    /// A string literal, rendered as a template when assigned
    Literal(String),
    /// A bare identifier naming another variable
    Variable(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Say { text } => write!(f, "say \"{}\"", text),
            Action::Ask { prompt, variable } => write!(f, "ask \"{}\" as {}", prompt, variable),
            Action::Set { variable, value } => write!(f, "set {} = {}", variable, value),
            Action::End => write!(f, "end"),
        }
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetValue::Literal(s) => write!(f, "\"{}\"", s),
            SetValue::Variable(name) => write!(f, "{}", name),
        }
    }
}
