//! # Botscript - Declarative Dialogue Scripts
//!
//! Botscript compiles a small dialogue-scripting language into a bot
//! definition and runs it turn by turn against user messages. Each intent is
//! a block of dialogue actions; the interpreter suspends on `ask` and resumes
//! exactly where it left off when the answer arrives.
//!
//! ## Script Format
//!
//! ```text
//! bot "RetailSupport" {
//!   intent "check_order" {
//!     ask "What is your order number?" as order_id
//!     set status = "shipped"
//!     say "Order {{order_id}} is {{status}}."
//!     end
//!   }
//!
//!   default {
//!     say "Sorry, I did not understand that."
//!   }
//! }
//! ```
//!
//! - `say "text"` emits text with `{{name}}` placeholders filled in
//! - `ask "prompt" as var` emits the prompt and binds the next message to `var`
//! - `set var = "literal"` or `set var = other_var` assigns a variable
//! - `end` stops the current intent
//! - `#` starts a comment that runs to the end of the line
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use botscript::{FixedClassifier, Interpreter, SessionState};
//!
//! # fn main() -> botscript::Result<()> {
//! let bot = botscript::parse(r#"
//!     bot "Greeter" {
//!       intent "greet" {
//!         ask "your name?" as name
//!         say "hi {{name}}"
//!       }
//!     }
//! "#)?;
//!
//! let interpreter = Interpreter::new(Arc::new(bot), FixedClassifier::new("greet"));
//! let mut session = SessionState::new();
//!
//! assert_eq!(interpreter.handle_user_message(&mut session, "hello"), vec!["your name?"]);
//! assert_eq!(interpreter.handle_user_message(&mut session, "Alice"), vec!["hi Alice"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Script Text → Scanner → Tokens → ScriptParser → BotDef → Interpreter (+ SessionState per conversation)
//! ```
//!
//! - [`Scanner`] - Tokenizes script text with an ordered rule table
//! - [`ScriptParser`] - Recursive-descent parser producing a [`BotDef`]
//! - [`Interpreter`] - Runs a shared [`BotDef`] against a [`SessionState`]
//! - [`IntentClassifier`] - Pluggable mapping from user text to intent name
//!
//! ## Error Handling
//!
//! Loading is all-or-nothing: lexical and syntactic problems abort with an
//! [`Error`] carrying the position and the expected construct.
//!
//! ```rust
//! let err = botscript::parse(r#"bot "B" { intent "a" { say "x" }"#).unwrap_err();
//! assert!(err.to_string().contains("Unterminated bot \"B\" block"));
//! ```
//!
//! Running never fails: unknown intents fall back to the default block (or
//! produce no replies) and unbound placeholders stay as written.

/// Version of the Botscript crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classifier;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

use std::path::Path;

// Re-export main types
pub use classifier::{FixedClassifier, IntentClassifier, KeywordClassifier, KeywordRules};
pub use config::{KeywordMatching, ScriptOptions};
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{Action, BotDef, IntentDef, ScriptParser, SetValue};
pub use runtime::{render_template, Interpreter, SessionPhase, SessionState};

/// Parses script text with default options
pub fn parse(script: &str) -> Result<BotDef> {
    parse_with_options(script, &ScriptOptions::default())
}

/// Parses script text with the given options
pub fn parse_with_options(script: &str, options: &ScriptOptions) -> Result<BotDef> {
    let tokens = Scanner::with_options(script, options).scan_tokens()?;
    ScriptParser::new(tokens).parse()
}

/// Reads a UTF-8 script file and parses it with default options
pub fn parse_file(path: impl AsRef<Path>) -> Result<BotDef> {
    let path = path.as_ref();
    let script = std::fs::read_to_string(path).map_err(|err| Error::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse(&script)
}
