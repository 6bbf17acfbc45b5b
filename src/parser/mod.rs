//! Botscript Parser Module
//!
//! Parses the token stream into a [`BotDef`] tree by recursive descent.

mod ast;
mod script_parser;

pub use ast::{Action, BotDef, IntentDef, SetValue};
pub use script_parser::ScriptParser;
