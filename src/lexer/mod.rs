//! Lexical analysis for Botscript
//!
//! Converts script text into a flat, ordered stream of tokens using an
//! ordered table of pattern rules.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
