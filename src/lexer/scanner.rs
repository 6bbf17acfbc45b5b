use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::token::{Token, TokenKind};
use crate::config::{KeywordMatching, ScriptOptions};
use crate::error::{Error, Result};

/// What a lexical rule produces when it wins at a scan position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    Bot,
    Intent,
    Default,
    Say,
    Ask,
    Set,
    End,
    As,
    String,
    Identifier,
    LeftBrace,
    RightBrace,
    Equal,
    // Skipped
    Newline,
    Whitespace,
    Comment,
}

/// One entry of the ordered rule table
struct LexRule {
    kind: RuleKind,
    pattern: Regex,
}

/// Keyword rules come first so they win over `Identifier` at the same position.
const KEYWORDS: &[(RuleKind, &str)] = &[
    (RuleKind::Bot, "bot"),
    (RuleKind::Intent, "intent"),
    (RuleKind::Default, "default"),
    (RuleKind::Say, "say"),
    (RuleKind::Ask, "ask"),
    (RuleKind::Set, "set"),
    (RuleKind::End, "end"),
    (RuleKind::As, "as"),
];

const OTHERS: &[(RuleKind, &str)] = &[
    (RuleKind::String, r#""[^"]*""#),
    (RuleKind::Identifier, r"[A-Za-z_][A-Za-z0-9_]*"),
    (RuleKind::LeftBrace, r"\{"),
    (RuleKind::RightBrace, r"\}"),
    (RuleKind::Equal, r"="),
    (RuleKind::Newline, r"\n"),
    (RuleKind::Whitespace, r"[ \t\r]+"),
    (RuleKind::Comment, r"#[^\n]*"),
];

fn build_rules(matching: KeywordMatching) -> Vec<LexRule> {
    let keyword_suffix = match matching {
        KeywordMatching::WordBoundary => r"\b",
        KeywordMatching::Prefix => "",
    };

    let keywords = KEYWORDS
        .iter()
        .map(|(kind, word)| (*kind, format!("^{}{}", word, keyword_suffix)));
    let others = OTHERS
        .iter()
        .map(|(kind, pattern)| (*kind, format!("^(?:{})", pattern)));

    keywords
        .chain(others)
        .map(|(kind, pattern)| LexRule {
            kind,
            pattern: Regex::new(&pattern).expect("lexical rule patterns are valid"),
        })
        .collect()
}

lazy_static! {
    static ref WORD_BOUNDARY_RULES: Vec<LexRule> = build_rules(KeywordMatching::WordBoundary);
    static ref PREFIX_RULES: Vec<LexRule> = build_rules(KeywordMatching::Prefix);
}

/// Rule-table scanner for Botscript source text
///
/// At every position the rules are tried in declared order and the first
/// one that matches wins. There is no longest-match step: keyword versus
/// identifier is decided purely by rule order (and, with
/// [`KeywordMatching::WordBoundary`], by requiring a word boundary after the
/// keyword).
pub struct Scanner<'a> {
    /// Source text being scanned
    source: &'a str,
    /// Rule table in priority order
    rules: &'static [LexRule],
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Byte offset of the scan position
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with default options
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, &ScriptOptions::default())
    }

    /// Creates a scanner using the given options
    pub fn with_options(source: &'a str, options: &ScriptOptions) -> Self {
        let rules: &'static [LexRule] = match options.keyword_matching {
            KeywordMatching::WordBoundary => &WORD_BOUNDARY_RULES,
            KeywordMatching::Prefix => &PREFIX_RULES,
        };

        Scanner {
            source,
            rules,
            tokens: Vec::new(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from the source and returns them in order
    ///
    /// Whitespace, newlines and `#` comments produce no tokens. Any text no
    /// rule accepts is a [`Error::LexError`].
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        debug!(count = self.tokens.len(), "scanned tokens");
        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let source = self.source;
        let rest = &source[self.current..];

        let (kind, text) = self
            .rules
            .iter()
            .find_map(|rule| rule.pattern.find(rest).map(|m| (rule.kind, m.as_str())))
            .ok_or_else(|| self.unexpected_character(rest))?;

        let (line, column) = (self.line, self.column);
        let token_kind = match kind {
            RuleKind::Newline | RuleKind::Whitespace | RuleKind::Comment => None,
            RuleKind::Bot => Some(TokenKind::Bot),
            RuleKind::Intent => Some(TokenKind::Intent),
            RuleKind::Default => Some(TokenKind::Default),
            RuleKind::Say => Some(TokenKind::Say),
            RuleKind::Ask => Some(TokenKind::Ask),
            RuleKind::Set => Some(TokenKind::Set),
            RuleKind::End => Some(TokenKind::End),
            RuleKind::As => Some(TokenKind::As),
            RuleKind::String => Some(TokenKind::String(text[1..text.len() - 1].to_string())),
            RuleKind::Identifier => Some(TokenKind::Identifier(text.to_string())),
            RuleKind::LeftBrace => Some(TokenKind::LeftBrace),
            RuleKind::RightBrace => Some(TokenKind::RightBrace),
            RuleKind::Equal => Some(TokenKind::Equal),
        };

        if let Some(token_kind) = token_kind {
            let lexeme = match &token_kind {
                TokenKind::String(value) => value.clone(),
                _ => text.to_string(),
            };
            self.tokens
                .push(Token::new(token_kind, lexeme, line, column));
        }

        self.advance_over(text);
        Ok(())
    }

    fn unexpected_character(&self, rest: &str) -> Error {
        let found = rest.chars().next().unwrap_or('\0');
        let message = match found {
            '"' => ": unterminated string literal".to_string(),
            _ => String::new(),
        };

        Error::LexError {
            line: self.line,
            col: self.column,
            found,
            message,
        }
    }

    /// Moves the scan position past `text`, keeping line/column in step
    fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.current += text.len();
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}
