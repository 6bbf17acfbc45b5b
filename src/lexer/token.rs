use serde::{Deserialize, Serialize};

/// A single token from the script text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Literal text of the token (string literals without their quotes)
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All possible token types in Botscript
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// BOT keyword
    Bot,
    /// INTENT keyword
    Intent,
    /// DEFAULT keyword
    Default,
    /// SAY keyword
    Say,
    /// ASK keyword
    Ask,
    /// SET keyword
    Set,
    /// END keyword
    End,
    /// AS keyword
    As,

    // Literals
    /// Double-quoted string literal, quotes stripped
    String(String),
    /// Identifier matching `[A-Za-z_][A-Za-z0-9_]*`
    Identifier(String),

    // Delimiters
    /// Left brace {
    LeftBrace,
    /// Right brace }
    RightBrace,
    /// Equals sign =
    Equal,
}

impl TokenKind {
    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Bot
                | TokenKind::Intent
                | TokenKind::Default
                | TokenKind::Say
                | TokenKind::Ask
                | TokenKind::Set
                | TokenKind::End
                | TokenKind::As
        )
    }

    /// Get keyword from string
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "bot" => Some(TokenKind::Bot),
            "intent" => Some(TokenKind::Intent),
            "default" => Some(TokenKind::Default),
            "say" => Some(TokenKind::Say),
            "ask" => Some(TokenKind::Ask),
            "set" => Some(TokenKind::Set),
            "end" => Some(TokenKind::End),
            "as" => Some(TokenKind::As),
            _ => None,
        }
    }

    /// Human-readable name used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            TokenKind::LeftBrace => "`{`".to_string(),
            TokenKind::RightBrace => "`}`".to_string(),
            TokenKind::Equal => "`=`".to_string(),
            TokenKind::String(s) => format!("string \"{}\"", s),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            keyword => format!("keyword `{}`", keyword),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Bot => write!(f, "bot"),
            TokenKind::Intent => write!(f, "intent"),
            TokenKind::Default => write!(f, "default"),
            TokenKind::Say => write!(f, "say"),
            TokenKind::Ask => write!(f, "ask"),
            TokenKind::Set => write!(f, "set"),
            TokenKind::End => write!(f, "end"),
            TokenKind::As => write!(f, "as"),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Identifier(id) => write!(f, "{}", id),
            TokenKind::LeftBrace => write!(f, "{{"),
            TokenKind::RightBrace => write!(f, "}}"),
            TokenKind::Equal => write!(f, "="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::keyword("bot"), Some(TokenKind::Bot));
        assert_eq!(TokenKind::keyword("as"), Some(TokenKind::As));
        assert_eq!(TokenKind::keyword("Bot"), None);
        assert_eq!(TokenKind::keyword("botname"), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(TokenKind::Say.is_keyword());
        assert!(TokenKind::End.is_keyword());
        assert!(!TokenKind::Equal.is_keyword());
        assert!(!TokenKind::Identifier("say".to_string()).is_keyword());
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::RightBrace.describe(), "`}`");
        assert_eq!(TokenKind::Ask.describe(), "keyword `ask`");
        assert_eq!(
            TokenKind::Identifier("name".to_string()).describe(),
            "identifier `name`"
        );
    }
}
