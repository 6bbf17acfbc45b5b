use std::collections::HashMap;

use tracing::{debug, info};

use super::ast::{Action, BotDef, IntentDef, SetValue};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// A block whose closing `}` has not been seen yet
#[derive(Debug, Clone)]
struct OpenBlock {
    description: String,
    line: usize,
    column: usize,
}

/// Recursive-descent parser for Botscript
///
/// Single pass, one token of lookahead, no backtracking. The first error
/// aborts the parse.
pub struct ScriptParser {
    tokens: Vec<Token>,
    current: usize,
    /// Blocks entered but not yet closed, innermost last
    open_blocks: Vec<OpenBlock>,
}

impl ScriptParser {
    /// Creates a new parser over a token sequence
    pub fn new(tokens: Vec<Token>) -> Self {
        ScriptParser {
            tokens,
            current: 0,
            open_blocks: Vec::new(),
        }
    }

    /// Parses the tokens into a bot definition
    ///
    /// The token stream must end exactly at the `bot` block's closing brace.
    pub fn parse(&mut self) -> Result<BotDef> {
        let bot = self.parse_bot()?;

        if let Some(token) = self.peek() {
            return Err(self.syntax_error(format!(
                "Unexpected {} after the end of the bot block.\n\n\
                 Help: A script holds exactly one `bot` block; \
                 every `intent` and `default` must be inside its braces.",
                token.kind.describe()
            )));
        }

        info!(
            bot = %bot.name,
            intents = bot.intents.len(),
            has_default = bot.default_intent.is_some(),
            "parsed bot script"
        );
        Ok(bot)
    }

    /// bot := 'bot' STRING '{' (intent | default)* '}'
    fn parse_bot(&mut self) -> Result<BotDef> {
        let bot_token = self.consume(TokenKind::Bot, Some("A script must start with `bot`."))?;
        let name = self.consume_string(Some(
            "The bot name must be a string.\n\
             Example: bot \"RetailSupport\" { ... }",
        ))?;
        self.consume(TokenKind::LeftBrace, Some("Expected `{` after the bot name."))?;
        self.open_block(format!("bot \"{}\"", name), &bot_token);

        let mut intents: HashMap<String, IntentDef> = HashMap::new();
        let mut default_intent: Option<IntentDef> = None;

        loop {
            let token = self.peek_in_block()?.clone();

            match token.kind {
                TokenKind::RightBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Intent => {
                    let intent = self.parse_intent()?;
                    if intents.contains_key(&intent.name) {
                        return Err(Error::DuplicateIntent {
                            name: intent.name,
                            line: token.line,
                            col: token.column,
                        });
                    }
                    intents.insert(intent.name.clone(), intent);
                }
                TokenKind::Default => {
                    if default_intent.is_some() {
                        return Err(Error::MultipleDefaults {
                            line: token.line,
                            col: token.column,
                        });
                    }
                    default_intent = Some(self.parse_default()?);
                }
                _ => {
                    return Err(self.expected_error(
                        "`intent`, `default` or `}`",
                        Some(
                            "A bot block contains only intent and default blocks.\n\
                             Example: intent \"greet\" { say \"Hello!\" }",
                        ),
                    ))
                }
            }
        }

        self.close_block();
        Ok(BotDef {
            name,
            intents,
            default_intent,
        })
    }

    /// intent := 'intent' STRING '{' action* '}'
    fn parse_intent(&mut self) -> Result<IntentDef> {
        let intent_token = self.consume(TokenKind::Intent, None)?;
        let name = self.consume_string(Some(
            "The intent name must be a string.\n\
             Example: intent \"check_order\" { ... }",
        ))?;
        self.consume(TokenKind::LeftBrace, Some("Expected `{` after the intent name."))?;
        self.open_block(format!("intent \"{}\"", name), &intent_token);

        let actions = self.parse_block_body()?;
        debug!(intent = %name, actions = actions.len(), "parsed intent");
        Ok(IntentDef::new(name, actions))
    }

    /// default := 'default' '{' action* '}'
    fn parse_default(&mut self) -> Result<IntentDef> {
        let default_token = self.consume(TokenKind::Default, None)?;
        self.consume(TokenKind::LeftBrace, Some("Expected `{` after `default`."))?;
        self.open_block("default".to_string(), &default_token);

        let actions = self.parse_block_body()?;
        debug!(actions = actions.len(), "parsed default block");
        Ok(IntentDef::default_block(actions))
    }

    /// Parses actions up to and including the closing `}` of the innermost block
    fn parse_block_body(&mut self) -> Result<Vec<Action>> {
        let mut actions = Vec::new();

        loop {
            if self.peek_in_block()?.kind == TokenKind::RightBrace {
                self.advance();
                break;
            }
            actions.push(self.parse_action()?);
        }

        self.close_block();
        Ok(actions)
    }

    /// action := say | ask | set | end
    fn parse_action(&mut self) -> Result<Action> {
        let kind = self.peek_in_block()?.kind.clone();
        match kind {
            TokenKind::Say => {
                self.advance();
                let text = self.consume_string(Some(
                    "`say` must be followed by a string.\n\
                     Example: say \"How can I help?\"",
                ))?;
                Ok(Action::Say { text })
            }
            TokenKind::Ask => {
                self.advance();
                let prompt = self.consume_string(Some(
                    "`ask` must be followed by a string prompt.\n\
                     Example: ask \"What is your order number?\" as order_id",
                ))?;
                self.consume(
                    TokenKind::As,
                    Some("Use `as` to name the variable that receives the answer."),
                )?;
                let variable = self.consume_identifier(None)?;
                Ok(Action::Ask { prompt, variable })
            }
            TokenKind::Set => {
                self.advance();
                let variable = self.consume_identifier(Some("`set` must be followed by a variable name."))?;
                self.consume(TokenKind::Equal, Some("Example: set status = \"pending\""))?;
                let value = self.parse_set_value()?;
                Ok(Action::Set { variable, value })
            }
            TokenKind::End => {
                self.advance();
                Ok(Action::End)
            }
            _ => Err(self.expected_error(
                "`say`, `ask`, `set`, `end` or `}`",
                Some("Each statement in a block starts with say, ask, set or end."),
            )),
        }
    }

    /// (STRING | IDENT) on the right of `set x =`
    fn parse_set_value(&mut self) -> Result<SetValue> {
        let kind = self.peek_in_block()?.kind.clone();
        match kind {
            TokenKind::String(s) => {
                self.advance();
                Ok(SetValue::Literal(s))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(SetValue::Variable(name))
            }
            _ => Err(self.expected_error(
                "string or identifier",
                Some(
                    "A `set` value is either a string literal or another variable.\n\
                     Example: set greeting = \"hello\"  or  set copy = name",
                ),
            )),
        }
    }

    // Helper methods

    fn open_block(&mut self, description: String, keyword: &Token) {
        self.open_blocks.push(OpenBlock {
            description,
            line: keyword.line,
            column: keyword.column,
        });
    }

    fn close_block(&mut self) {
        self.open_blocks.pop();
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// Next token, or the end-of-input error for the innermost open block
    fn peek_in_block(&self) -> Result<&Token> {
        self.peek().ok_or_else(|| self.eof_error("a token"))
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(token) => std::mem::discriminant(&token.kind) == std::mem::discriminant(kind),
            None => false,
        }
    }

    fn consume(&mut self, kind: TokenKind, hint: Option<&str>) -> Result<Token> {
        let expected = Self::expected_name(&kind);
        if self.check(&kind) {
            return self.advance().ok_or_else(|| self.eof_error(&expected));
        }

        match self.peek() {
            None => Err(self.eof_error(&expected)),
            Some(_) => Err(self.expected_error(&expected, hint)),
        }
    }

    fn consume_string(&mut self, hint: Option<&str>) -> Result<String> {
        let token = self.consume(TokenKind::String(String::new()), hint)?;
        match token.kind {
            TokenKind::String(value) => Ok(value),
            _ => Ok(token.lexeme),
        }
    }

    fn consume_identifier(&mut self, hint: Option<&str>) -> Result<String> {
        let hint = hint.or(Some(
            "Expected a variable name here.\n\
             Names start with a letter or underscore and contain letters, digits or underscores.",
        ));
        let token = self.consume(TokenKind::Identifier(String::new()), hint)?;
        match token.kind {
            TokenKind::Identifier(name) => Ok(name),
            _ => Ok(token.lexeme),
        }
    }

    /// Name of a token kind when it is what the grammar expects
    fn expected_name(kind: &TokenKind) -> String {
        match kind {
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Identifier(_) => "identifier".to_string(),
            other => other.describe(),
        }
    }

    /// End-of-input error: names the innermost unterminated block, if any
    fn eof_error(&self, expected: &str) -> Error {
        match self.open_blocks.last() {
            Some(block) => Error::UnterminatedBlock {
                block: block.description.clone(),
                line: block.line,
                col: block.column,
            },
            None => Error::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    /// Helper to create a syntax error at current position with helpful message
    fn syntax_error(&self, message: impl Into<String>) -> Error {
        let (line, col) = self
            .peek()
            .map(|t| (t.line, t.column))
            .unwrap_or((0, 0));
        Error::SyntaxError {
            line,
            col,
            message: message.into(),
        }
    }

    /// Helper to create a syntax error with expected/got pattern
    fn expected_error(&self, expected: &str, hint: Option<&str>) -> Error {
        let got = match self.peek() {
            Some(token) => token.kind.describe(),
            None => return self.eof_error(expected),
        };

        let mut message = format!("Expected {}, found {}", expected, got);

        if let Some(hint) = hint {
            message.push_str("\n\nHelp: ");
            message.push_str(hint);
        }

        self.syntax_error(message)
    }
}
