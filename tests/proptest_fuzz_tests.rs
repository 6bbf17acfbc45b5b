//! Property-based tests for the scanner, parser and interpreter
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The scanner and parser never panic on arbitrary input
//! 2. Parsing valid scripts is deterministic
//! 3. Rendering and answering behave the same for any bound value

use botscript::lexer::Scanner;
use botscript::parser::ScriptParser;
use botscript::{render_template, FixedClassifier, Interpreter, SessionState};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Generate token-like fragments joined by whitespace
fn script_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(script_token(), 0..60).prop_map(|tokens| tokens.join(" "))
}

fn script_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("bot".to_string()),
        Just("intent".to_string()),
        Just("default".to_string()),
        Just("say".to_string()),
        Just("ask".to_string()),
        Just("set".to_string()),
        Just("end".to_string()),
        Just("as".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("=".to_string()),
        r#""[a-zA-Z0-9 ]{0,12}""#.prop_map(|s| s),
        "[a-z_][a-z0-9_]{0,8}".prop_map(|s| s),
        "#[^\n]{0,12}\n".prop_map(|s| s),
    ]
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("not a keyword", |s| {
        botscript::TokenKind::keyword(s).is_none()
    })
}

fn action() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,16}".prop_map(|t| format!("say \"{}\"", t)),
        ("[a-zA-Z0-9 ?]{0,16}", identifier()).prop_map(|(p, v)| format!("ask \"{}\" as {}", p, v)),
        (identifier(), "[a-zA-Z0-9 ]{0,16}").prop_map(|(v, t)| format!("set {} = \"{}\"", v, t)),
        (identifier(), identifier()).prop_map(|(a, b)| format!("set {} = {}", a, b)),
        Just("end".to_string()),
    ]
}

/// Generate valid bot scripts with uniquely named intents
fn valid_script() -> impl Strategy<Value = String> {
    (
        prop::collection::btree_map(identifier(), prop::collection::vec(action(), 0..6), 0..5),
        prop::option::of(prop::collection::vec(action(), 0..4)),
    )
        .prop_map(|(intents, default)| {
            let mut script = String::from("bot \"Generated\" {\n");
            for (name, actions) in intents {
                script.push_str(&format!("  intent \"{}\" {{\n", name));
                for action in actions {
                    script.push_str(&format!("    {}\n", action));
                }
                script.push_str("  }\n");
            }
            if let Some(actions) = default {
                script.push_str("  default {\n");
                for action in actions {
                    script.push_str(&format!("    {}  # fallback\n", action));
                }
                script.push_str("  }\n");
            }
            script.push_str("}\n");
            script
        })
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

proptest! {
    /// The scanner should never panic on arbitrary input
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let _ = Scanner::new(&source).scan_tokens();
    }

    /// The parser should never panic on any token stream the scanner produces
    #[test]
    fn parser_never_panics(source in script_like_string()) {
        if let Ok(tokens) = Scanner::new(&source).scan_tokens() {
            let _ = ScriptParser::new(tokens).parse();
        }
    }

    /// Dropping the final closing brace must always fail to parse
    #[test]
    fn truncated_script_is_rejected(source in valid_script()) {
        let cut = source.trim_end().trim_end_matches('}');
        prop_assert!(botscript::parse(cut).is_err());
    }
}

// =============================================================================
// DETERMINISM
// =============================================================================

proptest! {
    /// Valid scripts parse, and parse identically every time
    #[test]
    fn parse_is_deterministic(source in valid_script()) {
        let first = botscript::parse(&source);
        prop_assert!(first.is_ok(), "generated script failed: {:?}", first);
        prop_assert_eq!(first.unwrap(), botscript::parse(&source).unwrap());
    }

    /// Running any generated intent terminates and repeated runs agree
    #[test]
    fn turns_are_deterministic(source in valid_script(), input in "[a-z ]{0,10}") {
        let bot = Arc::new(botscript::parse(&source).unwrap());
        for name in bot.intent_names() {
            let interp = Interpreter::new(Arc::clone(&bot), FixedClassifier::new(name));
            let mut s1 = SessionState::new();
            let mut s2 = SessionState::new();
            for _ in 0..3 {
                prop_assert_eq!(
                    interp.handle_user_message(&mut s1, &input),
                    interp.handle_user_message(&mut s2, &input)
                );
            }
        }
    }
}

// =============================================================================
// TEMPLATES AND ANSWERS
// =============================================================================

proptest! {
    /// A bound variable's placeholder is always fully replaced
    #[test]
    fn bound_placeholder_replaced(name in identifier(), value in "[^{}]{0,20}") {
        let mut vars = HashMap::new();
        vars.insert(name.clone(), value.clone());
        let rendered = render_template(&format!("<{{{{{}}}}}>", name), &vars);
        prop_assert_eq!(rendered, format!("<{}>", value));
    }

    /// Text without placeholders passes through untouched
    #[test]
    fn plain_text_unchanged(text in "[^{]{0,40}") {
        prop_assert_eq!(render_template(&text, &HashMap::new()), text);
    }

    /// Whatever the user answers is echoed back verbatim
    #[test]
    fn answer_round_trips(answer in "[^{}]{0,30}") {
        let bot = botscript::parse(r#"bot "B" { intent "i" { ask "?" as v say "{{v}}" } }"#).unwrap();
        let interp = Interpreter::new(Arc::new(bot), FixedClassifier::new("i"));
        let mut session = SessionState::new();
        interp.handle_user_message(&mut session, "start");
        prop_assert_eq!(interp.handle_user_message(&mut session, &answer), vec![answer.clone()]);
    }
}
