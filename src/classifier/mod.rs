//! Intent classification for Botscript
//!
//! The interpreter asks an [`IntentClassifier`] which intent a free-form
//! message belongs to. How the name is produced is up to the implementation;
//! the interpreter only looks it up in the loaded bot.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maps user text to an intent name
pub trait IntentClassifier: Send + Sync {
    /// Intent name for `text`
    fn recognize(&self, text: &str) -> String;
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn recognize(&self, text: &str) -> String {
        self(text)
    }
}

/// Classifier that always returns the same intent name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClassifier(pub String);

impl FixedClassifier {
    /// Creates a classifier that always answers `intent`
    pub fn new(intent: impl Into<String>) -> Self {
        FixedClassifier(intent.into())
    }
}

impl IntentClassifier for FixedClassifier {
    fn recognize(&self, _text: &str) -> String {
        self.0.clone()
    }
}

/// One keyword rule: any keyword found in the text selects `intent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Intent selected by this rule
    pub intent: String,
    /// Case-insensitive substrings
    pub keywords: Vec<String>,
}

/// Ordered keyword rules plus the name returned when none match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRules {
    /// Rules, tried in order
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    /// Intent name when no rule matches
    pub fallback: String,
}

impl KeywordRules {
    /// Reads rules from a JSON document
    ///
    /// ```json
    /// { "rules": [{ "intent": "greet", "keywords": ["hello", "hi"] }], "fallback": "greet" }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Case-insensitive substring classifier
///
/// The first rule with a keyword contained in the message wins; otherwise
/// the fallback name is returned. The fallback need not exist in the bot, in
/// which case the bot's default block handles the message.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
    fallback: String,
}

impl KeywordClassifier {
    /// Creates a classifier with no rules
    pub fn new(fallback: impl Into<String>) -> Self {
        KeywordClassifier {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Appends a rule
    pub fn rule(mut self, intent: impl Into<String>, keywords: &[&str]) -> Self {
        self.rules.push(KeywordRule {
            intent: intent.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        });
        self
    }

    /// Builds a classifier from deserialized rules
    pub fn from_rules(rules: KeywordRules) -> Self {
        KeywordClassifier {
            rules: rules
                .rules
                .into_iter()
                .map(|rule| KeywordRule {
                    intent: rule.intent,
                    keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
                .collect(),
            fallback: rules.fallback,
        }
    }
}

impl IntentClassifier for KeywordClassifier {
    fn recognize(&self, text: &str) -> String {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|rule| rule.intent.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}
