//! Loading options for Botscript scripts

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How keyword rules decide where a keyword ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatching {
    /// A keyword only matches when the next character cannot continue an
    /// identifier, so `botname` is a single identifier.
    #[default]
    WordBoundary,
    /// Keywords match as bare prefixes: `botname` scans as `bot` then `name`.
    Prefix,
}

/// Options that affect how script text is turned into a bot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Keyword termination rule used by the scanner
    pub keyword_matching: KeywordMatching,
}

impl ScriptOptions {
    /// Options that reproduce prefix keyword matching
    pub fn prefix_keywords() -> Self {
        ScriptOptions {
            keyword_matching: KeywordMatching::Prefix,
        }
    }

    /// Reads options from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
