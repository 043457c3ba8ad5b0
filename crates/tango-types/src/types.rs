use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Study material gathered for one term.
///
/// Every field except `term` uses the empty string for "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTerm {
    pub term: String,
    pub reading: String,
    pub gloss_english: String,
    pub example_jp: String,
    pub example_en: String,
    pub definition_jp: String,
    pub image_ref: String,
}

impl EnrichedTerm {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }
}

/// One (source sentence, translation) pair from an example search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCandidate {
    pub source_text: String,
    pub translated_text: String,
    /// Character count of `source_text` without any whitespace
    pub stripped_length: usize,
    pub is_native: bool,
}

impl TranslationCandidate {
    pub fn new(source_text: &str, translated_text: &str, is_native: bool) -> Self {
        Self {
            source_text: source_text.to_string(),
            translated_text: translated_text.to_string(),
            stripped_length: source_text.chars().filter(|c| !c.is_whitespace()).count(),
            is_native,
        }
    }
}

/// A `description` string found in a JSON-LD document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionCandidate {
    pub text: String,
    pub priority: DescriptionPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DescriptionPriority {
    /// Enclosing entity is typed as a dictionary entry
    Dictionary = 0,
    Other = 1,
}

/// Named definition providers, in the order they can be chained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionSourceKind {
    Wikipedia,
    Wiktionary,
    Kotobank,
    Goo,
}

impl DefinitionSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wikipedia => "wikipedia",
            Self::Wiktionary => "wiktionary",
            Self::Kotobank => "kotobank",
            Self::Goo => "goo",
        }
    }
}

impl fmt::Display for DefinitionSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSourceKind(pub String);

impl fmt::Display for UnknownSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown definition source: {}", self.0)
    }
}

impl std::error::Error for UnknownSourceKind {}

impl FromStr for DefinitionSourceKind {
    type Err = UnknownSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wikipedia" => Ok(Self::Wikipedia),
            "wiktionary" => Ok(Self::Wiktionary),
            "kotobank" => Ok(Self::Kotobank),
            "goo" => Ok(Self::Goo),
            other => Err(UnknownSourceKind(other.to_string())),
        }
    }
}
