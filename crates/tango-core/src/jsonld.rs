//! Definitions embedded as JSON-LD `<script>` blocks.
//!
//! Dictionary pages often carry several JSON-LD documents (site metadata next
//! to the actual entry). Descriptions on entities typed as dictionary entries
//! win over any other description, which is only used as a fallback.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tango_types::{DescriptionCandidate, DescriptionPriority};

use crate::normalize::clean_text;

static JSON_LD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type=['"]application/ld\+json['"][^>]*>(.*?)</script>"#)
        .expect("Invalid JSON-LD regex")
});

/// `@type` values treated as dictionary entries
pub const DICTIONARY_TYPES: [&str; 4] = ["DefinedTerm", "DictionaryEntry", "Article", "Sense"];

/// Raw bodies of every `application/ld+json` script block, in page order
pub fn json_ld_blocks(html: &str) -> impl Iterator<Item = &str> {
    JSON_LD_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
}

/// Collect every string under a `description` key, depth first
pub fn collect_descriptions(value: &Value) -> Vec<DescriptionCandidate> {
    let mut out = Vec::new();
    visit(value, &mut out);
    out
}

fn visit(value: &Value, out: &mut Vec<DescriptionCandidate>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("description") {
                out.push(DescriptionCandidate {
                    text: text.clone(),
                    priority: priority_of(map.get("@type")),
                });
            }
            for child in map.values() {
                visit(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, out);
            }
        }
        _ => {}
    }
}

fn priority_of(type_field: Option<&Value>) -> DescriptionPriority {
    let is_dictionary = match type_field {
        Some(Value::String(t)) => DICTIONARY_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| DICTIONARY_TYPES.contains(&t)),
        _ => false,
    };

    if is_dictionary {
        DescriptionPriority::Dictionary
    } else {
        DescriptionPriority::Other
    }
}

/// Best description across all JSON-LD blocks of `html`.
///
/// The first dictionary-typed description that survives cleaning and the
/// `is_noise` filter wins; otherwise the first surviving description of any
/// type; otherwise the empty string. Blocks that are not valid JSON are skipped.
pub fn extract_json_ld_definition(html: &str, is_noise: impl Fn(&str) -> bool) -> String {
    let mut fallback: Option<String> = None;

    for (idx, block) in json_ld_blocks(html).enumerate() {
        let data: Value = match serde_json::from_str(block) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Skipping JSON-LD block {}: {}", idx, e);
                continue;
            }
        };

        for candidate in collect_descriptions(&data) {
            let cleaned = clean_text(&candidate.text);
            if cleaned.is_empty() || is_noise(&cleaned) {
                continue;
            }
            match candidate.priority {
                DescriptionPriority::Dictionary => return cleaned,
                DescriptionPriority::Other => {
                    fallback.get_or_insert(cleaned);
                }
            }
        }
    }

    fallback.unwrap_or_default()
}
