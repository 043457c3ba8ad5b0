//! Example sentence selection over sentence-search payloads.
//!
//! The `translations` field of a search result comes in three shapes: a flat
//! list of `{lang, text}` records, a list of such lists, or a map from
//! language code to records. All are folded into [`TranslationCandidate`]s.

use serde_json::Value;
use tango_types::TranslationCandidate;

use crate::language::LanguageProcessor;

/// Codes a sentence-search API may use for English
pub const ENGLISH_CODES: [&str; 2] = ["eng", "en"];

/// Candidates from a search response body.
///
/// One candidate per (sentence, translation) pair whose translation is tagged
/// with one of `target_langs`. Malformed results are skipped.
pub fn collect_candidates(
    payload: &Value,
    target_langs: &[&str],
    is_native: bool,
) -> Vec<TranslationCandidate> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    for result in results {
        let Some(source) = result.get("text").and_then(Value::as_str).map(str::trim) else {
            continue;
        };
        if source.is_empty() {
            continue;
        }
        let Some(translations) = result.get("translations") else {
            continue;
        };
        for translated in target_translations(translations, target_langs) {
            candidates.push(TranslationCandidate::new(source, translated, is_native));
        }
    }
    candidates
}

fn target_translations<'a>(translations: &'a Value, target_langs: &[&str]) -> Vec<&'a str> {
    let mut records = Vec::new();

    match translations {
        Value::Array(_) => {
            flatten_records(translations, &mut records);
            records.retain(|record| {
                record
                    .get("lang")
                    .and_then(Value::as_str)
                    .is_some_and(|lang| target_langs.contains(&lang))
            });
        }
        Value::Object(by_lang) => {
            for lang in target_langs {
                if let Some(group) = by_lang.get(*lang) {
                    flatten_records(group, &mut records);
                }
            }
        }
        _ => {}
    }

    records
        .into_iter()
        .filter_map(|record| record.get("text").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

fn flatten_records<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(_) => out.push(value),
        Value::Array(items) => items.iter().for_each(|item| flatten_records(item, out)),
        _ => {}
    }
}

/// Longest sentence, earliest on ties
fn longest<'a, I>(candidates: I) -> Option<&'a TranslationCandidate>
where
    I: IntoIterator<Item = &'a TranslationCandidate>,
{
    candidates.into_iter().fold(None, |best, c| match best {
        Some(b) if b.stripped_length >= c.stripped_length => Some(b),
        _ => Some(c),
    })
}

/// Pick the pair to show on a card.
///
/// Native sentences are preferred when any exist. Within that pool the longest
/// sentence wins, unless it exceeds `readability_ceiling`, in which case the
/// longest sentence at or under the ceiling wins if there is one.
pub fn select_example(
    candidates: &[TranslationCandidate],
    readability_ceiling: usize,
) -> Option<&TranslationCandidate> {
    let has_native = candidates.iter().any(|c| c.is_native);
    let pool = || candidates.iter().filter(move |c| c.is_native || !has_native);

    let best = longest(pool())?;
    if best.stripped_length <= readability_ceiling {
        return Some(best);
    }

    longest(pool().filter(|c| c.stripped_length <= readability_ceiling)).or(Some(best))
}

/// Keep candidates whose sentence mentions `term`. When none does, the input
/// is returned unchanged so the filter never empties a non-empty pool.
pub fn filter_mentions(
    candidates: Vec<TranslationCandidate>,
    term: &str,
    processor: &dyn LanguageProcessor,
) -> Vec<TranslationCandidate> {
    let (matching, other): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| processor.mentions(&c.source_text, term));

    if matching.is_empty() {
        tracing::debug!("No example mentions '{}', keeping {} unfiltered", term, other.len());
        other
    } else {
        matching
    }
}
