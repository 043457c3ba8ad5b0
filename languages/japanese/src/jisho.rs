use async_trait::async_trait;
use serde_json::Value;
use tango_sources::{ReadingGloss, ReadingSource, SourceError};

use crate::http::HttpClient;

/// Reading and gloss from the Jisho word search API
#[derive(Clone)]
pub struct JishoSource {
    http: HttpClient,
    url: String,
}

impl JishoSource {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReadingSource for JishoSource {
    async fn reading(&self, term: &str) -> Result<ReadingGloss, SourceError> {
        let payload = self.http.get_json(&self.url, &[("keyword", term)]).await?;
        Ok(parse_reading_gloss(&payload))
    }

    fn name(&self) -> &'static str {
        "jisho"
    }
}

fn english_definitions(sense: &Value) -> Vec<&str> {
    sense
        .get("english_definitions")
        .and_then(Value::as_array)
        .map(|defs| {
            defs.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Reading of the first entry's first written form, and its glosses.
///
/// The gloss is the first sense's definitions joined by `"; "`. When that sense
/// has none, every sense is joined with `", "` inside and `"; "` between.
pub fn parse_reading_gloss(payload: &Value) -> ReadingGloss {
    let Some(entry) = payload
        .get("data")
        .and_then(Value::as_array)
        .and_then(|data| data.first())
    else {
        return ReadingGloss::default();
    };

    let reading = entry
        .pointer("/japanese/0/reading")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    let senses = entry
        .get("senses")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let gloss = match senses.first().map(english_definitions) {
        Some(primary) if !primary.is_empty() => primary.join("; "),
        _ => senses
            .iter()
            .map(english_definitions)
            .filter(|defs| !defs.is_empty())
            .map(|defs| defs.join(", "))
            .collect::<Vec<_>>()
            .join("; "),
    };

    ReadingGloss { reading, gloss }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_sense_wins() {
        let payload = json!({"data": [{
            "japanese": [{"word": "猫", "reading": "ねこ"}],
            "senses": [
                {"english_definitions": ["cat"]},
                {"english_definitions": ["shamisen"]}
            ]
        }]});
        let parsed = parse_reading_gloss(&payload);
        assert_eq!(parsed.reading, "ねこ");
        assert_eq!(parsed.gloss, "cat");
    }

    #[test]
    fn primary_sense_definitions_are_semicolon_joined() {
        let payload = json!({"data": [{
            "japanese": [{"reading": "たべる"}],
            "senses": [{"english_definitions": ["to eat", "to live on"]}]
        }]});
        assert_eq!(parse_reading_gloss(&payload).gloss, "to eat; to live on");
    }

    #[test]
    fn falls_back_to_all_senses() {
        let payload = json!({"data": [{
            "japanese": [{"reading": "x"}],
            "senses": [
                {"english_definitions": []},
                {"english_definitions": ["a", "b"]},
                {"english_definitions": ["c"]}
            ]
        }]});
        assert_eq!(parse_reading_gloss(&payload).gloss, "a, b; c");
    }

    #[test]
    fn empty_or_odd_payloads() {
        assert_eq!(parse_reading_gloss(&json!({"data": []})), ReadingGloss::default());
        assert_eq!(parse_reading_gloss(&json!({"meta": {}})), ReadingGloss::default());
        let no_reading = json!({"data": [{"japanese": [{"word": "猫"}], "senses": []}]});
        assert_eq!(parse_reading_gloss(&no_reading), ReadingGloss::default());
    }
}
