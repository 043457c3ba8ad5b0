use std::sync::Arc;

use async_trait::async_trait;
use tango_core::language::LanguageProcessor;
use tango_core::ranking::{ENGLISH_CODES, collect_candidates, filter_mentions, select_example};
use tango_sources::{ExamplePair, ExampleSource, SourceError};
use tango_types::TranslationCandidate;

use crate::http::HttpClient;

/// Example sentences from the Tatoeba search API.
///
/// Sentences by native speakers are requested first; only when that finds
/// nothing is the search repeated without the restriction.
#[derive(Clone)]
pub struct TatoebaSource {
    http: HttpClient,
    url: String,
    readability_ceiling: usize,
    processor: Option<Arc<dyn LanguageProcessor>>,
}

impl TatoebaSource {
    pub fn new(http: HttpClient, url: impl Into<String>, readability_ceiling: usize) -> Self {
        Self {
            http,
            url: url.into(),
            readability_ceiling,
            processor: None,
        }
    }

    /// Drop sentences that do not mention the term when some do
    pub fn with_processor(mut self, processor: Arc<dyn LanguageProcessor>) -> Self {
        self.processor = Some(processor);
        self
    }

    async fn search(&self, term: &str, native: bool) -> Result<Vec<TranslationCandidate>, SourceError> {
        let mut query = vec![
            ("from", "jpn"),
            ("query", term),
            ("to", "eng"),
            ("trans_filter", "limit"),
            ("trans_link", "direct"),
            ("trans_to", "eng"),
        ];
        if native {
            query.push(("native", "yes"));
        }

        let payload = self.http.get_json(&self.url, &query).await?;
        Ok(collect_candidates(&payload, &ENGLISH_CODES, native))
    }
}

#[async_trait]
impl ExampleSource for TatoebaSource {
    async fn example(&self, term: &str) -> Result<Option<ExamplePair>, SourceError> {
        let mut candidates = match self.search(term, true).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Native example search for '{}' failed: {}", term, e);
                Vec::new()
            }
        };

        if candidates.is_empty() {
            tracing::debug!("No native examples for '{}', searching all sentences", term);
            candidates = self.search(term, false).await?;
        }

        if let Some(processor) = &self.processor {
            candidates = filter_mentions(candidates, term, processor.as_ref());
        }

        Ok(select_example(&candidates, self.readability_ceiling).map(|c| ExamplePair {
            sentence: c.source_text.clone(),
            translation: c.translated_text.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "tatoeba"
    }
}
