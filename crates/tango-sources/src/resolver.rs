use std::sync::{Arc, LazyLock};

use futures_util::stream::{self, Stream, StreamExt};
use regex::Regex;
use tango_types::EnrichedTerm;
use tokio_util::sync::CancellationToken;

use crate::{DefinitionSource, ExampleSource, ImageSource, ReadingSource};

static GLOSS_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[;,/]|\band\b").expect("Invalid gloss split regex"));

/// Resolves terms into [`EnrichedTerm`]s by querying every configured source.
///
/// A failing source never aborts a term: its field stays empty and the
/// remaining sources still run.
#[derive(Clone, Default)]
pub struct Resolver {
    reading: Option<Arc<dyn ReadingSource>>,
    examples: Option<Arc<dyn ExampleSource>>,
    definitions: Vec<Arc<dyn DefinitionSource>>,
    image: Option<Arc<dyn ImageSource>>,
    image_query_limit: usize,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            image_query_limit: 5,
            ..Default::default()
        }
    }

    pub fn with_reading(mut self, source: Arc<dyn ReadingSource>) -> Self {
        self.reading = Some(source);
        self
    }

    pub fn with_examples(mut self, source: Arc<dyn ExampleSource>) -> Self {
        self.examples = Some(source);
        self
    }

    /// Append a definition source; sources are tried in insertion order
    pub fn with_definition(mut self, source: Arc<dyn DefinitionSource>) -> Self {
        self.definitions.push(source);
        self
    }

    pub fn with_image(mut self, source: Arc<dyn ImageSource>, query_limit: usize) -> Self {
        self.image = Some(source);
        self.image_query_limit = query_limit;
        self
    }

    pub async fn resolve(&self, term: &str) -> EnrichedTerm {
        let mut record = EnrichedTerm::new(term);

        if let Some(source) = &self.reading {
            match source.reading(term).await {
                Ok(found) => {
                    record.reading = found.reading;
                    record.gloss_english = found.gloss;
                }
                Err(e) => tracing::warn!("[{}] Reading lookup failed for '{}': {}", source.name(), term, e),
            }
        }

        if let Some(source) = &self.examples {
            match source.example(term).await {
                Ok(Some(pair)) => {
                    record.example_jp = pair.sentence;
                    record.example_en = pair.translation;
                }
                Ok(None) => tracing::debug!("[{}] No example for '{}'", source.name(), term),
                Err(e) => tracing::warn!("[{}] Example lookup failed for '{}': {}", source.name(), term, e),
            }
        }

        record.definition_jp = self.resolve_definition(term).await;
        record.image_ref = self
            .resolve_image(term, &record.reading, &record.gloss_english)
            .await;

        tracing::debug!("Resolved '{}': {:?}", term, record);
        record
    }

    /// First non-empty definition in source order
    async fn resolve_definition(&self, term: &str) -> String {
        for source in &self.definitions {
            match source.define(term).await {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    tracing::debug!("[{}] Definition found for '{}'", source.kind(), term);
                    return text.trim().to_string();
                }
                Ok(_) => tracing::debug!("[{}] No definition for '{}'", source.kind(), term),
                Err(e) => {
                    tracing::warn!("[{}] Definition lookup failed for '{}': {}", source.kind(), term, e)
                }
            }
        }
        String::new()
    }

    async fn resolve_image(&self, term: &str, reading: &str, gloss: &str) -> String {
        let Some(source) = &self.image else {
            return String::new();
        };

        for query in image_queries(term, reading, gloss, self.image_query_limit) {
            match source.image(term, &query).await {
                Ok(Some(file)) if !file.is_empty() => return file,
                Ok(_) => tracing::debug!("[{}] No image for query '{}'", source.name(), query),
                Err(e) => tracing::warn!("[{}] Image lookup failed for '{}': {}", source.name(), query, e),
            }
        }
        String::new()
    }

    /// Resolve `terms` with at most `workers` in flight, yielding records in
    /// submission order. After `cancel` fires no further term is started.
    pub fn resolve_stream<'a>(
        &'a self,
        terms: Vec<String>,
        workers: usize,
        cancel: CancellationToken,
    ) -> impl Stream<Item = EnrichedTerm> + 'a {
        stream::iter(terms)
            .take_while(move |_| futures_util::future::ready(!cancel.is_cancelled()))
            .map(move |term| async move {
                tracing::info!("Resolving '{}'", term);
                self.resolve(&term).await
            })
            .buffered(workers.max(1))
    }

    pub async fn resolve_all(
        &self,
        terms: Vec<String>,
        workers: usize,
        cancel: CancellationToken,
    ) -> Vec<EnrichedTerm> {
        self.resolve_stream(terms, workers, cancel).collect().await
    }
}

/// Queries tried for an image: the term, its reading, then individual gloss
/// phrases, deduplicated and capped at `limit`
pub fn image_queries(term: &str, reading: &str, gloss: &str, limit: usize) -> Vec<String> {
    let mut queries: Vec<String> = Vec::new();
    let push = |candidate: &str, queries: &mut Vec<String>| {
        let candidate = candidate.trim();
        if !candidate.is_empty() && queries.len() < limit && !queries.iter().any(|q| q == candidate) {
            queries.push(candidate.to_string());
        }
    };

    push(term, &mut queries);
    push(reading, &mut queries);
    for phrase in GLOSS_SPLIT_RE.split(gloss) {
        push(phrase, &mut queries);
    }
    queries
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tango_types::DefinitionSourceKind;

    use super::*;
    use crate::{ExamplePair, ReadingGloss, SourceError};

    struct FixedDefinition {
        kind: DefinitionSourceKind,
        answer: Option<&'static str>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FixedDefinition {
        fn new(kind: DefinitionSourceKind, answer: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self { kind, answer, fail: false, calls: AtomicUsize::new(0) })
        }

        fn failing(kind: DefinitionSourceKind) -> Arc<Self> {
            Arc::new(Self { kind, answer: None, fail: true, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl DefinitionSource for FixedDefinition {
        async fn define(&self, _term: &str) -> Result<Option<String>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Status(503));
            }
            Ok(self.answer.map(str::to_string))
        }

        fn kind(&self) -> DefinitionSourceKind {
            self.kind
        }
    }

    struct Jisho;

    #[async_trait::async_trait]
    impl ReadingSource for Jisho {
        async fn reading(&self, term: &str) -> Result<ReadingGloss, SourceError> {
            if term == "壊れ" {
                return Err(SourceError::Malformed("no data".into()));
            }
            Ok(ReadingGloss { reading: format!("{term}よみ"), gloss: "cat; kitty".into() })
        }

        fn name(&self) -> &'static str {
            "fake-jisho"
        }
    }

    struct Tatoeba;

    #[async_trait::async_trait]
    impl ExampleSource for Tatoeba {
        async fn example(&self, term: &str) -> Result<Option<ExamplePair>, SourceError> {
            // Later terms finish first to exercise ordering
            let delay = 30u64.saturating_sub(term.chars().count() as u64 * 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Some(ExamplePair {
                sentence: format!("{term}です。"),
                translation: "It is.".into(),
            }))
        }

        fn name(&self) -> &'static str {
            "fake-tatoeba"
        }
    }

    struct Images {
        queries: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ImageSource for Images {
        async fn image(&self, _term: &str, query: &str) -> Result<Option<String>, SourceError> {
            self.queries.lock().unwrap().push(query.to_string());
            if query == "kitty" {
                return Ok(Some("kitty.jpg".into()));
            }
            if query.ends_with("よみ") {
                return Err(SourceError::Status(500));
            }
            Ok(None)
        }

        fn name(&self) -> &'static str {
            "fake-images"
        }
    }

    #[tokio::test]
    async fn first_definition_wins() {
        let wikipedia = FixedDefinition::new(DefinitionSourceKind::Wikipedia, Some("Wiki"));
        let wiktionary = FixedDefinition::new(DefinitionSourceKind::Wiktionary, Some("Wiktionary"));
        let kotobank = FixedDefinition::new(DefinitionSourceKind::Kotobank, Some("Kotobank"));

        let resolver = Resolver::new()
            .with_definition(wikipedia.clone())
            .with_definition(wiktionary.clone())
            .with_definition(kotobank.clone());

        let record = resolver.resolve("語").await;
        assert_eq!(record.definition_jp, "Wiki");
        assert_eq!((wikipedia.calls(), wiktionary.calls(), kotobank.calls()), (1, 0, 0));
    }

    #[tokio::test]
    async fn empty_and_failing_sources_fall_through() {
        let wikipedia = FixedDefinition::new(DefinitionSourceKind::Wikipedia, Some("  "));
        let wiktionary = FixedDefinition::failing(DefinitionSourceKind::Wiktionary);
        let kotobank = FixedDefinition::new(DefinitionSourceKind::Kotobank, Some(" 本来の定義。 "));

        let resolver = Resolver::new()
            .with_definition(wikipedia.clone())
            .with_definition(wiktionary.clone())
            .with_definition(kotobank.clone());

        let record = resolver.resolve("語").await;
        assert_eq!(record.definition_jp, "本来の定義。");
        assert_eq!((wikipedia.calls(), wiktionary.calls(), kotobank.calls()), (1, 1, 1));
    }

    #[tokio::test]
    async fn every_source_empty_yields_empty_fields() {
        let resolver = Resolver::new()
            .with_definition(FixedDefinition::new(DefinitionSourceKind::Wikipedia, None))
            .with_definition(FixedDefinition::failing(DefinitionSourceKind::Goo));

        let record = resolver.resolve("無").await;
        assert_eq!(record, EnrichedTerm::new("無"));
    }

    #[tokio::test]
    async fn failing_reading_does_not_abort_term() {
        let resolver = Resolver::new()
            .with_reading(Arc::new(Jisho))
            .with_examples(Arc::new(Tatoeba))
            .with_definition(FixedDefinition::new(DefinitionSourceKind::Kotobank, Some("定義")));

        let record = resolver.resolve("壊れ").await;
        assert_eq!(record.reading, "");
        assert_eq!(record.example_jp, "壊れです。");
        assert_eq!(record.definition_jp, "定義");
    }

    #[tokio::test]
    async fn image_tries_reading_then_gloss() {
        let images = Arc::new(Images { queries: Default::default() });
        let resolver = Resolver::new()
            .with_reading(Arc::new(Jisho))
            .with_image(images.clone(), 5);

        let record = resolver.resolve("猫").await;
        assert_eq!(record.image_ref, "kitty.jpg");
        assert_eq!(
            *images.queries.lock().unwrap(),
            vec!["猫".to_string(), "猫よみ".into(), "cat".into(), "kitty".into()]
        );
    }

    #[tokio::test]
    async fn batch_preserves_submission_order() {
        let resolver = Resolver::new().with_examples(Arc::new(Tatoeba));
        let terms = vec!["a".to_string(), "bb".into(), "ccc".into()];

        let records = resolver.resolve_all(terms, 3, CancellationToken::new()).await;
        let order: Vec<_> = records.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(order, vec!["a", "bb", "ccc"]);
        assert_eq!(records[2].example_jp, "cccです。");
    }

    #[tokio::test]
    async fn cancelled_batch_starts_nothing() {
        let resolver = Resolver::new().with_examples(Arc::new(Tatoeba));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let records = resolver.resolve_all(vec!["a".into(), "b".into()], 2, cancel).await;
        assert!(records.is_empty());
    }

    #[test]
    fn image_query_expansion() {
        assert_eq!(
            image_queries("猫", "ねこ", "cat; house cat, kitty/Cat and dog", 10),
            vec!["猫", "ねこ", "cat", "house cat", "kitty", "Cat", "dog"]
        );
        assert_eq!(image_queries("猫", "猫", "", 5), vec!["猫"]);
        assert_eq!(image_queries("猫", "ねこ", "a; b; c; d", 3), vec!["猫", "ねこ", "a"]);
        assert_eq!(image_queries("犬", "", "sandwich; Android", 5), vec!["犬", "sandwich", "Android"]);
    }
}
