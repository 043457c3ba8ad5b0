use std::sync::Arc;

use tango_config::Config;
use tango_config::sources::SourcesConfig;
use tango_sources::{DefinitionSource, Resolver, SourceError};
use tango_types::DefinitionSourceKind;

use crate::commons::CommonsImageSource;
use crate::dictionary_site::DictionarySite;
use crate::http::HttpClient;
use crate::jisho::JishoSource;
use crate::processor::JapaneseProcessor;
use crate::tatoeba::TatoebaSource;
use crate::wikipedia::WikipediaSource;
use crate::wiktionary::WiktionarySource;

pub fn definition_source(
    kind: DefinitionSourceKind,
    http: &HttpClient,
    sources: &SourcesConfig,
) -> Arc<dyn DefinitionSource> {
    let http = http.clone();
    match kind {
        DefinitionSourceKind::Wikipedia => Arc::new(WikipediaSource::new(
            http,
            &sources.wikipedia_api,
            sources.wikipedia_max_chars,
        )),
        DefinitionSourceKind::Wiktionary => {
            Arc::new(WiktionarySource::new(http, &sources.wiktionary_api))
        }
        DefinitionSourceKind::Kotobank => Arc::new(DictionarySite::kotobank(
            http,
            &sources.kotobank_url,
            sources.definition_max_chars,
        )),
        DefinitionSourceKind::Goo => Arc::new(DictionarySite::goo(
            http,
            &sources.goo_url,
            sources.definition_max_chars,
        )),
    }
}

/// Wire every Japanese source into a [`Resolver`] as configured
pub fn build_resolver(config: &Config) -> Result<Resolver, SourceError> {
    let http = HttpClient::new(&config.network, config.debug)?;

    let mut examples = TatoebaSource::new(
        http.clone(),
        &config.sources.tatoeba_url,
        config.ranking.readability_ceiling,
    );
    if config.ranking.token_filter {
        examples = examples.with_processor(Arc::new(JapaneseProcessor::new()));
    }

    let images = CommonsImageSource::new(
        http.clone(),
        &config.sources.commons_api,
        config.media.image_width,
        config.media.dir.clone(),
    );

    let mut resolver = Resolver::new()
        .with_reading(Arc::new(JishoSource::new(http.clone(), &config.sources.jisho_url)))
        .with_examples(Arc::new(examples))
        .with_image(Arc::new(images), config.media.image_query_limit);

    for kind in &config.sources.definition_order {
        resolver = resolver.with_definition(definition_source(*kind, &http, &config.sources));
    }

    tracing::info!(
        "Definition order: {}",
        config
            .sources
            .definition_order
            .iter()
            .map(DefinitionSourceKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(resolver)
}
