use async_trait::async_trait;
use tango_core::wiki::{SectionRules, extract_section_definition};
use tango_sources::{DefinitionSource, SourceError};
use tango_types::DefinitionSourceKind;

use crate::http::HttpClient;
use crate::mediawiki::first_page_extract;

/// First definition line of the 日本語 section of a Wiktionary entry
#[derive(Clone)]
pub struct WiktionarySource {
    http: HttpClient,
    api: String,
    rules: SectionRules,
}

impl WiktionarySource {
    pub fn new(http: HttpClient, api: impl Into<String>) -> Self {
        Self {
            http,
            api: api.into(),
            rules: SectionRules::japanese(),
        }
    }
}

#[async_trait]
impl DefinitionSource for WiktionarySource {
    async fn define(&self, term: &str) -> Result<Option<String>, SourceError> {
        let query = [
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", term),
        ];
        let payload = self.http.get_json(&self.api, &query).await?;

        let definition = first_page_extract(&payload)
            .map(|extract| extract_section_definition(extract, &self.rules))
            .filter(|d| !d.is_empty());
        Ok(definition)
    }

    fn kind(&self) -> DefinitionSourceKind {
        DefinitionSourceKind::Wiktionary
    }
}
