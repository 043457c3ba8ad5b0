use async_trait::async_trait;
use tango_core::extract::clean_wikipedia_extract;
use tango_sources::{DefinitionSource, SourceError};
use tango_types::DefinitionSourceKind;

use crate::http::HttpClient;
use crate::mediawiki::first_page_extract;

/// Lead sentence of the Japanese Wikipedia article
#[derive(Clone)]
pub struct WikipediaSource {
    http: HttpClient,
    api: String,
    max_chars: usize,
}

impl WikipediaSource {
    pub fn new(http: HttpClient, api: impl Into<String>, max_chars: usize) -> Self {
        Self {
            http,
            api: api.into(),
            max_chars,
        }
    }
}

#[async_trait]
impl DefinitionSource for WikipediaSource {
    async fn define(&self, term: &str) -> Result<Option<String>, SourceError> {
        let query = [
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", term),
        ];
        let payload = self.http.get_json(&self.api, &query).await?;

        let definition = first_page_extract(&payload)
            .map(|extract| clean_wikipedia_extract(extract, self.max_chars))
            .filter(|d| !d.is_empty());
        Ok(definition)
    }

    fn kind(&self) -> DefinitionSourceKind {
        DefinitionSourceKind::Wikipedia
    }
}
