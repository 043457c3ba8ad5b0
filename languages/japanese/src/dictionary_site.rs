use async_trait::async_trait;
use tango_core::dictionary::{DictionaryProfile, GOO, KOTOBANK};
use tango_core::normalize::truncate_chars;
use tango_sources::{DefinitionSource, SourceError};
use tango_types::DefinitionSourceKind;

use crate::http::HttpClient;

/// A monolingual dictionary website scraped page by page.
///
/// Entry pages are tried in order; the first one yielding a definition wins.
pub struct DictionarySite {
    http: HttpClient,
    kind: DefinitionSourceKind,
    profile: &'static DictionaryProfile,
    /// Page URLs with `{term}` standing for the percent-encoded term
    pages: Vec<String>,
    max_chars: usize,
}

impl DictionarySite {
    pub fn kotobank(http: HttpClient, root: &str, max_chars: usize) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            http,
            kind: DefinitionSourceKind::Kotobank,
            profile: &KOTOBANK,
            pages: vec![format!("{root}/word/{{term}}")],
            max_chars,
        }
    }

    pub fn goo(http: HttpClient, root: &str, max_chars: usize) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            http,
            kind: DefinitionSourceKind::Goo,
            profile: &GOO,
            pages: vec![
                format!("{root}/word/{{term}}/"),
                format!("{root}/srch/all/{{term}}/m0u/"),
            ],
            max_chars,
        }
    }

    pub fn page_urls(&self, term: &str) -> Vec<String> {
        let encoded = urlencoding::encode(term);
        self.pages
            .iter()
            .map(|page| page.replace("{term}", &encoded))
            .collect()
    }
}

#[async_trait]
impl DefinitionSource for DictionarySite {
    async fn define(&self, term: &str) -> Result<Option<String>, SourceError> {
        let mut last_error = None;
        let mut fetched_any = false;

        for url in self.page_urls(term) {
            let html = match self.http.get_text(&url, &[]).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!("[{}] {} failed: {}", self.profile.name, url, e);
                    last_error = Some(e);
                    continue;
                }
            };
            fetched_any = true;

            let definition = self.profile.extract_first_definition(&html);
            if !definition.is_empty() {
                return Ok(Some(truncate_chars(&definition, self.max_chars)));
            }
        }

        match last_error {
            Some(e) if !fetched_any => Err(e),
            _ => Ok(None),
        }
    }

    fn kind(&self) -> DefinitionSourceKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new(&Default::default(), false).unwrap()
    }

    #[test]
    fn page_urls_encode_the_term() {
        let kotobank = DictionarySite::kotobank(http(), "https://kotobank.jp/", 400);
        assert_eq!(
            kotobank.page_urls("猫"),
            vec!["https://kotobank.jp/word/%E7%8C%AB".to_string()]
        );

        let goo = DictionarySite::goo(http(), "https://dictionary.goo.ne.jp", 400);
        assert_eq!(
            goo.page_urls("a b"),
            vec![
                "https://dictionary.goo.ne.jp/word/a%20b/".to_string(),
                "https://dictionary.goo.ne.jp/srch/all/a%20b/m0u/".to_string(),
            ]
        );
    }
}
