use serde::{Deserialize, Serialize};
use tango_types::DefinitionSourceKind;

use crate::env_or;

/// Definition providers are tried in this order until one yields text.
/// Changing it changes observable output.
pub const DEFAULT_DEFINITION_ORDER: [DefinitionSourceKind; 3] = [
    DefinitionSourceKind::Wikipedia,
    DefinitionSourceKind::Wiktionary,
    DefinitionSourceKind::Kotobank,
];

fn default_definition_order() -> Vec<DefinitionSourceKind> {
    DEFAULT_DEFINITION_ORDER.to_vec()
}

fn default_jisho_url() -> String {
    "https://jisho.org/api/v1/search/words".to_string()
}

fn default_tatoeba_url() -> String {
    "https://tatoeba.org/eng/api_v0/search".to_string()
}

fn default_wikipedia_api() -> String {
    "https://ja.wikipedia.org/w/api.php".to_string()
}

fn default_wiktionary_api() -> String {
    "https://ja.wiktionary.org/w/api.php".to_string()
}

fn default_kotobank_url() -> String {
    "https://kotobank.jp".to_string()
}

fn default_goo_url() -> String {
    "https://dictionary.goo.ne.jp".to_string()
}

fn default_commons_api() -> String {
    "https://commons.wikimedia.org/w/api.php".to_string()
}

fn default_wikipedia_max_chars() -> usize {
    260
}

fn default_definition_max_chars() -> usize {
    400
}

/// Endpoints and per-source extraction limits
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    #[serde(default = "default_definition_order")]
    pub definition_order: Vec<DefinitionSourceKind>,
    #[serde(default = "default_jisho_url")]
    pub jisho_url: String,
    #[serde(default = "default_tatoeba_url")]
    pub tatoeba_url: String,
    #[serde(default = "default_wikipedia_api")]
    pub wikipedia_api: String,
    #[serde(default = "default_wiktionary_api")]
    pub wiktionary_api: String,
    /// Site root, entries live under `/word/{term}`
    #[serde(default = "default_kotobank_url")]
    pub kotobank_url: String,
    /// Site root, entries live under `/word/{term}/` and `/srch/all/{term}/m0u/`
    #[serde(default = "default_goo_url")]
    pub goo_url: String,
    #[serde(default = "default_commons_api")]
    pub commons_api: String,
    /// Budget for the cleaned Wikipedia lead sentence, ellipsis included
    #[serde(default = "default_wikipedia_max_chars")]
    pub wikipedia_max_chars: usize,
    /// Cap applied to definitions scraped from dictionary pages
    #[serde(default = "default_definition_max_chars")]
    pub definition_max_chars: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            definition_order: default_definition_order(),
            jisho_url: default_jisho_url(),
            tatoeba_url: default_tatoeba_url(),
            wikipedia_api: default_wikipedia_api(),
            wiktionary_api: default_wiktionary_api(),
            kotobank_url: default_kotobank_url(),
            goo_url: default_goo_url(),
            commons_api: default_commons_api(),
            wikipedia_max_chars: default_wikipedia_max_chars(),
            definition_max_chars: default_definition_max_chars(),
        }
    }
}

impl SourcesConfig {
    pub fn new() -> Self {
        let var = |name: &str, default: fn() -> String| std::env::var(name).unwrap_or_else(|_| default());

        let definition_order = std::env::var("TANGO_DEFINITION_ORDER")
            .ok()
            .map(|raw| parse_definition_order(&raw))
            .filter(|order| !order.is_empty())
            .unwrap_or_else(default_definition_order);

        Self {
            definition_order,
            jisho_url: var("TANGO_JISHO_URL", default_jisho_url),
            tatoeba_url: var("TANGO_TATOEBA_URL", default_tatoeba_url),
            wikipedia_api: var("TANGO_WIKIPEDIA_API", default_wikipedia_api),
            wiktionary_api: var("TANGO_WIKTIONARY_API", default_wiktionary_api),
            kotobank_url: var("TANGO_KOTOBANK_URL", default_kotobank_url),
            goo_url: var("TANGO_GOO_URL", default_goo_url),
            commons_api: var("TANGO_COMMONS_API", default_commons_api),
            wikipedia_max_chars: env_or("TANGO_WIKIPEDIA_MAX_CHARS", default_wikipedia_max_chars()),
            definition_max_chars: env_or(
                "TANGO_DEFINITION_MAX_CHARS",
                default_definition_max_chars(),
            ),
        }
    }
}

/// Parse a comma separated list such as `wikipedia,wiktionary,kotobank`.
/// Unknown names are skipped with a warning, duplicates keep their first position.
pub fn parse_definition_order(raw: &str) -> Vec<DefinitionSourceKind> {
    let mut order = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name.parse::<DefinitionSourceKind>() {
            Ok(kind) if !order.contains(&kind) => order.push(kind),
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring definition source: {}", e),
        }
    }
    order
}
