use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::media::MediaConfig;
use self::network::NetworkConfig;
use self::ranking::RankingConfig;
use self::sources::SourcesConfig;

pub mod anki;
pub mod media;
pub mod network;
pub mod ranking;
pub mod sources;

pub use ranking::READABILITY_CEILING;
pub use sources::DEFAULT_DEFINITION_ORDER;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub sources: SourcesConfig,
    pub ranking: RankingConfig,
    pub media: MediaConfig,
    pub anki: AnkiConfig,

    /// Log raw upstream payloads and parsed fields
    pub debug: bool,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            sources: SourcesConfig::new(),
            ranking: RankingConfig::new(),
            media: MediaConfig::new(),
            anki: AnkiConfig::new(),

            debug: env_flag("TANGO_DEBUG"),
        }
    }
}

/// Parse an env var, keeping `default` when it is unset or malformed
pub(crate) fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring malformed {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Read a boolean switch. `1`, `true`, `yes` and `on` enable it, in any case.
pub fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|raw| parse_flag(&raw))
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use tango_types::DefinitionSourceKind;

    use super::*;
    use crate::sources::parse_definition_order;

    #[test]
    fn defaults_carry_contractual_constants() {
        let config = Config::default();
        assert_eq!(config.ranking.readability_ceiling, 20);
        assert_eq!(
            config.sources.definition_order,
            vec![
                DefinitionSourceKind::Wikipedia,
                DefinitionSourceKind::Wiktionary,
                DefinitionSourceKind::Kotobank,
            ]
        );
        assert_eq!(config.sources.wikipedia_max_chars, 260);
        assert_eq!(config.anki.url, "http://localhost:8765");
    }

    #[test]
    fn definition_order_skips_unknown_and_duplicates() {
        let order = parse_definition_order(" goo, wikipedia ,bogus,goo,");
        assert_eq!(
            order,
            vec![DefinitionSourceKind::Goo, DefinitionSourceKind::Wikipedia]
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"ranking": {"token_filter": true}}"#).unwrap();
        assert!(config.ranking.token_filter);
        assert_eq!(config.ranking.readability_ceiling, 20);
        assert_eq!(config.network.timeout_secs, 15);
    }

    #[test]
    fn flags_accept_numeric_and_word_forms() {
        for raw in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(parse_flag(raw), "{raw:?} should enable");
        }
        for raw in ["0", "false", "", "no", "2"] {
            assert!(!parse_flag(raw), "{raw:?} should not enable");
        }
    }
}
