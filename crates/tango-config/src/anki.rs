use serde::{Deserialize, Serialize};

use crate::env_flag;

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_deck() -> String {
    "Japanese Auto Deck".to_string()
}

fn default_model() -> String {
    "JP Word w/ Image + Examples".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// Push resolved terms to AnkiConnect
    #[serde(default)]
    pub enabled: bool,
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_deck")]
    pub deck: String,
    /// Note type name, created with the seven vocabulary fields when missing
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_url(),
            deck: default_deck(),
            model: default_model(),
        }
    }
}

impl AnkiConfig {
    pub fn new() -> Self {
        Self {
            enabled: env_flag("ANKI_ENABLED"),
            url: std::env::var("ANKI_CONNECT_URL").unwrap_or_else(|_| default_url()),
            deck: std::env::var("ANKI_DECK").unwrap_or_else(|_| default_deck()),
            model: std::env::var("ANKI_MODEL").unwrap_or_else(|_| default_model()),
        }
    }
}
