use std::sync::LazyLock;

use regex::Regex;

use crate::jsonld::extract_json_ld_definition;
use crate::markup::extract_markup_definition;

static GOO_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<(?:div|p|li)[^>]*class=['"][^'"]*(?:meaning|text|description|content|explanation)[^'"]*['"][^>]*>(.*?)</(?:div|p|li)>"#,
    )
    .expect("Invalid Goo block regex")
});

static KOTOBANK_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<(?:section|div|p|dd|li)[^>]*(?:class|itemprop)=['"][^'">]*(?:meaning|description|content|text|kiji|entry|body|def|definition)['"][^>]*>(.*?)</(?:section|div|p|dd|li)>"#,
    )
    .expect("Invalid Kotobank block regex")
});

/// Site boilerplate that Kotobank exposes as page descriptions
const KOTOBANK_NOISE: &[&str] = &[
    "サービス終了のお知らせ",
    "Kotobank（コトバンク）は",
    "コトバンクは",
    "kotobank.jp",
];

/// How to pull a definition out of one dictionary site's entry page
pub struct DictionaryProfile {
    pub name: &'static str,
    block_re: &'static LazyLock<Regex>,
    noise: &'static [&'static str],
}

pub static GOO: DictionaryProfile = DictionaryProfile {
    name: "goo",
    block_re: &GOO_BLOCK_RE,
    noise: &[],
};

pub static KOTOBANK: DictionaryProfile = DictionaryProfile {
    name: "kotobank",
    block_re: &KOTOBANK_BLOCK_RE,
    noise: KOTOBANK_NOISE,
};

impl DictionaryProfile {
    pub fn is_noise(&self, text: &str) -> bool {
        text.is_empty() || self.noise.iter().any(|snippet| text.contains(snippet))
    }

    /// First definition on the page: JSON-LD first, then visible markup
    pub fn extract_first_definition(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let via_json_ld = extract_json_ld_definition(html, |t| self.is_noise(t));
        if !via_json_ld.is_empty() {
            return via_json_ld;
        }

        tracing::debug!("[{}] No JSON-LD definition, scanning markup blocks", self.name);
        extract_markup_definition(html, self.block_re, |t| self.is_noise(t))
    }
}
