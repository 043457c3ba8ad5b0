pub mod commons;
pub mod deconjugator;
pub mod dictionary_site;
pub mod http;
pub mod jisho;
pub mod mediawiki;
pub mod processor;
pub mod sources;
pub mod tatoeba;
pub mod wikipedia;
pub mod wiktionary;

#[cfg(test)]
mod tests;

pub use deconjugator::JapaneseDeconjugator;
pub use http::HttpClient;
pub use processor::JapaneseProcessor;
pub use sources::build_resolver;
