use tango_types::DefinitionSourceKind;

pub mod media;
pub mod resolver;

pub use resolver::{Resolver, image_queries};

/// Kana reading and English glosses for a term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingGloss {
    pub reading: String,
    pub gloss: String,
}

/// Example sentence with its translation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamplePair {
    pub sentence: String,
    pub translation: String,
}

/// Reading/gloss provider interface
#[async_trait::async_trait]
pub trait ReadingSource: Send + Sync {
    async fn reading(&self, term: &str) -> Result<ReadingGloss, SourceError>;

    fn name(&self) -> &'static str;
}

/// Example sentence provider interface
#[async_trait::async_trait]
pub trait ExampleSource: Send + Sync {
    /// Best example for `term`, `None` when the corpus has nothing usable
    async fn example(&self, term: &str) -> Result<Option<ExamplePair>, SourceError>;

    fn name(&self) -> &'static str;
}

/// Monolingual definition provider interface.
///
/// Every provider has the same shape so the resolver can chain them.
#[async_trait::async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Cleaned definition, `None` when the source knows nothing
    async fn define(&self, term: &str) -> Result<Option<String>, SourceError>;

    fn kind(&self) -> DefinitionSourceKind;
}

/// Image provider interface
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    /// Stores the first image found for `query`, returning the local file name
    async fn image(&self, term: &str, query: &str) -> Result<Option<String>, SourceError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
