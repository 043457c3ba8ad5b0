/// Text processing interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "ja", "zh", "ko", etc.)
    fn language_code(&self) -> &str;

    /// Normalize text (Unicode normalization, whitespace, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break text into tokens, each carrying its dictionary forms
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Whether `text` contains `term` as a surface form or a lemma
    fn mentions(&self, text: &str, term: &str) -> bool {
        let term = self.normalize(term);
        if term.is_empty() {
            return false;
        }
        self.tokenize(text)
            .iter()
            .any(|token| token.surface == term || token.lemmas.iter().any(|l| *l == term))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    /// Candidate dictionary forms, empty when the surface is already one
    pub lemmas: Vec<String>,
    /// Char offset in the normalized text
    pub position: usize,
}
