use tango_core::language::{LanguageProcessor, Token};
use unicode_normalization::UnicodeNormalization;

use crate::deconjugator::JapaneseDeconjugator;

/// Longest surface considered when scanning a sentence
const MAX_TOKEN_CHARS: usize = 10;

/// Japanese text processor.
///
/// Japanese has no word separators, so every substring up to
/// [`MAX_TOKEN_CHARS`] is a token, each carrying the base forms the
/// deconjugator proposes for it.
#[derive(Debug, Default, Clone)]
pub struct JapaneseProcessor {
    deconjugator: JapaneseDeconjugator,
}

impl JapaneseProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageProcessor for JapaneseProcessor {
    fn language_code(&self) -> &str {
        "ja"
    }

    fn normalize(&self, text: &str) -> String {
        text.nfkc().filter(|c| !c.is_whitespace()).collect()
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = self.normalize(text).chars().collect();
        let mut tokens = Vec::new();

        for start in 0..chars.len() {
            let longest = (chars.len() - start).min(MAX_TOKEN_CHARS);
            for len in (1..=longest).rev() {
                let surface: String = chars[start..start + len].iter().collect();
                let lemmas = self.deconjugator.base_forms(&surface);
                tokens.push(Token {
                    surface,
                    lemmas,
                    position: start,
                });
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_width_and_spacing() {
        let processor = JapaneseProcessor::new();
        assert_eq!(processor.normalize("ｶﾀｶﾅ　ＡＢＣ 1"), "カタカナABC1");
    }

    #[test]
    fn mentions_surface_forms() {
        let processor = JapaneseProcessor::new();
        assert!(processor.mentions("猫が好きです。", "猫"));
        assert!(!processor.mentions("犬が好きです。", "猫"));
    }

    #[test]
    fn mentions_inflected_forms() {
        let processor = JapaneseProcessor::new();
        assert!(processor.mentions("昨日ケーキを食べました。", "食べる"));
        assert!(processor.mentions("駅で友達を待っている。", "待つ"));
        assert!(!processor.mentions("昨日ケーキを作りました。", "食べる"));
    }

    #[test]
    fn tokens_carry_positions() {
        let tokens = JapaneseProcessor::new().tokenize("猫だ");
        assert!(tokens.iter().any(|t| t.surface == "猫" && t.position == 0));
        assert!(tokens.iter().any(|t| t.surface == "だ" && t.position == 1));
    }
}
