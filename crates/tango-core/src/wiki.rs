//! First definition line of one language section in a MediaWiki plaintext
//! extract (`explaintext=1`), where headings look like `== 日本語 ==`.

use std::sync::LazyLock;

use regex::Regex;

static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+|[①-⑳]|[０-９]+)[.．、)）]?\s*").expect("Invalid enumeration regex")
});

static BULLET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#・◆▶▷►＊※●○]\s*").expect("Invalid bullet regex"));

/// Which lines open, continue and close a language section
#[derive(Debug, Clone)]
pub struct SectionRules {
    /// Heading text of the wanted section, e.g. `日本語`
    pub target: &'static str,
    /// Sub-headings inside the section that carry no content
    pub part_of_speech: &'static [&'static str],
    /// Headings that end the definitions of the section
    pub stop_words: &'static [&'static str],
    /// Short tokens ending in this glyph name another language section
    pub section_suffix: char,
    pub section_suffix_max_chars: usize,
    /// Terminal punctuation for the first-sentence fallback
    pub sentence_end: char,
}

impl SectionRules {
    pub const fn japanese() -> Self {
        Self {
            target: "日本語",
            part_of_speech: &[
                "名詞",
                "動詞",
                "形容詞",
                "形容動詞",
                "副詞",
                "助詞",
                "助動詞",
                "連体詞",
                "感動詞",
                "接続詞",
                "接頭辞",
                "接尾辞",
                "形容詞語幹",
                "固有名詞",
            ],
            stop_words: &["語源", "熟語", "派生語", "関連語", "翻訳", "脚注", "参照", "諸言語"],
            section_suffix: '語',
            section_suffix_max_chars: 4,
            sentence_end: '。',
        }
    }

    fn closes_section(&self, token: &str) -> bool {
        self.stop_words.contains(&token)
            || (token.ends_with(self.section_suffix)
                && token.chars().count() <= self.section_suffix_max_chars)
    }
}

impl Default for SectionRules {
    fn default() -> Self {
        Self::japanese()
    }
}

/// One non-blank line of the extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// Text with `=` markers and a trailing colon removed
    pub token: &'a str,
    pub is_heading: bool,
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let normalized = raw.trim().trim_end_matches([':', '：']);
        let inner = normalized.trim_matches('=');
        Self {
            token: inner.trim(),
            is_heading: inner.len() != normalized.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionState {
    Seeking,
    InSection,
    Done(Option<String>),
}

impl SectionState {
    pub fn step(self, line: &Line<'_>, rules: &SectionRules) -> Self {
        match self {
            Self::Seeking => seek(line, rules),
            Self::InSection => read_section(line, rules),
            done @ Self::Done(_) => done,
        }
    }
}

fn seek(line: &Line<'_>, rules: &SectionRules) -> SectionState {
    if line.token == rules.target {
        SectionState::InSection
    } else {
        SectionState::Seeking
    }
}

fn read_section(line: &Line<'_>, rules: &SectionRules) -> SectionState {
    let token = line.token;

    if token.is_empty() || rules.part_of_speech.contains(&token) {
        return SectionState::InSection;
    }

    if rules.closes_section(token) || (line.is_heading && token != rules.target) {
        return SectionState::Done(None);
    }

    let cleaned = strip_enumeration(token);
    if cleaned.is_empty() {
        SectionState::InSection
    } else {
        SectionState::Done(Some(cleaned.to_string()))
    }
}

/// Drop a leading `1.`, `①`, `１、` style number and a bullet glyph
pub fn strip_enumeration(line: &str) -> &str {
    let rest = match NUMBER_PREFIX_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    };
    let rest = match BULLET_PREFIX_RE.find(rest) {
        Some(m) => &rest[m.end()..],
        None => rest,
    };
    rest.trim()
}

/// First sentence of `text` including its terminal punctuation,
/// or the whole trimmed text when there is none
pub fn first_sentence(text: &str, sentence_end: char) -> &str {
    match text.find(sentence_end) {
        Some(idx) => text[..idx + sentence_end.len_utf8()].trim(),
        None => text.trim(),
    }
}

/// First usable definition of the `rules.target` section in `extract`.
///
/// Falls back to the first sentence of the raw extract when the section is
/// missing or holds no definition line.
pub fn extract_section_definition(extract: &str, rules: &SectionRules) -> String {
    let mut state = SectionState::Seeking;

    for raw in extract.lines().filter(|l| !l.trim().is_empty()) {
        state = state.step(&Line::classify(raw), rules);
        if matches!(state, SectionState::Done(_)) {
            break;
        }
    }

    match state {
        SectionState::Done(Some(definition)) => definition,
        _ => first_sentence(extract, rules.sentence_end).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extract: &str) -> String {
        extract_section_definition(extract, &SectionRules::japanese())
    }

    #[test]
    fn numbered_definition_under_plain_heading() {
        let extract = "\n日本語\n\n名詞\n1. 猫。かわいい動物。\n語源\n";
        assert_eq!(parse(extract), "猫。かわいい動物。");
    }

    #[test]
    fn heading_with_equals_and_bullet() {
        let extract = "\n==日本語==\n===名詞===\n・犬。忠実な哺乳類。\n===熟語===\n";
        assert_eq!(parse(extract), "犬。忠実な哺乳類。");
    }

    #[test]
    fn heading_with_spaces_and_hash_bullet() {
        let extract = "\n== 日本語 ==\n=== 名詞 ===\n# 狐。ずる賢い動物。\n";
        assert_eq!(parse(extract), "狐。ずる賢い動物。");
    }

    #[test]
    fn part_of_speech_with_full_width_colon() {
        let extract = "\n日本語\n\n名詞：\n① 鳥。空を飛ぶ生き物。\n";
        assert_eq!(parse(extract), "鳥。空を飛ぶ生き物。");
    }

    #[test]
    fn full_width_number_prefix() {
        let extract = "== 日本語 ==\n=== 動詞 ===\n１２）走る。速く進む。";
        assert_eq!(parse(extract), "走る。速く進む。");
    }

    #[test]
    fn missing_section_falls_back_to_first_sentence() {
        let extract = "\nこれは日本語の説明が得られなかった場合の文章。二文目。\n";
        assert_eq!(parse(extract), "これは日本語の説明が得られなかった場合の文章。");
    }

    #[test]
    fn other_language_section_ends_search() {
        let extract = "== 日本語 ==\n=== 名詞 ===\n== 中国語 ==\n# 猫。\n";
        assert_eq!(parse(extract), "== 日本語 ==\n=== 名詞 ===\n== 中国語 ==\n# 猫。");
    }

    #[test]
    fn stop_word_before_definition_ends_section() {
        let extract = "== 日本語 ==\n=== 語源 ===\n古語より。";
        assert_eq!(parse(extract), "== 日本語 ==\n=== 語源 ===\n古語より。");
    }

    #[test]
    fn unrelated_heading_ends_section() {
        let extract = "== 日本語 ==\n=== 発音 ===\n1. あ。";
        let state = SectionState::InSection.step(&Line::classify("=== 発音 ==="), &SectionRules::japanese());
        assert_eq!(state, SectionState::Done(None));
        assert_eq!(parse(extract), "== 日本語 ==\n=== 発音 ===\n1. あ。");
    }

    #[test]
    fn no_terminal_punctuation_returns_whole_text() {
        assert_eq!(parse("  ただの文字列  "), "ただの文字列");
        assert_eq!(parse(""), "");
    }

    #[test]
    fn classify_lines() {
        assert_eq!(
            Line::classify("== 日本語 =="),
            Line { token: "日本語", is_heading: true }
        );
        assert_eq!(Line::classify("名詞："), Line { token: "名詞", is_heading: false });
        assert_eq!(Line::classify("===="), Line { token: "", is_heading: true });
    }

    #[test]
    fn seeking_ignores_everything_but_target() {
        let rules = SectionRules::japanese();
        let state = SectionState::Seeking.step(&Line::classify("1. 無関係。"), &rules);
        assert_eq!(state, SectionState::Seeking);
        let state = state.step(&Line::classify("==日本語=="), &rules);
        assert_eq!(state, SectionState::InSection);
    }

    #[test]
    fn parsing_own_output_is_stable() {
        let once = parse("==日本語==\n===名詞===\n# 試験などを意味する言葉。");
        assert_eq!(once, "試験などを意味する言葉。");
        assert_eq!(parse(&once), once);
    }
}
