/// Sentence terminators for Japanese prose
pub const SENTENCE_ENDINGS: [char; 3] = ['。', '！', '？'];

/// Sentences containing any of these are Wikipedia boilerplate
pub const FILLER_KEYWORDS: [&str; 5] = [
    "曖昧さ回避",
    "この記事",
    "この項目",
    "ウィキペディア",
    "出典を追加",
];

pub const ELLIPSIS: char = '…';

/// Split on terminal punctuation, keeping it on the sentence it ends
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if SENTENCE_ENDINGS.contains(&c) {
            let end = idx + c.len_utf8();
            sentences.push(text[start..end].trim());
            start = end;
        }
    }
    sentences.push(text[start..].trim());

    sentences.retain(|s| !s.is_empty());
    sentences
}

fn is_filler(sentence: &str) -> bool {
    FILLER_KEYWORDS.iter().any(|keyword| sentence.contains(keyword))
}

/// Shrink a Wikipedia lead extract to its first informative sentence of at
/// most `max_chars` characters (a trailing ellipsis counts towards the budget).
pub fn clean_wikipedia_extract(extract: &str, max_chars: usize) -> String {
    let text = extract.trim();
    if text.is_empty() {
        return String::new();
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let sentences = split_sentences(&collapsed);

    let chosen = sentences
        .iter()
        .find(|s| !is_filler(s))
        .or_else(|| sentences.first())
        .copied()
        .unwrap_or_default();

    truncate_with_ellipsis(chosen, max_chars)
}

/// Cut `text` so that it fits `max_chars`, ending in a single `…` when cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let kept: String = text.chars().take(max_chars - 1).collect();
    let mut out = kept
        .trim_end_matches(|c: char| c.is_whitespace() || c == ELLIPSIS)
        .to_string();
    out.push(ELLIPSIS);
    out
}
