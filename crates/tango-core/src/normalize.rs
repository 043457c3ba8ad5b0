use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex"));

/// Ruby tags only. The reading inside `<rt>` stays in the text.
static RUBY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:rt|rp|rb|ruby)\b[^>]*>").expect("Invalid ruby regex")
});

fn is_collapsible(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\u{0b}' || c == '\u{a0}'
}

/// Decode HTML entities and fold all line breaks, tabs and space runs into
/// single spaces. Ideographic spaces are left alone.
pub fn clean_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let decoded = html_escape::decode_html_entities(raw);

    decoded
        .split(is_collapsible)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip markup from an HTML fragment, keeping `<br>` as a separator
pub fn clean_html_fragment(fragment: &str) -> String {
    let text = BREAK_RE.replace_all(fragment, "\n");
    let text = RUBY_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, "");
    clean_text(&text)
}

/// Cut `text` to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
