use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{clean_html_fragment, clean_text};

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));

static META_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta[^>]+name=['"]description['"][^>]+content=['"](.*?)['"]"#)
        .expect("Invalid meta description regex")
});

/// Scan `html` for definition-like blocks matched by `block_re`, whose first
/// capture group must be the block body.
///
/// Falls back to `<meta name="description">` when no block survives the
/// `is_noise` filter.
pub fn extract_markup_definition(
    html: &str,
    block_re: &Regex,
    is_noise: impl Fn(&str) -> bool,
) -> String {
    if html.is_empty() {
        return String::new();
    }

    let html = COMMENT_RE.replace_all(html, "");

    for caps in block_re.captures_iter(&html) {
        let Some(body) = caps.get(1) else { continue };
        let cleaned = clean_html_fragment(body.as_str());
        if !cleaned.is_empty() && !is_noise(&cleaned) {
            return cleaned;
        }
    }

    meta_description(&html)
        .filter(|meta| !is_noise(meta))
        .unwrap_or_default()
}

/// Normalized content of the page's meta description, if non-empty
pub fn meta_description(html: &str) -> Option<String> {
    let caps = META_DESCRIPTION_RE.captures(html)?;
    let cleaned = clean_text(caps.get(1)?.as_str());
    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?is)<(?:div|p|li)[^>]*class=['"][^'"]*(?:meaning|text)[^'"]*['"][^>]*>(.*?)</(?:div|p|li)>"#)
            .unwrap()
    });

    #[test]
    fn first_block_wins_and_comments_are_ignored() {
        let html = r#"
            <!-- <div class="meaning">コメント内</div> -->
            <div class="meaning">
                <p>鳥の総称。<br>空を飛ぶことができる脊椎動物。</p>
            </div>
            <div class="text">二番目</div>
        "#;
        assert_eq!(
            extract_markup_definition(html, &BLOCK_RE, |_| false),
            "鳥の総称。 空を飛ぶことができる脊椎動物。"
        );
    }

    #[test]
    fn noisy_blocks_are_skipped() {
        let html = r#"<li class="text">広告</li><li class="text">本文</li>"#;
        assert_eq!(
            extract_markup_definition(html, &BLOCK_RE, |t| t == "広告"),
            "本文"
        );
    }

    #[test]
    fn meta_description_fallback() {
        let html = r#"<head><meta name="description" content="犬の&amp;説明。
            続き"></head><body><span>no blocks</span></body>"#;
        assert_eq!(
            extract_markup_definition(html, &BLOCK_RE, |_| false),
            "犬の&説明。 続き"
        );
    }

    #[test]
    fn nothing_found_is_empty() {
        let html = "<html><body><p>no dictionary data</p></body></html>";
        assert_eq!(extract_markup_definition(html, &BLOCK_RE, |_| false), "");
    }
}
