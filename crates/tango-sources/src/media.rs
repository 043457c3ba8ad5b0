use std::path::Path;

use sha2::{Digest, Sha256};

use crate::SourceError;

const DEFAULT_EXTENSION: &str = ".jpg";

/// Keep letters, digits, `-` and `_`; everything else collapses into `_`
pub fn sanitize_stem(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Extension of the last path segment of `url`, query and fragment removed
pub fn url_extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let segment = path.rsplit('/').next()?;
    let dot = segment.rfind('.')?;
    let ext = &segment[dot..];
    (ext.len() > 1 && ext.len() <= 6 && ext[1..].chars().all(|c| c.is_ascii_alphanumeric()))
        .then_some(ext)
}

/// `{term}_img_{10 hex of sha256(content)}{ext}`; distinct content never
/// shares a name, so concurrent writers need no coordination
pub fn media_filename(term: &str, url: &str, content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let suffix = &hex::encode(digest)[..10];
    let stem = sanitize_stem(term);
    let stem = if stem.is_empty() { "term".to_string() } else { stem };
    let ext = url_extension(url)
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("{stem}_img_{suffix}{ext}")
}

/// Write downloaded media into `dir`, returning the file name
pub async fn store_media(
    dir: &Path,
    term: &str,
    url: &str,
    content: &[u8],
) -> Result<String, SourceError> {
    tokio::fs::create_dir_all(dir).await?;
    let filename = media_filename(term, url, content);
    tokio::fs::write(dir.join(&filename), content).await?;
    tracing::debug!("Stored {} bytes as {}", content.len(), filename);
    Ok(filename)
}
