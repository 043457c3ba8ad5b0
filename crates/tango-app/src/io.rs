use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tango_types::EnrichedTerm;

const CELL_SEPARATORS: [char; 3] = [';', ',', '\t'];

/// First non-empty cell of every non-blank line
pub fn parse_terms(content: &str) -> Vec<String> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .filter_map(|line| {
            line.split(CELL_SEPARATORS)
                .map(str::trim)
                .find(|cell| !cell.is_empty())
        })
        .map(str::to_string)
        .collect()
}

pub fn read_terms(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read term list {}", path.display()))?;

    let terms = parse_terms(&content);
    if terms.is_empty() {
        anyhow::bail!("No terms found in {}", path.display());
    }

    tracing::info!("Loaded {} terms from {}", terms.len(), path.display());
    Ok(terms)
}

/// One record as a single JSON line
pub fn write_record(out: &mut impl Write, record: &EnrichedTerm) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}
