use serde_json::Value;

/// First page of a `action=query` response.
///
/// `query.pages` is an object keyed by page id in the default format and an
/// array with `formatversion=2`.
pub fn first_page(payload: &Value) -> Option<&Value> {
    match payload.pointer("/query/pages")? {
        Value::Object(pages) => pages.values().next(),
        Value::Array(pages) => pages.first(),
        _ => None,
    }
}

/// Trimmed plaintext `extract` of the first page, if non-empty
pub fn first_page_extract(payload: &Value) -> Option<&str> {
    first_page(payload)?
        .get("extract")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|extract| !extract.is_empty())
}
