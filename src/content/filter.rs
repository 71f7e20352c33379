use crate::content::record::ContentRecord;

/// Trim and lower-case a free-text query. Blank input yields `None`.
pub fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Whether `needle` (already normalized) occurs in any searchable field.
pub fn matches(record: &ContentRecord, needle: &str) -> bool {
    [&record.title, &record.excerpt, &record.body, &record.author]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Keep the records whose title, excerpt, body or author contain `query`.
///
/// A blank query matches nothing. Input order is preserved.
pub fn filter_records(records: Vec<ContentRecord>, query: &str) -> Vec<ContentRecord> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    records
        .into_iter()
        .filter(|record| matches(record, &needle))
        .collect()
}
