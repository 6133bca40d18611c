//! Context formatter: records → one text block for the prompt.

use crate::retriever::RetrievedRecord;

/// Output for an empty record set.
pub const NO_DOCUMENTS: &str = "No relevant documents found.";

/// Placed between rendered records.
pub const RECORD_SEPARATOR: &str = "\n\n---\n\n";

const MISSING: &str = "N/A";

/// Renders records as `Title/Price/Rating/Reviews` blocks joined by [`RECORD_SEPARATOR`].
pub fn format_records(records: &[RetrievedRecord]) -> String {
    if records.is_empty() {
        return NO_DOCUMENTS.to_string();
    }
    records
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

fn render(record: &RetrievedRecord) -> String {
    let field = |v: &Option<String>| v.as_deref().unwrap_or(MISSING).to_string();
    format!(
        "Title: {}\nPrice: {}\nRating: {}\nReviews:\n{}",
        field(&record.title),
        field(&record.price),
        field(&record.rating),
        field(&record.review),
    )
}
