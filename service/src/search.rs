//! Live row filtering
//!
//! Decides row visibility for the in-page search box. Pure given row state;
//! the enrichment engine re-runs it whenever an annotation lands so newly
//! fetched picklist text participates without the user retyping.

use fieldbook_core::types::FieldRow;

/// Whether a row is visible under the given query.
///
/// The query must already be lowercased by the caller. An empty query keeps
/// every row visible. Matching is case-insensitive substring over the
/// label-plus-annotation text, the API name, and the raw type text; there is
/// no tokenization.
#[must_use]
pub fn is_visible(row: &FieldRow, query_lowercased: &str) -> bool {
    if query_lowercased.is_empty() {
        return true;
    }
    let label_text = format!("{} {}", row.label, row.picklist_text).to_lowercase();
    label_text.contains(query_lowercased)
        || row.api_name.to_lowercase().contains(query_lowercased)
        || row.type_text.to_lowercase().contains(query_lowercased)
}
