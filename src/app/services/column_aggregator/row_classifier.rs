//! Blank and comment row detection
//!
//! Classification runs before header resolution, so a comment or blank row
//! never takes the header slot.

/// What the aggregator should do with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Blank or comment row, contributes nothing
    Skip,
    /// Header or data row
    Process,
}

/// Classify a row of raw fields
///
/// A row is skipped when it has no fields, when every field is empty after
/// trimming, or when its trimmed first field starts with `comment_marker`.
pub fn classify_row<S: AsRef<str>>(fields: &[S], comment_marker: char) -> RowClass {
    let Some(first) = fields.first() else {
        return RowClass::Skip;
    };

    if first.as_ref().trim().starts_with(comment_marker) {
        return RowClass::Skip;
    }

    if fields.iter().all(|f| f.as_ref().trim().is_empty()) {
        return RowClass::Skip;
    }

    RowClass::Process
}
