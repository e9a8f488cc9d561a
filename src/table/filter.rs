//! Free-text row filtering.

use crate::models::StaffRecord;

/// Rows that can be matched by the toolbar search box.
pub trait Searchable {
    /// Text the search query is matched against.
    fn search_text(&self) -> &str;
}

impl Searchable for StaffRecord {
    fn search_text(&self) -> &str {
        &self.email
    }
}

/// Keep rows whose search text contains `query`, ignoring case.
///
/// An empty query keeps every row. Input order is preserved.
pub fn apply_filter<'a, T: Searchable>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return rows.iter().collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row.search_text().to_lowercase().contains(&needle))
        .collect()
}
