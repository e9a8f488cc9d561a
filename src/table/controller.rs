//! Pagination, sort, and selection state of the staff table.

use std::collections::HashSet;

use crate::models::StaffId;

use super::sort::{SortDirection, SortKey};

/// Table state machine driven by UI events.
///
/// Every handler is synchronous and always succeeds.
#[derive(Debug, Clone)]
pub struct TableController {
    page: usize,
    rows_per_page: usize,
    sort_key: Option<SortKey>,
    direction: SortDirection,
    selected: HashSet<StaffId>,
}

impl TableController {
    /// Fresh state: first page, ascending, nothing selected.
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            page: 0,
            rows_per_page,
            sort_key: None,
            direction: SortDirection::Ascending,
            selected: HashSet::new(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn selected(&self) -> &HashSet<StaffId> {
        &self.selected
    }

    pub fn is_selected(&self, id: &StaffId) -> bool {
        self.selected.contains(id)
    }

    /// Header click. Repeated clicks on the same column flip the direction;
    /// a new column starts ascending.
    pub fn on_sort(&mut self, key: SortKey) {
        if self.sort_key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.sort_key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Row checkbox toggle.
    pub fn on_select_row(&mut self, id: &StaffId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Header checkbox. `true` selects exactly `all_ids`, `false` clears.
    pub fn on_select_all_rows(&mut self, checked: bool, all_ids: impl IntoIterator<Item = StaffId>) {
        self.selected.clear();
        if checked {
            self.selected.extend(all_ids);
        }
    }

    /// Jump to a page. Bounds are the caller's concern.
    pub fn on_change_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change page size and go back to the first page.
    pub fn on_change_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
        self.on_reset_page();
    }

    /// Go back to the first page. Called on every filter change.
    pub fn on_reset_page(&mut self) {
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<StaffId> {
        raw.iter().map(|s| StaffId::from(*s)).collect()
    }

    #[test]
    fn test_initial_state() {
        let table = TableController::new(5);
        assert_eq!(table.page(), 0);
        assert_eq!(table.rows_per_page(), 5);
        assert_eq!(table.sort_key(), None);
        assert_eq!(table.direction(), SortDirection::Ascending);
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_sort_same_key_toggles() {
        let mut table = TableController::new(5);

        table.on_sort(SortKey::Email);
        assert_eq!(table.sort_key(), Some(SortKey::Email));
        assert_eq!(table.direction(), SortDirection::Ascending);

        table.on_sort(SortKey::Email);
        assert_eq!(table.sort_key(), Some(SortKey::Email));
        assert_eq!(table.direction(), SortDirection::Descending);

        table.on_sort(SortKey::Email);
        assert_eq!(table.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_sort_new_key_resets_to_ascending() {
        let mut table = TableController::new(5);
        table.on_sort(SortKey::Email);
        table.on_sort(SortKey::Email);
        assert_eq!(table.direction(), SortDirection::Descending);

        table.on_sort(SortKey::Faculty);
        assert_eq!(table.sort_key(), Some(SortKey::Faculty));
        assert_eq!(table.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_select_row_toggles() {
        let mut table = TableController::new(5);
        let id = StaffId::from("a");

        table.on_select_row(&id);
        assert!(table.is_selected(&id));

        table.on_select_row(&id);
        assert!(!table.is_selected(&id));
    }

    #[test]
    fn test_select_all_round_trip() {
        let mut table = TableController::new(5);
        table.on_select_row(&StaffId::from("stale"));

        table.on_select_all_rows(true, ids(&["a", "b", "c"]));
        assert_eq!(table.selected().len(), 3);
        assert!(!table.is_selected(&StaffId::from("stale")));

        table.on_select_all_rows(false, ids(&["a", "b", "c"]));
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_select_all_deduplicates() {
        let mut table = TableController::new(5);
        table.on_select_all_rows(true, ids(&["a", "a", "b"]));
        assert_eq!(table.selected().len(), 2);
    }

    #[test]
    fn test_change_page_is_unchecked() {
        let mut table = TableController::new(5);
        table.on_change_page(42);
        assert_eq!(table.page(), 42);
    }

    #[test]
    fn test_rows_per_page_resets_page() {
        let mut table = TableController::new(5);
        for page in [0, 1, 7] {
            table.on_change_page(page);
            table.on_change_rows_per_page(25);
            assert_eq!(table.page(), 0);
            assert_eq!(table.rows_per_page(), 25);
        }
    }

    #[test]
    fn test_reset_page_keeps_sort_and_selection() {
        let mut table = TableController::new(10);
        table.on_sort(SortKey::Role);
        table.on_select_row(&StaffId::from("x"));
        table.on_change_page(3);

        table.on_reset_page();
        assert_eq!(table.page(), 0);
        assert_eq!(table.sort_key(), Some(SortKey::Role));
        assert!(table.is_selected(&StaffId::from("x")));
    }
}
