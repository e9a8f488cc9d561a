//! Filtered, sorted, and paginated view of the staff records.

use crate::models::{StaffId, StaffRecord};

use super::controller::TableController;
use super::filter::{Searchable, apply_filter};
use super::sort::{Sortable, apply_sort};

/// Rows on `page`, or an empty slice when the page lies past the end.
pub fn page_slice<T>(rows: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let start = page.saturating_mul(rows_per_page);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(rows_per_page).min(rows.len());
    &rows[start..end]
}

/// Blank rows needed to keep the last page as tall as a full one.
pub fn empty_rows(page: usize, rows_per_page: usize, count: usize) -> usize {
    if page == 0 {
        return 0;
    }
    ((page + 1) * rows_per_page).saturating_sub(count)
}

/// Index of the last page holding at least one of `count` rows.
pub fn last_page(count: usize, rows_per_page: usize) -> usize {
    if count == 0 || rows_per_page == 0 {
        return 0;
    }
    (count - 1) / rows_per_page
}

/// One frame's worth of table data.
#[derive(Debug)]
pub struct TablePage<'a, T> {
    /// Rows to render on the current page.
    pub rows: Vec<&'a T>,
    /// Rows left after filtering, across all pages.
    pub filtered_count: usize,
    /// Blank padding rows after `rows`.
    pub empty_rows: usize,
    /// Filter is active and matched nothing.
    pub not_found: bool,
}

/// Filter, sort, then slice `records` for the controller's current page.
pub fn compose<'a, T>(records: &'a [T], filter_text: &str, table: &TableController) -> TablePage<'a, T>
where
    T: Searchable + Sortable<Key = super::sort::SortKey>,
{
    let mut filtered = apply_filter(records, filter_text);
    apply_sort(&mut filtered, table.sort_key(), table.direction());

    let filtered_count = filtered.len();
    let rows = page_slice(&filtered, table.page(), table.rows_per_page()).to_vec();

    TablePage {
        rows,
        filtered_count,
        empty_rows: empty_rows(table.page(), table.rows_per_page(), filtered_count),
        not_found: filtered_count == 0 && !filter_text.is_empty(),
    }
}

/// Identifiers of every record, used by the header "select all" checkbox.
pub fn all_ids(records: &[StaffRecord]) -> impl Iterator<Item = StaffId> + '_ {
    records.iter().map(|r| r.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::staff_records;
    use crate::models::Role;
    use crate::table::sort::SortKey;

    fn record(id: &str, email: &str) -> StaffRecord {
        StaffRecord {
            id: StaffId::from(id),
            email: email.to_string(),
            faculty: "Engineering".to_string(),
            department: "Computer Science".to_string(),
            role: Role::Staff,
        }
    }

    #[test]
    fn test_sorted_scenario() {
        let records = vec![record("1", "b@x.com"), record("2", "a@x.com")];
        let mut table = TableController::new(5);
        table.on_sort(SortKey::Email);

        let view = compose(&records, "", &table);
        let ids: Vec<_> = view.rows.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn test_short_list_fits_first_page() {
        let records = vec![record("1", "a@x.com"), record("2", "b@x.com"), record("3", "c@x.com")];
        let table = TableController::new(5);

        let view = compose(&records, "", &table);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.empty_rows, 0);
        assert!(!view.not_found);
    }

    #[test]
    fn test_not_found_requires_filter_text() {
        let records: Vec<StaffRecord> = Vec::new();
        let table = TableController::new(5);

        let view = compose(&records, "", &table);
        assert!(view.rows.is_empty());
        assert!(!view.not_found);

        let view = compose(&records, "ghost", &table);
        assert!(view.not_found);
    }

    #[test]
    fn test_filter_before_pagination() {
        let records = staff_records();
        let mut table = TableController::new(5);
        table.on_change_page(1);

        let view = compose(&records, "university.edu", &table);
        assert_eq!(view.filtered_count, records.len());
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].id, records[5].id);

        // a narrow filter leaves page 1 out of range until the page is reset
        let view = compose(&records, "amelia", &table);
        assert_eq!(view.filtered_count, 1);
        assert!(view.rows.is_empty());

        table.on_reset_page();
        let view = compose(&records, "amelia", &table);
        assert_eq!(view.rows.len(), 1);
    }

    #[test]
    fn test_page_slice_bounds() {
        let rows = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(page_slice(&rows, 0, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&rows, 1, 5), &[6, 7]);
        assert!(page_slice(&rows, 2, 5).is_empty());
        assert!(page_slice(&rows, usize::MAX, 5).is_empty());
    }

    #[test]
    fn test_empty_rows_padding() {
        assert_eq!(empty_rows(0, 5, 3), 0);
        assert_eq!(empty_rows(1, 5, 7), 3);
        assert_eq!(empty_rows(1, 5, 10), 0);
        assert_eq!(empty_rows(2, 5, 30), 0);
    }

    #[test]
    fn test_last_page() {
        assert_eq!(last_page(0, 5), 0);
        assert_eq!(last_page(5, 5), 0);
        assert_eq!(last_page(6, 5), 1);
        assert_eq!(last_page(24, 10), 2);
    }

    #[test]
    fn test_all_ids_covers_records() {
        let records = staff_records();
        assert_eq!(all_ids(&records).count(), records.len());
    }
}
