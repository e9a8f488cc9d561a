//! Column sorting.

use std::cmp::Ordering;

use crate::models::StaffRecord;

/// Sort order of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sortable staff table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Email,
    Faculty,
    Department,
    Role,
}

impl SortKey {
    /// Columns in header order.
    pub const ALL: [SortKey; 4] = [SortKey::Email, SortKey::Faculty, SortKey::Department, SortKey::Role];

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Email => "Email",
            SortKey::Faculty => "Faculty",
            SortKey::Department => "Department",
            SortKey::Role => "Role",
        }
    }
}

/// Rows that expose a comparable value per sort key.
pub trait Sortable {
    type Key: Copy;

    /// Value compared when sorting by `key`.
    fn sort_value(&self, key: Self::Key) -> &str;
}

impl Sortable for StaffRecord {
    type Key = SortKey;

    fn sort_value(&self, key: SortKey) -> &str {
        match key {
            SortKey::Email => &self.email,
            SortKey::Faculty => &self.faculty,
            SortKey::Department => &self.department,
            SortKey::Role => self.role.as_str(),
        }
    }
}

/// Order two values according to `direction`.
pub fn compare_directed<V: Ord + ?Sized>(a: &V, b: &V, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    }
}

/// Build a comparator over rows for a sort key and direction.
pub fn comparator<T: Sortable>(key: T::Key, direction: SortDirection) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| compare_directed(a.sort_value(key), b.sort_value(key), direction)
}

/// Sort rows in place. Rows with equal keys keep their relative order.
///
/// `None` leaves the input order untouched.
pub fn apply_sort<T: Sortable>(rows: &mut [&T], key: Option<T::Key>, direction: SortDirection) {
    if let Some(key) = key {
        let cmp = comparator::<T>(key, direction);
        // slice::sort_by is stable
        rows.sort_by(|a, b| cmp(*a, *b));
    }
}
