//! Client-side staff table: filtering, sorting, pagination, and selection.

pub mod controller;
pub mod filter;
pub mod sort;
pub mod view;

pub use controller::TableController;
pub use filter::{Searchable, apply_filter};
pub use sort::{SortDirection, SortKey, Sortable, apply_sort, comparator};
pub use view::{TablePage, all_ids, compose, empty_rows, last_page, page_slice};
