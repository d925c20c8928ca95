//! # Paginate
//!
//! Page arithmetic shared by list endpoints: reading the pagination and sort
//! request from query parameters, and turning a page of rows plus its window
//! total into `meta.pagination`.
//!
//! ```rust
//! use paginate::*;
//!
//! #[derive(TotalCount)]
//! struct UserRow {
//!     name: String,
//!     total_count: i64,
//! }
//!
//! let request = PaginateRequest::from_query([("page", "2"), ("limit", "10")]);
//! assert_eq!(request.offset(), 10);
//!
//! let rows = vec![
//!     UserRow { name: "a".into(), total_count: 25 },
//!     UserRow { name: "b".into(), total_count: 25 },
//! ];
//! let collection = Collection::from_rows(rows, |row| row.name);
//! let meta = collection.meta(&request);
//!
//! let pagination = meta.pagination.unwrap();
//! assert_eq!(pagination.total_count, 25);
//! assert_eq!(pagination.page_count, 2);
//! ```

mod collection;
mod pagination;
mod request;
mod sort;

pub use collection::*;
pub use pagination::*;
pub use request::*;
pub use sort::*;

pub use paginate_derive::TotalCount;

/// Rows that carry the total size of the result window they belong to,
/// typically a `count(*) over ()` column. Every row of one page reports the
/// same total.
pub trait TotalCount {
    fn total_count(&self) -> i64;
}
