use crate::pagination::{Meta, PaginationMeta};
use crate::request::PaginateRequest;
use crate::TotalCount;
use serde::{Deserialize, Serialize};

/// Total size of the window a page of rows came from. Read from the first
/// row since every row of a page carries the same total; an empty page
/// counts 0.
pub fn window_total<R: TotalCount>(rows: &[R]) -> i64 {
    rows.first().map(TotalCount::total_count).unwrap_or(0)
}

/// One page of domain items plus the total they were cut from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    items: Vec<T>,
    total_count: i64,
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>, total_count: i64) -> Self {
        Self { items, total_count }
    }

    /// Converts persistence rows into domain items, keeping the window total
    /// reported by the rows.
    pub fn from_rows<R, F>(rows: Vec<R>, to_domain: F) -> Self
    where
        R: TotalCount,
        F: FnMut(R) -> T,
    {
        let total_count = window_total(&rows);
        Self {
            items: rows.into_iter().map(to_domain).collect(),
            total_count,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn pagination(&self, request: &PaginateRequest) -> PaginationMeta {
        PaginationMeta::compute(request.page, request.limit, self.total_count)
    }

    pub fn meta(&self, request: &PaginateRequest) -> Meta {
        Meta::with_pagination(self.pagination(request))
    }
}
