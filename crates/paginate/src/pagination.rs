use serde::{Deserialize, Serialize};

/// `meta` block of a paginated response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl Meta {
    pub fn with_pagination(pagination: PaginationMeta) -> Self {
        Self {
            pagination: Some(pagination),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
}

impl PaginationMeta {
    /// `page` and `per_page` are echoed as requested. The page count is a
    /// truncating division, so 25 rows at 10 per page report 2 pages; clients
    /// rely on these numbers. A non-positive `per_page` or total yields 0.
    pub fn compute(page: i64, per_page: i64, total_count: i64) -> Self {
        let page_count = if total_count > 0 && per_page > 0 {
            total_count / per_page
        } else {
            0
        };

        Self {
            page,
            per_page,
            page_count,
            total_count,
        }
    }
}
