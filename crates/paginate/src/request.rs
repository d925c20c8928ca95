use crate::sort::{SortDirection, SortDirectives};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PAGE_FIELD: &str = "page";
pub const LIMIT_FIELD: &str = "limit";
pub const HAS_PAGINATE_FIELD: &str = "has_paginate";
pub const SORT_FIELD: &str = "sort";

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Offset/limit pair to apply to a paginated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateRequest {
    pub page: i64,
    pub limit: i64,
    pub has_paginate: bool,
}

impl Default for PaginateRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            has_paginate: true,
        }
    }
}

impl PaginateRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            has_paginate: true,
        }
    }

    /// Reads `page`, `limit` and `has_paginate` from query parameters.
    /// Missing or non-numeric values keep their defaults; pagination stays on
    /// unless `has_paginate` is present and is not `true`. The first
    /// occurrence of a repeated parameter wins.
    pub fn from_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut page = None;
        let mut limit = None;
        let mut has_paginate = None;

        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                PAGE_FIELD if page.is_none() => page = Some(parse_int(PAGE_FIELD, value)),
                LIMIT_FIELD if limit.is_none() => limit = Some(parse_int(LIMIT_FIELD, value)),
                HAS_PAGINATE_FIELD if has_paginate.is_none() => {
                    has_paginate = Some(value.trim().eq_ignore_ascii_case("true"))
                }
                _ => {}
            }
        }

        Self {
            page: page.flatten().unwrap_or(DEFAULT_PAGE),
            limit: limit.flatten().unwrap_or(DEFAULT_LIMIT),
            has_paginate: has_paginate.unwrap_or(true),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// `(page - 1) * limit`, never negative.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .max(0)
            .saturating_mul(self.limit.max(0))
    }

    /// The window to apply to the query, or `None` when pagination is off.
    pub fn window(&self) -> Option<Window> {
        self.has_paginate.then(|| Window {
            offset: self.offset(),
            limit: self.limit,
        })
    }
}

fn parse_int(name: &str, value: &str) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("Ignoring non-numeric {} parameter: {:?}", name, value);
            None
        }
    }
}

/// Reads `sort[field]=direction` query parameters. Unknown directions are
/// dropped; a repeated field keeps its last direction.
pub fn sort_from_query<I, K, V>(params: I) -> SortDirectives
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut directives = SortDirectives::new();

    for (key, value) in params {
        let Some(field) = sort_field(key.as_ref()) else {
            continue;
        };

        match value.as_ref().parse::<SortDirection>() {
            Ok(direction) => directives.insert(field, direction),
            Err(e) => debug!("Dropping sort on {}: {}", field, e),
        }
    }

    directives
}

fn sort_field(key: &str) -> Option<&str> {
    key.strip_prefix(SORT_FIELD)?
        .strip_prefix('[')?
        .strip_suffix(']')
        .filter(|field| !field.is_empty())
}

/// A typed query together with the pagination and sort the client asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainWrapper<Q> {
    pagination: PaginateRequest,
    sort: SortDirectives,
    query: Q,
}

impl<Q> DomainWrapper<Q> {
    pub fn new(query: Q, pagination: PaginateRequest, sort: SortDirectives) -> Self {
        Self {
            pagination,
            sort,
            query,
        }
    }

    pub fn from_query<'a, I>(query: Q, params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
    {
        Self {
            pagination: PaginateRequest::from_query(params.clone()),
            sort: sort_from_query(params),
            query,
        }
    }

    pub fn pagination(&self) -> &PaginateRequest {
        &self.pagination
    }

    pub fn sort(&self) -> &SortDirectives {
        &self.sort
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn into_query(self) -> Q {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_extracts_bracketed_name() {
        assert_eq!(sort_field("sort[name]"), Some("name"));
        assert_eq!(sort_field("sort[]"), None);
        assert_eq!(sort_field("sorting[name]"), None);
        assert_eq!(sort_field("page"), None);
    }

    #[test]
    fn test_offset_never_negative() {
        assert_eq!(PaginateRequest::new(0, 10).offset(), 0);
        assert_eq!(PaginateRequest::new(-3, 10).offset(), 0);
        assert_eq!(PaginateRequest::new(3, -10).offset(), 0);
    }
}
