//! Page requests and page results for list endpoints.

use serde::Serialize;

/// Page number used when the caller does not supply a usable one.
pub const DEFAULT_PAGE: usize = 1;

/// Largest page size a caller may request.
pub const MAX_LIMIT: usize = 100;

/// Requested page window. Both fields are always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Coerces raw query-string values, falling back to the defaults when a
    /// value is missing, non-numeric or not positive. `limit` is capped at
    /// [`MAX_LIMIT`].
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_limit: usize) -> Self {
        Self::new(
            positive(page).unwrap_or(DEFAULT_PAGE),
            positive(limit).unwrap_or(default_limit).min(MAX_LIMIT),
        )
    }

    /// Rows to skip, saturating at `i64::MAX` so an unreachable page selects
    /// nothing.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .checked_mul(self.limit)
            .and_then(|offset| i64::try_from(offset).ok())
            .unwrap_or(i64::MAX)
    }

    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// Pagination block rendered in list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

/// One page of records together with the totals of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            items,
            meta: PaginationMeta {
                page: request.page,
                limit: request.limit,
                total,
                pages: total.div_ceil(request.limit),
            },
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
