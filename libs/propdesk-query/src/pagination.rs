//! Normalization of raw `page` / `limit` inputs into a bounded paging window.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_MAX_LIMIT: u64 = 100;

/// A normalized paging window. `page` and `limit` are always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    pub page: u64,
    pub limit: u64,
    pub include_count: bool,
}

impl PaginationRequest {
    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            include_count: false,
        }
    }
}

/// Bounds applied to caller-supplied paging values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationLimits {
    /// Used when the caller sends no limit, or a non-positive one (default: 10)
    pub default_limit: u64,
    /// Larger limits are clamped down to this (default: 100)
    pub max_limit: u64,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl PaginationLimits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_max_limit(mut self, limit: u64) -> Self {
        self.max_limit = limit.max(1);
        self
    }

    /// Normalize `page` and `limit` without requesting a total count.
    #[must_use]
    pub fn normalize(&self, page: Option<i64>, limit: Option<i64>) -> PaginationRequest {
        self.normalize_with_count(page, limit, false)
    }

    /// Absent or non-positive values fall back to page 1 and the default
    /// limit; limits above `max_limit` are clamped.
    #[must_use]
    pub fn normalize_with_count(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
        include_count: bool,
    ) -> PaginationRequest {
        let page = positive(page).unwrap_or(DEFAULT_PAGE);
        let requested = positive(limit).unwrap_or(self.default_limit);
        let max_limit = self.max_limit.max(1);

        let limit = if requested > max_limit {
            tracing::debug!(requested, max_limit, "page limit clamped");
            max_limit
        } else {
            requested.max(1)
        };

        PaginationRequest {
            page,
            limit,
            include_count,
        }
    }
}

fn positive(value: Option<i64>) -> Option<u64> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u64::try_from(v).ok())
}
