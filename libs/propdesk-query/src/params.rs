use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::sort::SortDir;

/// Raw list-query parameters as they arrive on the wire
/// (`?sortBy=vendor.name&sortOrder=desc&page=2&limit=20&includeCount=true`).
///
/// Nothing here is trusted; the planner validates and normalizes every field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub include_count: Option<bool>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort_by(mut self, path: impl Into<String>) -> Self {
        self.sort_by = Some(path.into());
        self
    }

    #[must_use]
    pub fn sort_order(mut self, order: impl Into<String>) -> Self {
        self.sort_order = Some(order.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn include_count(mut self, include: bool) -> Self {
        self.include_count = Some(include);
        self
    }

    /// Parsed `sortOrder`, or `default` when it is absent or blank.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidSortKey` if `sortOrder` is neither `asc`
    /// nor `desc`.
    pub fn direction_or(&self, default: SortDir) -> Result<SortDir, QueryError> {
        match self.sort_order.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => Ok(default),
        }
    }
}
