use serde::{Deserialize, Serialize};

use crate::pagination::PaginationRequest;

/// Paging metadata returned next to the items of a list query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl PageInfo {
    /// `total_pages` is derived from `total_count` when one is known.
    #[must_use]
    pub fn new(request: &PaginationRequest, total_count: Option<u64>) -> Self {
        let limit = request.limit.max(1);
        Self {
            page: request.page,
            limit,
            total_count,
            total_pages: total_count.map(|n| n.div_ceil(limit)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    #[must_use]
    pub fn empty(request: &PaginationRequest) -> Self {
        let total = request.include_count.then_some(0);
        Self::new(Vec::new(), PageInfo::new(request, total))
    }
}
