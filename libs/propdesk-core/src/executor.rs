//! The seam between a planned query and the store that runs it.

use async_trait::async_trait;
use propdesk_query::{Page, PageInfo};
use serde_json::Value;

use crate::error::CoreError;
use crate::planner::QueryPlan;

/// Store-side failure. The message may carry connection details and is
/// never shown to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("executor failure: {0}")]
pub struct ExecutorError(String);

impl ExecutorError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Runs a [`QueryPlan`] against some store.
///
/// Implementations must apply `plan.filter`, `plan.order`, and the plan's
/// offset/limit exactly as given; they never widen the filter.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn find_many(&self, plan: &QueryPlan) -> Result<Vec<Value>, ExecutorError>;

    /// Number of rows matching `plan.filter`, ignoring paging.
    async fn count(&self, plan: &QueryPlan) -> Result<u64, ExecutorError>;
}

/// Fetch one page. The total is counted only when the plan asks for it.
///
/// # Errors
/// Returns `CoreError::Executor` if the store fails.
#[tracing::instrument(skip_all, fields(model = %plan.model, page = plan.paging.page))]
pub async fn execute_page(
    executor: &dyn QueryExecutor,
    plan: &QueryPlan,
) -> Result<Page<Value>, CoreError> {
    if plan.filter.is_false() {
        tracing::debug!("filter denies every row, skipping store");
        return Ok(Page::empty(&plan.paging));
    }

    let items = executor.find_many(plan).await?;
    let total = if plan.paging.include_count {
        Some(executor.count(plan).await?)
    } else {
        None
    };
    tracing::debug!(returned = items.len(), total = ?total, "page fetched");
    Ok(Page::new(items, PageInfo::new(&plan.paging, total)))
}
