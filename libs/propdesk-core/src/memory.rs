//! In-process [`QueryExecutor`] over JSON rows, used by the CLI and tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use propdesk_query::{OrderClause, SortDir};
use propdesk_security::{JsonRecord, Predicate, Value as Scalar};
use serde_json::Value;

use crate::executor::{ExecutorError, QueryExecutor};
use crate::planner::QueryPlan;

#[derive(Clone, Debug, Default)]
pub struct MemoryExecutor {
    rows: HashMap<String, Vec<Value>>,
}

impl MemoryExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(mut self, model: impl Into<String>, rows: Vec<Value>) -> Self {
        self.rows.entry(model.into()).or_default().extend(rows);
        self
    }

    fn matching(&self, plan: &QueryPlan) -> Result<Vec<&Value>, ExecutorError> {
        let rows = self
            .rows
            .get(&plan.model)
            .ok_or_else(|| ExecutorError::new(format!("no table for model '{}'", plan.model)))?;
        Ok(rows
            .iter()
            .filter(|row| row_matches(&plan.filter, &plan.subject, row))
            .collect())
    }
}

fn row_matches(filter: &Predicate, subject: &str, row: &Value) -> bool {
    filter.evaluate(&JsonRecord::new(subject, row.clone()))
}

/// Comparable value at `path`; null and missing both read as `None`.
fn sort_key(row: &Value, path: &[String]) -> Option<Scalar> {
    path.iter()
        .try_fold(row, |node, segment| node.get(segment))
        .and_then(Scalar::from_json)
        .filter(|v| !v.is_null())
}

/// Missing and null values sort before everything else ascending, after
/// everything descending.
fn compare_rows(order: &OrderClause, a: &Value, b: &Value) -> Ordering {
    for entry in order.entries() {
        let ord = match (sort_key(a, &entry.path), sort_key(b, &entry.path)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(l), Some(r)) => l.compare(&r).unwrap_or(Ordering::Equal),
        };
        let ord = match entry.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn find_many(&self, plan: &QueryPlan) -> Result<Vec<Value>, ExecutorError> {
        let mut rows = self.matching(plan)?;
        rows.sort_by(|a, b| compare_rows(&plan.order, a, b));

        let skip = usize::try_from(plan.paging.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(plan.paging.limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, plan: &QueryPlan) -> Result<u64, ExecutorError> {
        let n = self.matching(plan)?.len();
        Ok(u64::try_from(n).unwrap_or(u64::MAX))
    }
}
