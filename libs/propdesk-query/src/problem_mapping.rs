//! Mapping from query errors to `Problem`.
//!
//! Sort errors are rejected with 406 and name the offending key. Schema
//! errors reuse the schema crate's mapping, and a broken default sort is a
//! 500 whose detail stays generic.

use propdesk_errors::Problem;
use propdesk_errors::catalog::{INVALID_SORT_KEY, SCHEMA_INVALID, SORT_TOO_DEEP};

use crate::QueryError;

impl From<QueryError> for Problem {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Schema(e) => e.into(),
            QueryError::InvalidSortKey { key, reason } => {
                INVALID_SORT_KEY.as_problem(format!("Unsupported sort key '{key}': {reason}"))
            }
            QueryError::SortTooDeep { path, max_depth } => SORT_TOO_DEEP.as_problem(format!(
                "Sort key '{path}' exceeds the maximum nesting depth of {max_depth}"
            )),
            QueryError::InvalidDefaultSort { model, .. } => SCHEMA_INVALID.as_problem(format!(
                "The default sort order configured for {model} is invalid"
            )),
        }
    }
}
