//! Mapping from request errors to `Problem`.

use propdesk_errors::Problem;
use propdesk_errors::catalog::INTERNAL;

use crate::CoreError;

impl From<CoreError> for Problem {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Query(e) => e.into(),
            CoreError::Auth(e) => e.into(),
            CoreError::Executor(e) => {
                tracing::error!(error = %e, "query executor failed");
                INTERNAL.as_problem("An internal error occurred while loading the data")
            }
        }
    }
}
