use propdesk_query::QueryError;
use propdesk_security::AuthError;

use crate::executor::ExecutorError;

/// Everything that can fail while serving one list or mutation request.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}
