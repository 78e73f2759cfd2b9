//! Mapping from authorization errors to `Problem`.
//!
//! Details are fixed strings: a denied caller learns neither which grant was
//! missing nor why its identity failed to resolve.

use propdesk_errors::Problem;
use propdesk_errors::catalog::{ACTOR_UNRESOLVED, FORBIDDEN};

use crate::AuthError;

impl From<AuthError> for Problem {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ActorResolution { .. } => {
                ACTOR_UNRESOLVED.as_problem("The caller's identity could not be resolved")
            }
            AuthError::Forbidden => {
                FORBIDDEN.as_problem("You do not have permission to perform this action")
            }
        }
    }
}
