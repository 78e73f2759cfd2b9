use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The identity collaborator could not produce consistent attributes for
    /// the caller. Never downgraded to an empty ability.
    #[error("could not resolve actor '{actor_id}': {reason}")]
    ActorResolution { actor_id: String, reason: String },

    #[error("Forbidden: insufficient permissions")]
    Forbidden,
}

impl AuthError {
    pub(crate) fn unresolved(actor_id: &str, reason: impl Into<String>) -> Self {
        AuthError::ActorResolution {
            actor_id: actor_id.to_owned(),
            reason: reason.into(),
        }
    }
}
