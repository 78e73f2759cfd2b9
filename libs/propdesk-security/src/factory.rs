use std::sync::Arc;

use crate::ability::Ability;
use crate::directory::ActorDirectory;
use crate::error::AuthError;
use crate::policy::{AbilityPolicy, DefaultRolePolicy};

/// Builds a fresh [`Ability`] per request: resolve the actor, then run the
/// policy over its attributes. Nothing is cached between calls.
#[derive(Clone)]
pub struct AbilityFactory {
    directory: Arc<dyn ActorDirectory>,
    policy: Arc<dyn AbilityPolicy>,
}

impl AbilityFactory {
    #[must_use]
    pub fn new(directory: Arc<dyn ActorDirectory>, policy: Arc<dyn AbilityPolicy>) -> Self {
        Self { directory, policy }
    }

    /// Factory using [`DefaultRolePolicy`].
    #[must_use]
    pub fn with_default_policy(directory: Arc<dyn ActorDirectory>) -> Self {
        Self::new(directory, Arc::new(DefaultRolePolicy))
    }

    /// # Errors
    /// Returns `AuthError::ActorResolution` if the directory cannot resolve
    /// the actor; the caller never receives an empty ability in that case.
    #[tracing::instrument(skip(self))]
    pub async fn create_for_actor(&self, actor_id: &str) -> Result<Ability, AuthError> {
        let actor = self
            .directory
            .resolve_actor(actor_id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "actor resolution failed"))?;

        let ability = self.policy.ability_for(&actor);
        tracing::debug!(
            roles = actor.roles.len(),
            grants = ability.grants().len(),
            "ability built"
        );
        Ok(ability)
    }
}
