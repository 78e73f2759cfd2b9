use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::ActorAttributes;
use crate::error::AuthError;

/// Resolves an authenticated actor id to its roles and tenant lists.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// # Errors
    /// Returns `AuthError::ActorResolution` when the actor is unknown or its
    /// attributes cannot be trusted.
    async fn resolve_actor(&self, actor_id: &str) -> Result<ActorAttributes, AuthError>;
}

/// Directory backed by a fixed list of actors, typically loaded from config.
///
/// ```yaml
/// tenants:
///   - 00000000-0000-0000-0000-000000000001
/// actors:
///   - actor_id: alice
///     roles: [admin]
///     tenant_id: 00000000-0000-0000-0000-000000000001
///     readable_tenant_ids: [00000000-0000-0000-0000-000000000001]
///     writable_tenant_ids: [00000000-0000-0000-0000-000000000001]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticActorDirectory {
    #[serde(default)]
    pub tenants: Vec<Uuid>,
    #[serde(default)]
    pub actors: Vec<ActorAttributes>,
}

impl StaticActorDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenants.push(tenant_id);
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: ActorAttributes) -> Self {
        self.actors.push(actor);
        self
    }

    fn lookup(&self, actor_id: &str) -> Result<ActorAttributes, AuthError> {
        let actor = self
            .actors
            .iter()
            .find(|a| a.actor_id == actor_id)
            .ok_or_else(|| AuthError::unresolved(actor_id, "unknown actor"))?;

        let known: HashSet<&Uuid> = self.tenants.iter().collect();
        if let Some(unknown) = actor.tenant_ids().find(|t| !known.contains(t)) {
            return Err(AuthError::unresolved(
                actor_id,
                format!("unknown tenant {unknown}"),
            ));
        }
        actor
            .check_consistency()
            .map_err(|reason| AuthError::unresolved(actor_id, reason))?;

        Ok(actor.clone())
    }
}

#[async_trait]
impl ActorDirectory for StaticActorDirectory {
    async fn resolve_actor(&self, actor_id: &str) -> Result<ActorAttributes, AuthError> {
        self.lookup(actor_id)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::actor::Role;

    #[tokio::test]
    async fn resolves_known_actor() {
        let tenant = Uuid::from_u128(1);
        let dir = StaticActorDirectory::new()
            .with_tenant(tenant)
            .with_actor(ActorAttributes::new("alice").with_role(Role::Admin).with_tenant(tenant));
        let actor = dir.resolve_actor("alice").await.unwrap();
        assert_eq!(actor.tenant_id, Some(tenant));
    }

    #[tokio::test]
    async fn unknown_actor_fails() {
        let dir = StaticActorDirectory::new();
        assert!(matches!(
            dir.resolve_actor("ghost").await,
            Err(AuthError::ActorResolution { reason, .. }) if reason == "unknown actor"
        ));
    }

    #[tokio::test]
    async fn unknown_tenant_fails() {
        let dir = StaticActorDirectory::new()
            .with_tenant(Uuid::from_u128(1))
            .with_actor(ActorAttributes::new("bob").with_tenant(Uuid::from_u128(9)));
        let err = dir.resolve_actor("bob").await.unwrap_err();
        assert!(matches!(err, AuthError::ActorResolution { reason, .. } if reason.contains("unknown tenant")));
    }

    #[tokio::test]
    async fn inconsistent_lists_fail() {
        let tenant = Uuid::from_u128(1);
        let mut actor = ActorAttributes::new("carol");
        actor.writable_tenant_ids.push(tenant);
        let dir = StaticActorDirectory::new().with_tenant(tenant).with_actor(actor);
        assert!(dir.resolve_actor("carol").await.is_err());
    }

    #[test]
    fn deserializes_from_yaml() {
        let raw = "
tenants:
  - 00000000-0000-0000-0000-000000000001
actors:
  - actor_id: alice
    roles: [member]
    tenant_id: 00000000-0000-0000-0000-000000000001
    readable_tenant_ids: [00000000-0000-0000-0000-000000000001]
";
        let dir: StaticActorDirectory = serde_saphyr::from_str(raw).unwrap();
        assert_eq!(dir.actors.len(), 1);
        assert_eq!(dir.actors[0].roles, [Role::Member]);
    }
}
