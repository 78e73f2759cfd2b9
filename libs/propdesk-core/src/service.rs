use std::sync::Arc;

use propdesk_query::{ListParams, Page};
use propdesk_schema::SchemaRegistry;
use propdesk_security::{Ability, AbilityFactory, Predicate};
use serde_json::Value;

use crate::config::QueryConfig;
use crate::error::CoreError;
use crate::executor::{QueryExecutor, execute_page};
use crate::planner::{QueryPlanner, ResourceDescriptor};

/// Per-request entry point for list reads: resolve the caller's ability,
/// plan, then execute.
#[derive(Clone)]
pub struct ListService {
    abilities: AbilityFactory,
    planner: QueryPlanner,
    executor: Arc<dyn QueryExecutor>,
}

impl ListService {
    #[must_use]
    pub fn new(
        abilities: AbilityFactory,
        schema: Arc<SchemaRegistry>,
        config: &QueryConfig,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            abilities,
            planner: QueryPlanner::new(schema, config),
            executor,
        }
    }

    #[must_use]
    pub fn planner(&self) -> &QueryPlanner {
        &self.planner
    }

    /// # Errors
    /// Returns `CoreError::Auth` if the actor cannot be resolved.
    pub async fn ability(&self, actor_id: &str) -> Result<Ability, CoreError> {
        Ok(self.abilities.create_for_actor(actor_id).await?)
    }

    /// List `descriptor` rows visible to `actor_id` that also satisfy
    /// `business_filter`.
    ///
    /// # Errors
    /// `CoreError::Auth` for an unresolvable actor, `CoreError::Query` for
    /// invalid sort or paging input (raised before the store is touched),
    /// `CoreError::Executor` if the store fails.
    #[tracing::instrument(skip(self, business_filter, params), fields(subject = descriptor.subject))]
    pub async fn list(
        &self,
        actor_id: &str,
        descriptor: &ResourceDescriptor,
        business_filter: Predicate,
        params: &ListParams,
    ) -> Result<Page<Value>, CoreError> {
        let ability = self.ability(actor_id).await?;
        let plan = self
            .planner
            .plan_list(&ability, descriptor, business_filter, params)?;
        execute_page(self.executor.as_ref(), &plan).await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::memory::MemoryExecutor;
    use crate::planner::resources;
    use propdesk_schema::{ModelSchema, ScalarType};
    use propdesk_security::{ActorAttributes, Role, StaticActorDirectory};
    use serde_json::json;
    use tracing_test::traced_test;
    use uuid::Uuid;

    fn service() -> ListService {
        let tenant = Uuid::from_u128(1);
        let directory = StaticActorDirectory::new()
            .with_tenant(tenant)
            .with_actor(
                ActorAttributes::new("member")
                    .with_role(Role::Member)
                    .with_tenant(tenant),
            )
            .with_actor(ActorAttributes::new("guest"));
        let schema = SchemaRegistry::builder()
            .model(
                ModelSchema::builder("Services")
                    .scalar("id", ScalarType::String)
                    .scalar("tenantId", ScalarType::String)
                    .scalar("createdAt", ScalarType::DateTime)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let store = MemoryExecutor::new().with_rows(
            "Services",
            vec![json!({"id": "s-1", "tenantId": tenant.to_string(), "createdAt": "2024-01-01T00:00:00Z"})],
        );
        ListService::new(
            AbilityFactory::with_default_policy(Arc::new(directory)),
            Arc::new(schema),
            &QueryConfig::default(),
            Arc::new(store),
        )
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_planned_order() {
        let page = service()
            .list("member", &resources::SERVICES, Predicate::True, &ListParams::new())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(logs_contain("list query planned"));
        assert!(logs_contain("createdAt desc, id desc"));
    }

    #[tokio::test]
    #[traced_test]
    async fn denied_listing_skips_the_store() {
        let page = service()
            .list("guest", &resources::SERVICES, Predicate::True, &ListParams::new())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(logs_contain("filter denies every row"));
    }
}
