#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use async_trait::async_trait;
use propdesk_core::{
    CoreError, ExecutorError, ListService, MemoryExecutor, QueryConfig, QueryExecutor, QueryPlan,
    resources,
};
use propdesk_errors::Problem;
use propdesk_query::ListParams;
use propdesk_schema::SchemaRegistry;
use propdesk_security::{
    AbilityFactory, Action, ActorAttributes, Predicate, Role, StaticActorDirectory, SubjectRef,
};
use serde_json::{Value, json};
use uuid::Uuid;

const HOME: Uuid = Uuid::from_u128(0xA1);
const PARTNER: Uuid = Uuid::from_u128(0xB2);
const FOREIGN: Uuid = Uuid::from_u128(0xC3);

const SCHEMA: &str = r#"{
  "models": [
    {
      "name": "Contracts",
      "fields": [
        { "name": "id", "kind": "scalar", "type": "String" },
        { "name": "tenantId", "kind": "scalar", "type": "String" },
        { "name": "title", "kind": "scalar", "type": "String" },
        { "name": "status", "kind": "enum", "type": "ContractStatus" },
        { "name": "createdAt", "kind": "scalar", "type": "DateTime" },
        { "name": "property", "kind": "object", "type": "Properties" }
      ]
    },
    {
      "name": "Properties",
      "fields": [
        { "name": "id", "kind": "scalar", "type": "String" },
        { "name": "name", "kind": "scalar", "type": "String" },
        { "name": "owner", "kind": "object", "type": "PropertyContacts" }
      ]
    },
    {
      "name": "PropertyContacts",
      "fields": [
        { "name": "id", "kind": "scalar", "type": "String" },
        { "name": "lastName", "kind": "scalar", "type": "String" },
        { "name": "address", "kind": "object", "type": "Addresses" }
      ]
    },
    {
      "name": "Addresses",
      "fields": [
        { "name": "id", "kind": "scalar", "type": "String" },
        { "name": "city", "kind": "scalar", "type": "String" }
      ]
    }
  ]
}"#;

fn contract(id: &str, tenant: Uuid, title: &str, created_at: &str, property: &str) -> Value {
    json!({
        "id": id,
        "tenantId": tenant.to_string(),
        "title": title,
        "status": "ACTIVE",
        "createdAt": created_at,
        "property": { "id": format!("p-{property}"), "name": property },
    })
}

fn rows() -> Vec<Value> {
    vec![
        contract("c-01", HOME, "Roof repair", "2024-03-01T10:00:00Z", "Elm"),
        contract("c-02", HOME, "Boiler", "2024-03-01T10:00:00Z", "Oak"),
        contract("c-03", PARTNER, "Windows", "2024-02-15T08:30:00Z", "Ash"),
        contract("c-04", FOREIGN, "Roof coating", "2024-04-01T00:00:00Z", "Birch"),
        contract("c-05", HOME, "Garden", "2024-01-20T12:00:00Z", "Elm"),
    ]
}

fn directory() -> StaticActorDirectory {
    StaticActorDirectory::new()
        .with_tenant(HOME)
        .with_tenant(PARTNER)
        .with_tenant(FOREIGN)
        .with_actor(
            ActorAttributes::new("member")
                .with_role(Role::Member)
                .with_tenant(HOME)
                .with_readable(PARTNER),
        )
        .with_actor(ActorAttributes::new("root").with_role(Role::SuperAdmin))
        .with_actor(ActorAttributes::new("nobody"))
}

fn service(executor: Arc<dyn QueryExecutor>) -> ListService {
    ListService::new(
        AbilityFactory::with_default_policy(Arc::new(directory())),
        Arc::new(SchemaRegistry::from_json_str(SCHEMA).unwrap()),
        &QueryConfig::default(),
        executor,
    )
}

fn memory() -> Arc<dyn QueryExecutor> {
    Arc::new(MemoryExecutor::new().with_rows("Contracts", rows()))
}

/// Fails every call, to prove a request never reached the store.
struct Unreachable;

#[async_trait]
impl QueryExecutor for Unreachable {
    async fn find_many(&self, _plan: &QueryPlan) -> Result<Vec<Value>, ExecutorError> {
        Err(ExecutorError::new("store must not be called"))
    }

    async fn count(&self, _plan: &QueryPlan) -> Result<u64, ExecutorError> {
        Err(ExecutorError::new("store must not be called"))
    }
}

fn ids(rows: &[Value]) -> Vec<&str> {
    rows.iter().filter_map(|r| r["id"].as_str()).collect()
}

#[tokio::test]
async fn member_lists_readable_tenants_newest_first() {
    let page = service(memory())
        .list("member", &resources::CONTRACTS, Predicate::True, &ListParams::new())
        .await
        .unwrap();

    // equal createdAt falls back to id desc
    assert_eq!(ids(&page.items), ["c-02", "c-01", "c-03", "c-05"]);
    assert_eq!(page.page_info.total_count, None);
}

#[tokio::test]
async fn business_filter_is_narrowed_by_ability() {
    let page = service(memory())
        .list(
            "member",
            &resources::CONTRACTS,
            Predicate::starts_with("title", "Roof"),
            &ListParams::new(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&page.items), ["c-01"]);

    let page = service(memory())
        .list(
            "root",
            &resources::CONTRACTS,
            Predicate::starts_with("title", "Roof"),
            &ListParams::new(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&page.items), ["c-04", "c-01"]);
}

#[tokio::test]
async fn actor_without_grants_gets_empty_page_without_store_access() {
    let page = service(Arc::new(Unreachable))
        .list(
            "nobody",
            &resources::CONTRACTS,
            Predicate::eq("status", "ACTIVE"),
            &ListParams::new().include_count(true),
        )
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.page_info.total_count, Some(0));
    assert_eq!(page.page_info.total_pages, Some(0));
}

#[tokio::test]
async fn nested_sort_within_depth() {
    let page = service(memory())
        .list(
            "member",
            &resources::CONTRACTS,
            Predicate::True,
            &ListParams::new().sort_by("property.name").sort_order("asc"),
        )
        .await
        .unwrap();
    assert_eq!(ids(&page.items), ["c-03", "c-05", "c-01", "c-02"]);
}

#[tokio::test]
async fn invalid_sort_is_rejected_before_the_store() {
    let svc = service(Arc::new(Unreachable));

    let err = svc
        .list(
            "member",
            &resources::CONTRACTS,
            Predicate::True,
            &ListParams::new().sort_by("property.owner.address.city"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Query(_)));
    let problem = Problem::from(err);
    assert_eq!(problem.status.as_u16(), 406);
    assert!(problem.detail.contains("property.owner.address.city"));

    let err = svc
        .list(
            "member",
            &resources::CONTRACTS,
            Predicate::True,
            &ListParams::new().sort_by("property.tenantId"),
        )
        .await
        .unwrap_err();
    assert_eq!(Problem::from(err).status.as_u16(), 406);
}

#[tokio::test]
async fn paging_with_count_reports_total_pages() {
    let page = service(memory())
        .list(
            "member",
            &resources::CONTRACTS,
            Predicate::True,
            &ListParams::new().page(2).limit(3).include_count(true),
        )
        .await
        .unwrap();
    assert_eq!(ids(&page.items), ["c-05"]);
    assert_eq!(page.page_info.page, 2);
    assert_eq!(page.page_info.limit, 3);
    assert_eq!(page.page_info.total_count, Some(4));
    assert_eq!(page.page_info.total_pages, Some(2));

    let json = serde_json::to_value(&page.page_info).unwrap();
    assert_eq!(json, json!({"page": 2, "limit": 3, "totalCount": 4, "totalPages": 2}));
}

#[tokio::test]
async fn oversized_limit_is_clamped() {
    let page = service(memory())
        .list(
            "root",
            &resources::CONTRACTS,
            Predicate::True,
            &ListParams::new().limit(10_000),
        )
        .await
        .unwrap();
    assert_eq!(page.page_info.limit, 100);
    assert_eq!(page.items.len(), 5);
}

#[tokio::test]
async fn unknown_actor_maps_to_unauthorized() {
    let err = service(memory())
        .list("stranger", &resources::CONTRACTS, Predicate::True, &ListParams::new())
        .await
        .unwrap_err();
    assert_eq!(Problem::from(err).status.as_u16(), 401);
}

#[tokio::test]
async fn store_failure_maps_to_internal_error() {
    let err = service(Arc::new(Unreachable))
        .list("member", &resources::CONTRACTS, Predicate::True, &ListParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Executor(_)));
    let problem = Problem::from(err);
    assert_eq!(problem.status.as_u16(), 500);
    assert!(!problem.detail.contains("must not be called"));
}

#[tokio::test]
async fn single_record_update_is_checked_against_tenant() {
    let svc = service(memory());
    let ability = svc.ability("member").await.unwrap();
    let records: Vec<_> = rows()
        .into_iter()
        .map(|row| propdesk_security::JsonRecord::new(resources::CONTRACTS.subject, row))
        .collect();

    assert!(svc
        .planner()
        .authorize(&ability, Action::Update, SubjectRef::Instance(&records[0]))
        .is_ok());
    let err = svc
        .planner()
        .authorize(&ability, Action::Update, SubjectRef::Instance(&records[2]))
        .unwrap_err();
    assert_eq!(Problem::from(err).status.as_u16(), 403);
}
