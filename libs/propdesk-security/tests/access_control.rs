#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use propdesk_security::{
    Ability, AbilityFactory, Action, ActorAttributes, AuthError, JsonRecord, Predicate, Role,
    StaticActorDirectory, SubjectRef, assert_can, merge_filter, subjects,
};
use serde_json::json;
use uuid::Uuid;

const HOME: Uuid = Uuid::from_u128(0x100);
const PARTNER: Uuid = Uuid::from_u128(0x200);
const FOREIGN: Uuid = Uuid::from_u128(0x300);

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
        .with_actor(ActorAttributes::new("nobody"))
}

fn contracts() -> Vec<JsonRecord> {
    [
        ("c-1", HOME, "Roof repair", "active"),
        ("c-2", PARTNER, "Window cleaning", "active"),
        ("c-3", FOREIGN, "Roof inspection", "active"),
        ("c-4", HOME, "Roof coating", "draft"),
    ]
    .into_iter()
    .map(|(id, tenant, title, status)| {
        JsonRecord::new(
            subjects::CONTRACT,
            json!({"id": id, "tenantId": tenant.to_string(), "title": title, "status": status}),
        )
    })
    .collect()
}

fn visible(filter: &Predicate) -> Vec<String> {
    contracts()
        .iter()
        .filter(|r| filter.evaluate(*r))
        .map(|r| r.get("id").unwrap().as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn member_sees_only_readable_tenants() {
    let factory = AbilityFactory::with_default_policy(Arc::new(directory()));
    let ability = factory.create_for_actor("member").await.unwrap();

    let filter = merge_filter(
        Predicate::contains("title", "Roof"),
        &ability,
        Action::Read,
        subjects::CONTRACT,
    );
    assert_eq!(visible(&filter), ["c-1", "c-4"]);

    let everything = merge_filter(Predicate::True, &ability, Action::Read, subjects::CONTRACT);
    assert_eq!(visible(&everything), ["c-1", "c-2", "c-4"]);
}

#[tokio::test]
async fn actor_without_grants_sees_nothing() {
    let factory = AbilityFactory::with_default_policy(Arc::new(directory()));
    let ability = factory.create_for_actor("nobody").await.unwrap();

    let filter = merge_filter(
        Predicate::eq("status", "active"),
        &ability,
        Action::Read,
        subjects::CONTRACT,
    );
    assert_eq!(filter, Predicate::False);
    assert!(visible(&filter).is_empty());
}

#[tokio::test]
async fn mutations_are_checked_per_record() {
    let factory = AbilityFactory::with_default_policy(Arc::new(directory()));
    let ability = factory.create_for_actor("member").await.unwrap();
    let records = contracts();

    // home tenant is writable
    assert!(assert_can(&ability, Action::Update, SubjectRef::Instance(&records[0])).is_ok());
    // partner tenant is read-only
    assert_eq!(
        assert_can(&ability, Action::Update, SubjectRef::Instance(&records[1])),
        Err(AuthError::Forbidden)
    );
    assert!(assert_can(&ability, Action::Read, SubjectRef::Instance(&records[1])).is_ok());
    assert_eq!(
        assert_can(&ability, Action::Delete, SubjectRef::Type(subjects::CONTRACT)),
        Err(AuthError::Forbidden)
    );
}

#[tokio::test]
async fn unresolvable_actor_is_rejected() {
    let factory = AbilityFactory::with_default_policy(Arc::new(directory()));
    assert!(matches!(
        factory.create_for_actor("stranger").await,
        Err(AuthError::ActorResolution { .. })
    ));
}

#[test]
fn merging_each_filter_equals_merging_their_conjunction() {
    let conditional = Ability::builder("u")
        .can_when(
            Action::Read,
            subjects::CONTRACT,
            Predicate::is_in("tenantId", [HOME, PARTNER]),
        )
        .build();
    let unrestricted = Ability::builder("root").can(Action::Manage, subjects::ALL).build();
    let nothing = Ability::empty("nobody");

    let a = Predicate::contains("title", "Roof");
    let b = Predicate::eq("status", "active");
    let merge = |filter: Predicate, ability: &Ability| {
        merge_filter(filter, ability, Action::Read, subjects::CONTRACT)
    };

    for ability in [&conditional, &unrestricted, &nothing] {
        let separately = merge(a.clone(), ability).and(merge(b.clone(), ability));
        let together = merge(a.clone().and(b.clone()), ability);
        for record in contracts() {
            assert_eq!(
                separately.evaluate(&record),
                together.evaluate(&record),
                "{} disagrees on {:?}",
                ability.actor_id(),
                record.get("id")
            );
        }
    }

    assert_eq!(visible(&merge(a.clone().and(b.clone()), &conditional)), ["c-1"]);
    assert_eq!(visible(&merge(a.clone().and(b.clone()), &unrestricted)), ["c-1", "c-3"]);
    let denied = merge(a.clone(), &nothing).and(merge(b, &nothing));
    assert_eq!(denied, Predicate::False);
    assert!(visible(&denied).is_empty());
}
