//! Role policies: how actor attributes become grants.

use crate::ability::{Ability, AbilityBuilder};
use crate::action::{Action, subjects};
use crate::actor::{ActorAttributes, Role};
use crate::predicate::Predicate;

/// Column that scopes tenant-owned rows.
pub const TENANT_COLUMN: &str = "tenantId";

/// Builds the grants of one actor.
pub trait AbilityPolicy: Send + Sync {
    fn ability_for(&self, actor: &ActorAttributes) -> Ability;
}

/// The stock role policy.
///
/// | role         | tenant-owned subjects                            | `Tenant`                           |
/// |--------------|--------------------------------------------------|------------------------------------|
/// | `SuperAdmin` | manage all                                       | manage all                         |
/// | `Admin`      | manage in writable, read in readable tenants     | read readable, update writable     |
/// | `Member`     | read in readable, create/update in writable      | read readable                      |
///
/// Everyone reads reference data and reads/updates their own `User` row.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRolePolicy;

impl DefaultRolePolicy {
    fn baseline(builder: AbilityBuilder, actor: &ActorAttributes) -> AbilityBuilder {
        let own_row = Predicate::eq("id", actor.actor_id.as_str());
        builder
            .each(subjects::REFERENCE_DATA, |b, subject| b.can(Action::Read, subject))
            .can_when(Action::Read, subjects::USER, own_row.clone())
            .can_when(Action::Update, subjects::USER, own_row)
    }

    fn admin(builder: AbilityBuilder, actor: &ActorAttributes) -> AbilityBuilder {
        let readable = in_tenants(TENANT_COLUMN, &actor.readable_tenant_ids);
        let writable = in_tenants(TENANT_COLUMN, &actor.writable_tenant_ids);
        builder
            .each(subjects::TENANT_OWNED, |b, subject| {
                b.can_when(Action::Manage, subject, writable.clone())
                    .can_when(Action::Read, subject, readable.clone())
            })
            .can_when(
                Action::Read,
                subjects::TENANT,
                in_tenants("id", &actor.readable_tenant_ids),
            )
            .can_when(
                Action::Update,
                subjects::TENANT,
                in_tenants("id", &actor.writable_tenant_ids),
            )
    }

    fn member(builder: AbilityBuilder, actor: &ActorAttributes) -> AbilityBuilder {
        let readable = in_tenants(TENANT_COLUMN, &actor.readable_tenant_ids);
        let writable = in_tenants(TENANT_COLUMN, &actor.writable_tenant_ids);
        builder
            .each(subjects::TENANT_OWNED, |b, subject| {
                b.can_when(Action::Read, subject, readable.clone())
                    .can_when(Action::Create, subject, writable.clone())
                    .can_when(Action::Update, subject, writable.clone())
            })
            .can_when(
                Action::Read,
                subjects::TENANT,
                in_tenants("id", &actor.readable_tenant_ids),
            )
    }
}

impl AbilityPolicy for DefaultRolePolicy {
    fn ability_for(&self, actor: &ActorAttributes) -> Ability {
        let mut builder = Self::baseline(Ability::builder(actor.actor_id.clone()), actor);
        for role in &actor.roles {
            builder = match role {
                Role::SuperAdmin => builder.can(Action::Manage, subjects::ALL),
                Role::Admin => Self::admin(builder, actor),
                Role::Member => Self::member(builder, actor),
            };
        }
        builder.build()
    }
}

fn in_tenants(column: &str, tenants: &[uuid::Uuid]) -> Predicate {
    Predicate::is_in(column, tenants.iter().copied())
}
