//! Turning an ability, a business filter and raw list parameters into a
//! [`QueryPlan`] the executor can run.

use std::sync::Arc;

use propdesk_query::{
    ListParams, OrderClause, OrderClauseBuilder, PaginationLimits, PaginationRequest, SortDir,
    SortPathValidator,
};
use propdesk_schema::SchemaRegistry;
use propdesk_security::{Ability, Action, Predicate, SubjectRef, assert_can, merge_filter, subjects};
use serde::Serialize;

use crate::config::QueryConfig;
use crate::error::CoreError;

/// Static link between an authorization subject and the schema model that
/// stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub subject: &'static str,
    pub model: &'static str,
    /// Sort key used when the request names none; falls back to the
    /// configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<&'static str>,
}

impl ResourceDescriptor {
    #[must_use]
    pub const fn new(subject: &'static str, model: &'static str) -> Self {
        Self {
            subject,
            model,
            default_sort: None,
        }
    }

    #[must_use]
    pub const fn sorted_by(mut self, field: &'static str) -> Self {
        self.default_sort = Some(field);
        self
    }
}

pub mod resources {
    use super::{ResourceDescriptor, subjects};

    pub const PROPERTY_CONTACTS: ResourceDescriptor =
        ResourceDescriptor::new(subjects::PROPERTY_CONTACT, "PropertyContacts");
    pub const CONTRACTS: ResourceDescriptor =
        ResourceDescriptor::new(subjects::CONTRACT, "Contracts");
    pub const SERVICES: ResourceDescriptor = ResourceDescriptor::new(subjects::SERVICE, "Services");
    pub const CATEGORIES: ResourceDescriptor =
        ResourceDescriptor::new(subjects::CATEGORY, "Categories").sorted_by("name");
    pub const COUNTIES: ResourceDescriptor =
        ResourceDescriptor::new(subjects::COUNTY, "Counties").sorted_by("name");
    pub const COUNTRIES: ResourceDescriptor =
        ResourceDescriptor::new(subjects::COUNTRY, "Countries").sorted_by("name");
    pub const TENANTS: ResourceDescriptor = ResourceDescriptor::new(subjects::TENANT, "Tenants");
    pub const STORAGES: ResourceDescriptor = ResourceDescriptor::new(subjects::STORAGE, "Storages");
    pub const USERS: ResourceDescriptor = ResourceDescriptor::new(subjects::USER, "Users");

    pub const ALL: &[ResourceDescriptor] = &[
        PROPERTY_CONTACTS,
        CONTRACTS,
        SERVICES,
        CATEGORIES,
        COUNTIES,
        COUNTRIES,
        TENANTS,
        STORAGES,
        USERS,
    ];

    /// Look a descriptor up by subject or model name.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static ResourceDescriptor> {
        ALL.iter().find(|d| d.subject == name || d.model == name)
    }
}

/// Everything the executor needs for one list query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryPlan {
    pub subject: String,
    pub model: String,
    pub filter: Predicate,
    pub order: OrderClause,
    pub paging: PaginationRequest,
}

/// Validates list inputs against the schema and composes the final plan.
/// Validation happens before anything touches the store.
#[derive(Clone, Debug)]
pub struct QueryPlanner {
    validator: SortPathValidator,
    orders: OrderClauseBuilder,
    limits: PaginationLimits,
    max_depth: usize,
    default_sort_field: String,
    default_sort_dir: SortDir,
}

impl QueryPlanner {
    #[must_use]
    pub fn new(schema: Arc<SchemaRegistry>, config: &QueryConfig) -> Self {
        Self {
            validator: SortPathValidator::new(Arc::clone(&schema)),
            orders: OrderClauseBuilder::new(schema),
            limits: config.pagination_limits(),
            max_depth: config.max_nested_sort_level,
            default_sort_field: config.default_sort_field.clone(),
            default_sort_dir: config.default_sort_dir,
        }
    }

    /// Plan a read of `descriptor` for the holder of `ability`.
    ///
    /// The returned filter is `business AND <row restriction>`; an actor
    /// without a read grant gets a `False` filter rather than an error.
    ///
    /// # Errors
    /// Returns `CoreError::Query` when the sort key or direction is invalid
    /// or the descriptor names an unregistered model.
    #[tracing::instrument(skip_all, fields(subject = descriptor.subject, actor_id = ability.actor_id()))]
    pub fn plan_list(
        &self,
        ability: &Ability,
        descriptor: &ResourceDescriptor,
        business_filter: Predicate,
        params: &ListParams,
    ) -> Result<QueryPlan, CoreError> {
        let direction = params.direction_or(self.default_sort_dir)?;
        let default_field = descriptor
            .default_sort
            .unwrap_or(self.default_sort_field.as_str());
        let spec = self.validator.validate_with_default(
            descriptor.model,
            params.sort_by.as_deref(),
            default_field,
            direction,
            self.max_depth,
        )?;

        let plan = QueryPlan {
            subject: descriptor.subject.to_owned(),
            model: descriptor.model.to_owned(),
            filter: merge_filter(business_filter, ability, Action::Read, descriptor.subject),
            order: self.orders.build(&spec),
            paging: self.limits.normalize_with_count(
                params.page,
                params.limit,
                params.include_count.unwrap_or(false),
            ),
        };
        tracing::debug!(order = %plan.order, page = plan.paging.page, limit = plan.paging.limit, "list query planned");
        Ok(plan)
    }

    /// Check a single-record or type-level action before it is executed.
    ///
    /// # Errors
    /// Returns `CoreError::Auth(AuthError::Forbidden)` when the ability does
    /// not allow it.
    pub fn authorize(
        &self,
        ability: &Ability,
        action: Action,
        subject: SubjectRef<'_>,
    ) -> Result<(), CoreError> {
        assert_can(ability, action, subject)?;
        Ok(())
    }
}
