//! Capability model for propdesk.
//!
//! An [`Ability`] is built per request from the caller's attributes
//! ([`AbilityFactory`]) and answers two questions: may the caller touch a
//! subject type at all ([`Ability::can`]), and which rows of it
//! ([`Ability::conditions_for`]). List queries AND the latter into their
//! filter with [`merge_filter`]; single-record mutations go through
//! [`assert_can`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ability;
pub mod action;
pub mod actor;
pub mod directory;
pub mod enforce;
pub mod error;
pub mod factory;
pub mod policy;
pub mod predicate;
pub mod problem_mapping;
pub mod resource;
pub mod value;

pub use ability::{Ability, AbilityBuilder, Grant};
pub use action::{Action, subjects};
pub use actor::{ActorAttributes, Role};
pub use directory::{ActorDirectory, StaticActorDirectory};
pub use enforce::{SubjectRef, assert_can, merge_filter};
pub use error::AuthError;
pub use factory::AbilityFactory;
pub use policy::{AbilityPolicy, DefaultRolePolicy};
pub use predicate::{CompareOp, Predicate, TextOp};
pub use resource::{JsonRecord, Resource};
pub use value::Value;
