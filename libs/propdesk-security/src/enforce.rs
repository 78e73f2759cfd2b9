//! Applying an [`Ability`] to list queries and single-record mutations.

use std::fmt;

use crate::ability::Ability;
use crate::action::Action;
use crate::error::AuthError;
use crate::predicate::Predicate;
use crate::resource::Resource;

/// What an [`assert_can`] check is about: a whole subject type, or one
/// concrete record.
#[derive(Clone, Copy)]
pub enum SubjectRef<'a> {
    Type(&'a str),
    Instance(&'a dyn Resource),
}

impl SubjectRef<'_> {
    #[must_use]
    pub fn subject_type(&self) -> &str {
        match self {
            SubjectRef::Type(name) => name,
            SubjectRef::Instance(record) => record.subject_type(),
        }
    }
}

impl fmt::Debug for SubjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectRef::Type(name) => f.debug_tuple("Type").field(name).finish(),
            SubjectRef::Instance(record) => f
                .debug_tuple("Instance")
                .field(&record.subject_type())
                .finish(),
        }
    }
}

/// Restrict a business filter to the rows the actor may see:
/// `business AND ability.conditions_for(action, subject)`.
///
/// An actor with no matching grant gets `False`, so the store returns no
/// rows instead of failing.
pub fn merge_filter(
    business: Predicate,
    ability: &Ability,
    action: Action,
    subject: &str,
) -> Predicate {
    business.and(ability.conditions_for(action, subject))
}

/// Fail with `Forbidden` unless the actor may perform `action` on `subject`.
///
/// # Errors
/// Returns `AuthError::Forbidden` when no grant matches or, for instances,
/// when the record does not satisfy any matching grant's conditions.
pub fn assert_can(
    ability: &Ability,
    action: Action,
    subject: SubjectRef<'_>,
) -> Result<(), AuthError> {
    let allowed = match subject {
        SubjectRef::Type(name) => ability.can(action, name),
        SubjectRef::Instance(record) => ability.can_access(action, record),
    };
    if allowed {
        return Ok(());
    }

    tracing::debug!(
        actor_id = ability.actor_id(),
        %action,
        subject = subject.subject_type(),
        "access denied"
    );
    Err(AuthError::Forbidden)
}
