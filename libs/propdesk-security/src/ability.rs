use serde::Serialize;

use crate::action::{Action, subjects};
use crate::predicate::Predicate;
use crate::resource::Resource;

/// One capability: `action` on `subject`, optionally restricted to the rows
/// matching `conditions`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grant {
    action: Action,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditions: Option<Predicate>,
}

impl Grant {
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn conditions(&self) -> Option<&Predicate> {
        self.conditions.as_ref()
    }

    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_none()
    }

    fn applies_to(&self, action: Action, subject: &str) -> bool {
        self.action.covers(action) && (self.subject == subjects::ALL || self.subject == subject)
    }

    fn restriction(&self) -> Predicate {
        self.conditions.clone().unwrap_or(Predicate::True)
    }
}

/// Everything one actor may do, built once per request and read-only after.
///
/// Grants are additive: adding a grant never narrows what earlier grants
/// allowed, and there is no way to deny explicitly. An actor without a
/// matching grant is denied.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct Ability {
    actor_id: String,
    grants: Vec<Grant>,
}

impl Ability {
    pub fn builder(actor_id: impl Into<String>) -> AbilityBuilder {
        AbilityBuilder {
            actor_id: actor_id.into(),
            grants: Vec::new(),
        }
    }

    /// An ability with no grants at all.
    pub fn empty(actor_id: impl Into<String>) -> Self {
        Self::builder(actor_id).build()
    }

    #[must_use]
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    #[must_use]
    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    /// Type-level check: true if any grant for `action` on `subject` exists,
    /// conditional or not.
    #[must_use]
    pub fn can(&self, action: Action, subject: &str) -> bool {
        self.grants.iter().any(|g| g.applies_to(action, subject))
    }

    /// Row restriction for `action` on `subject`: `False` without a matching
    /// grant, `True` if any matching grant is unconditional, otherwise the OR
    /// of the matching grants' conditions.
    pub fn conditions_for(&self, action: Action, subject: &str) -> Predicate {
        Predicate::any(
            self.grants
                .iter()
                .filter(|g| g.applies_to(action, subject))
                .map(Grant::restriction),
        )
    }

    /// Instance-level check against a concrete record.
    #[must_use]
    pub fn can_access(&self, action: Action, record: &dyn Resource) -> bool {
        self.conditions_for(action, record.subject_type())
            .evaluate(record)
    }
}

#[must_use]
pub struct AbilityBuilder {
    actor_id: String,
    grants: Vec<Grant>,
}

impl AbilityBuilder {
    /// Unconditional grant.
    pub fn can(mut self, action: Action, subject: &str) -> Self {
        self.grants.push(Grant {
            action,
            subject: subject.to_owned(),
            conditions: None,
        });
        self
    }

    /// Grant restricted to rows matching `conditions`. A `True` condition is
    /// stored as unconditional.
    pub fn can_when(mut self, action: Action, subject: &str, conditions: Predicate) -> Self {
        let conditions = (!conditions.is_true()).then_some(conditions);
        self.grants.push(Grant {
            action,
            subject: subject.to_owned(),
            conditions,
        });
        self
    }

    /// Apply `f` once per subject name.
    pub fn each(self, names: &[&str], f: impl Fn(Self, &str) -> Self) -> Self {
        names.iter().fold(self, |builder, name| f(builder, *name))
    }

    pub fn build(self) -> Ability {
        Ability {
            actor_id: self.actor_id,
            grants: self.grants,
        }
    }
}
