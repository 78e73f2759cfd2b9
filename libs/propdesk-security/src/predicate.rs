//! Row-restriction predicates.
//!
//! A [`Predicate`] is a plain expression tree over dotted field paths. It is
//! produced by abilities and business filters, combined structurally, and
//! either translated by a store adapter or evaluated in-process against a
//! [`Resource`].
//!
//! The combinators keep trees small: `True`/`False` are absorbed, nested
//! `And`/`Or` are flattened, and an `In` over no values is `False`.

use std::ops::Not;

use serde::Serialize;

use crate::resource::Resource;
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum Predicate {
    True,
    False,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    Text {
        field: String,
        op: TextOp,
        value: String,
    },
}

impl Predicate {
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Predicate::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ge, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Le, value)
    }

    /// `field IN (values)`; an empty list matches nothing.
    pub fn is_in<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Predicate::False;
        }
        Predicate::In {
            field: field.into(),
            values,
        }
    }

    pub fn text(field: impl Into<String>, op: TextOp, value: impl Into<String>) -> Self {
        Predicate::Text {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::text(field, TextOp::Contains, value)
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::text(field, TextOp::StartsWith, value)
    }

    pub fn ends_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::text(field, TextOp::EndsWith, value)
    }

    /// Conjunction of all parts. Empty input is `True`.
    pub fn all(parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut out = Vec::new();
        for part in parts {
            match part {
                Predicate::True => {}
                Predicate::False => return Predicate::False,
                Predicate::And(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => Predicate::True,
            1 => out.pop().unwrap_or(Predicate::True),
            _ => Predicate::And(out),
        }
    }

    /// Disjunction of all parts. Empty input is `False`.
    pub fn any(parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut out = Vec::new();
        for part in parts {
            match part {
                Predicate::False => {}
                Predicate::True => return Predicate::True,
                Predicate::Or(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => Predicate::False,
            1 => out.pop().unwrap_or(Predicate::False),
            _ => Predicate::Or(out),
        }
    }

    pub fn and(self, other: Predicate) -> Self {
        Self::all([self, other])
    }

    pub fn or(self, other: Predicate) -> Self {
        Self::any([self, other])
    }

    pub fn negate(self) -> Self {
        match self {
            Predicate::True => Predicate::False,
            Predicate::False => Predicate::True,
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    #[must_use]
    pub fn is_false(&self) -> bool {
        matches!(self, Predicate::False)
    }

    /// Evaluate against a concrete record. Missing properties read as null.
    #[must_use]
    pub fn evaluate(&self, record: &dyn Resource) -> bool {
        match self {
            Predicate::True => true,
            Predicate::False => false,
            Predicate::And(parts) => parts.iter().all(|p| p.evaluate(record)),
            Predicate::Or(parts) => parts.iter().any(|p| p.evaluate(record)),
            Predicate::Not(inner) => !inner.evaluate(record),
            Predicate::Compare { field, op, value } => {
                let actual = record.property(field).unwrap_or(Value::Null);
                compare(&actual, *op, value)
            }
            Predicate::In { field, values } => {
                let actual = record.property(field).unwrap_or(Value::Null);
                values.iter().any(|v| actual.loosely_eq(v))
            }
            Predicate::Text { field, op, value } => {
                let actual = record.property(field);
                let Some(actual) = actual.as_ref().and_then(Value::as_str) else {
                    return false;
                };
                match op {
                    TextOp::Contains => actual.contains(value.as_str()),
                    TextOp::StartsWith => actual.starts_with(value.as_str()),
                    TextOp::EndsWith => actual.ends_with(value.as_str()),
                }
            }
        }
    }
}

fn compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    use std::cmp::Ordering;

    let ord = actual.compare(expected);
    match op {
        CompareOp::Eq => ord == Some(Ordering::Equal),
        CompareOp::Ne => ord != Some(Ordering::Equal),
        CompareOp::Gt => ord == Some(Ordering::Greater),
        CompareOp::Ge => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        CompareOp::Lt => ord == Some(Ordering::Less),
        CompareOp::Le => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        self.negate()
    }
}
