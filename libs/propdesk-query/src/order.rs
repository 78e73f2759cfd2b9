use std::fmt;
use std::sync::Arc;

use propdesk_schema::SchemaRegistry;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::sort::{SortDir, SortSpec};

/// Field appended to every ordering so that rows with equal sort values still
/// come back in a stable order.
pub const TIEBREAKER_FIELD: &str = "id";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct OrderEntry {
    pub path: Vec<String>,
    pub dir: SortDir,
}

impl OrderEntry {
    pub fn new(path: Vec<String>, dir: SortDir) -> Self {
        Self { path, dir }
    }

    pub fn field(name: &str, dir: SortDir) -> Self {
        Self::new(vec![name.to_owned()], dir)
    }

    /// Dotted form of the path, e.g. `vendor.name`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }

    /// Nest the path into single-key objects: `[a, b]` + desc becomes
    /// `{"a": {"b": "desc"}}`.
    #[must_use]
    pub fn to_nested(&self) -> Value {
        self.path
            .iter()
            .rev()
            .fold(Value::String(self.dir.as_str().to_owned()), |inner, key| {
                let mut obj = Map::with_capacity(1);
                obj.insert(key.clone(), inner);
                Value::Object(obj)
            })
    }
}

/// Ordered list of sort entries handed to the query executor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[must_use]
pub struct OrderClause(Vec<OrderEntry>);

impl OrderClause {
    pub fn new(entries: Vec<OrderEntry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[OrderEntry] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Append `field` unless some entry already sorts on exactly that field.
    #[must_use]
    pub fn ensure_tiebreaker(mut self, field: &str, dir: SortDir) -> Self {
        if !self.0.iter().any(|e| e.path.len() == 1 && e.path[0] == field) {
            self.0.push(OrderEntry::field(field, dir));
        }
        self
    }

    /// Executor-native shape: `[{"a": {"b": "desc"}}, {"id": "desc"}]`.
    #[must_use]
    pub fn to_nested(&self) -> Value {
        Value::Array(self.0.iter().map(OrderEntry::to_nested).collect())
    }
}

impl fmt::Display for OrderClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(none)");
        }
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", entry.dotted(), entry.dir)?;
        }
        Ok(())
    }
}

/// Turns a validated [`SortSpec`] into an [`OrderClause`].
#[derive(Clone, Debug)]
pub struct OrderClauseBuilder {
    schema: Arc<SchemaRegistry>,
}

impl OrderClauseBuilder {
    #[must_use]
    pub fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self { schema }
    }

    /// The requested entry, followed by `id desc` when the root model has a
    /// sortable `id` and the caller did not sort by `id` itself.
    pub fn build(&self, spec: &SortSpec) -> OrderClause {
        let clause = OrderClause(vec![OrderEntry::new(
            spec.path().to_vec(),
            spec.direction(),
        )]);
        if self.schema.is_sortable_field(spec.model(), TIEBREAKER_FIELD) {
            clause.ensure_tiebreaker(TIEBREAKER_FIELD, SortDir::Desc)
        } else {
            clause
        }
    }
}
