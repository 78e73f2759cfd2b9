use std::collections::HashMap;

use serde::Serialize;

use crate::error::SchemaError;
use crate::field::{FieldDescriptor, ScalarType};

/// Field layout of one logical model.
///
/// Fields keep their declaration order; lookups by name go through an index
/// built at construction time.
#[derive(Clone, Debug, Serialize)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ModelSchema {
    /// Build a model from its fields.
    ///
    /// # Errors
    /// Returns `SchemaError::Invalid` if two fields share a name or the model
    /// name is empty.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::Invalid("model name must not be empty".to_owned()));
        }

        let mut index = HashMap::with_capacity(fields.len());
        for (pos, field) in fields.iter().enumerate() {
            if index.insert(field.name().to_owned(), pos).is_some() {
                return Err(SchemaError::Invalid(format!(
                    "duplicate field '{}' in model '{name}'",
                    field.name()
                )));
            }
        }

        Ok(Self { name, fields, index })
    }

    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&pos| &self.fields[pos])
    }

    pub fn relations(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn sortable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_sortable())
    }
}

/// Incremental builder used by tests and code-defined schemas.
#[must_use]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl ModelSchemaBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn scalar(self, name: &str, scalar_type: ScalarType) -> Self {
        self.field(FieldDescriptor::scalar(name, scalar_type))
    }

    pub fn enumeration(self, name: &str) -> Self {
        self.field(FieldDescriptor::enumeration(name))
    }

    pub fn relation(self, name: &str, related_model: &str) -> Self {
        self.field(FieldDescriptor::relation(name, related_model))
    }

    pub fn relation_list(self, name: &str, related_model: &str) -> Self {
        self.field(FieldDescriptor::relation(name, related_model).list())
    }

    /// # Errors
    /// See [`ModelSchema::new`].
    pub fn build(self) -> Result<ModelSchema, SchemaError> {
        ModelSchema::new(self.name, self.fields)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn keeps_declaration_order() {
        let model = ModelSchema::builder("Contracts")
            .scalar("id", ScalarType::String)
            .scalar("title", ScalarType::String)
            .relation("vendor", "Vendors")
            .build()
            .unwrap();

        let names: Vec<_> = model.fields().iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, ["id", "title", "vendor"]);
        assert_eq!(model.field("vendor").unwrap().kind(), FieldKind::Relation);
        assert_eq!(model.relations().count(), 1);
        assert_eq!(model.sortable_fields().count(), 2);
    }

    #[test]
    fn rejects_duplicate_fields() {
        let err = ModelSchema::builder("Contracts")
            .scalar("id", ScalarType::String)
            .scalar("id", ScalarType::Int)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(msg) if msg.contains("duplicate field 'id'")));
    }

    #[test]
    fn rejects_empty_name() {
        assert!(ModelSchema::new("  ", vec![]).is_err());
    }
}
