use std::collections::HashMap;

use crate::error::SchemaError;
use crate::field::FieldDescriptor;
use crate::model::ModelSchema;

/// Read-only catalog of every model the application exposes.
///
/// Built once at startup and shared behind an `Arc`; it is never mutated
/// afterwards, so concurrent readers need no synchronization.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    models: HashMap<String, ModelSchema>,
    order: Vec<String>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Look up a model by name.
    ///
    /// # Errors
    /// Returns `SchemaError::ModelNotFound` if the model is unknown.
    pub fn describe_model(&self, model: &str) -> Result<&ModelSchema, SchemaError> {
        self.models
            .get(model)
            .ok_or_else(|| SchemaError::model_not_found(model))
    }

    /// Look up one field of a model. `Ok(None)` means the model exists but
    /// has no such field.
    ///
    /// # Errors
    /// Returns `SchemaError::ModelNotFound` if the model is unknown.
    pub fn field(&self, model: &str, field: &str) -> Result<Option<&FieldDescriptor>, SchemaError> {
        Ok(self.describe_model(model)?.field(field))
    }

    /// True iff the model exists, has the field, and the field is sortable.
    #[must_use]
    pub fn is_sortable_field(&self, model: &str, field: &str) -> bool {
        self.models
            .get(model)
            .and_then(|m| m.field(field))
            .is_some_and(FieldDescriptor::is_sortable)
    }

    /// Model names in registration order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[derive(Default)]
#[must_use]
pub struct SchemaRegistryBuilder {
    models: Vec<ModelSchema>,
}

impl SchemaRegistryBuilder {
    pub fn model(mut self, model: ModelSchema) -> Self {
        self.models.push(model);
        self
    }

    /// Validate cross-model references and freeze the registry.
    ///
    /// # Errors
    /// Returns `SchemaError::Invalid` on duplicate model names or when a
    /// relation points at a model that is not part of the registry.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let mut models = HashMap::with_capacity(self.models.len());
        let mut order = Vec::with_capacity(self.models.len());

        for model in self.models {
            let name = model.name().to_owned();
            if models.contains_key(&name) {
                return Err(SchemaError::Invalid(format!("duplicate model '{name}'")));
            }
            order.push(name.clone());
            models.insert(name, model);
        }

        for model in models.values() {
            for relation in model.relations() {
                let target = relation.related_model().unwrap_or_default();
                if !models.contains_key(target) {
                    return Err(SchemaError::Invalid(format!(
                        "relation '{}.{}' points at unknown model '{target}'",
                        model.name(),
                        relation.name()
                    )));
                }
            }
        }

        tracing::debug!(models = order.len(), "schema registry built");
        Ok(SchemaRegistry { models, order })
    }
}
