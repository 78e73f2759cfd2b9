//! Loading a [`SchemaRegistry`] from a serialized schema description.
//!
//! The document mirrors what the ORM exports for its data model:
//!
//! ```yaml
//! models:
//!   - name: Users
//!     fields:
//!       - { name: id, kind: scalar, type: String }
//!       - { name: userTenants, kind: object, type: UserTenants, isList: true }
//!   - name: UserTenants
//!     fields:
//!       - { name: contactType, kind: enum, type: ContactType }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::SchemaError;
use crate::field::{FieldDescriptor, FieldKind, ScalarType};
use crate::model::ModelSchema;
use crate::registry::SchemaRegistry;

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    models: Vec<ModelDocument>,
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDocument {
    name: String,
    kind: FieldKind,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(default)]
    is_list: bool,
}

impl FieldDocument {
    fn into_descriptor(self, model: &str) -> Result<FieldDescriptor, SchemaError> {
        let field = match self.kind {
            FieldKind::Scalar => {
                let raw = self.type_name.as_deref().ok_or_else(|| {
                    SchemaError::Invalid(format!(
                        "scalar field '{model}.{}' has no type",
                        self.name
                    ))
                })?;
                let scalar_type: ScalarType = raw.parse().map_err(|e| {
                    SchemaError::Invalid(format!("field '{model}.{}': {e}", self.name))
                })?;
                FieldDescriptor::scalar(self.name, scalar_type)
            }
            FieldKind::Enum => FieldDescriptor::enumeration(self.name),
            FieldKind::Relation => {
                let target = self.type_name.ok_or_else(|| {
                    SchemaError::Invalid(format!(
                        "relation field '{model}.{}' has no target model",
                        self.name
                    ))
                })?;
                FieldDescriptor::relation(self.name, target)
            }
        };
        Ok(if self.is_list { field.list() } else { field })
    }
}

impl SchemaDocument {
    fn into_registry(self) -> Result<SchemaRegistry, SchemaError> {
        let mut builder = SchemaRegistry::builder();
        for model in self.models {
            let fields = model
                .fields
                .into_iter()
                .map(|f| f.into_descriptor(&model.name))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.model(ModelSchema::new(model.name, fields)?);
        }
        builder.build()
    }
}

impl SchemaRegistry {
    /// Parse a JSON schema document.
    ///
    /// # Errors
    /// Returns `SchemaError::Parse` for malformed JSON and `SchemaError::Invalid`
    /// for structurally inconsistent schemas.
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument =
            serde_json::from_str(raw).map_err(|e| SchemaError::Parse(e.to_string()))?;
        doc.into_registry()
    }

    /// Parse a YAML schema document.
    ///
    /// # Errors
    /// Same as [`SchemaRegistry::from_json_str`].
    pub fn from_yaml_str(raw: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument =
            serde_saphyr::from_str(raw).map_err(|e| SchemaError::Parse(e.to_string()))?;
        doc.into_registry()
    }

    /// Load a schema file; `.yaml`/`.yml` files are parsed as YAML, anything
    /// else as JSON.
    ///
    /// # Errors
    /// Returns `SchemaError::Io` if the file cannot be read, otherwise the
    /// parse errors of the chosen format.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let raw = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let registry = if is_yaml {
            Self::from_yaml_str(&raw)?
        } else {
            Self::from_json_str(&raw)?
        };
        tracing::info!(path = %path.display(), models = registry.len(), "schema loaded");
        Ok(registry)
    }
}
