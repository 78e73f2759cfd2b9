use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a model field holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Enum,
    /// A link to another model. Schema documents exported from the ORM call
    /// this kind `object`.
    #[serde(alias = "object")]
    Relation,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "scalar"),
            FieldKind::Enum => write!(f, "enum"),
            FieldKind::Relation => write!(f, "relation"),
        }
    }
}

/// Storage type of a scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Int,
    BigInt,
    Float,
    Decimal,
    DateTime,
    Boolean,
    Json,
    Bytes,
}

impl ScalarType {
    /// Scalar types the store can order by.
    #[must_use]
    pub fn is_sortable(self) -> bool {
        matches!(
            self,
            ScalarType::String
                | ScalarType::Int
                | ScalarType::Float
                | ScalarType::DateTime
                | ScalarType::Boolean
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::BigInt => "BigInt",
            ScalarType::Float => "Float",
            ScalarType::Decimal => "Decimal",
            ScalarType::DateTime => "DateTime",
            ScalarType::Boolean => "Boolean",
            ScalarType::Json => "Json",
            ScalarType::Bytes => "Bytes",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(ScalarType::String),
            "Int" => Ok(ScalarType::Int),
            "BigInt" => Ok(ScalarType::BigInt),
            "Float" => Ok(ScalarType::Float),
            "Decimal" => Ok(ScalarType::Decimal),
            "DateTime" => Ok(ScalarType::DateTime),
            "Boolean" => Ok(ScalarType::Boolean),
            "Json" => Ok(ScalarType::Json),
            "Bytes" => Ok(ScalarType::Bytes),
            other => Err(format!("unknown scalar type '{other}'")),
        }
    }
}

/// One field of a [`ModelSchema`](crate::ModelSchema).
///
/// `scalar_type` is only set for [`FieldKind::Scalar`] and `related_model`
/// only for [`FieldKind::Relation`]; the constructors keep that invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    scalar_type: Option<ScalarType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    related_model: Option<String>,
    is_list: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn scalar(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar,
            scalar_type: Some(scalar_type),
            related_model: None,
            is_list: false,
        }
    }

    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Enum,
            scalar_type: None,
            related_model: None,
            is_list: false,
        }
    }

    #[must_use]
    pub fn relation(name: impl Into<String>, related_model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Relation,
            scalar_type: None,
            related_model: Some(related_model.into()),
            is_list: false,
        }
    }

    /// Mark the field as a list (to-many relation or scalar array).
    #[must_use]
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub fn scalar_type(&self) -> Option<ScalarType> {
        self.scalar_type
    }

    #[must_use]
    pub fn related_model(&self) -> Option<&str> {
        self.related_model.as_deref()
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.is_list
    }

    #[must_use]
    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Relation
    }

    /// Sortable means: an enum, or a scalar of a sortable type.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        match self.kind {
            FieldKind::Enum => true,
            FieldKind::Scalar => self.scalar_type.is_some_and(ScalarType::is_sortable),
            FieldKind::Relation => false,
        }
    }
}
