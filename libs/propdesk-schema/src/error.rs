use thiserror::Error;

/// Errors raised while loading or querying the model schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A model name was requested that the registry does not know.
    /// This is a programming error, not a user input error.
    #[error("model not found: {model}")]
    ModelNotFound { model: String },

    #[error("invalid schema: {0}")]
    Invalid(String),

    #[error("failed to parse schema document: {0}")]
    Parse(String),

    #[error("failed to read schema file {path}: {reason}")]
    Io { path: String, reason: String },
}

impl SchemaError {
    pub(crate) fn model_not_found(model: &str) -> Self {
        SchemaError::ModelNotFound {
            model: model.to_owned(),
        }
    }
}
