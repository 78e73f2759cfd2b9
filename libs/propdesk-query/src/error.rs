use propdesk_schema::SchemaError;

/// Errors raised while validating list-query inputs.
///
/// `InvalidSortKey` and `SortTooDeep` are caller errors. `Schema` means the
/// query named a model the registry does not know, and `InvalidDefaultSort`
/// means a configured default sort does not fit its model. Both are server
/// faults.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid sort key '{key}': {reason}")]
    InvalidSortKey { key: String, reason: String },

    #[error("sort path '{path}' is too deep: at most {max_depth} nested relation level(s) allowed")]
    SortTooDeep { path: String, max_depth: usize },

    #[error("default sort '{field}' is not valid for {model}: {reason}")]
    InvalidDefaultSort {
        model: String,
        field: String,
        reason: String,
    },
}

impl QueryError {
    pub(crate) fn invalid_sort_key(key: &str, reason: impl Into<String>) -> Self {
        QueryError::InvalidSortKey {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}
