//! Mapping from schema errors to `Problem`.
//!
//! Every schema error is a server-side fault, so all of them map to 500.

use propdesk_errors::Problem;
use propdesk_errors::catalog::{SCHEMA_INVALID, SCHEMA_NOT_FOUND};

use crate::SchemaError;

impl From<SchemaError> for Problem {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ModelNotFound { .. } => {
                SCHEMA_NOT_FOUND.as_problem("The requested resource model is not registered")
            }
            SchemaError::Invalid(_) | SchemaError::Parse(_) | SchemaError::Io { .. } => {
                SCHEMA_INVALID.as_problem("The model schema could not be loaded")
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn model_not_found_is_500() {
        let problem: Problem = SchemaError::ModelNotFound {
            model: "Ghosts".to_owned(),
        }
        .into();
        assert_eq!(problem.status.as_u16(), 500);
        assert_eq!(problem.code, "propdesk.schema.not_found");
        assert!(!problem.detail.contains("Ghosts"));
    }
}
