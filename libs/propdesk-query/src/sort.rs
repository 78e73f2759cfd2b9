//! Validation of dotted sort paths against the model schema.
//!
//! A sort path such as `contract.vendor.name` is walked segment by segment:
//! every segment but the last must be a relation, and the last must be a
//! sortable scalar or enum of the model the walk ended on.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use propdesk_schema::SchemaRegistry;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Default number of relation hops a sort path may take.
pub const DEFAULT_MAX_NESTED_SORT_LEVEL: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = QueryError;

    /// Accepts `asc` / `desc` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("asc") {
            Ok(SortDir::Asc)
        } else if trimmed.eq_ignore_ascii_case("desc") {
            Ok(SortDir::Desc)
        } else {
            Err(QueryError::invalid_sort_key(
                s,
                "sort direction must be 'asc' or 'desc'",
            ))
        }
    }
}

/// A sort path that passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    model: String,
    raw: String,
    path: Vec<String>,
    direction: SortDir,
}

impl SortSpec {
    /// Root model the path starts from.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The sort key exactly as the caller sent it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn direction(&self) -> SortDir {
        self.direction
    }

    /// Number of relation hops before the terminal field.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    #[must_use]
    pub fn with_direction(mut self, direction: SortDir) -> Self {
        self.direction = direction;
        self
    }
}

/// Checks sort paths against a shared, read-only [`SchemaRegistry`].
#[derive(Clone, Debug)]
pub struct SortPathValidator {
    schema: Arc<SchemaRegistry>,
}

impl SortPathValidator {
    #[must_use]
    pub fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<SchemaRegistry> {
        &self.schema
    }

    /// Validate `sort_path` starting at `model`. The returned spec sorts
    /// ascending; use [`SortSpec::with_direction`] to change that.
    ///
    /// The depth limit is checked before the walk, so a path that is both
    /// too deep and otherwise malformed reports `SortTooDeep`.
    ///
    /// # Errors
    /// - `QueryError::SortTooDeep` if the path has more than `max_depth` relation hops
    /// - `QueryError::InvalidSortKey` for empty segments, unknown fields,
    ///   non-relation intermediate segments, or a non-sortable terminal field
    /// - `QueryError::Schema` if `model` is not registered
    pub fn validate(
        &self,
        model: &str,
        sort_path: &str,
        max_depth: usize,
    ) -> Result<SortSpec, QueryError> {
        let result = self.walk(model, sort_path, max_depth);
        if let Err(err) = &result {
            tracing::debug!(model, sort = sort_path, error = %err, "sort path rejected");
        }
        result
    }

    /// Like [`validate`](Self::validate), but an absent or blank path falls
    /// back to `default_field`.
    ///
    /// # Errors
    /// Same as [`validate`](Self::validate) for a caller-supplied path. A
    /// substituted default that fails validation is reported as
    /// `QueryError::InvalidDefaultSort`.
    pub fn validate_with_default(
        &self,
        model: &str,
        sort_path: Option<&str>,
        default_field: &str,
        direction: SortDir,
        max_depth: usize,
    ) -> Result<SortSpec, QueryError> {
        if let Some(path) = sort_path.map(str::trim).filter(|p| !p.is_empty()) {
            return Ok(self.validate(model, path, max_depth)?.with_direction(direction));
        }

        match self.walk(model, default_field, max_depth) {
            Ok(spec) => Ok(spec.with_direction(direction)),
            Err(err @ QueryError::Schema(_)) => Err(err),
            Err(err) => {
                tracing::error!(
                    model,
                    sort = default_field,
                    error = %err,
                    "configured default sort is invalid"
                );
                Err(QueryError::InvalidDefaultSort {
                    model: model.to_owned(),
                    field: default_field.to_owned(),
                    reason: err.to_string(),
                })
            }
        }
    }

    fn walk(&self, model: &str, sort_path: &str, max_depth: usize) -> Result<SortSpec, QueryError> {
        let segments: Vec<&str> = sort_path.split('.').collect();

        if segments.len() - 1 > max_depth {
            return Err(QueryError::SortTooDeep {
                path: sort_path.to_owned(),
                max_depth,
            });
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(QueryError::invalid_sort_key(sort_path, "empty path segment"));
        }

        let Some((terminal, hops)) = segments.split_last() else {
            return Err(QueryError::invalid_sort_key(sort_path, "empty sort key"));
        };

        let mut current = self.schema.describe_model(model)?;
        for segment in hops {
            let field = current.field(segment).ok_or_else(|| {
                QueryError::invalid_sort_key(
                    sort_path,
                    format!("'{segment}' is not a field of {}", current.name()),
                )
            })?;
            let Some(target) = field.related_model().filter(|_| field.is_relation()) else {
                return Err(QueryError::invalid_sort_key(
                    sort_path,
                    format!("'{segment}' on {} is not a relation", current.name()),
                ));
            };
            current = self.schema.describe_model(target)?;
        }

        match current.field(terminal) {
            Some(field) if field.is_sortable() => {}
            Some(_) => {
                return Err(QueryError::invalid_sort_key(
                    sort_path,
                    format!("'{terminal}' on {} is not sortable", current.name()),
                ));
            }
            None => {
                return Err(QueryError::invalid_sort_key(
                    sort_path,
                    format!("'{terminal}' is not a field of {}", current.name()),
                ));
            }
        }

        Ok(SortSpec {
            model: model.to_owned(),
            raw: sort_path.to_owned(),
            path: segments.into_iter().map(str::to_owned).collect(),
            direction: SortDir::Asc,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use propdesk_schema::{ModelSchema, ScalarType, SchemaError};

    fn registry() -> Arc<SchemaRegistry> {
        Arc::new(
            SchemaRegistry::builder()
                .model(
                    ModelSchema::builder("Contracts")
                        .scalar("id", ScalarType::String)
                        .scalar("title", ScalarType::String)
                        .scalar("amount", ScalarType::Decimal)
                        .relation("vendor", "Vendors")
                        .build()
                        .unwrap(),
                )
                .model(
                    ModelSchema::builder("Vendors")
                        .scalar("name", ScalarType::String)
                        .relation("country", "Countries")
                        .build()
                        .unwrap(),
                )
                .model(
                    ModelSchema::builder("Countries")
                        .scalar("name", ScalarType::String)
                        .relation("region", "Regions")
                        .build()
                        .unwrap(),
                )
                .model(
                    ModelSchema::builder("Regions")
                        .scalar("name", ScalarType::String)
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("DESC".parse::<SortDir>().unwrap(), SortDir::Desc);
        assert_eq!("Asc".parse::<SortDir>().unwrap(), SortDir::Asc);
        let err = "sideways".parse::<SortDir>().unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortKey { key, .. } if key == "sideways"));
    }

    #[test]
    fn walks_relations_to_terminal_field() {
        let v = SortPathValidator::new(registry());
        let spec = v.validate("Contracts", "vendor.country.name", 2).unwrap();
        assert_eq!(spec.path(), ["vendor", "country", "name"]);
        assert_eq!(spec.depth(), 2);
        assert_eq!(spec.model(), "Contracts");
        assert_eq!(spec.direction(), SortDir::Asc);
    }

    #[test]
    fn depth_is_checked_before_segments() {
        let v = SortPathValidator::new(registry());
        assert_eq!(
            v.validate("Contracts", "vendor.country.region.name", 2),
            Err(QueryError::SortTooDeep {
                path: "vendor.country.region.name".to_owned(),
                max_depth: 2
            })
        );
        // invalid segments, still too deep
        assert!(matches!(
            v.validate("Contracts", "x..y.z", 1),
            Err(QueryError::SortTooDeep { .. })
        ));
        assert!(v.validate("Contracts", "vendor.country.region.name", 3).is_ok());
    }

    #[test]
    fn empty_segments_are_rejected() {
        let v = SortPathValidator::new(registry());
        for path in ["", "vendor.", ".name", "vendor..name"] {
            assert!(
                matches!(
                    v.validate("Contracts", path, 2),
                    Err(QueryError::InvalidSortKey { .. })
                ),
                "{path:?}"
            );
        }
    }

    #[test]
    fn intermediate_segment_must_be_relation() {
        let v = SortPathValidator::new(registry());
        let err = v.validate("Contracts", "title.name", 2).unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortKey { reason, .. } if reason.contains("not a relation")));
    }

    #[test]
    fn terminal_must_be_sortable() {
        let v = SortPathValidator::new(registry());
        assert!(matches!(
            v.validate("Contracts", "amount", 2),
            Err(QueryError::InvalidSortKey { .. })
        ));
        assert!(matches!(
            v.validate("Contracts", "vendor", 2),
            Err(QueryError::InvalidSortKey { .. })
        ));
    }

    #[test]
    fn unknown_model_is_schema_error() {
        let v = SortPathValidator::new(registry());
        assert_eq!(
            v.validate("Ghosts", "name", 2),
            Err(QueryError::Schema(SchemaError::ModelNotFound {
                model: "Ghosts".to_owned()
            }))
        );
    }

    #[test]
    fn blank_path_uses_default() {
        let v = SortPathValidator::new(registry());
        let spec = v
            .validate_with_default("Contracts", Some("  "), "title", SortDir::Desc, 2)
            .unwrap();
        assert_eq!(spec.raw(), "title");
        assert_eq!(spec.direction(), SortDir::Desc);

    }

    #[test]
    fn broken_default_is_not_blamed_on_the_caller() {
        let v = SortPathValidator::new(registry());
        let err = v
            .validate_with_default("Contracts", None, "createdAt", SortDir::Desc, 2)
            .unwrap_err();
        assert!(matches!(
            &err,
            QueryError::InvalidDefaultSort { model, field, .. }
                if model == "Contracts" && field == "createdAt"
        ));

        // same key sent by the caller stays a caller error
        let err = v
            .validate_with_default("Contracts", Some("createdAt"), "title", SortDir::Desc, 2)
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortKey { key, .. } if key == "createdAt"));

        assert!(matches!(
            v.validate_with_default("Ghosts", None, "name", SortDir::Asc, 2),
            Err(QueryError::Schema(_))
        ));
    }
}
