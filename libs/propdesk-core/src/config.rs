//! Layered configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. an optional YAML file
//! 3. `PROPDESK__*` environment variables, `__` separating nested keys
//!    (`PROPDESK__QUERY__MAX_LIMIT=50`)

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use propdesk_query::{DEFAULT_MAX_NESTED_SORT_LEVEL, PaginationLimits, SortDir};
use propdesk_security::StaticActorDirectory;
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

pub const ENV_PREFIX: &str = "PROPDESK__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    MissingFile(PathBuf),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to render configuration: {0}")]
    Render(String),
}

/// Sorting and paging defaults for list queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Relation hops a sort path may take.
    pub max_nested_sort_level: usize,
    /// Sort key used when the request names none and the resource has no
    /// default of its own.
    pub default_sort_field: String,
    pub default_sort_dir: SortDir,
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        let limits = PaginationLimits::default();
        Self {
            max_nested_sort_level: DEFAULT_MAX_NESTED_SORT_LEVEL,
            default_sort_field: "createdAt".to_owned(),
            default_sort_dir: SortDir::Desc,
            default_limit: limits.default_limit,
            max_limit: limits.max_limit,
        }
    }
}

impl QueryConfig {
    #[must_use]
    pub fn pagination_limits(&self) -> PaginationLimits {
        PaginationLimits::new()
            .with_max_limit(self.max_limit)
            .with_default_limit(self.default_limit)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_sort_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "query.default_sort_field must not be empty".to_owned(),
            ));
        }
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("query.max_limit must be at least 1".to_owned()));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "query.default_limit must be between 1 and max_limit ({})",
                self.max_limit
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropdeskConfig {
    pub query: QueryConfig,
    pub logging: LoggingConfig,
    /// Schema document (`.json`, `.yaml` or `.yml`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    /// Actors and tenants for the static directory.
    pub directory: StaticActorDirectory,
}

impl PropdeskConfig {
    /// Load defaults, then `path` if given, then the environment.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingFile` if `path` does not exist, and
    /// `ConfigError::Figment` / `ConfigError::Invalid` for malformed or
    /// out-of-range values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate from an already assembled figment.
    ///
    /// # Errors
    /// See [`PropdeskConfig::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.query.validate()?;
        tracing::debug!(
            max_nested_sort_level = config.query.max_nested_sort_level,
            max_limit = config.query.max_limit,
            "configuration loaded"
        );
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::Render` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}
