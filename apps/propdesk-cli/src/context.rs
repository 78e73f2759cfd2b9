use std::sync::Arc;

use anyhow::{Context as _, Result};
use propdesk_core::PropdeskConfig;
use propdesk_errors::Problem;
use propdesk_schema::{SchemaCell, SchemaRegistry};
use propdesk_security::AbilityFactory;

pub struct Context {
    config: PropdeskConfig,
    schema: SchemaCell,
}

impl Context {
    pub fn new(config: PropdeskConfig) -> Self {
        Self {
            config,
            schema: SchemaCell::new(),
        }
    }

    pub fn config(&self) -> &PropdeskConfig {
        &self.config
    }

    pub fn schema(&self) -> Result<Arc<SchemaRegistry>> {
        let path = self
            .config
            .schema_path
            .as_deref()
            .context("no schema configured: pass --schema or set schema_path")?;
        let registry = self
            .schema
            .get_or_try_init(|| SchemaRegistry::from_path(path))
            .with_context(|| format!("failed to load schema from {}", path.display()))?;
        tracing::debug!(models = registry.len(), path = %path.display(), "schema ready");
        Ok(registry)
    }

    pub fn abilities(&self) -> AbilityFactory {
        AbilityFactory::with_default_policy(Arc::new(self.config.directory.clone()))
    }
}

/// Print a problem document on stdout and turn it into a failing exit.
pub fn report(problem: impl Into<Problem>) -> anyhow::Error {
    let problem = problem.into();
    match serde_json::to_string_pretty(&problem) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to render problem"),
    }
    anyhow::anyhow!("{} ({})", problem.title, problem.status.as_u16())
}
