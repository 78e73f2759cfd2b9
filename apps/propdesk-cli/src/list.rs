use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Args;
use propdesk_core::{ListService, MemoryExecutor, resources};
use propdesk_query::ListParams;
use propdesk_security::Predicate;
use serde_json::Value;

use crate::context::{Context, report};

#[derive(Args)]
pub struct ListArgs {
    /// Actor id known to the configured directory
    actor: String,

    /// Subject (`Contract`) or model (`Contracts`) name
    resource: String,

    /// JSON file mapping model names to arrays of rows
    #[arg(long)]
    data: PathBuf,

    /// Equality filter `field=value`, may be repeated
    #[arg(long = "where", value_name = "FIELD=VALUE")]
    conditions: Vec<String>,

    #[arg(long)]
    sort_by: Option<String>,

    #[arg(long)]
    sort_order: Option<String>,

    #[arg(long)]
    page: Option<i64>,

    #[arg(long)]
    limit: Option<i64>,

    /// Include totalCount and totalPages in the output
    #[arg(long)]
    count: bool,
}

impl ListArgs {
    pub async fn run(&self, ctx: &Context) -> Result<()> {
        let descriptor = resources::find(&self.resource)
            .with_context(|| format!("unknown resource '{}'", self.resource))?;

        let raw = std::fs::read_to_string(&self.data)
            .with_context(|| format!("failed to read {}", self.data.display()))?;
        let tables: BTreeMap<String, Vec<Value>> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a model-to-rows JSON object", self.data.display()))?;
        let store = tables
            .into_iter()
            .fold(MemoryExecutor::new(), |store, (model, rows)| store.with_rows(model, rows));

        let service = ListService::new(
            ctx.abilities(),
            ctx.schema()?,
            &ctx.config().query,
            Arc::new(store),
        );
        let page = service
            .list(&self.actor, descriptor, self.business_filter()?, &self.params())
            .await
            .map_err(report)?;
        println!("{}", serde_json::to_string_pretty(&page)?);
        Ok(())
    }

    fn business_filter(&self) -> Result<Predicate> {
        let clauses = self
            .conditions
            .iter()
            .map(|raw| {
                let (field, value) = raw
                    .split_once('=')
                    .with_context(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
                Ok(Predicate::eq(field.trim(), value.trim()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Predicate::all(clauses))
    }

    fn params(&self) -> ListParams {
        ListParams {
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
            page: self.page,
            limit: self.limit,
            include_count: Some(self.count),
        }
    }
}
