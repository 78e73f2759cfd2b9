use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use propdesk_query::{OrderClauseBuilder, SortDir, SortPathValidator};

use crate::context::{Context, report};

#[derive(Args)]
pub struct CheckSortArgs {
    /// Model the sort applies to, e.g. `Users`
    model: String,

    /// Dotted sort key, e.g. `userTenants.contactType`
    path: String,

    /// `asc` or `desc`; defaults to the configured direction
    #[arg(long)]
    order: Option<String>,
}

impl CheckSortArgs {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let query = &ctx.config().query;
        let schema = ctx.schema()?;

        let direction = match self.order.as_deref() {
            Some(raw) => raw.parse::<SortDir>().map_err(report)?,
            None => query.default_sort_dir,
        };
        let spec = SortPathValidator::new(Arc::clone(&schema))
            .validate(&self.model, &self.path, query.max_nested_sort_level)
            .map_err(report)?
            .with_direction(direction);

        let order = OrderClauseBuilder::new(schema).build(&spec);
        tracing::info!(%order, "sort key accepted");
        println!("{}", serde_json::to_string_pretty(&order.to_nested())?);
        Ok(())
    }
}
