use anyhow::Result;
use clap::Args;
use propdesk_schema::FieldDescriptor;
use serde_json::json;

use crate::context::{Context, report};

#[derive(Args)]
pub struct DescribeArgs {
    /// Model name as it appears in the schema, e.g. `Contracts`
    model: String,
}

impl DescribeArgs {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let schema = ctx.schema()?;
        let model = schema.describe_model(&self.model).map_err(report)?;

        let sortable: Vec<&str> = model.sortable_fields().map(FieldDescriptor::name).collect();
        let out = json!({
            "model": model.name(),
            "fields": model.fields(),
            "sortable": sortable,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        Ok(())
    }
}
