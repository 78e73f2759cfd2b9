use anyhow::Result;
use clap::Args;
use propdesk_core::resources;
use propdesk_security::{Action, Predicate, merge_filter};
use serde_json::json;

use crate::context::{Context, report};

#[derive(Args)]
pub struct AccessArgs {
    /// Actor id known to the configured directory
    actor: String,

    /// Subject (`Contract`) or model (`Contracts`) name
    subject: String,

    #[arg(long, default_value = "read")]
    action: Action,
}

impl AccessArgs {
    pub async fn run(&self, ctx: &Context) -> Result<()> {
        let subject = resources::find(&self.subject).map_or(self.subject.as_str(), |d| d.subject);
        let ability = ctx
            .abilities()
            .create_for_actor(&self.actor)
            .await
            .map_err(report)?;

        let restriction = merge_filter(Predicate::True, &ability, self.action, subject);
        let out = json!({
            "actor": ability.actor_id(),
            "action": self.action,
            "subject": subject,
            "allowed": ability.can(self.action, subject),
            "restriction": restriction,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        Ok(())
    }
}
