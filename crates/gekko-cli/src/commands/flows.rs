//! `gekko flows` - inspect flow runs.

use anyhow::Result;
use clap::Subcommand;
use gekko_settings::GekkoSettings;

use crate::output;

/// Flow subcommands.
#[derive(Debug, Subcommand)]
pub enum FlowsCommand {
    /// Show a flow run and its step states.
    Inspect {
        /// Flow run id, e.g. `flow_abc123`.
        flow_id: String,
    },
}

/// Dispatch a flows subcommand.
pub async fn run(command: FlowsCommand, settings: &GekkoSettings) -> Result<()> {
    match command {
        FlowsCommand::Inspect { flow_id } => inspect(&flow_id, settings).await,
    }
}

async fn inspect(flow_id: &str, settings: &GekkoSettings) -> Result<()> {
    let client = super::api_client(settings)?;
    let flow = client.flow_run(flow_id).await?;
    print!("{}", output::flow_summary(&flow));
    Ok(())
}
