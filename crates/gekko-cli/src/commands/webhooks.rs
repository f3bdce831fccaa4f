//! `gekko webhooks` - list, inspect, and replay webhook deliveries.

use anyhow::Result;
use clap::Subcommand;
use gekko_api::WebhookQuery;
use gekko_settings::GekkoSettings;
use tracing::warn;

use crate::output;

/// Webhook subcommands.
#[derive(Debug, Subcommand)]
pub enum WebhooksCommand {
    /// List recent webhook events, newest first.
    List {
        /// Maximum number of events to show.
        #[arg(short, long, default_value = "20")]
        limit: u32,
        /// Filter by delivery status (pending, delivered, failed).
        #[arg(long)]
        status: Option<String>,
        /// Filter by zone; defaults to the configured zone.
        #[arg(short, long)]
        zone: Option<String>,
    },
    /// Show one webhook event in full.
    Inspect {
        /// Event id, e.g. `we_def456`.
        event_id: String,
    },
    /// Ask the platform to deliver an event again.
    Replay {
        /// Event id to re-deliver.
        event_id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        force: bool,
    },
    /// Replay every failed delivery.
    ReplayFailed {
        /// Only failures at or after this RFC 3339 instant.
        #[arg(long)]
        since: Option<String>,
        /// Show what would be replayed without replaying.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Dispatch a webhooks subcommand.
pub async fn run(command: WebhooksCommand, settings: &GekkoSettings) -> Result<()> {
    match command {
        WebhooksCommand::List {
            limit,
            status,
            zone,
        } => list(limit, status, zone, settings).await,
        WebhooksCommand::Inspect { event_id } => inspect(&event_id, settings).await,
        WebhooksCommand::Replay { event_id, force } => replay(&event_id, force, settings).await,
        WebhooksCommand::ReplayFailed { since, dry_run } => {
            replay_failed(since, dry_run, settings).await
        }
    }
}

async fn list(
    limit: u32,
    status: Option<String>,
    zone: Option<String>,
    settings: &GekkoSettings,
) -> Result<()> {
    let client = super::api_client(settings)?;
    let events = client
        .list_webhook_events(&WebhookQuery {
            limit,
            status,
            zone: zone.or_else(|| settings.api.zone.clone()),
            since: None,
        })
        .await?;

    if events.is_empty() {
        println!("No webhook events found.");
        return Ok(());
    }
    print!("{}", output::webhook_table(&events));
    Ok(())
}

async fn inspect(event_id: &str, settings: &GekkoSettings) -> Result<()> {
    let client = super::api_client(settings)?;
    let event = client.webhook_event(event_id).await?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

async fn replay(event_id: &str, force: bool, settings: &GekkoSettings) -> Result<()> {
    if !force && !super::confirm(&format!("Replay event {event_id}?"))? {
        println!("Aborted.");
        return Ok(());
    }
    let client = super::api_client(settings)?;
    let outcome = client.replay_webhook_event(event_id).await?;
    if outcome.delivered {
        println!("Replayed {}", outcome.id);
    } else {
        println!("Replay of {} queued", outcome.id);
    }
    Ok(())
}

async fn replay_failed(
    since: Option<String>,
    dry_run: bool,
    settings: &GekkoSettings,
) -> Result<()> {
    let client = super::api_client(settings)?;
    let events = client
        .list_webhook_events(&WebhookQuery {
            limit: 100,
            status: Some("failed".to_string()),
            zone: settings.api.zone.clone(),
            since,
        })
        .await?;

    if events.is_empty() {
        println!("No failed deliveries.");
        return Ok(());
    }
    println!("Found {} failed deliveries", events.len());
    if dry_run {
        for event in &events {
            println!("  would replay {} ({})", event.id, event.event_type);
        }
        return Ok(());
    }

    let mut replayed = 0usize;
    for event in &events {
        match client.replay_webhook_event(&event.id).await {
            Ok(outcome) if outcome.delivered => {
                replayed += 1;
                println!("  replayed {}", outcome.id);
            }
            Ok(outcome) => println!("  queued {}", outcome.id),
            Err(error) => warn!(event_id = %event.id, error = %error, "replay failed"),
        }
    }
    println!("Replayed {replayed} of {} events", events.len());
    Ok(())
}
