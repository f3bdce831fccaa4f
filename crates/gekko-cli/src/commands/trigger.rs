//! `gekko trigger` - inject a mock event into the bus.

use anyhow::{Context, Result};
use clap::Args;
use gekko_api::TriggerEvent;
use gekko_settings::GekkoSettings;

/// Arguments for `gekko trigger`.
#[derive(Args, Debug)]
pub struct TriggerArgs {
    /// Event type to emit, e.g. `payment.created`.
    pub event_type: String,
    /// Inline JSON payload for the event.
    #[arg(short, long, default_value = "{}")]
    pub data: String,
    /// Zone to emit into; defaults to the configured zone.
    #[arg(short, long)]
    pub zone: Option<String>,
}

/// Post the event to the platform; delivery shows up on `gekko listen`.
pub async fn run(args: TriggerArgs, settings: &GekkoSettings) -> Result<()> {
    let data: serde_json::Value = serde_json::from_str(&args.data)
        .with_context(|| format!("--data is not valid JSON: {}", args.data))?;

    let client = super::api_client(settings)?;
    let request = TriggerEvent {
        event_type: args.event_type.clone(),
        zone: args.zone.or_else(|| settings.api.zone.clone()),
        data,
    };
    client.trigger_event(&request).await?;
    println!("Triggered {}", args.event_type);
    Ok(())
}
