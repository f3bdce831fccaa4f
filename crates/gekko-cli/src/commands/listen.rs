//! `gekko listen` - stream platform events for a zone.

use anyhow::{bail, Context, Result};
use clap::Args;
use gekko_core::render::{EventFilter, RenderMode};
use gekko_settings::GekkoSettings;
use gekko_stream::{run_session, ConnectConfig, CredentialPlacement, SessionOptions, StdoutSink};
use tracing::info;

/// Arguments for `gekko listen`.
#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Zone to scope the stream to; defaults to the configured zone.
    #[arg(short, long)]
    pub zone: Option<String>,
    /// Print full event payloads instead of one line per event.
    #[arg(short, long)]
    pub verbose: bool,
    /// Only show events whose type contains this substring.
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Stream the platform's event feed until Ctrl-C or the peer closes.
///
/// The platform stream authenticates via an `api_key` query parameter, so
/// a key is required up front.
pub async fn run(args: ListenArgs, settings: &GekkoSettings) -> Result<()> {
    let Some(key) = settings.api.key.clone() else {
        bail!("api key not set; export GEKKO_API_KEY or add api.key to ~/.gekko/settings.json");
    };

    let mut config = ConnectConfig::new(format!(
        "{}/v1/events/stream",
        settings.api.ws_base_url()
    ));
    config.credential = Some(key);
    config.placement = CredentialPlacement::Query;
    if let Some(zone) = args.zone.or_else(|| settings.api.zone.clone()) {
        config.query.push(("zone".to_string(), zone));
    }

    let options = SessionOptions {
        mode: if args.verbose {
            RenderMode::Verbose
        } else {
            RenderMode::Compact
        },
        filter: EventFilter::from(args.filter),
        trigger: None,
        close_grace: settings.stream.close_grace(),
    };

    info!(url = %config.url, "streaming platform events (Ctrl-C to stop)");
    let reason = run_session(&config, options, StdoutSink, super::interrupt_token())
        .await
        .context("could not open the event stream")?;
    info!(reason = %reason, "session closed");
    Ok(())
}
