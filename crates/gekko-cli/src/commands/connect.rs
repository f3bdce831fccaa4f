//! `gekko connect` - stream events from any bus endpoint.

use anyhow::{Context, Result};
use clap::Args;
use gekko_settings::GekkoSettings;
use gekko_stream::{run_session, ConnectConfig, SessionOptions, StdoutSink};
use tracing::info;

/// Arguments for `gekko connect`.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Endpoint to connect to; defaults to the configured connect URL.
    pub url: Option<String>,
    /// Bearer credential, sent in the Authorization header.
    #[arg(short, long)]
    pub key: Option<String>,
    /// Payload to send once, right after connecting.
    #[arg(short, long)]
    pub trigger: Option<String>,
}

/// Open a raw session and stream until Ctrl-C or the peer closes.
pub async fn run(args: ConnectArgs, settings: &GekkoSettings) -> Result<()> {
    let url = args
        .url
        .unwrap_or_else(|| settings.stream.connect_url.clone());
    let config = ConnectConfig {
        credential: args.key.or_else(|| settings.api.key.clone()),
        ..ConnectConfig::new(url)
    };
    let options = SessionOptions {
        trigger: args.trigger,
        close_grace: settings.stream.close_grace(),
        ..SessionOptions::default()
    };

    info!(url = %config.url, "connecting (Ctrl-C to stop)");
    let reason = run_session(&config, options, StdoutSink, super::interrupt_token())
        .await
        .context("could not open the event stream")?;
    info!(reason = %reason, "session closed");
    Ok(())
}
