//! # gekko
//!
//! Developer CLI for the event-bus automation platform: stream live events
//! over WebSocket, trigger test events, create payments, inspect and replay
//! webhook deliveries, scaffold zone and flow files, and serve the studio
//! UI locally.
//!
//! Event and command output goes to stdout; logs go to stderr so streams
//! stay pipeable.

#![deny(unsafe_code)]

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "gekko", version, about = "Event-bus platform CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// All gekko subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to an event-bus endpoint and stream events.
    Connect(commands::connect::ConnectArgs),
    /// Stream platform events for a zone in real time.
    Listen(commands::listen::ListenArgs),
    /// Trigger a mock event through the platform API.
    Trigger(commands::trigger::TriggerArgs),
    /// Payment operations.
    #[command(subcommand)]
    Payments(commands::payments::PaymentsCommand),
    /// Webhook delivery operations.
    #[command(subcommand)]
    Webhooks(commands::webhooks::WebhooksCommand),
    /// Flow run operations.
    #[command(subcommand)]
    Flows(commands::flows::FlowsCommand),
    /// Scaffold zone and flow definition files.
    #[command(subcommand)]
    Generate(commands::generate::GenerateCommand),
    /// Serve the studio UI locally.
    Studio(commands::studio::StudioArgs),
    /// Interactive shell for emitting test events.
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = gekko_settings::load_settings().context("failed to load settings")?;

    match cli.command {
        Command::Connect(args) => commands::connect::run(args, &settings).await,
        Command::Listen(args) => commands::listen::run(args, &settings).await,
        Command::Trigger(args) => commands::trigger::run(args, &settings).await,
        Command::Payments(command) => commands::payments::run(command, &settings).await,
        Command::Webhooks(command) => commands::webhooks::run(command, &settings).await,
        Command::Flows(command) => commands::flows::run(command, &settings).await,
        Command::Generate(command) => commands::generate::run(&command),
        Command::Studio(args) => commands::studio::run(args, &settings).await,
        Command::Repl => commands::repl::run(&settings).await,
    }
}

/// Route logs to stderr so event output owns stdout.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_connect_with_defaults() {
        let cli = Cli::parse_from(["gekko", "connect"]);
        let Command::Connect(args) = cli.command else {
            panic!("expected connect");
        };
        assert_eq!(args.url, None);
        assert_eq!(args.key, None);
        assert_eq!(args.trigger, None);
    }

    #[test]
    fn parses_connect_with_url_key_and_trigger() {
        let cli = Cli::parse_from([
            "gekko",
            "connect",
            "ws://example.dev/ws",
            "-k",
            "sk_test_9",
            "-t",
            r#"{"type":"ping"}"#,
        ]);
        let Command::Connect(args) = cli.command else {
            panic!("expected connect");
        };
        assert_eq!(args.url.as_deref(), Some("ws://example.dev/ws"));
        assert_eq!(args.key.as_deref(), Some("sk_test_9"));
        assert_eq!(args.trigger.as_deref(), Some(r#"{"type":"ping"}"#));
    }

    #[test]
    fn parses_listen_flags() {
        let cli = Cli::parse_from(["gekko", "listen", "-z", "orders", "-v", "-f", "payment"]);
        let Command::Listen(args) = cli.command else {
            panic!("expected listen");
        };
        assert_eq!(args.zone.as_deref(), Some("orders"));
        assert!(args.verbose);
        assert_eq!(args.filter.as_deref(), Some("payment"));
    }

    #[test]
    fn parses_trigger_with_default_data() {
        let cli = Cli::parse_from(["gekko", "trigger", "payment.created"]);
        let Command::Trigger(args) = cli.command else {
            panic!("expected trigger");
        };
        assert_eq!(args.event_type, "payment.created");
        assert_eq!(args.data, "{}");
        assert_eq!(args.zone, None);
    }

    #[test]
    fn parses_payments_create() {
        let cli = Cli::parse_from(["gekko", "payments", "create", "-a", "4200", "-c", "EUR"]);
        let Command::Payments(commands::payments::PaymentsCommand::Create { amount, currency }) =
            cli.command
        else {
            panic!("expected payments create");
        };
        assert_eq!(amount, 4200);
        assert_eq!(currency, "EUR");
    }

    #[test]
    fn payments_create_defaults_to_usd() {
        let cli = Cli::parse_from(["gekko", "payments", "create", "-a", "100"]);
        let Command::Payments(commands::payments::PaymentsCommand::Create { currency, .. }) =
            cli.command
        else {
            panic!("expected payments create");
        };
        assert_eq!(currency, "USD");
    }

    #[test]
    fn parses_webhooks_list_defaults() {
        let cli = Cli::parse_from(["gekko", "webhooks", "list"]);
        let Command::Webhooks(commands::webhooks::WebhooksCommand::List { limit, status, zone }) =
            cli.command
        else {
            panic!("expected webhooks list");
        };
        assert_eq!(limit, 20);
        assert_eq!(status, None);
        assert_eq!(zone, None);
    }

    #[test]
    fn parses_webhooks_replay_failed() {
        let cli = Cli::parse_from([
            "gekko",
            "webhooks",
            "replay-failed",
            "--since",
            "2025-08-25T00:00:00Z",
            "--dry-run",
        ]);
        let Command::Webhooks(commands::webhooks::WebhooksCommand::ReplayFailed {
            since,
            dry_run,
        }) = cli.command
        else {
            panic!("expected replay-failed");
        };
        assert_eq!(since.as_deref(), Some("2025-08-25T00:00:00Z"));
        assert!(dry_run);
    }

    #[test]
    fn parses_generate_zone() {
        let cli = Cli::parse_from(["gekko", "generate", "zone", "Payments"]);
        let Command::Generate(commands::generate::GenerateCommand::Zone { name }) = cli.command
        else {
            panic!("expected generate zone");
        };
        assert_eq!(name, "Payments");
    }

    #[test]
    fn parses_studio_overrides() {
        let cli = Cli::parse_from(["gekko", "studio", "-p", "4171", "--dir", "/tmp/studio"]);
        let Command::Studio(args) = cli.command else {
            panic!("expected studio");
        };
        assert_eq!(args.port, Some(4171));
        assert_eq!(args.dir.as_deref(), Some(std::path::Path::new("/tmp/studio")));
    }

    #[test]
    fn parses_repl() {
        let cli = Cli::parse_from(["gekko", "repl"]);
        assert!(matches!(cli.command, Command::Repl));
    }
}
