//! `gekko repl` - line-oriented shell for emitting test events.
//!
//! A plain read-dispatch loop. State is one variable (the active zone);
//! every command is a single API call or a print.

use std::io::Write as _;

use anyhow::Result;
use gekko_api::{ApiClient, TriggerEvent};
use gekko_settings::GekkoSettings;
use tokio::io::AsyncBufReadExt;

const HELP: &str = "Commands:\n\
    \x20 emit <type> [json]   trigger an event, e.g. emit payment.created {\"amount\":100}\n\
    \x20 zone [id]            switch zones, or show the current one\n\
    \x20 status               show the active configuration\n\
    \x20 help                 this text\n\
    \x20 exit                 leave the repl\n";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    /// `emit <type> [json]`
    Emit {
        event_type: String,
        data: Option<String>,
    },
    /// `zone [id]`
    Zone(Option<String>),
    /// `status`
    Status,
    /// `help`
    Help,
    /// `exit` or `quit`
    Exit,
    /// Anything unrecognized, kept for the error message.
    Unknown(String),
}

/// Parse one input line. Blank lines parse to `None`.
fn parse_line(line: &str) -> Option<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, Some(rest.trim())),
        None => (line, None),
    };
    let command = match (head, rest) {
        ("exit" | "quit", _) => ReplCommand::Exit,
        ("help", _) => ReplCommand::Help,
        ("status", _) => ReplCommand::Status,
        ("zone", id) => ReplCommand::Zone(
            id.filter(|name| !name.is_empty()).map(str::to_string),
        ),
        ("emit", Some(rest)) if !rest.is_empty() => {
            let (event_type, data) = match rest.split_once(' ') {
                Some((event_type, data)) => (event_type.to_string(), Some(data.trim().to_string())),
                None => (rest.to_string(), None),
            };
            ReplCommand::Emit { event_type, data }
        }
        _ => ReplCommand::Unknown(line.to_string()),
    };
    Some(command)
}

/// Run the interactive loop until `exit` or end of input.
pub async fn run(settings: &GekkoSettings) -> Result<()> {
    let client = super::api_client(settings)?;
    let mut zone = settings.api.zone.clone();

    println!("gekko repl; 'help' for commands, 'exit' to quit");
    println!("Current zone: {}", zone.as_deref().unwrap_or("(none)"));

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("gekko> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = parse_line(&line) else {
            continue;
        };
        match command {
            ReplCommand::Exit => break,
            ReplCommand::Help => print!("{HELP}"),
            ReplCommand::Status => {
                println!("API URL: {}", settings.api.base_url);
                println!("Zone:    {}", zone.as_deref().unwrap_or("(none)"));
                println!(
                    "Key:     {}",
                    if settings.api.key.is_some() {
                        "configured"
                    } else {
                        "not set"
                    }
                );
            }
            ReplCommand::Zone(None) => {
                println!("Current zone: {}", zone.as_deref().unwrap_or("(none)"));
            }
            ReplCommand::Zone(Some(id)) => {
                println!("Switched to zone {id}");
                zone = Some(id);
            }
            ReplCommand::Emit { event_type, data } => {
                emit(&client, &event_type, data.as_deref(), zone.clone()).await;
            }
            ReplCommand::Unknown(input) => {
                println!("Unknown command: {input} ('help' for commands)");
            }
        }
    }
    println!("Goodbye");
    Ok(())
}

/// Emit one event. Failures are printed, never fatal to the loop.
async fn emit(client: &ApiClient, event_type: &str, data: Option<&str>, zone: Option<String>) {
    let data: serde_json::Value = match serde_json::from_str(data.unwrap_or("{}")) {
        Ok(value) => value,
        Err(error) => {
            println!("payload is not valid JSON: {error}");
            return;
        }
    };
    let request = TriggerEvent {
        event_type: event_type.to_string(),
        zone,
        data,
    };
    match client.trigger_event(&request).await {
        Ok(()) => println!("Emitted {event_type}"),
        Err(error) => println!("emit failed: {error}"),
    }
}
