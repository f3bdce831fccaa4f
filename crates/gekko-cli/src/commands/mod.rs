//! Command implementations, one module per subcommand.

pub mod connect;
pub mod flows;
pub mod generate;
pub mod listen;
pub mod payments;
pub mod repl;
pub mod studio;
pub mod trigger;
pub mod webhooks;

use std::io::Write as _;

use anyhow::{Context, Result};
use gekko_api::{ApiClient, ApiConfig};
use gekko_settings::GekkoSettings;
use tokio_util::sync::CancellationToken;

/// API client wired from settings.
pub(crate) fn api_client(settings: &GekkoSettings) -> Result<ApiClient> {
    ApiClient::new(ApiConfig {
        base_url: settings.api.base_url.clone(),
        api_key: settings.api.key.clone(),
    })
    .context("failed to build the api client")
}

/// Token cancelled by the first Ctrl-C.
pub(crate) fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let signal = token.clone();
    drop(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    }));
    token
}

/// Ask a y/N question and read the answer from stdin.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    let _ = std::io::stdin()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
