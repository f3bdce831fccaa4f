//! `gekko studio` - serve the studio UI from a local directory.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use axum::Router;
use clap::Args;
use gekko_settings::GekkoSettings;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

/// Arguments for `gekko studio`.
#[derive(Args, Debug)]
pub struct StudioArgs {
    /// Port to bind on localhost; defaults to the configured port.
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Directory holding the studio assets; defaults to the configured dir.
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Serve the studio assets until Ctrl-C.
pub async fn run(args: StudioArgs, settings: &GekkoSettings) -> Result<()> {
    let dir = args
        .dir
        .unwrap_or_else(|| PathBuf::from(&settings.studio.assets_dir));
    ensure!(
        dir.is_dir(),
        "studio assets directory not found: {}",
        dir.display()
    );
    let port = args.port.unwrap_or(settings.studio.port);

    let app = router(&dir);
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    info!(addr = %listener.local_addr()?, dir = %dir.display(), "studio running (Ctrl-C to stop)");

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("studio stopped");
    server.abort();
    Ok(())
}

/// Static-file router over the asset directory. Directory requests fall
/// through to their `index.html`.
fn router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        .layer(CorsLayer::permissive())
}
