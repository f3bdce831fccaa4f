//! `gekko generate` - scaffold zone and flow definition files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use gekko_core::scaffold::{FlowScaffold, ZoneScaffold};

/// Scaffolding subcommands.
#[derive(Debug, Subcommand)]
pub enum GenerateCommand {
    /// Write `<name>.zone.json` in the current directory.
    Zone {
        /// Zone name.
        name: String,
    },
    /// Write `<name>.flow.json` in the current directory.
    Flow {
        /// Flow name.
        name: String,
    },
}

/// Write the scaffold into the working directory.
pub fn run(command: &GenerateCommand) -> Result<()> {
    let dir = std::env::current_dir().context("could not resolve the working directory")?;
    let path = write_scaffold(&dir, command)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Render the scaffold JSON and write it under `dir`. Existing files are
/// never overwritten.
fn write_scaffold(dir: &Path, command: &GenerateCommand) -> Result<PathBuf> {
    let (file_name, body) = match command {
        GenerateCommand::Zone { name } => (
            ZoneScaffold::file_name(name),
            serde_json::to_string_pretty(&ZoneScaffold::new(name))?,
        ),
        GenerateCommand::Flow { name } => (
            FlowScaffold::file_name(name),
            serde_json::to_string_pretty(&FlowScaffold::new(name))?,
        ),
    };
    let path = dir.join(file_name);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    std::fs::write(&path, body).with_context(|| format!("could not write {}", path.display()))?;
    Ok(path)
}
