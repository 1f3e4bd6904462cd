//! Edit the gallery JSON file: `editor add | remove | list`.
//!
//! Every mutating command is one read-modify-write cycle over the whole file.
//! Invalid input is reported and leaves the file untouched.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use flex_gallery::editor::{ops, prompt, store};
use flex_gallery::{GalleryConfig, GalleryError};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = "editor", about = "Add, remove, and list gallery items")]
struct Cli {
    /// Gallery JSON file (defaults to the configured data path).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Add a new image or video.
    Add,
    /// Remove an image or video.
    Remove,
    /// List all items with layout info.
    List,
}

const USAGE: &str = "
Flexible Gallery Manager

Usage:
  editor add     - Add a new image or video
  editor remove  - Remove an image or video
  editor list    - List all items with layout info

Layout System:
  - Items are organized in groups/columns
  - Each item has flexible width and positioning
  - Supports complex multi-column layouts
";

// ───────────────────────────────────────── main ─────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => {
            tracing::debug!("unrecognised arguments: {err}");
            println!("{USAGE}");
            return Ok(());
        }
    };

    let config = GalleryConfig::load();
    let path = cli.data.unwrap_or_else(|| config.data_path.clone());

    match cli.command {
        Some(Command::Add) => add(&path, &config),
        Some(Command::Remove) => remove(&path),
        Some(Command::List) => list(&path),
        None => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

// ───────────────────────────────────────── commands ─────────

fn add(path: &Path, config: &GalleryConfig) -> Result<()> {
    let mut doc = store::read(path)?;
    let mut stdout = io::stdout().lock();
    let request = prompt::collect_add_request(&mut io::stdin().lock(), &mut stdout, &doc)?;

    let validated = match request.validate(&config.media) {
        Ok(v) => v,
        Err(err) => {
            writeln!(stdout, "Invalid input: {err}")?;
            return Ok(());
        }
    };
    let wanted_group = validated.group.clone();

    let outcome = ops::add(&mut doc, validated, &config.layout)?;
    if outcome.created_group {
        match wanted_group {
            Some(name) => writeln!(stdout, "Group \"{name}\" not found, created it.")?,
            None => writeln!(stdout, "Created new group: {}", outcome.group_id)?,
        }
    }

    store::write(path, &doc)?;
    writeln!(stdout, "Gallery file updated successfully!")?;

    if let Some(item) = doc.all_items().into_iter().find(|i| i.id == outcome.id) {
        writeln!(
            stdout,
            "\nAdded {} #{}: {}",
            item.media_type().label(),
            outcome.id,
            item.alt_text()
        )?;
    }
    Ok(())
}

fn remove(path: &Path) -> Result<()> {
    let mut doc = store::read(path)?;
    let mut stdout = io::stdout().lock();
    let Some(answer) = prompt::ask_remove_id(&mut io::stdin().lock(), &mut stdout, &doc)? else {
        return Ok(());
    };

    let removed = ops::parse_id(&answer).and_then(|id| ops::remove(&mut doc, id));
    match removed {
        Ok(removed) => {
            let from = removed
                .group_id
                .as_deref()
                .map(|g| format!(" from {g}"))
                .unwrap_or_default();
            writeln!(
                stdout,
                "Removed {}: {}{from}",
                removed.item.media_type().label(),
                removed.item.alt_text()
            )?;
            store::write(path, &doc)?;
            writeln!(stdout, "Gallery file updated successfully!")?;
        }
        Err(err @ (GalleryError::ItemNotFound(_) | GalleryError::InvalidId(_))) => {
            writeln!(stdout, "{err}")?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn list(path: &Path) -> Result<()> {
    let doc = store::read(path)?;
    ops::list(&doc, &mut io::stdout().lock())?;
    Ok(())
}
