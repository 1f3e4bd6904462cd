//! Render a gallery document into HTML.
//!
//! With `--page`, the markup is mounted into the page's container element and
//! the whole page is printed; otherwise just the gallery markup is printed.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use flex_gallery::render::target::{HostPage, MarkupBuffer, RenderTarget};
use flex_gallery::{Gallery, GalleryConfig};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Render a media gallery document to HTML")]
struct Cli {
    /// Gallery JSON file (defaults to the configured data path).
    data: Option<PathBuf>,

    /// Host HTML page to mount the gallery into.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Id of the container element in the host page.
    #[arg(long)]
    container: Option<String>,

    /// Render the flat, filtered view for this category (`all` for every item).
    #[arg(long)]
    category: Option<String>,

    /// Print the available categories and exit.
    #[arg(long)]
    categories: bool,

    /// Write the current configuration to the config file and exit.
    #[arg(long = "init-config")]
    init_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout carries the markup
        .init();

    let cli = Cli::parse();
    let mut config = GalleryConfig::load();
    if let Some(id) = &cli.container {
        config.container_id = id.clone();
    }
    if cli.init_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let data = cli.data.clone().unwrap_or_else(|| config.data_path.clone());

    match &cli.page {
        Some(page_path) => {
            let html = tokio::fs::read_to_string(page_path)
                .await
                .with_context(|| format!("reading host page {}", page_path.display()))?;
            let target = HostPage::locate(html, &config.container_id);
            if let Some(page) = drive(Gallery::new(target, config), &cli, &data).await {
                println!("{}", page.into_html());
            }
        }
        None => {
            let gallery = Gallery::new(Some(MarkupBuffer::new()), config);
            if let Some(buf) = drive(gallery, &cli, &data).await {
                println!("{}", buf.markup());
            }
        }
    }

    Ok(())
}

/// Load, render (or filter), and reveal.  Returns the target when something
/// was mounted; rendering failures are logged, never fatal.
async fn drive<T: RenderTarget>(mut gallery: Gallery<T>, cli: &Cli, data: &Path) -> Option<T> {
    // Errors are logged inside `load`; rendering reports the missing data.
    let _ = gallery.load(data).await;

    if cli.categories {
        for category in gallery.categories() {
            println!("{category}");
        }
        return None;
    }

    let rendered = match cli.category.as_deref() {
        Some(category) => gallery.filter_by_category(category),
        None => gallery.render(),
    };
    if let Err(err) = rendered {
        tracing::warn!("nothing rendered: {err}");
        return None;
    }

    let delay = gallery.config().reveal_delay();
    gallery.reveal_after(delay).await;
    gallery.into_target()
}
