//! The gallery context: one loaded document bound to one render target.
//!
//! Callers construct a [`Gallery`] explicitly and drive it: `load` (the only
//! await point), then `render` / `filter_by_category`, then `reveal_after`
//! to end the fade-in.  Failures on this path are logged and leave the
//! target untouched; nothing here panics the host.

use std::path::Path;
use std::time::Duration;

use crate::config::GalleryConfig;
use crate::core::model::{Document, Item};
use crate::core::normalize::{normalize, GalleryLayout};
use crate::core::video::MediaUrls;
use crate::error::{GalleryError, Result};

use super::filter;
use super::markup;
use super::target::RenderTarget;

pub struct Gallery<T: RenderTarget> {
    config: GalleryConfig,
    target: Option<T>,
    document: Option<Document>,
    /// Normalized once per document; every render reads from here.
    layout: Option<GalleryLayout>,
}

impl<T: RenderTarget> Gallery<T> {
    /// `target` is `None` when the host has no container to mount into.
    pub fn new(target: Option<T>, config: GalleryConfig) -> Self {
        Self {
            config,
            target,
            document: None,
            layout: None,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn into_target(self) -> Option<T> {
        self.target
    }

    /// Replace the current document and re-normalize.
    pub fn set_document(&mut self, doc: Document) {
        self.layout = Some(normalize(&doc, &self.config.layout));
        self.document = Some(doc);
    }

    /// Read and parse the gallery file.  On failure the error is logged,
    /// the gallery is left without a document, and the error is returned.
    pub async fn load(&mut self, path: &Path) -> Result<()> {
        match read_document(path).await {
            Ok(doc) => {
                tracing::debug!(
                    "loaded {} items from {}",
                    doc.item_count(),
                    path.display()
                );
                self.set_document(doc);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Error loading gallery data: {err}");
                self.document = None;
                self.layout = None;
                Err(err)
            }
        }
    }

    /// Render the grouped layout into the target.
    pub fn render(&mut self) -> Result<()> {
        self.mount_with(markup::render_layout)
    }

    /// Render only the items in `category` (`"all"` for everything), flat.
    pub fn filter_by_category(&mut self, category: &str) -> Result<()> {
        self.mount_with(|layout, media| filter::render_filtered(layout, category, media))
    }

    /// `"all"` plus each distinct category; just `"all"` with no document.
    pub fn categories(&self) -> Vec<String> {
        match &self.layout {
            Some(layout) => filter::categories(layout),
            None => vec![filter::ALL.to_string()],
        }
    }

    /// Every item of the loaded document, flattened.
    pub fn all_items(&self) -> Vec<&Item> {
        self.document
            .as_ref()
            .map(Document::all_items)
            .unwrap_or_default()
    }

    /// End the fade-in now.
    pub fn reveal(&mut self) {
        if let Some(target) = self.target.as_mut() {
            let shown = markup::reveal(target.markup());
            target.mount(&shown);
        }
    }

    /// Wait out the configured grace period, then reveal.  This is a fixed
    /// delay, not a load-completion signal.
    pub async fn reveal_after(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
        self.reveal();
    }

    /// Load, render, and reveal after the configured delay.
    pub async fn init(&mut self, path: &Path) -> Result<()> {
        // A failed load is already logged; render reports the missing data.
        let _ = self.load(path).await;
        self.render()?;
        let delay = self.config.reveal_delay();
        self.reveal_after(delay).await;
        Ok(())
    }

    fn mount_with(
        &mut self,
        build: impl FnOnce(&GalleryLayout, &MediaUrls) -> String,
    ) -> Result<()> {
        let Self {
            config,
            target,
            layout,
            ..
        } = self;
        match (target.as_mut(), layout.as_ref()) {
            (Some(target), Some(layout)) => {
                target.mount(&build(layout, &config.media));
                Ok(())
            }
            (target, _) => {
                tracing::error!("Gallery container or data not found");
                if target.is_none() {
                    Err(GalleryError::MissingTarget(config.container_id.clone()))
                } else {
                    Err(GalleryError::MissingDocument)
                }
            }
        }
    }
}

async fn read_document(path: &Path) -> Result<Document> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| GalleryError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| GalleryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
