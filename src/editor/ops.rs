//! Editor operations: add, remove, and list items in a [`Document`].
//!
//! These mutate the in-memory document only; persisting is the caller's job
//! and happens only after an operation succeeds.

use std::io::{self, Write};

use crate::core::model::{Document, Group, Item, ItemLayout, MediaType};
use crate::core::normalize::LayoutDefaults;
use crate::core::video::{extract_video_id, MediaUrls};
use crate::error::{GalleryError, Result};

/// Category given to new images when none is entered.
pub const DEFAULT_IMAGE_CATEGORY: &str = "nature";
/// Category given to new videos when none is entered.
pub const DEFAULT_VIDEO_CATEGORY: &str = "tutorial";
pub const DEFAULT_IMAGE_WIDTH: &str = "md:w-1/2";
pub const DEFAULT_VIDEO_WIDTH: &str = "w-full";
/// New items sort after everything already placed.
pub const NEW_ITEM_POSITION: i64 = 999;
/// Width of groups the editor creates.
pub const NEW_GROUP_WIDTH: &str = "md:w-1/2";
pub const NEW_GROUP_KIND: &str = "column";
/// Group input meaning "make me a fresh group".
pub const NEW_GROUP_KEYWORD: &str = "new";

// ───────────────────────────────────────── add ───────────────

/// Everything needed to add one item, collected up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    pub kind: MediaType,
    /// Image URL, or the video's page URL.
    pub source: String,
    pub alt: String,
    pub category: String,
    /// Target group id; empty or `"new"` creates a fresh group.
    pub group: String,
    pub width: String,
}

/// An [`AddRequest`] that passed validation, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAdd {
    /// The item to insert; `id` is assigned by [`add`].
    pub item: Item,
    pub group: Option<String>,
}

impl AddRequest {
    /// Check every field and apply per-type defaults.  Nothing is mutated on
    /// failure.
    pub fn validate(&self, urls: &MediaUrls) -> Result<ValidatedAdd> {
        let source = self.source.trim();
        let (src, video_id, default_category, default_width) = match self.kind {
            MediaType::Video => {
                let id = extract_video_id(source)
                    .ok_or_else(|| GalleryError::InvalidVideoUrl(source.to_string()))?;
                (
                    urls.thumbnail_url(&id),
                    Some(id),
                    DEFAULT_VIDEO_CATEGORY,
                    DEFAULT_VIDEO_WIDTH,
                )
            }
            MediaType::Image => {
                if source.is_empty() {
                    return Err(GalleryError::MissingSource);
                }
                (
                    source.to_string(),
                    None,
                    DEFAULT_IMAGE_CATEGORY,
                    DEFAULT_IMAGE_WIDTH,
                )
            }
        };

        let item = Item {
            id: 0,
            kind: match self.kind {
                MediaType::Video => Some(MediaType::Video),
                MediaType::Image => None,
            },
            src: Some(src),
            video_id,
            alt: Some(self.alt.trim().to_string()),
            category: Some(non_empty_or(&self.category, default_category)),
            layout: Some(ItemLayout {
                width: Some(non_empty_or(&self.width, default_width)),
                position: Some(NEW_ITEM_POSITION),
            }),
            ..Item::default()
        };

        let group = match self.group.trim() {
            "" | NEW_GROUP_KEYWORD => None,
            g => Some(g.to_string()),
        };

        Ok(ValidatedAdd { item, group })
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    match value.trim() {
        "" => default.to_string(),
        v => v.to_string(),
    }
}

/// Where [`add`] put the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub id: u64,
    pub group_id: String,
    /// The group did not exist before this call.
    pub created_group: bool,
    /// A legacy flat document was converted to the grouped shape.
    pub upgraded: bool,
}

/// Insert `request` into `doc` with the next free id.  A legacy document is
/// upgraded to the grouped shape first.
pub fn add(
    doc: &mut Document,
    request: ValidatedAdd,
    defaults: &LayoutDefaults,
) -> Result<AddOutcome> {
    let id = doc.next_id()?;
    let upgraded = doc.is_legacy();
    let (mut groups, extra) = std::mem::take(doc)
        .into_grouped_parts(&defaults.legacy_full_width, &defaults.legacy_half_width);
    if upgraded {
        tracing::info!("upgraded legacy gallery to grouped layout");
    }

    let mut item = request.item;
    item.id = id;

    let (group_id, created_group) = match request.group {
        Some(wanted) => match groups.iter_mut().find(|g| g.id == wanted) {
            Some(group) => {
                group.items.push(item);
                (wanted, false)
            }
            None => {
                tracing::info!("group {wanted:?} not found, creating it");
                groups.push(new_group(wanted.clone(), item));
                (wanted, true)
            }
        },
        None => {
            let fresh = synthetic_group_id(&groups);
            groups.push(new_group(fresh.clone(), item));
            (fresh, true)
        }
    };
    *doc = Document::Grouped { groups, extra };

    Ok(AddOutcome {
        id,
        group_id,
        created_group,
        upgraded,
    })
}

fn new_group(id: String, item: Item) -> Group {
    Group {
        id,
        kind: Some(NEW_GROUP_KIND.to_string()),
        width: Some(NEW_GROUP_WIDTH.to_string()),
        items: vec![item],
        ..Group::default()
    }
}

/// `group<N>` with `N = len + 1`, bumped until it collides with nothing.
fn synthetic_group_id(groups: &[Group]) -> String {
    let mut n = groups.len() + 1;
    loop {
        let candidate = format!("group{n}");
        if !groups.iter().any(|g| g.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

// ───────────────────────────────────────── remove ────────────

/// An item taken out of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub item: Item,
    pub group_id: Option<String>,
}

/// Remove the first item with `id`.  The document is untouched on failure.
pub fn remove(doc: &mut Document, id: u64) -> Result<Removed> {
    doc.remove_item(id)
        .map(|(item, group_id)| Removed { item, group_id })
        .ok_or(GalleryError::ItemNotFound(id))
}

/// Parse a user-entered item id.
pub fn parse_id(input: &str) -> Result<u64> {
    input
        .trim()
        .parse()
        .map_err(|_| GalleryError::InvalidId(input.trim().to_string()))
}

// ───────────────────────────────────────── list ──────────────

/// Short label used in listings.
pub fn type_label(item: &Item) -> &'static str {
    match item.media_type() {
        MediaType::Video => "VIDEO",
        MediaType::Image => "IMAGE",
    }
}

/// Print the gallery layout and totals.  Read-only.
pub fn list(doc: &Document, out: &mut impl Write) -> io::Result<()> {
    let items = doc.all_items();
    if items.is_empty() {
        writeln!(out, "No items in gallery.")?;
        return Ok(());
    }

    writeln!(out, "\nGallery Layout:\n")?;
    match doc {
        Document::Grouped { groups, .. } => {
            for group in groups {
                writeln!(
                    out,
                    "Group: {} ({})",
                    group.id,
                    group.width.as_deref().unwrap_or("w-full")
                )?;
                for item in &group.items {
                    let layout = item.layout.as_ref();
                    let width = layout.and_then(|l| l.width.as_deref()).unwrap_or("w-full");
                    let position = layout
                        .and_then(|l| l.position)
                        .map_or_else(|| "?".to_string(), |p| p.to_string());
                    writeln!(out, "   {} #{}: {}", type_label(item), item.id, item.alt_text())?;
                    writeln!(
                        out,
                        "      Category: {} | Width: {width} | Pos: {position}",
                        item.category.as_deref().unwrap_or("")
                    )?;
                    if let Some(vid) = item.video_id.as_deref().filter(|_| item.is_video()) {
                        writeln!(out, "      Video ID: {vid}")?;
                    }
                }
                writeln!(out)?;
            }
        }
        Document::Legacy { images, .. } => {
            writeln!(out, "Simple Layout:\n")?;
            for item in images {
                writeln!(out, "{} #{}: {}", type_label(item), item.id, item.alt_text())?;
                writeln!(
                    out,
                    "   Category: {} | Size: {}",
                    item.category.as_deref().unwrap_or(""),
                    item.size.as_deref().unwrap_or("half")
                )?;
                if let Some(vid) = item.video_id.as_deref().filter(|_| item.is_video()) {
                    writeln!(out, "   Video ID: {vid}")?;
                }
                writeln!(out)?;
            }
        }
    }

    let videos = items.iter().filter(|i| i.is_video()).count();
    let images = items.len() - videos;
    writeln!(
        out,
        "Total: {images} images, {videos} videos ({} items)",
        items.len()
    )?;
    Ok(())
}
