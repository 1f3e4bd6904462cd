//! Persisted gallery description: items, groups, and the two document shapes.
//!
//! The on-disk JSON comes in two flavours: the legacy flat `{ "images": [...] }`
//! list and the grouped `{ "groups": [...] }` layout.  [`Document`] keeps the
//! shape it was read with so the editor can write it back unchanged; the
//! renderer never looks at it directly and goes through
//! [`normalize`](super::normalize) instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GalleryError, Result};

// ───────────────────────────────────────── item ──────────────

/// Kind of media an item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// Per-item layout hints inside a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemLayout {
    /// CSS width token, e.g. `"w-full"` or `"md:w-1/2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Sort key among the items of the same group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// One media entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    /// `None` means the key was absent; treated as an image.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaType>,
    /// Image URL, or a video's thumbnail.  Absent keys stay absent on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(
        rename = "videoId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ItemLayout>,
    /// Legacy `"full" | "half"` sizing, only found in flat documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Keys we don't model, kept so hand-edited files survive a rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn media_type(&self) -> MediaType {
        self.kind.unwrap_or_default()
    }

    pub fn is_video(&self) -> bool {
        self.media_type() == MediaType::Video
    }

    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }
}

// ───────────────────────────────────────── group ─────────────

/// A named column of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    /// Free-form group kind; the editor writes `"column"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ───────────────────────────────────────── document ──────────

/// Id of the group legacy items are wrapped into on upgrade.
pub const UPGRADE_GROUP_ID: &str = "default";

/// The whole gallery description, in whichever shape it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocument", into = "RawDocument")]
pub enum Document {
    /// `{ "images": [...] }`
    Legacy {
        images: Vec<Item>,
        extra: Map<String, Value>,
    },
    /// `{ "groups": [...] }`
    Grouped {
        groups: Vec<Group>,
        extra: Map<String, Value>,
    },
}

impl Default for Document {
    fn default() -> Self {
        Document::Grouped {
            groups: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Wire form: both arrays optional, shape decided after parsing.
#[derive(Serialize, Deserialize)]
struct RawDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<Group>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    images: Option<Vec<Item>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        match (raw.groups, raw.images) {
            (Some(groups), _) => Document::Grouped {
                groups,
                extra: raw.extra,
            },
            (None, Some(images)) => Document::Legacy {
                images,
                extra: raw.extra,
            },
            (None, None) => Document::Grouped {
                groups: Vec::new(),
                extra: raw.extra,
            },
        }
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Legacy { images, extra } => RawDocument {
                groups: None,
                images: Some(images),
                extra,
            },
            Document::Grouped { groups, extra } => RawDocument {
                groups: Some(groups),
                images: None,
                extra,
            },
        }
    }
}

impl Document {
    /// Build a grouped document from a list of groups.
    pub fn grouped(groups: Vec<Group>) -> Self {
        Document::Grouped {
            groups,
            extra: Map::new(),
        }
    }

    /// Build a legacy flat document.
    pub fn legacy(images: Vec<Item>) -> Self {
        Document::Legacy {
            images,
            extra: Map::new(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Document::Legacy { .. })
    }

    /// Every item exactly once: group order, then item order within a group.
    pub fn all_items(&self) -> Vec<&Item> {
        match self {
            Document::Legacy { images, .. } => images.iter().collect(),
            Document::Grouped { groups, .. } => {
                groups.iter().flat_map(|g| g.items.iter()).collect()
            }
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Document::Legacy { images, .. } => images.len(),
            Document::Grouped { groups, .. } => groups.iter().map(|g| g.items.len()).sum(),
        }
    }

    /// `max(id) + 1`, or 1 for an empty document.
    pub fn next_id(&self) -> Result<u64> {
        let max = self.all_items().iter().map(|i| i.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(GalleryError::IdSpaceExhausted)
    }

    /// Groups of a grouped document; empty for the legacy shape.
    pub fn groups(&self) -> &[Group] {
        match self {
            Document::Legacy { .. } => &[],
            Document::Grouped { groups, .. } => groups.as_slice(),
        }
    }

    /// Remove the first item with `id`.  Returns the item and, for grouped
    /// documents, the id of the group it came from.
    pub fn remove_item(&mut self, id: u64) -> Option<(Item, Option<String>)> {
        match self {
            Document::Legacy { images, .. } => {
                let idx = images.iter().position(|i| i.id == id)?;
                Some((images.remove(idx), None))
            }
            Document::Grouped { groups, .. } => groups.iter_mut().find_map(|group| {
                let idx = group.items.iter().position(|i| i.id == id)?;
                Some((group.items.remove(idx), Some(group.id.clone())))
            }),
        }
    }

    /// Take the document apart as grouped data: the group list plus the
    /// top-level keys we don't model.  Legacy items are wrapped into a single
    /// [`UPGRADE_GROUP_ID`] group, their flat `size` hint carried over as an
    /// explicit layout width.
    pub fn into_grouped_parts(
        self,
        full_width: &str,
        half_width: &str,
    ) -> (Vec<Group>, Map<String, Value>) {
        let (mut items, extra) = match self {
            Document::Grouped { groups, extra } => return (groups, extra),
            Document::Legacy { images, extra } => (images, extra),
        };
        for item in &mut items {
            if item.layout.is_none() {
                let width = if item.size.as_deref() == Some("full") {
                    full_width
                } else {
                    half_width
                };
                item.layout = Some(ItemLayout {
                    width: Some(width.to_string()),
                    position: None,
                });
            }
            item.size = None;
        }
        if items.is_empty() {
            return (Vec::new(), extra);
        }
        let group = Group {
            id: UPGRADE_GROUP_ID.to_string(),
            kind: Some("column".to_string()),
            width: Some(full_width.to_string()),
            items,
            extra: Map::new(),
        };
        (vec![group], extra)
    }
}
