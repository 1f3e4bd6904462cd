//! Normalization: map either document shape onto one grouped layout.
//!
//! Every default the renderer needs (group width, item width, legacy `size`
//! translation, sort position) is resolved here, once, so the markup layer
//! only ever sees fully-populated [`ResolvedItem`]s.

use super::model::{Document, Group, Item, MediaType};
use super::video::is_valid_video_id;

// ───────────────────────────────────────── defaults ──────────

/// Width tokens and sort position used when a document leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDefaults {
    /// Column width for a group without `width`.
    pub group_width: String,
    /// Item width when a layout block exists but has no `width`.
    pub item_width: String,
    /// Item width in the flat (filtered) view for items with no layout block.
    pub unplaced_item_width: String,
    /// Legacy `size: "full"`.
    pub legacy_full_width: String,
    /// Legacy `size` anything else.
    pub legacy_half_width: String,
    pub position: i64,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            group_width: "w-full".into(),
            item_width: "w-full".into(),
            unplaced_item_width: "w-full md:w-1/2".into(),
            legacy_full_width: "w-full".into(),
            legacy_half_width: "w-full md:w-1/2".into(),
            position: 0,
        }
    }
}

// ───────────────────────────────────────── resolved types ────

/// An item with every display attribute filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub id: u64,
    pub kind: MediaType,
    pub src: String,
    /// Set only for videos whose id is well-formed.
    pub video_id: Option<String>,
    /// Empty when the source had no `alt`.
    pub alt: String,
    /// Missing categories stay missing; the filter attribute is then omitted.
    pub category: Option<String>,
    /// Width inside its group.
    pub width: String,
    /// Width in the flat, filtered view.
    pub flat_width: String,
    pub position: i64,
    /// Index in the group's source array, before position sorting.
    pub source_index: usize,
}

/// A column of items, already in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub id: String,
    pub width: String,
    pub items: Vec<ResolvedItem>,
}

/// Canonical, always-grouped view of a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryLayout {
    pub groups: Vec<ResolvedGroup>,
}

impl GalleryLayout {
    /// Every item once, in document order (group order, then source order).
    pub fn flattened(&self) -> Vec<&ResolvedItem> {
        self.groups
            .iter()
            .flat_map(|group| {
                let mut items: Vec<&ResolvedItem> = group.items.iter().collect();
                items.sort_by_key(|i| i.source_index);
                items
            })
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

// ───────────────────────────────────────── algorithm ─────────

/// Resolve `doc` into a [`GalleryLayout`].
///
/// - Grouped documents keep their groups in array order; items inside each
///   group are stably sorted by `layout.position` (absent = `defaults.position`),
///   so ties keep their source order.
/// - Legacy documents become one synthetic group; `size: "full"` maps to the
///   full-width token, anything else to the half-width one.
pub fn normalize(doc: &Document, defaults: &LayoutDefaults) -> GalleryLayout {
    match doc {
        Document::Grouped { groups, .. } => GalleryLayout {
            groups: groups.iter().map(|g| resolve_group(g, defaults)).collect(),
        },
        Document::Legacy { images, .. } => {
            let items = images
                .iter()
                .enumerate()
                .map(|(idx, item)| resolve_legacy_item(item, idx, defaults))
                .collect();
            GalleryLayout {
                groups: vec![ResolvedGroup {
                    id: String::new(),
                    width: defaults.group_width.clone(),
                    items,
                }],
            }
        }
    }
}

fn resolve_group(group: &Group, defaults: &LayoutDefaults) -> ResolvedGroup {
    let mut items: Vec<ResolvedItem> = group
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| resolve_item(item, idx, defaults))
        .collect();
    // `sort_by_key` is stable: equal positions keep insertion order.
    items.sort_by_key(|i| i.position);
    ResolvedGroup {
        id: group.id.clone(),
        width: group
            .width
            .clone()
            .unwrap_or_else(|| defaults.group_width.clone()),
        items,
    }
}

fn resolve_item(item: &Item, source_index: usize, defaults: &LayoutDefaults) -> ResolvedItem {
    let (width, flat_width) = match &item.layout {
        Some(layout) => {
            let w = layout
                .width
                .clone()
                .unwrap_or_else(|| defaults.item_width.clone());
            (w.clone(), w)
        }
        None => (
            defaults.item_width.clone(),
            defaults.unplaced_item_width.clone(),
        ),
    };
    let position = item
        .layout
        .as_ref()
        .and_then(|l| l.position)
        .unwrap_or(defaults.position);
    base_item(item, source_index, width, flat_width, position)
}

fn resolve_legacy_item(item: &Item, source_index: usize, defaults: &LayoutDefaults) -> ResolvedItem {
    let width = if item.size.as_deref() == Some("full") {
        defaults.legacy_full_width.clone()
    } else {
        defaults.legacy_half_width.clone()
    };
    base_item(item, source_index, width.clone(), width, defaults.position)
}

fn base_item(
    item: &Item,
    source_index: usize,
    width: String,
    flat_width: String,
    position: i64,
) -> ResolvedItem {
    let kind = item.media_type();
    let video_id = match (kind, item.video_id.as_deref()) {
        (MediaType::Video, Some(id)) if is_valid_video_id(id) => Some(id.to_string()),
        (MediaType::Video, other) => {
            tracing::warn!(
                "video item {} has no usable videoId ({other:?}), rendering it as a plain tile",
                item.id
            );
            None
        }
        (MediaType::Image, _) => None,
    };
    ResolvedItem {
        id: item.id,
        kind,
        src: item.src.clone().unwrap_or_default(),
        video_id,
        alt: item.alt_text().to_string(),
        category: item.category.clone().filter(|c| !c.is_empty()),
        width,
        flat_width,
        position,
        source_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ItemLayout;

    fn placed(id: u64, position: Option<i64>) -> Item {
        Item {
            id,
            src: Some(format!("{id}.jpg")),
            layout: Some(ItemLayout {
                width: Some("w-full".into()),
                position,
            }),
            ..Item::default()
        }
    }

    fn ids(group: &ResolvedGroup) -> Vec<u64> {
        group.items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn sorts_by_position_within_group() {
        let doc = Document::grouped(vec![Group {
            id: "g1".into(),
            items: vec![placed(1, Some(2)), placed(2, Some(1))],
            ..Group::default()
        }]);
        let layout = normalize(&doc, &LayoutDefaults::default());
        assert_eq!(ids(&layout.groups[0]), vec![2, 1]);
    }

    #[test]
    fn equal_and_missing_positions_keep_source_order() {
        let doc = Document::grouped(vec![Group {
            id: "g".into(),
            items: vec![
                placed(5, Some(3)),
                placed(1, None),
                placed(4, Some(3)),
                placed(2, Some(0)),
                placed(3, Some(-1)),
            ],
            ..Group::default()
        }]);
        let layout = normalize(&doc, &LayoutDefaults::default());
        assert_eq!(ids(&layout.groups[0]), vec![3, 1, 2, 5, 4]);
        // The flat view ignores positions.
        let flat: Vec<_> = layout.flattened().iter().map(|i| i.id).collect();
        assert_eq!(flat, vec![5, 1, 4, 2, 3]);
    }

    #[test]
    fn legacy_size_maps_to_width_tokens() {
        let mut full = Item {
            id: 1,
            ..Item::default()
        };
        full.size = Some("full".into());
        let mut half = Item {
            id: 2,
            ..Item::default()
        };
        half.size = Some("half".into());
        let bare = Item {
            id: 3,
            ..Item::default()
        };
        let layout = normalize(
            &Document::legacy(vec![full, half, bare]),
            &LayoutDefaults::default(),
        );
        assert_eq!(layout.groups.len(), 1);
        let widths: Vec<_> = layout.groups[0].items.iter().map(|i| i.width.as_str()).collect();
        assert_eq!(widths, vec!["w-full", "w-full md:w-1/2", "w-full md:w-1/2"]);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let doc = Document::grouped(vec![Group {
            id: "g".into(),
            items: vec![Item {
                id: 7,
                category: Some(String::new()),
                ..Item::default()
            }],
            ..Group::default()
        }]);
        let layout = normalize(&doc, &LayoutDefaults::default());
        let group = &layout.groups[0];
        assert_eq!(group.width, "w-full");
        let item = &group.items[0];
        assert_eq!(item.alt, "");
        assert_eq!(item.category, None);
        assert_eq!(item.width, "w-full");
        assert_eq!(item.flat_width, "w-full md:w-1/2");
        assert_eq!(item.kind, MediaType::Image);
    }

    #[test]
    fn malformed_video_ids_are_dropped() {
        let video = |id: u64, video_id: Option<&str>| Item {
            id,
            kind: Some(MediaType::Video),
            video_id: video_id.map(str::to_string),
            ..Item::default()
        };
        let doc = Document::legacy(vec![
            video(1, Some("dQw4w9WgXcQ")),
            video(2, None),
            video(3, Some("short")),
        ]);
        let layout = normalize(&doc, &LayoutDefaults::default());
        let ids: Vec<_> = layout.groups[0]
            .items
            .iter()
            .map(|i| i.video_id.as_deref())
            .collect();
        assert_eq!(ids, vec![Some("dQw4w9WgXcQ"), None, None]);
        assert!(layout.groups[0].items.iter().all(|i| i.kind == MediaType::Video));
    }
}
