//! Category filtering over a normalized layout.
//!
//! The filtered view is flat: groups are dissolved and items are laid out as
//! one sequence in document order, each at its `flat_width`.

use crate::core::normalize::{GalleryLayout, ResolvedItem};
use crate::core::video::MediaUrls;

use super::markup::{container, render_media};

/// Sentinel category that matches every item.
pub const ALL: &str = "all";

/// `"all"` followed by each distinct category in first-seen order.
pub fn categories(layout: &GalleryLayout) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    for item in layout.flattened() {
        if let Some(cat) = &item.category {
            if !out[1..].iter().any(|c| c == cat) {
                out.push(cat.clone());
            }
        }
    }
    out
}

/// Items whose category equals `category` exactly (every item for `"all"`).
pub fn filter_items<'a>(layout: &'a GalleryLayout, category: &str) -> Vec<&'a ResolvedItem> {
    let items = layout.flattened();
    if category == ALL {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.category.as_deref() == Some(category))
        .collect()
}

/// Markup for the flat, filtered view.  No matches yields an empty container.
pub fn render_filtered(layout: &GalleryLayout, category: &str, urls: &MediaUrls) -> String {
    let tiles: String = filter_items(layout, category)
        .into_iter()
        .map(|item| render_media(item, &item.flat_width, urls))
        .collect();
    container(&tiles)
}
