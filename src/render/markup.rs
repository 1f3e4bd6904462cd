//! Markup generation: media elements, group columns, and the outer container.
//!
//! Pure string building over [`ResolvedItem`] / [`GalleryLayout`]; nothing
//! here touches a render target.  Lightbox binding is the host page's job:
//! we only emit the `data-fancybox` / `data-category` attributes it keys on.

use crate::core::model::MediaType;
use crate::core::normalize::{GalleryLayout, ResolvedGroup, ResolvedItem};
use crate::core::video::MediaUrls;

/// Class that keeps freshly rendered images hidden until [`reveal`] runs.
pub const HIDDEN_CLASS: &str = "opacity-0";

/// Lightbox group every media link joins.
const LIGHTBOX_GROUP: &str = "gallery";

/// Image classes as first rendered, fade-in pending.
const HIDDEN_IMG_CLASSES: &str = "block h-full w-full object-cover object-center opacity-0 animate-fade-in transition duration-500 transform scale-100 hover:scale-110";
/// [`HIDDEN_IMG_CLASSES`] minus [`HIDDEN_CLASS`].
const SHOWN_IMG_CLASSES: &str = "block h-full w-full object-cover object-center animate-fade-in transition duration-500 transform scale-100 hover:scale-110";

const PLAY_OVERLAY: &str = concat!(
    r#"<div class="absolute inset-0 flex items-center justify-center bg-black bg-opacity-30 group-hover:bg-opacity-40 transition-all duration-300">"#,
    r#"<div class="bg-white bg-opacity-90 rounded-full p-4 transform group-hover:scale-110 transition-transform duration-300">"#,
    r#"<svg class="w-8 h-8 text-gray-800 ml-1" fill="currentColor" viewBox="0 0 24 24"><path d="M8 5v14l11-7z"/></svg>"#,
    "</div></div>",
    r#"<div class="absolute top-2 left-2 bg-red-600 text-white text-xs px-2 py-1 rounded">VIDEO</div>"#,
);

// ───────────────────────────────────────── escaping ──────────

/// Escape text for use inside a double-quoted attribute or element body.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// ───────────────────────────────────────── elements ──────────

/// Render one media tile at the given width.
///
/// Both variants share the lazy-load and fade-in classes; the video variant
/// links to the external player page and overlays a play affordance.  A video
/// without a usable id falls back to a plain tile on its `src`.
pub fn render_media(item: &ResolvedItem, width: &str, urls: &MediaUrls) -> String {
    let category_attr = item
        .category
        .as_deref()
        .map(|c| format!(r#" data-category="{}""#, escape(c)))
        .unwrap_or_default();

    let (href, thumb, wrapper_extra, overlay) = match (item.kind, item.video_id.as_deref()) {
        (MediaType::Video, Some(vid)) => {
            let thumb = if item.src.is_empty() {
                urls.thumbnail_url(vid)
            } else {
                item.src.clone()
            };
            (urls.watch_url(vid), thumb, " relative group", PLAY_OVERLAY)
        }
        _ => (item.src.clone(), item.src.clone(), "", ""),
    };

    format!(
        concat!(
            r#"<div class="{width} p-1">"#,
            r#"<div class="overflow-hidden h-full w-full{wrapper}">"#,
            r#"<a href="{href}" data-fancybox="{lightbox}"{category}>"#,
            r#"<img alt="{alt}" class="{img_classes}" src="{src}" loading="lazy" />"#,
            "{overlay}</a></div></div>",
        ),
        width = escape(width),
        wrapper = wrapper_extra,
        href = escape(&href),
        lightbox = LIGHTBOX_GROUP,
        category = category_attr,
        alt = escape(&item.alt),
        img_classes = HIDDEN_IMG_CLASSES,
        src = escape(&thumb),
        overlay = overlay,
    )
}

/// Render a group column with its items in display order.
pub fn render_group(group: &ResolvedGroup, urls: &MediaUrls) -> String {
    let items: String = group
        .items
        .iter()
        .map(|item| render_media(item, &item.width, urls))
        .collect();
    format!(
        r#"<div class="flex {} flex-wrap">{items}</div>"#,
        escape(&group.width)
    )
}

/// Wrap already-rendered children in the outer gallery container.
pub fn container(children: &str) -> String {
    format!(r#"<div class="flex flex-wrap w-full">{children}</div>"#)
}

/// Render the full grouped layout.
pub fn render_layout(layout: &GalleryLayout, urls: &MediaUrls) -> String {
    let groups: String = layout
        .groups
        .iter()
        .map(|g| render_group(g, urls))
        .collect();
    container(&groups)
}

/// Drop the hidden-state class from every tile image, ending the fade-in.
///
/// Only the exact `class` attribute [`render_media`] writes is rewritten.
/// Interpolated values are escaped, so no user text can reproduce it.
pub fn reveal(markup: &str) -> String {
    markup.replace(
        &format!(r#"class="{HIDDEN_IMG_CLASSES}""#),
        &format!(r#"class="{SHOWN_IMG_CLASSES}""#),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Document, Group, Item, ItemLayout};
    use crate::core::normalize::{normalize, LayoutDefaults};

    fn layout_of(doc: &Document) -> GalleryLayout {
        normalize(doc, &LayoutDefaults::default())
    }

    fn image(id: u64, src: &str, position: i64) -> Item {
        Item {
            id,
            kind: Some(MediaType::Image),
            src: Some(src.into()),
            alt: Some(src.to_uppercase()),
            category: Some("nature".into()),
            layout: Some(ItemLayout {
                width: Some("w-full".into()),
                position: Some(position),
            }),
            ..Item::default()
        }
    }

    #[test]
    fn renders_items_in_position_order() {
        let doc = Document::grouped(vec![Group {
            id: "g1".into(),
            items: vec![image(1, "a.jpg", 2), image(2, "b.jpg", 1)],
            ..Group::default()
        }]);
        let html = render_layout(&layout_of(&doc), &MediaUrls::default());
        let a = html.find(r#"href="a.jpg""#).unwrap();
        let b = html.find(r#"href="b.jpg""#).unwrap();
        assert!(b < a, "item 2 must render before item 1");
        assert!(html.starts_with(r#"<div class="flex flex-wrap w-full"><div class="flex w-full flex-wrap">"#));
    }

    #[test]
    fn video_links_to_player_with_overlay() {
        let item = Item {
            id: 9,
            kind: Some(MediaType::Video),
            video_id: Some("dQw4w9WgXcQ".into()),
            category: Some("tutorial".into()),
            ..Item::default()
        };
        let doc = Document::grouped(vec![Group {
            id: "g".into(),
            items: vec![item],
            ..Group::default()
        }]);
        let html = render_layout(&layout_of(&doc), &MediaUrls::default());
        assert!(html.contains(r#"href="https://www.youtube.com/watch?v=dQw4w9WgXcQ""#));
        assert!(html.contains(r#"src="https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg""#));
        assert!(html.contains(">VIDEO</div>"));
        assert!(html.contains(r#"data-category="tutorial""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn missing_alt_and_category_degrade_gracefully() {
        let doc = Document::legacy(vec![Item {
            id: 1,
            src: Some("x.jpg".into()),
            ..Item::default()
        }]);
        let html = render_layout(&layout_of(&doc), &MediaUrls::default());
        assert!(html.contains(r#"alt="""#));
        assert!(!html.contains("data-category"));
        assert!(html.contains(r#"<div class="w-full md:w-1/2 p-1">"#));
    }

    #[test]
    fn video_without_id_never_links_to_empty_player() {
        let doc = Document::legacy(vec![Item {
            id: 4,
            kind: Some(MediaType::Video),
            src: Some("poster.jpg".into()),
            ..Item::default()
        }]);
        let html = render_layout(&layout_of(&doc), &MediaUrls::default());
        assert!(!html.contains("watch?v="));
        assert!(!html.contains(">VIDEO</div>"));
        assert!(html.contains(r#"href="poster.jpg""#));
    }

    #[test]
    fn escapes_interpolated_values() {
        assert_eq!(escape(r#"a "b" <c> & 'd'"#), "a &quot;b&quot; &lt;c&gt; &amp; &#39;d&#39;");
    }

    #[test]
    fn reveal_removes_hidden_state() {
        let doc = Document::legacy(vec![image(1, "a.jpg", 0)]);
        let html = render_layout(&layout_of(&doc), &MediaUrls::default());
        assert!(html.contains(HIDDEN_CLASS));
        let shown = reveal(&html);
        assert!(!shown.contains(HIDDEN_CLASS));
        assert!(shown.contains("animate-fade-in"));
    }

    #[test]
    fn hidden_and_shown_classes_differ_only_by_hidden_class() {
        assert_eq!(
            HIDDEN_IMG_CLASSES.replace(&format!("{HIDDEN_CLASS} "), ""),
            SHOWN_IMG_CLASSES
        );
    }

    #[test]
    fn reveal_leaves_user_text_alone() {
        let mut item = image(1, "a.jpg", 0);
        item.alt = Some("opacity-0 shots".into());
        let doc = Document::grouped(vec![Group {
            id: "g".into(),
            width: Some("bg-opacity-0 w-full".into()),
            items: vec![item],
            ..Group::default()
        }]);
        let shown = reveal(&render_layout(&layout_of(&doc), &MediaUrls::default()));
        assert!(shown.contains(r#"<div class="flex bg-opacity-0 w-full flex-wrap">"#));
        assert!(shown.contains(r#"alt="opacity-0 shots""#));
        assert!(shown.contains(&format!(r#"class="{SHOWN_IMG_CLASSES}""#)));
        assert!(!shown.contains(&format!(r#"class="{HIDDEN_IMG_CLASSES}""#)));
    }
}
