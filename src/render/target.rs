//! Render targets: the single addressable container markup is mounted into.

use std::ops::Range;

/// A place rendered markup can be mounted.
pub trait RenderTarget {
    /// Replace the container's content with `markup`.
    fn mount(&mut self, markup: &str);

    /// Current container content.
    fn markup(&self) -> &str;
}

// ───────────────────────────────────────── in-memory ─────────

/// Plain string buffer; what you get when no host page is involved.
#[derive(Debug, Clone, Default)]
pub struct MarkupBuffer {
    content: String,
}

impl MarkupBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for MarkupBuffer {
    fn mount(&mut self, markup: &str) {
        self.content = markup.to_string();
    }

    fn markup(&self) -> &str {
        &self.content
    }
}

// ───────────────────────────────────────── host page ─────────

/// An HTML page with one container element addressed by id.
#[derive(Debug, Clone)]
pub struct HostPage {
    html: String,
    /// Byte range of the container's inner content within `html`.
    inner: Range<usize>,
}

impl HostPage {
    /// Find the element carrying `id="<container_id>"` in `html`.
    ///
    /// Returns `None` when there is no such element or its closing tag
    /// cannot be matched.
    pub fn locate(html: impl Into<String>, container_id: &str) -> Option<Self> {
        let html = html.into();
        let inner = find_container(&html, container_id)?;
        Some(Self { html, inner })
    }

    /// The full page, including whatever is currently mounted.
    pub fn into_html(self) -> String {
        self.html
    }
}

impl RenderTarget for HostPage {
    fn mount(&mut self, markup: &str) {
        self.html.replace_range(self.inner.clone(), markup);
        self.inner = self.inner.start..self.inner.start + markup.len();
    }

    fn markup(&self) -> &str {
        &self.html[self.inner.clone()]
    }
}

fn find_container(html: &str, container_id: &str) -> Option<Range<usize>> {
    let attr_pos = [
        format!("id=\"{container_id}\""),
        format!("id='{container_id}'"),
    ]
    .iter()
    .filter_map(|needle| {
        html.match_indices(needle.as_str())
            .map(|(i, _)| i)
            .find(|&i| is_id_attribute(html, i))
    })
    .min()?;

    let tag_start = html[..attr_pos].rfind('<')?;
    let tag_name: String = html[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if tag_name.is_empty() {
        return None;
    }
    let open_end = attr_pos + html[attr_pos..].find('>')? + 1;

    // Walk forward counting nested elements of the same tag.
    let open_pat = format!("<{tag_name}");
    let close_pat = format!("</{tag_name}");
    let mut depth = 1usize;
    let mut cursor = open_end;
    while cursor < html.len() {
        let rest = &html[cursor..];
        let next_open = rest
            .match_indices(&open_pat)
            .find(|(i, _)| is_tag_boundary(rest, i + open_pat.len()))
            .map(|(i, _)| i);
        let next_close = rest.find(&close_pat)?;
        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                cursor += o + open_pat.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(open_end..cursor + next_close);
                }
                cursor += next_close + close_pat.len();
            }
        }
    }
    None
}

/// Does the `id=` at `pos` start a standalone attribute of an open tag?
/// Rejects `data-id=`, `aria-...id=` and text that merely mentions the id.
fn is_id_attribute(html: &str, pos: usize) -> bool {
    let before = &html[..pos];
    let preceded_by_space = before.chars().next_back().is_some_and(char::is_whitespace);
    let inside_tag = match (before.rfind('<'), before.rfind('>')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        (None, _) => false,
    };
    preceded_by_space && inside_tag
}

/// Is the character at `idx` the end of a tag name (so `<div` doesn't match `<divider`)?
fn is_tag_boundary(s: &str, idx: usize) -> bool {
    s[idx..]
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><header><div>nav</div></header><div id="gallery-container" class="x"><div><p>old</p></div><div>more</div></div><footer>f</footer></body></html>"#;

    #[test]
    fn locates_container_and_its_content() {
        let page = HostPage::locate(PAGE, "gallery-container").unwrap();
        assert_eq!(page.markup(), "<div><p>old</p></div><div>more</div>");
    }

    #[test]
    fn mount_replaces_only_container_content() {
        let mut page = HostPage::locate(PAGE, "gallery-container").unwrap();
        page.mount("<b>new</b>");
        assert_eq!(page.markup(), "<b>new</b>");
        assert!(page.clone().into_html().contains(r#"class="x"><b>new</b></div><footer>"#));
        page.mount("");
        assert_eq!(page.markup(), "");
        assert!(page.into_html().ends_with("<footer>f</footer></body></html>"));
    }

    #[test]
    fn ignores_lookalike_attributes_and_text() {
        let html = concat!(
            r#"<nav data-id="gallery-container">menu</nav>"#,
            r#"<p>use id="gallery-container" here</p>"#,
            r#"<section aria-labelledby="x" class="c"  id="gallery-container">old</section>"#,
        );
        let mut page = HostPage::locate(html, "gallery-container").unwrap();
        assert_eq!(page.markup(), "old");
        page.mount("new");
        assert!(page.into_html().ends_with(r#"id="gallery-container">new</section>"#));
    }

    #[test]
    fn missing_container_is_none() {
        assert!(HostPage::locate(PAGE, "nope").is_none());
        assert!(HostPage::locate(r#"<div id="c">unterminated"#, "c").is_none());
    }

    #[test]
    fn buffer_holds_last_mount() {
        let mut buf = MarkupBuffer::new();
        buf.mount("a");
        buf.mount("b");
        assert_eq!(buf.markup(), "b");
    }
}
