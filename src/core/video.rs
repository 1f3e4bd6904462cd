//! External video references: id extraction and the templated URLs the
//! gallery links to.

use std::sync::LazyLock;

use regex::Regex;

/// Length of a YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

/// Accepts `youtube.com/watch?v=`, `/embed/`, `/v/`, `/e/`, channel-style
/// `/<user>/<x>/` paths and `youtu.be/` short links.
static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("video url pattern is valid")
});

/// Pull the 11-character video id out of a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_URL_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Does `id` look like something [`extract_video_id`] could have produced?
pub fn is_valid_video_id(id: &str) -> bool {
    id.chars().count() == VIDEO_ID_LEN
        && id
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, '"' | '&' | '?' | '/'))
}

// ───────────────────────────────────────── urls ──────────────

/// Templated locations of a video's player page and thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    /// Prefix the id is appended to for the playable page.
    pub watch_base: String,
    /// Prefix of the thumbnail path, followed by `<id>/<variant>.jpg`.
    pub thumbnail_base: String,
    pub thumbnail_variant: String,
}

impl Default for MediaUrls {
    fn default() -> Self {
        Self {
            watch_base: "https://www.youtube.com/watch?v=".into(),
            thumbnail_base: "https://img.youtube.com/vi/".into(),
            thumbnail_variant: "maxresdefault".into(),
        }
    }
}

impl MediaUrls {
    pub fn watch_url(&self, video_id: &str) -> String {
        format!("{}{video_id}", self.watch_base)
    }

    pub fn thumbnail_url(&self, video_id: &str) -> String {
        format!(
            "{}{video_id}/{}.jpg",
            self.thumbnail_base, self.thumbnail_variant
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_and_short_links() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=3",
            "  https://youtu.be/dQw4w9WgXcQ  ",
        ] {
            assert_eq!(extract_video_id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn rejects_foreign_or_short_urls() {
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn validates_id_shape() {
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(!is_valid_video_id("dQw4w9WgXc"));
        assert!(!is_valid_video_id("dQw4w9/gXcQ"));
    }

    #[test]
    fn builds_templated_urls() {
        let urls = MediaUrls::default();
        assert_eq!(
            urls.watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            urls.thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }
}
