//! Decides how a [`GalleryItem`] is presented: still image, YouTube embed,
//! or some other embeddable video.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::GalleryItem;

pub const PLACEHOLDER_THUMBNAIL: &str = "https://images.unsplash.com/photo-1454789548928-9efd52dc4031?auto=format&fit=crop&w=1480&q=80";

static YOUTUBE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)(?<id>[A-Za-z0-9_-]{11})(?:["&?/\s]|$)"#,
    )
    .unwrap()
});

pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_REGEX
        .captures(url)
        .and_then(|caps| caps.name("id"))
        .map(|id| id.as_str())
}

pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=1&rel=0")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Image,
    YouTube { video_id: String },
    /// Any non-image item whose url isn't a YouTube link.
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub presentation: Presentation,
    /// `None` for images.
    pub thumbnail_url: Option<String>,
    /// `None` for images.
    pub embed_url: Option<String>,
}

impl MediaInfo {
    pub fn classify(item: &GalleryItem) -> Self {
        // media_type wins over whatever the url looks like
        if item.is_image() {
            return Self {
                presentation: Presentation::Image,
                thumbnail_url: None,
                embed_url: None,
            };
        }

        match youtube_video_id(&item.url) {
            Some(video_id) => Self {
                thumbnail_url: Some(youtube_thumbnail_url(video_id)),
                embed_url: Some(youtube_embed_url(video_id)),
                presentation: Presentation::YouTube {
                    video_id: video_id.to_owned(),
                },
            },
            None => Self {
                presentation: Presentation::Video,
                thumbnail_url: Some(
                    item.thumbnail_url
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_owned()),
                ),
                embed_url: Some(item.url.clone()),
            },
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.presentation, Presentation::Image)
    }

    pub fn is_youtube(&self) -> bool {
        matches!(self.presentation, Presentation::YouTube { .. })
    }

    pub fn is_video(&self) -> bool {
        matches!(self.presentation, Presentation::Video)
    }

    pub fn video_id(&self) -> Option<&str> {
        match &self.presentation {
            Presentation::YouTube { video_id } => Some(video_id),
            _ => None,
        }
    }

    /// Short label used on card badges and in listings.
    pub fn label(&self) -> &'static str {
        match self.presentation {
            Presentation::Image => "Image",
            Presentation::YouTube { .. } => "YouTube",
            Presentation::Video => "Video",
        }
    }
}
