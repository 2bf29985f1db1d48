use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    /// Anything the API adds later, or a missing `media_type`.
    #[default]
    #[serde(other, rename = "other")]
    Other,
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use MediaType::*;

        let x = match self {
            Image => "image",
            Video => "video",
            Other => "other",
        };

        write!(f, "{x}")
    }
}

/// One day's APOD record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub media_type: MediaType,
    /// Empty when the API omitted it.
    pub url: String,
    pub hdurl: Option<String>,
    /// Present only for some non-image items.
    pub thumbnail_url: Option<String>,
    pub copyright: Option<String>,
}

impl GalleryItem {
    pub fn is_image(&self) -> bool {
        self.media_type == MediaType::Image
    }

    /// Long-form date as shown on cards, e.g. `October 19, 2026`.
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Source for the modal's full-size image.
    pub fn full_image_url(&self) -> &str {
        self.hdurl.as_deref().unwrap_or(&self.url)
    }
}
