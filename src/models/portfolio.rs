use serde::{Deserialize, Serialize};

use crate::media;

/// One entry of the studio catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawItem", into = "RawItem")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Thumbnail URL shown on the grid card.
    pub cover: String,
    pub media: Media,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Image { src: String },
    Video { src: String, source: VideoSource },
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    YouTube { video_id: String },
    Direct,
}

/// Catalog wire shape: `{ id, title, description?, type, src, cover }`.
#[derive(Debug, Serialize, Deserialize)]
struct RawItem {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    src: String,
    #[serde(default)]
    cover: String,
}

impl TryFrom<RawItem> for PortfolioItem {
    type Error = String;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let media = match raw.kind.as_str() {
            "image" => Media::Image { src: raw.src },
            "video" => {
                let source = media::classify_video(&raw.src);
                Media::Video { src: raw.src, source }
            }
            other => {
                return Err(format!(
                    "item '{}' has unknown type '{}' (expected image or video)",
                    raw.id, other
                ))
            }
        };
        Ok(PortfolioItem {
            id: raw.id,
            title: raw.title,
            description: raw.description.filter(|d| !d.is_empty()),
            cover: raw.cover,
            media,
        })
    }
}

impl From<PortfolioItem> for RawItem {
    fn from(item: PortfolioItem) -> Self {
        let (kind, src) = match item.media {
            Media::Image { src } => ("image", src),
            Media::Video { src, .. } => ("video", src),
        };
        RawItem {
            id: item.id,
            title: item.title,
            description: item.description,
            kind: kind.to_string(),
            src,
            cover: item.cover,
        }
    }
}

impl PortfolioItem {
    /// Media URL, regardless of kind.
    pub fn src(&self) -> &str {
        match &self.media {
            Media::Image { src } | Media::Video { src, .. } => src,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self.media, Media::Video { .. })
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn find_by_id<'a>(items: &'a [PortfolioItem], id: &str) -> Option<&'a PortfolioItem> {
        items.iter().find(|it| it.id == id)
    }

    /// Index of the first item with this id.
    pub fn position(items: &[PortfolioItem], id: &str) -> Option<usize> {
        items.iter().position(|it| it.id == id)
    }
}
