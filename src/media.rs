//! Media classification and the elements the viewer mounts.
//!
//! A mounted element is an owned resource: [`MediaSlot::release`] is the only
//! way playback stops, so closing the viewer must go through it.

use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::models::portfolio::{Media, PortfolioItem, VideoSource};
use crate::render::escape_html;

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/shorts/|youtube\.com/embed/)")
        .expect("static regex")
});

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|/shorts/|/embed/)([A-Za-z0-9_-]{6,})").expect("static regex")
});

pub fn is_youtube(url: &str) -> bool {
    YOUTUBE_URL.is_match(url)
}

/// Video id from a watch, youtu.be, shorts or embed URL.
pub fn youtube_id(url: &str) -> Option<&str> {
    if !is_youtube(url) {
        return None;
    }
    YOUTUBE_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn embed_url_for_id(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?rel=0&autoplay=1", video_id)
}

/// Embeddable player URL for a shared YouTube link.
/// URLs without a recognizable id are returned unchanged.
pub fn youtube_embed_url(url: &str) -> String {
    match youtube_id(url) {
        Some(id) => embed_url_for_id(id),
        None => url.to_string(),
    }
}

pub fn classify_video(url: &str) -> VideoSource {
    match youtube_id(url) {
        Some(id) => VideoSource::YouTube {
            video_id: id.to_string(),
        },
        None => VideoSource::Direct,
    }
}

/// What the overlay shows for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaElement {
    Image { src: String, alt: String },
    Embed { src: String },
    Native { src: String },
}

impl MediaElement {
    pub fn for_item(item: &PortfolioItem) -> Self {
        match &item.media {
            Media::Image { src } => MediaElement::Image {
                src: src.clone(),
                alt: item.title.clone(),
            },
            Media::Video {
                source: VideoSource::YouTube { video_id },
                ..
            } => MediaElement::Embed {
                src: embed_url_for_id(video_id),
            },
            Media::Video { src, .. } => MediaElement::Native { src: src.clone() },
        }
    }

    /// Elements that keep playing until removed from the page.
    pub fn is_playing(&self) -> bool {
        !matches!(self, MediaElement::Image { .. })
    }

    pub fn to_html(&self) -> String {
        match self {
            MediaElement::Image { src, alt } => format!(
                r#"<img src="{}" alt="{}" style="max-width:100%;max-height:80vh;object-fit:contain">"#,
                escape_html(src),
                escape_html(alt)
            ),
            MediaElement::Embed { src } => format!(
                r#"<iframe src="{}" width="100%" height="100%" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>"#,
                escape_html(src)
            ),
            MediaElement::Native { src } => format!(
                r#"<video src="{}" controls autoplay style="max-height:80vh"></video>"#,
                escape_html(src)
            ),
        }
    }
}

/// Holds at most one mounted element.
#[derive(Debug, Default)]
pub struct MediaSlot {
    mounted: Option<MediaElement>,
}

impl MediaSlot {
    /// Mount a new element, tearing down whatever was there first.
    pub fn mount(&mut self, element: MediaElement) -> &MediaElement {
        self.release();
        self.mounted.insert(element)
    }

    /// Tear down the mounted element and hand it back.
    pub fn release(&mut self) -> Option<MediaElement> {
        let released = self.mounted.take();
        if let Some(el) = &released {
            if el.is_playing() {
                debug!("Released playing media element: {:?}", el);
            }
        }
        released
    }

    pub fn mounted(&self) -> Option<&MediaElement> {
        self.mounted.as_ref()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_none()
    }
}
