//! The lightbox: a two-state (Closed/Open) viewer over one catalog item
//! with cyclic sibling navigation.

use log::{debug, warn};
use rocket::tokio::sync::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use crate::catalog::{load_catalog, CatalogError, CatalogSource};
use crate::media::{MediaElement, MediaSlot};
use crate::models::portfolio::PortfolioItem;

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn parse(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadAction {
    pub href: String,
    pub filename: String,
}

impl DownloadAction {
    pub fn for_item(item: &PortfolioItem) -> Self {
        let filename = if item.title.trim().is_empty() {
            "file".to_string()
        } else {
            item.title.clone()
        };
        DownloadAction {
            href: item.src().to_string(),
            filename,
        }
    }
}

/// Snapshot of what the overlay should display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerFrame {
    pub open: bool,
    pub item_id: Option<String>,
    pub title: String,
    pub description: String,
    pub media: Option<MediaElement>,
    pub download: Option<DownloadAction>,
    /// 1-based position and list length, when a list is held.
    pub position: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    Opened,
    NotFound,
}

#[derive(Debug, Default)]
pub struct Viewer {
    current: Option<PortfolioItem>,
    list: Option<Vec<PortfolioItem>>,
    slot: MediaSlot,
    is_open: bool,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&PortfolioItem> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn list(&self) -> Option<&[PortfolioItem]> {
        self.list.as_deref()
    }

    #[cfg(test)]
    pub fn mounted_media(&self) -> Option<&MediaElement> {
        self.slot.mounted()
    }

    /// Show `item`. A `None` list keeps whatever list was held before.
    pub fn open(&mut self, item: PortfolioItem, list: Option<Vec<PortfolioItem>>) -> ViewerFrame {
        debug!("Viewer open: {}", item.id);
        if list.is_some() {
            self.list = list;
        }
        self.current = Some(item);
        self.is_open = true;
        self.render()
    }

    /// Hide the overlay and tear down the mounted media.
    pub fn close(&mut self) -> Option<MediaElement> {
        if !self.is_open {
            return None;
        }
        debug!("Viewer close");
        self.is_open = false;
        self.slot.release()
    }

    /// Mount media for the current item and return the resulting frame.
    pub fn render(&mut self) -> ViewerFrame {
        if let Some(item) = &self.current {
            self.slot.mount(MediaElement::for_item(item));
        }
        self.frame()
    }

    /// Current frame without touching the mounted media.
    pub fn frame(&self) -> ViewerFrame {
        let open = self.is_open;
        match (&self.current, open) {
            (Some(item), true) => ViewerFrame {
                open,
                item_id: Some(item.id.clone()),
                title: item.title.clone(),
                description: item.description_or_empty().to_string(),
                media: self.slot.mounted().cloned(),
                download: Some(DownloadAction::for_item(item)),
                position: self.list.as_deref().and_then(|list| {
                    PortfolioItem::position(list, &item.id).map(|i| (i + 1, list.len()))
                }),
            },
            _ => ViewerFrame {
                open: false,
                item_id: None,
                title: String::new(),
                description: String::new(),
                media: None,
                download: None,
                position: None,
            },
        }
    }

    pub async fn next(&mut self, source: &dyn CatalogSource) -> Result<bool, CatalogError> {
        self.step(1, source).await
    }

    pub async fn prev(&mut self, source: &dyn CatalogSource) -> Result<bool, CatalogError> {
        self.step(-1, source).await
    }

    async fn step(&mut self, delta: isize, source: &dyn CatalogSource) -> Result<bool, CatalogError> {
        if !self.is_open {
            return Ok(false);
        }
        let current_id = match &self.current {
            Some(item) => item.id.clone(),
            None => return Ok(false),
        };
        if self.list.is_none() {
            self.list = Some(load_catalog(source).await?);
        }
        let list = match self.list.as_deref() {
            Some(list) if !list.is_empty() => list,
            _ => return Ok(false),
        };
        let target = step_index(PortfolioItem::position(list, &current_id), delta, list.len());
        self.current = Some(list[target].clone());
        self.render();
        Ok(true)
    }

    /// Keyboard bindings, active only while open. Returns whether anything changed.
    pub async fn handle_key(&mut self, key: Key, source: &dyn CatalogSource) -> Result<bool, CatalogError> {
        if !self.is_open {
            return Ok(false);
        }
        match key {
            Key::Escape => {
                self.close();
                Ok(true)
            }
            Key::ArrowLeft => self.prev(source).await,
            Key::ArrowRight => self.next(source).await,
            Key::Other => Ok(false),
        }
    }

    /// A click on the dimmed area outside the panel.
    pub fn backdrop_click(&mut self) {
        self.close();
    }

    /// Open by external identifier, with the freshly loaded catalog as list.
    /// An unknown id closes the viewer so nothing stays live behind the notice.
    pub async fn open_by_id(&mut self, id: &str, source: &dyn CatalogSource) -> Result<OpenOutcome, CatalogError> {
        let list = load_catalog(source).await?;
        match PortfolioItem::find_by_id(&list, id).cloned() {
            Some(item) => {
                self.open(item, Some(list));
                Ok(OpenOutcome::Opened)
            }
            None => {
                warn!("Viewer open: no item with id '{}'", id);
                self.close();
                Ok(OpenOutcome::NotFound)
            }
        }
    }
}

/// Adjacent index with wrap-around in both directions.
/// An item missing from the list steps to the first (forward) or last (backward).
pub fn step_index(position: Option<usize>, delta: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    match position {
        Some(p) => (p as isize + delta).rem_euclid(len as isize) as usize,
        None if delta >= 0 => 0,
        None => len - 1,
    }
}

/// Idle viewers are dropped after this long.
pub const VIEWER_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on live viewers; the least recently used one goes first.
pub const MAX_VIEWERS: usize = 10_000;

struct ViewerEntry {
    viewer: Arc<Mutex<Viewer>>,
    last_seen: Instant,
}

/// One viewer per visitor session, keyed by the session cookie value.
pub struct ViewerRegistry {
    entries: StdMutex<HashMap<String, ViewerEntry>>,
    idle_ttl: Duration,
    max_viewers: usize,
}

impl ViewerRegistry {
    pub fn new() -> Self {
        Self::with_limits(VIEWER_IDLE_TTL, MAX_VIEWERS)
    }

    pub fn with_limits(idle_ttl: Duration, max_viewers: usize) -> Self {
        ViewerRegistry {
            entries: StdMutex::new(HashMap::new()),
            idle_ttl,
            max_viewers: max_viewers.max(1),
        }
    }

    /// The visitor's viewer, created Closed on first use.
    pub fn session(&self, key: &str) -> Arc<Mutex<Viewer>> {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        if let Some(entry) = map.get_mut(key) {
            entry.last_seen = now;
            return entry.viewer.clone();
        }
        self.make_room(&mut map, now);
        let viewer = Arc::new(Mutex::new(Viewer::new()));
        map.insert(
            key.to_string(),
            ViewerEntry {
                viewer: viewer.clone(),
                last_seen: now,
            },
        );
        viewer
    }

    /// Replace the visitor's viewer with a fresh Closed one (a new page load).
    pub fn reset(&self, key: &str) -> Arc<Mutex<Viewer>> {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        if map.remove(key).is_none() {
            self.make_room(&mut map, now);
        }
        let viewer = Arc::new(Mutex::new(Viewer::new()));
        map.insert(
            key.to_string(),
            ViewerEntry {
                viewer: viewer.clone(),
                last_seen: now,
            },
        );
        viewer
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn make_room(&self, map: &mut HashMap<String, ViewerEntry>, now: Instant) {
        let before = map.len();
        map.retain(|_, e| now.duration_since(e.last_seen) < self.idle_ttl);
        while map.len() >= self.max_viewers {
            let oldest = map
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    map.remove(&k);
                }
                None => break,
            }
        }
        if map.len() < before {
            debug!("Dropped {} idle viewer(s)", before - map.len());
        }
    }
}

impl Default for ViewerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
