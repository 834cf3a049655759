use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

use crate::i18n::Locale;

pub const CONFIG_FILE: &str = "gallery.toml";

/// Site-level settings read from `gallery.toml`.
/// Rocket's own server settings stay in `Rocket.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub site_name: String,
    pub locale: Locale,
    pub contact_email: String,
    /// Directory served under `/media` and used for attachment downloads.
    pub media_dir: String,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// File path, absolute http(s) URL, or a path relative to `base_url`.
    pub source: String,
    pub base_url: Option<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            site_name: "Rabo Design".to_string(),
            locale: Locale::Fa,
            contact_email: "contact@rabodesign.ir".to_string(),
            media_dir: "website/media".to_string(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            source: "website/portfolio.json".to_string(),
            base_url: None,
        }
    }
}

impl GalleryConfig {
    /// Load `gallery.toml` from the working directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => {
                warn!("{} not found — using default gallery config", path.display());
                return Self::default();
            }
        };
        match Self::parse(&raw) {
            Ok(cfg) => {
                info!("Loaded gallery config from {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Invalid {} ({}) — using default gallery config", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }
}
