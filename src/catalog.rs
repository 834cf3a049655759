use log::{error, info};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::GalleryConfig;
use crate::models::portfolio::PortfolioItem;

#[derive(Debug)]
pub enum CatalogError {
    Io(String),
    Http(String),
    Parse(String),
    DuplicateId(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog read failed: {}", e),
            CatalogError::Http(e) => write!(f, "catalog fetch failed: {}", e),
            CatalogError::Parse(e) => write!(f, "catalog is not valid: {}", e),
            CatalogError::DuplicateId(id) => write!(f, "catalog has duplicate id '{}'", id),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Where the item list comes from. Every call fetches afresh.
#[rocket::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<PortfolioItem>, CatalogError>;

    fn describe(&self) -> String;
}

pub struct FileCatalog {
    pub path: PathBuf,
}

#[rocket::async_trait]
impl CatalogSource for FileCatalog {
    async fn load(&self) -> Result<Vec<PortfolioItem>, CatalogError> {
        let raw = rocket::tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io(format!("{}: {}", self.path.display(), e)))?;
        parse_catalog(&raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpCatalog {
    pub url: url::Url,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(url: url::Url) -> Self {
        HttpCatalog {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[rocket::async_trait]
impl CatalogSource for HttpCatalog {
    async fn load(&self) -> Result<Vec<PortfolioItem>, CatalogError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Http(format!("{} returned {}", self.url, status)));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        parse_catalog(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Parse a catalog document and enforce unique ids.
pub fn parse_catalog(raw: &str) -> Result<Vec<PortfolioItem>, CatalogError> {
    let items: Vec<PortfolioItem> =
        serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId(item.id.clone()));
        }
    }
    Ok(items)
}

/// Pick a source from config.
/// Absolute http(s) URLs are fetched, relative paths are joined onto
/// `base_url` when set, anything else is read from disk.
pub fn from_config(cfg: &GalleryConfig) -> Result<Box<dyn CatalogSource>, String> {
    let source = cfg.catalog.source.trim();
    if let Ok(u) = url::Url::parse(source) {
        return match u.scheme() {
            "http" | "https" => Ok(Box::new(HttpCatalog::new(u))),
            "file" => u
                .to_file_path()
                .map(|path| Box::new(FileCatalog { path }) as Box<dyn CatalogSource>)
                .map_err(|_| format!("Unusable file URL: {}", source)),
            other => Err(format!("Unsupported catalog scheme '{}'", other)),
        };
    }
    if let Some(base) = cfg.catalog.base_url.as_deref().filter(|b| !b.is_empty()) {
        let base = url::Url::parse(base).map_err(|e| format!("Invalid base_url: {}", e))?;
        let joined = base
            .join(source)
            .map_err(|e| format!("Cannot resolve {} against {}: {}", source, base, e))?;
        return Ok(Box::new(HttpCatalog::new(joined)));
    }
    Ok(Box::new(FileCatalog {
        path: PathBuf::from(source),
    }))
}

/// Fetch the whole catalog. Failures propagate; there is no retry.
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Vec<PortfolioItem>, CatalogError> {
    match source.load().await {
        Ok(items) => {
            info!("Loaded {} portfolio item(s) from {}", items.len(), source.describe());
            Ok(items)
        }
        Err(e) => {
            error!("Catalog load from {} failed: {}", source.describe(), e);
            Err(e)
        }
    }
}

/// The configured source, held in Rocket managed state.
pub struct Catalog(Box<dyn CatalogSource>);

impl Catalog {
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Catalog(source)
    }

    pub fn source(&self) -> &dyn CatalogSource {
        self.0.as_ref()
    }
}
