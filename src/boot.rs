use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::GalleryConfig;

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &[
    "website",
    "website/static",
    "website/static/css",
    "website/templates",
];

/// Host page templates — the site cannot render without these
const CRITICAL_TEMPLATES: &[&str] = &[
    "website/templates/index.html.tera",
    "website/templates/project.html.tera",
];

/// Critical static assets
const CRITICAL_STATIC: &[&str] = &["website/static/css/gallery.css"];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing files, and
/// aborts if critical dependencies are absent.
pub fn run(cfg: &GalleryConfig) {
    info!("Gallery boot check starting...");

    let report = check(cfg);

    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            report.warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

pub fn check(cfg: &GalleryConfig) -> BootReport {
    let mut report = BootReport::default();

    // ── 1. Directories ─────────────────────────────────
    let mut dirs: Vec<&str> = REQUIRED_DIRS.to_vec();
    dirs.push(&cfg.media_dir);
    for dir in dirs {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    report.errors += 1;
                }
            }
        }
    }

    // ── 2. Critical templates ──────────────────────────
    for file in CRITICAL_TEMPLATES {
        if !Path::new(file).exists() {
            error!("  MISSING critical template: {}", file);
            report.errors += 1;
        }
    }

    // ── 3. Critical static assets ──────────────────────
    for file in CRITICAL_STATIC {
        if !Path::new(file).exists() {
            warn!("  Missing static asset: {} (pages will be unstyled)", file);
            report.warnings += 1;
        }
    }

    // ── 4. Local catalog file ──────────────────────────
    let source = cfg.catalog.source.trim();
    let is_url = url::Url::parse(source).is_ok() || cfg.catalog.base_url.is_some();
    if !is_url && !Path::new(source).exists() {
        warn!("  Catalog file not found: {} (pages will return 500)", source);
        report.warnings += 1;
    }

    // ── 5. Rocket.toml exists ───────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found — using default config");
        report.warnings += 1;
    }

    report
}
