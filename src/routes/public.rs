use percent_encoding::percent_decode_str;
use rocket::fs::NamedFile;
use rocket::http::{Header, Status};
use rocket::response::Redirect;
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;
use std::path::{Component, Path, PathBuf};

use crate::catalog::{load_catalog, Catalog};
use crate::config::GalleryConfig;
use crate::models::portfolio::PortfolioItem;
use crate::render::{self, INDEX_PAGE, PROJECT_PAGE};
use crate::session::ViewerSession;
use crate::viewer::{Viewer, ViewerRegistry};

// ── Host pages ─────────────────────────────────────────

#[get("/")]
pub async fn index(
    cfg: &State<GalleryConfig>,
    catalog: &State<Catalog>,
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
) -> Result<Template, Status> {
    let items = load_catalog(catalog.source())
        .await
        .map_err(|_| Status::InternalServerError)?;
    let msgs = cfg.locale.messages();
    let grid = render::render_grid(&INDEX_PAGE, "portfolio-root", &items, msgs).unwrap_or_default();
    // A page load starts the visitor's viewer over, Closed.
    viewers.reset(&session.0);
    let overlay = render::render_viewer(&Viewer::new().frame(), msgs);

    Ok(Template::render(
        INDEX_PAGE.template,
        json!({
            "site_name": cfg.site_name,
            "lang": msgs.lang,
            "dir": msgs.dir,
            "content": grid,
            "overlay": overlay,
            "viewer_js": render::VIEWER_JS,
        }),
    ))
}

#[get("/project?<id>")]
pub async fn project(
    id: Option<&str>,
    cfg: &State<GalleryConfig>,
    catalog: &State<Catalog>,
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
) -> Result<Template, Status> {
    // Only fetch when there is something to look up.
    let items = match id {
        Some(_) => load_catalog(catalog.source())
            .await
            .map_err(|_| Status::InternalServerError)?,
        None => Vec::new(),
    };
    let msgs = cfg.locale.messages();
    let body = render::render_project(id, &items, cfg, msgs);
    let title = id
        .and_then(|id| PortfolioItem::find_by_id(&items, id))
        .map(|it| it.title.clone())
        .unwrap_or_default();
    viewers.reset(&session.0);
    let overlay = render::render_viewer(&Viewer::new().frame(), msgs);

    Ok(Template::render(
        PROJECT_PAGE.template,
        json!({
            "site_name": cfg.site_name,
            "lang": msgs.lang,
            "dir": msgs.dir,
            "title": title,
            "content": body,
            "overlay": overlay,
            "viewer_js": render::VIEWER_JS,
        }),
    ))
}

// ── Download ───────────────────────────────────────────

#[derive(Responder)]
pub enum Download {
    Remote(Redirect),
    Local(NamedFile, Header<'static>),
}

#[get("/download/<id>")]
pub async fn download(
    id: &str,
    cfg: &State<GalleryConfig>,
    catalog: &State<Catalog>,
) -> Result<Download, Status> {
    let items = load_catalog(catalog.source())
        .await
        .map_err(|_| Status::InternalServerError)?;
    let item = PortfolioItem::find_by_id(&items, id).ok_or(Status::NotFound)?;
    let src = item.src();

    if is_remote(src) {
        return Ok(Download::Remote(Redirect::to(src.to_string())));
    }

    let path = local_media_path(Path::new(&cfg.media_dir), src).ok_or(Status::NotFound)?;
    let file = NamedFile::open(&path).await.map_err(|_| Status::NotFound)?;
    let disposition = content_disposition(&item.title, src);
    Ok(Download::Local(file, Header::new("Content-Disposition", disposition)))
}

fn is_remote(src: &str) -> bool {
    url::Url::parse(src)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Map a site-relative media URL (`media/a.jpg`, `/media/a.jpg`, `a.jpg`)
/// into `media_dir`, percent-decoding it first. Rejects anything that
/// climbs out of it, encoded or not.
pub fn local_media_path(media_dir: &Path, src: &str) -> Option<PathBuf> {
    let rel = src.split(['?', '#']).next().unwrap_or("");
    let rel = percent_decode_str(rel).decode_utf8().ok()?;
    let rel = rel.trim_start_matches('/');
    let rel = rel.strip_prefix("media/").unwrap_or(rel);
    if rel.is_empty() {
        return None;
    }
    let rel = Path::new(rel);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(media_dir.join(rel))
}

/// `attachment` header named after the item title, keeping the media extension.
pub fn content_disposition(title: &str, src: &str) -> String {
    let ext = Path::new(src.split(['?', '#']).next().unwrap_or(""))
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    let title = title.trim();
    let title = if title.is_empty() { "file" } else { title };

    let ascii = slug::slugify(title);
    let ascii = if ascii.is_empty() { "file".to_string() } else { ascii };

    format!(
        "attachment; filename=\"{}{}\"; filename*=UTF-8''{}{}",
        ascii,
        ext,
        render::urlencode(title),
        ext
    )
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index, project, download]
}
