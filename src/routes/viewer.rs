use log::debug;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;

use crate::catalog::Catalog;
use crate::config::GalleryConfig;
use crate::render;
use crate::session::ViewerSession;
use crate::viewer::{Key, OpenOutcome, Viewer, ViewerFrame, ViewerRegistry};

type Overlay = Result<RawHtml<String>, Status>;

fn overlay(viewer: &Viewer, cfg: &GalleryConfig) -> RawHtml<String> {
    RawHtml(render::render_viewer(&viewer.frame(), cfg.locale.messages()))
}

// ── State ──────────────────────────────────────────────

#[get("/")]
pub async fn frame(session: ViewerSession, viewers: &State<ViewerRegistry>) -> Json<ViewerFrame> {
    let handle = viewers.session(&session.0);
    let v = handle.lock().await;
    Json(v.frame())
}

#[get("/overlay")]
pub async fn overlay_html(
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    cfg: &State<GalleryConfig>,
) -> RawHtml<String> {
    let handle = viewers.session(&session.0);
    let v = handle.lock().await;
    overlay(&v, cfg)
}

// ── Transitions ────────────────────────────────────────

#[post("/open/<id>")]
pub async fn open(
    id: &str,
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    catalog: &State<Catalog>,
    cfg: &State<GalleryConfig>,
) -> Overlay {
    let handle = viewers.session(&session.0);
    let mut v = handle.lock().await;
    let outcome = v
        .open_by_id(id, catalog.source())
        .await
        .map_err(|_| Status::InternalServerError)?;
    match outcome {
        OpenOutcome::Opened => Ok(overlay(&v, cfg)),
        OpenOutcome::NotFound => {
            let msgs = cfg.locale.messages();
            Ok(RawHtml(render::render_viewer_notice(msgs.project_not_found, msgs)))
        }
    }
}

#[post("/next")]
pub async fn next(
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    catalog: &State<Catalog>,
    cfg: &State<GalleryConfig>,
) -> Overlay {
    let handle = viewers.session(&session.0);
    let mut v = handle.lock().await;
    v.next(catalog.source())
        .await
        .map_err(|_| Status::InternalServerError)?;
    Ok(overlay(&v, cfg))
}

#[post("/prev")]
pub async fn prev(
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    catalog: &State<Catalog>,
    cfg: &State<GalleryConfig>,
) -> Overlay {
    let handle = viewers.session(&session.0);
    let mut v = handle.lock().await;
    v.prev(catalog.source())
        .await
        .map_err(|_| Status::InternalServerError)?;
    Ok(overlay(&v, cfg))
}

#[post("/close")]
pub async fn close(
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    cfg: &State<GalleryConfig>,
) -> RawHtml<String> {
    let handle = viewers.session(&session.0);
    let mut v = handle.lock().await;
    v.close();
    overlay(&v, cfg)
}

#[post("/backdrop")]
pub async fn backdrop(
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    cfg: &State<GalleryConfig>,
) -> RawHtml<String> {
    let handle = viewers.session(&session.0);
    let mut v = handle.lock().await;
    v.backdrop_click();
    overlay(&v, cfg)
}

#[post("/key/<key>")]
pub async fn keypress(
    key: &str,
    session: ViewerSession,
    viewers: &State<ViewerRegistry>,
    catalog: &State<Catalog>,
    cfg: &State<GalleryConfig>,
) -> Overlay {
    let handle = viewers.session(&session.0);
    let mut v = handle.lock().await;
    let changed = v
        .handle_key(Key::parse(key), catalog.source())
        .await
        .map_err(|_| Status::InternalServerError)?;
    debug!("Viewer key {} (changed: {}, open: {})", key, changed, v.is_open());
    Ok(overlay(&v, cfg))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![frame, overlay_html, open, next, prev, close, backdrop, keypress]
}
