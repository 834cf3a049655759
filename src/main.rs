#[macro_use]
extern crate rocket;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::FileServer;
use rocket::http::Header;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

mod boot;
mod catalog;
mod config;
mod i18n;
mod media;
mod models;
mod render;
mod routes;
mod session;
mod viewer;


use catalog::Catalog;
use config::GalleryConfig;
use viewer::ViewerRegistry;

/// Viewer responses reflect live state and must never be cached.
pub struct NoCacheViewer;

#[rocket::async_trait]
impl Fairing for NoCacheViewer {
    fn info(&self) -> Info {
        Info { name: "No-Cache Viewer", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        if req.uri().path().starts_with("/viewer") {
            res.set_header(Header::new("Cache-Control", "no-store, no-cache, must-revalidate, max-age=0"));
            res.set_header(Header::new("Pragma", "no-cache"));
        }
    }
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the server around a catalog source. Static file mounts are added in `rocket()`.
pub fn build(cfg: GalleryConfig, catalog: Catalog) -> Rocket<Build> {
    rocket::build()
        .manage(cfg)
        .manage(catalog)
        .manage(ViewerRegistry::new())
        .attach(Template::fairing())
        .attach(NoCacheViewer)
        .mount("/", routes::public::routes())
        .mount("/", routes::api::routes())
        .mount("/viewer", routes::viewer::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let cfg = GalleryConfig::load();

    // Boot check: create directories, validate critical files
    boot::run(&cfg);

    let source = match catalog::from_config(&cfg) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Invalid catalog source '{}': {}", cfg.catalog.source, e);
            std::process::exit(1);
        }
    };
    eprintln!("Serving portfolio catalog from: {}", source.describe());

    let media_dir = cfg.media_dir.clone();
    build(cfg, Catalog::new(source))
        .mount("/static", FileServer::from("website/static"))
        .mount("/media", FileServer::from(media_dir))
}
