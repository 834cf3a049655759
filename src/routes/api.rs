use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

use crate::catalog::{load_catalog, Catalog};
use crate::models::portfolio::PortfolioItem;

// ── Catalog document ───────────────────────────────────

#[get("/portfolio.json")]
pub async fn portfolio_json(catalog: &State<Catalog>) -> Result<Json<Vec<PortfolioItem>>, Status> {
    load_catalog(catalog.source())
        .await
        .map(Json)
        .map_err(|_| Status::InternalServerError)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![portfolio_json]
}
