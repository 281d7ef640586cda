pub mod catalog;
pub mod dashboards;
pub mod editor;
pub mod library;

use axum::Json;
use serde_json::{Value, json};

/// GET /health
pub async fn health() -> Json<Value> {
  Json(json!({
    "status": "ok",
    "service": "datalens",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}
