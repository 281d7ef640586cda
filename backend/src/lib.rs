pub mod api;
pub mod config;
pub mod error;
pub mod figure;
pub mod session;
mod state;

use axum::{
  Router,
  routing::{delete, get, post, put},
};

pub use state::AppState;

/// Every route of the service, with `state` attached.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(api::health))
    .route("/api/catalog", get(api::catalog::menus))
    .route("/api/charts", get(api::catalog::overview))
    .route("/api/charts/{identifier}", get(api::catalog::chart))
    .route("/api/editor", get(api::editor::draft))
    .route("/api/editor/title", put(api::editor::set_title))
    .route("/api/editor/slots/{slot}", put(api::editor::select_slot))
    .route("/api/editor/save", post(api::editor::save))
    .route("/api/dashboards", get(api::dashboards::list))
    .route("/dashboard-view/{id}", get(api::dashboards::view))
    .route("/api/library/tracks", post(api::library::import))
    .route("/api/library", delete(api::library::purge))
    .with_state(state)
}
