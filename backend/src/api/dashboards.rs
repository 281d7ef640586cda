use axum::{
  Json,
  extract::{Path, State},
};
use datalens_core::domain::{DashboardDefinition, DashboardId};
use serde::Serialize;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::figure::Widget;
use crate::session::CurrentUser;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
  pub id: String,
  pub name: String,
  pub created_at: String,
  pub location: String,
}

impl From<&DashboardDefinition> for DashboardSummary {
  fn from(d: &DashboardDefinition) -> Self {
    DashboardSummary {
      id: d.id.to_string(),
      name: d.name.clone(),
      created_at: d.created_at.to_rfc3339(),
      location: format!("/dashboard-view/{}", d.id),
    }
  }
}

/// GET /api/dashboards
pub async fn list(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<DashboardSummary>>> {
  let definitions = state.dashboards.list(user).await?;
  Ok(Json(definitions.iter().map(DashboardSummary::from).collect()))
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
  #[serde(flatten)]
  pub summary: DashboardSummary,
  pub widgets: Vec<Widget>,
}

/// GET /dashboard-view/{id}
///
/// A malformed id is reported the same way as an unknown one.
pub async fn view(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<String>,
) -> ApiResult<Json<DashboardPage>> {
  let id: DashboardId = id.parse().map_err(|_| ApiError::NotFound(format!("no dashboard '{id}'")))?;

  let view = state.dashboards.load(user, id).await?;

  let widgets = view.slots.iter().map(|s| Widget::new(Some(s.slot), s.identifier.clone(), &s.outcome)).collect();
  Ok(Json(DashboardPage { summary: DashboardSummary::from(&view.definition), widgets }))
}
