use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use datalens_core::domain::{Slot, chart_id::NONE_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::figure::Widget;
use crate::session::CurrentUser;

#[derive(Debug, Serialize)]
pub struct DraftView {
  pub title: String,
  /// Column name to selected identifier (`"none"` when empty).
  pub slots: BTreeMap<String, &'static str>,
}

/// GET /api/editor
pub async fn draft(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Json<DraftView> {
  let draft = state.draft(user);
  let draft = draft.lock().await;

  let slots = Slot::ALL
    .into_iter()
    .map(|slot| (slot.to_string(), draft.selection(slot).map_or(NONE_ID, |id| id.as_str())))
    .collect();

  Json(DraftView { title: draft.title().to_string(), slots })
}

#[derive(Debug, Deserialize)]
pub struct TitleInput {
  pub title: String,
}

/// PUT /api/editor/title
pub async fn set_title(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Json(input): Json<TitleInput>,
) -> StatusCode {
  state.draft(user).lock().await.set_title(input.title);
  StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
pub struct SlotInput {
  pub value: String,
}

/// PUT /api/editor/slots/{slot}
///
/// Stores the selection and returns the chart the slot now shows.
pub async fn select_slot(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Path(slot): Path<String>,
  Json(input): Json<SlotInput>,
) -> ApiResult<Json<Widget>> {
  let slot = slot.parse::<Slot>().map_err(|e| ApiError::NotFound(e.to_string()))?;

  let draft = state.draft(user);
  let mut draft = draft.lock().await;
  let outcome = state.dashboards.select_slot(user, &mut draft, slot, &input.value).await?;
  let stored = draft.selection(slot).map_or(NONE_ID, |id| id.as_str());

  Ok(Json(Widget::new(Some(slot), Some(stored.to_string()), &outcome)))
}

#[derive(Debug, Serialize)]
pub struct SavedDashboard {
  pub id: String,
  pub name: String,
  pub location: String,
}

/// POST /api/editor/save
///
/// One request is one press of the save control.
pub async fn save(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<impl IntoResponse> {
  let draft = state.draft(user);
  let mut draft = draft.lock().await;
  draft.press_save();

  let definition = state.dashboards.save(user, &mut draft).await?;
  let location = format!("/dashboard-view/{}", definition.id);

  let body = SavedDashboard { id: definition.id.to_string(), name: definition.name, location: location.clone() };
  Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}
