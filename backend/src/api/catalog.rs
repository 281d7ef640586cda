use axum::{
  Json,
  extract::{Path, State},
};
use datalens_core::domain::{Slot, SlotKind, slot::MenuOption};
use serde::Serialize;

use crate::AppState;
use crate::error::ApiResult;
use crate::figure::Widget;
use crate::session::CurrentUser;

#[derive(Debug, Serialize)]
pub struct SlotMenu {
  pub slot: Slot,
  pub kind: SlotKind,
  pub options: Vec<MenuOption>,
}

/// GET /api/catalog
///
/// The closed option list of every slot, in layout order.
pub async fn menus() -> Json<Vec<SlotMenu>> {
  Json(Slot::ALL.into_iter().map(|slot| SlotMenu { slot, kind: slot.kind(), options: slot.menu() }).collect())
}

#[derive(Debug, Serialize)]
pub struct OverviewEntry {
  pub label: &'static str,
  #[serde(flatten)]
  pub widget: Widget,
}

/// GET /api/charts
pub async fn overview(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<OverviewEntry>>> {
  let charts = state.dashboards.overview(user).await?;

  let entries = charts
    .into_iter()
    .map(|(chart, outcome)| OverviewEntry {
      label: chart.label(),
      widget: Widget::new(None, Some(chart.as_str().to_string()), &outcome),
    })
    .collect();

  Ok(Json(entries))
}

/// GET /api/charts/{identifier}
///
/// Unknown identifiers are not an error; they render as an empty widget.
pub async fn chart(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Path(identifier): Path<String>,
) -> ApiResult<Json<Widget>> {
  let outcome = state.dashboards.render_chart(user, &identifier).await?;
  Ok(Json(Widget::new(None, Some(identifier), &outcome)))
}
