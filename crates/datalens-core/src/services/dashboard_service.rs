use std::sync::Arc;

use chrono::Utc;

use crate::catalog;
use crate::domain::{
  AnalyticalChart, ChartId, ChartOutcome, DashboardDefinition, DashboardDraft, DashboardId, DashboardView, Slot,
  SlotView, UserId,
};
use crate::errors::{CoreError, ValidationError};
use crate::ports::{DashboardRepository, RepoError, TrackRepository};

/// Composes, saves and replays dashboards.
///
/// Charts are always derived from the user's current records. A saved
/// dashboard only remembers which chart sits in which slot.
pub struct DashboardService<T, D>
where
  T: TrackRepository + ?Sized,
  D: DashboardRepository + ?Sized,
{
  tracks: Arc<T>,
  dashboards: Arc<D>,
}

impl<T, D> DashboardService<T, D>
where
  T: TrackRepository + ?Sized,
  D: DashboardRepository + ?Sized,
{
  pub fn new(tracks: Arc<T>, dashboards: Arc<D>) -> Self {
    Self { tracks, dashboards }
  }

  // -------- catalog views --------

  /// Immediate view of a single catalog entry.
  pub async fn render_chart(&self, user: UserId, identifier: &str) -> Result<ChartOutcome, CoreError> {
    let Some(id) = ChartId::parse_selection(identifier) else {
      return Ok(ChartOutcome::NoChart);
    };

    let records = self.tracks.records_for_user(user).await?;
    Ok(catalog::resolve(Some(id), &records))
  }

  /// All analytical charts in menu order, each isolated from the others.
  pub async fn overview(&self, user: UserId) -> Result<Vec<(AnalyticalChart, ChartOutcome)>, CoreError> {
    let records = self.tracks.records_for_user(user).await?;

    Ok(AnalyticalChart::ALL.into_iter().map(|c| (c, catalog::resolve(Some(c.into()), &records))).collect())
  }

  // -------- editor --------

  /// Applies a slot change to `draft` and returns the chart now shown there.
  ///
  /// Identifiers of the wrong kind for the slot are stored as "none". This
  /// never persists anything and never counts as a save request.
  pub async fn select_slot(
    &self,
    user: UserId,
    draft: &mut DashboardDraft,
    slot: Slot,
    identifier: &str,
  ) -> Result<ChartOutcome, CoreError> {
    let Some(id) = draft.select(slot, identifier) else {
      tracing::debug!(%slot, identifier, "slot cleared");
      return Ok(ChartOutcome::NoChart);
    };

    let records = self.tracks.records_for_user(user).await?;
    tracing::debug!(%slot, chart = %id, records = records.len(), "slot selected");

    Ok(catalog::resolve(Some(id), &records))
  }

  /// Persists the draft, if the save control was pressed since the last
  /// attempt.
  ///
  /// A press is consumed even when validation fails, so slot edits after a
  /// rejected save cannot resubmit it.
  pub async fn save(&self, user: UserId, draft: &mut DashboardDraft) -> Result<DashboardDefinition, CoreError> {
    if !draft.take_save_request() {
      return Err(ValidationError::SaveNotRequested.into());
    }

    let name = draft.title().trim().to_string();
    if name.is_empty() {
      return Err(ValidationError::EmptyName.into());
    }
    if !draft.has_selection() {
      return Err(ValidationError::NoSelection.into());
    }
    if self.dashboards.name_taken(user, &name).await? {
      return Err(ValidationError::NameTaken(name).into());
    }

    let definition = DashboardDefinition {
      id: DashboardId::new(),
      name,
      user_id: user,
      slots: draft.slot_values(),
      created_at: Utc::now(),
    };

    match self.dashboards.insert(&definition).await {
      Ok(()) => {}
      // Lost a race with a concurrent save of the same name.
      Err(RepoError::Conflict(_)) => return Err(ValidationError::NameTaken(definition.name).into()),
      Err(e) => return Err(e.into()),
    }

    tracing::info!(user = %user, dashboard = %definition.id, name = %definition.name, "dashboard saved");
    Ok(definition)
  }

  // -------- replay --------

  /// Rebuilds a saved dashboard against the owner's current records.
  ///
  /// Other users' dashboards are reported as [`CoreError::NotFound`], the
  /// same as missing ones.
  pub async fn load(&self, user: UserId, id: DashboardId) -> Result<DashboardView, CoreError> {
    let definition = match self.dashboards.get(id).await? {
      Some(d) if d.user_id == user => d,
      _ => return Err(CoreError::NotFound),
    };

    let records = self.tracks.records_for_user(user).await?;

    let slots = Slot::ALL
      .into_iter()
      .map(|slot| {
        let identifier = definition.slot(slot).map(str::to_string);
        let chart = identifier.as_deref().and_then(|i| slot.resolve(i));
        if chart.is_none() && identifier.as_deref().is_some_and(|i| i != crate::domain::NONE_ID) {
          tracing::debug!(%slot, identifier = ?identifier, "stored identifier is unknown or not valid for this slot");
        }
        SlotView { slot, identifier, outcome: catalog::resolve(chart, &records) }
      })
      .collect();

    Ok(DashboardView { definition, slots })
  }

  pub async fn list(&self, user: UserId) -> Result<Vec<DashboardDefinition>, CoreError> {
    Ok(self.dashboards.list_for_user(user).await?)
  }
}
