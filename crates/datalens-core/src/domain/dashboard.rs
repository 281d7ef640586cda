use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::chart::Chart;
use crate::domain::chart_id::ChartId;
use crate::domain::ids::{DashboardId, UserId};
use crate::domain::slot::{SLOT_COUNT, Slot};

/// Raw slot values in [`Slot::ALL`] order.
pub type SlotValues = [Option<String>; SLOT_COUNT];

/// A persisted dashboard layout: the *choice* of charts, never their output.
///
/// Slot values are stored as raw identifier strings so that a catalog entry
/// removed later degrades to an empty slot on replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDefinition {
  pub id: DashboardId,
  pub name: String,
  pub user_id: UserId,
  pub slots: SlotValues,
  pub created_at: DateTime<Utc>,
}

impl DashboardDefinition {
  pub fn slot(&self, slot: Slot) -> Option<&str> {
    self.slots[slot.position()].as_deref()
  }
}

/// Editor state behind the dashboard builder page.
///
/// Slot changes only touch the selections; saving is gated on explicit
/// presses of the save control. Each press allows exactly one save attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardDraft {
  title: String,
  selections: [Option<ChartId>; SLOT_COUNT],
  save_presses: u64,
  handled_presses: u64,
}

impl DashboardDraft {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn set_title(&mut self, title: impl Into<String>) {
    self.title = title.into();
  }

  pub fn selection(&self, slot: Slot) -> Option<ChartId> {
    self.selections[slot.position()]
  }

  /// Stores the chart `raw` names for `slot`, or clears the slot when the
  /// value is `"none"`, unknown, or belongs to the other slot kind.
  pub fn select(&mut self, slot: Slot, raw: &str) -> Option<ChartId> {
    let resolved = slot.resolve(raw);
    self.selections[slot.position()] = resolved;
    resolved
  }

  /// Records one actuation of the save control.
  pub fn press_save(&mut self) {
    self.save_presses += 1;
  }

  /// Consumes a pending save press, if any.
  pub(crate) fn take_save_request(&mut self) -> bool {
    if self.save_presses > self.handled_presses {
      self.handled_presses = self.save_presses;
      true
    } else {
      false
    }
  }

  pub fn has_selection(&self) -> bool {
    self.selections.iter().any(Option::is_some)
  }

  /// Selections as they are persisted.
  pub fn slot_values(&self) -> SlotValues {
    self.selections.map(|s| s.map(|id| id.as_str().to_string()))
  }
}

/// Result of resolving one slot or one catalog request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
  Chart { chart: Chart },
  /// `"none"`, an empty slot, or an identifier the catalog does not know.
  NoChart,
  /// The derivation failed; only this slot is affected.
  Failed { reason: String },
}

impl ChartOutcome {
  pub fn chart(&self) -> Option<&Chart> {
    match self {
      ChartOutcome::Chart { chart } => Some(chart),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
  pub slot: Slot,
  /// Identifier as stored, before resolution.
  pub identifier: Option<String>,
  pub outcome: ChartOutcome,
}

/// A replayed dashboard: the stored definition plus freshly derived charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
  pub definition: DashboardDefinition,
  pub slots: Vec<SlotView>,
}
