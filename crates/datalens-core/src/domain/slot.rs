use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::domain::chart_id::{AnalyticalChart, ChartId, KpiChart, NONE_ID};

/// Which part of the catalog a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
  /// Compact tiles on the top row: KPI identifiers only.
  Kpi,
  /// Large panels: analytical identifiers only.
  Chart,
}

/// One of the eight independently selectable positions of a dashboard.
///
/// Serialized as its column name (`kpi_1` .. `kpi_4`, `viz_1` .. `viz_4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
  kind: SlotKind,
  /// Zero based, `0..SLOTS_PER_KIND`.
  index: u8,
}

pub const SLOTS_PER_KIND: usize = 4;
pub const SLOT_COUNT: usize = 2 * SLOTS_PER_KIND;

impl Slot {
  /// Layout order: the four KPI tiles, then the four chart panels.
  pub const ALL: [Slot; SLOT_COUNT] = [
    Slot { kind: SlotKind::Kpi, index: 0 },
    Slot { kind: SlotKind::Kpi, index: 1 },
    Slot { kind: SlotKind::Kpi, index: 2 },
    Slot { kind: SlotKind::Kpi, index: 3 },
    Slot { kind: SlotKind::Chart, index: 0 },
    Slot { kind: SlotKind::Chart, index: 1 },
    Slot { kind: SlotKind::Chart, index: 2 },
    Slot { kind: SlotKind::Chart, index: 3 },
  ];

  /// `number` is one based, as in the column names.
  pub fn new(kind: SlotKind, number: usize) -> Option<Slot> {
    (1..=SLOTS_PER_KIND).contains(&number).then(|| Slot { kind, index: (number - 1) as u8 })
  }

  pub fn kind(&self) -> SlotKind {
    self.kind
  }

  /// Position in [`Slot::ALL`].
  pub fn position(&self) -> usize {
    let base = match self.kind {
      SlotKind::Kpi => 0,
      SlotKind::Chart => SLOTS_PER_KIND,
    };
    base + self.index as usize
  }

  pub fn column(&self) -> &'static str {
    const KPI: [&str; SLOTS_PER_KIND] = ["kpi_1", "kpi_2", "kpi_3", "kpi_4"];
    const VIZ: [&str; SLOTS_PER_KIND] = ["viz_1", "viz_2", "viz_3", "viz_4"];

    match self.kind {
      SlotKind::Kpi => KPI[self.index as usize],
      SlotKind::Chart => VIZ[self.index as usize],
    }
  }

  pub fn accepts(&self, id: ChartId) -> bool {
    matches!((self.kind, id), (SlotKind::Kpi, ChartId::Kpi(_)) | (SlotKind::Chart, ChartId::Analytical(_)))
  }

  /// Maps a raw slot value to the chart it shows here.
  ///
  /// `"none"`, unknown identifiers and identifiers of the other slot kind all
  /// resolve to `None`.
  pub fn resolve(&self, raw: &str) -> Option<ChartId> {
    ChartId::parse_selection(raw).filter(|id| self.accepts(*id))
  }

  /// The closed menu a presentation layer must offer for this slot.
  pub fn menu(&self) -> Vec<MenuOption> {
    let ids: Vec<ChartId> = match self.kind {
      SlotKind::Kpi => KpiChart::ALL.into_iter().map(ChartId::from).collect(),
      SlotKind::Chart => AnalyticalChart::ALL.into_iter().map(ChartId::from).collect(),
    };

    ids
      .into_iter()
      .map(|id| MenuOption { value: id.as_str(), label: id.label() })
      .chain(std::iter::once(MenuOption { value: NONE_ID, label: "None" }))
      .collect()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuOption {
  pub value: &'static str,
  pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dashboard slot: {input}")]
pub struct SlotParseError {
  pub input: String,
}

impl FromStr for Slot {
  type Err = SlotParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Slot::ALL.into_iter().find(|slot| slot.column() == s).ok_or_else(|| SlotParseError { input: s.to_string() })
  }
}

impl TryFrom<String> for Slot {
  type Error = SlotParseError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Slot> for String {
  fn from(slot: Slot) -> Self {
    slot.column().to_string()
  }
}

impl fmt::Display for Slot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.column())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn columns_follow_layout_order() {
    let columns: Vec<&str> = Slot::ALL.iter().map(Slot::column).collect();
    assert_eq!(columns, ["kpi_1", "kpi_2", "kpi_3", "kpi_4", "viz_1", "viz_2", "viz_3", "viz_4"]);

    for (i, slot) in Slot::ALL.iter().enumerate() {
      assert_eq!(slot.position(), i);
      assert_eq!(slot.column().parse::<Slot>(), Ok(*slot));
    }
  }

  #[test]
  fn slot_kind_restricts_identifiers() {
    let kpi = Slot::new(SlotKind::Kpi, 1).unwrap();
    let viz = Slot::new(SlotKind::Chart, 4).unwrap();

    assert_eq!(kpi.resolve("artist_count"), Some(ChartId::Kpi(KpiChart::ArtistCount)));
    assert_eq!(kpi.resolve("heatmap"), None);
    assert_eq!(viz.resolve("heatmap"), Some(ChartId::Analytical(AnalyticalChart::Heatmap)));
    assert_eq!(viz.resolve("album_count"), None);
    assert_eq!(viz.resolve("none"), None);
  }

  #[test]
  fn menus_are_closed_and_end_with_none() {
    let kpi_menu = Slot::ALL[0].menu();
    let viz_menu = Slot::ALL[7].menu();

    assert_eq!(kpi_menu.len(), 5);
    assert_eq!(viz_menu.len(), 11);
    assert_eq!(kpi_menu.last().map(|o| o.value), Some("none"));
    assert_eq!(viz_menu.last().map(|o| o.value), Some("none"));
  }

  #[test]
  fn slot_numbers_are_one_based() {
    assert!(Slot::new(SlotKind::Kpi, 0).is_none());
    assert!(Slot::new(SlotKind::Kpi, 5).is_none());
    assert_eq!(Slot::new(SlotKind::Chart, 1).map(|s| s.column()), Some("viz_1"));
  }
}
