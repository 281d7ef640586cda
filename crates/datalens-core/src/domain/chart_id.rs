use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Sentinel every slot menu offers for "show nothing".
pub const NONE_ID: &str = "none";

/// Analytical charts: the ones a full-width dashboard slot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticalChart {
  EnergyLoudness,
  PopularityLoudness,
  SongsPerYear,
  #[serde(rename = "top_10_artists")]
  Top10Artists,
  Genres,
  Heatmap,
  PopularityHistogram,
  DanceabilityEnergy,
  PopularityOverTime,
  LoudnessByGenre,
}

impl AnalyticalChart {
  /// Menu order.
  pub const ALL: [AnalyticalChart; 10] = [
    AnalyticalChart::EnergyLoudness,
    AnalyticalChart::PopularityLoudness,
    AnalyticalChart::SongsPerYear,
    AnalyticalChart::Top10Artists,
    AnalyticalChart::Genres,
    AnalyticalChart::Heatmap,
    AnalyticalChart::PopularityHistogram,
    AnalyticalChart::DanceabilityEnergy,
    AnalyticalChart::PopularityOverTime,
    AnalyticalChart::LoudnessByGenre,
  ];

  /// Stable identifier, as persisted in dashboard slots.
  pub fn as_str(&self) -> &'static str {
    match self {
      AnalyticalChart::EnergyLoudness => "energy_loudness",
      AnalyticalChart::PopularityLoudness => "popularity_loudness",
      AnalyticalChart::SongsPerYear => "songs_per_year",
      AnalyticalChart::Top10Artists => "top_10_artists",
      AnalyticalChart::Genres => "genres",
      AnalyticalChart::Heatmap => "heatmap",
      AnalyticalChart::PopularityHistogram => "popularity_histogram",
      AnalyticalChart::DanceabilityEnergy => "danceability_energy",
      AnalyticalChart::PopularityOverTime => "popularity_over_time",
      AnalyticalChart::LoudnessByGenre => "loudness_by_genre",
    }
  }

  /// Human readable menu label.
  pub fn label(&self) -> &'static str {
    match self {
      AnalyticalChart::EnergyLoudness => "Energy vs Loudness",
      AnalyticalChart::PopularityLoudness => "Popularity vs Loudness",
      AnalyticalChart::SongsPerYear => "Number of Songs per Year",
      AnalyticalChart::Top10Artists => "Top 10 Artists",
      AnalyticalChart::Genres => "Top 10 Genres",
      AnalyticalChart::Heatmap => "Correlation Heatmap Between Variables",
      AnalyticalChart::PopularityHistogram => "Popularity Distribution",
      AnalyticalChart::DanceabilityEnergy => "Danceability vs Energy",
      AnalyticalChart::PopularityOverTime => "Popularity Over Time",
      AnalyticalChart::LoudnessByGenre => "Loudness by Genre",
    }
  }
}

/// Single-number indicators shown in the compact KPI slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiChart {
  ArtistCount,
  SongCount,
  GenreCount,
  AlbumCount,
}

impl KpiChart {
  pub const ALL: [KpiChart; 4] =
    [KpiChart::ArtistCount, KpiChart::SongCount, KpiChart::GenreCount, KpiChart::AlbumCount];

  pub fn as_str(&self) -> &'static str {
    match self {
      KpiChart::ArtistCount => "artist_count",
      KpiChart::SongCount => "song_count",
      KpiChart::GenreCount => "genre_count",
      KpiChart::AlbumCount => "album_count",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      KpiChart::ArtistCount => "Artist Count",
      KpiChart::SongCount => "Song Count",
      KpiChart::GenreCount => "Genre Count",
      KpiChart::AlbumCount => "Album Count",
    }
  }
}

/// Any entry of the chart catalog.
///
/// This is the closed set a stored identifier string can resolve to; there
/// is no other way to name a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartId {
  Analytical(AnalyticalChart),
  Kpi(KpiChart),
}

impl ChartId {
  pub fn as_str(&self) -> &'static str {
    match self {
      ChartId::Analytical(c) => c.as_str(),
      ChartId::Kpi(k) => k.as_str(),
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ChartId::Analytical(c) => c.label(),
      ChartId::Kpi(k) => k.label(),
    }
  }

  /// Parses a slot value: `"none"` and unknown identifiers both mean
  /// "no chart", so this never fails.
  pub fn parse_selection(s: &str) -> Option<ChartId> {
    s.parse().ok()
  }
}

impl From<AnalyticalChart> for ChartId {
  fn from(c: AnalyticalChart) -> Self {
    ChartId::Analytical(c)
  }
}

impl From<KpiChart> for ChartId {
  fn from(k: KpiChart) -> Self {
    ChartId::Kpi(k)
  }
}

/// Produced when a string is not a catalog identifier (this includes `"none"`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart identifier: {input}")]
pub struct UnknownChartId {
  pub input: String,
}

impl FromStr for ChartId {
  type Err = UnknownChartId;

  /// Exact match against the catalog; no case folding or trimming, since
  /// identifiers come from the fixed menus and from our own database.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Some(c) = AnalyticalChart::ALL.into_iter().find(|c| c.as_str() == s) {
      return Ok(ChartId::Analytical(c));
    }
    if let Some(k) = KpiChart::ALL.into_iter().find(|k| k.as_str() == s) {
      return Ok(ChartId::Kpi(k));
    }
    Err(UnknownChartId { input: s.to_string() })
  }
}

impl fmt::Display for ChartId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_identifier_round_trips_through_its_string() {
    let all = AnalyticalChart::ALL.map(ChartId::from).into_iter().chain(KpiChart::ALL.map(ChartId::from));

    for id in all {
      assert_eq!(id.as_str().parse::<ChartId>(), Ok(id));
    }
  }

  #[test]
  fn none_and_unknown_are_not_charts() {
    assert_eq!(ChartId::parse_selection(NONE_ID), None);
    assert_eq!(ChartId::parse_selection("create_heatmap_plot(all_songs)"), None);
    assert_eq!(ChartId::parse_selection("Heatmap"), None);
  }

  #[test]
  fn serde_uses_the_persisted_identifier() {
    let json = serde_json::to_string(&ChartId::Analytical(AnalyticalChart::Top10Artists)).unwrap();
    assert_eq!(json, "\"top_10_artists\"");

    let kpi: ChartId = serde_json::from_str("\"album_count\"").unwrap();
    assert_eq!(kpi, ChartId::Kpi(KpiChart::AlbumCount));
  }
}
