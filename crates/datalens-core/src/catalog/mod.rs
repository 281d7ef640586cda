//! The fixed chart catalog.
//!
//! Every chart is a pure function of a user's track records. Nothing here
//! touches storage; callers fetch the records once and derive as many charts
//! as they need from the same slice.

mod analytical;
mod kpi;
pub mod stats;

use crate::domain::chart::Chart;
use crate::domain::chart_id::{AnalyticalChart, ChartId, KpiChart};
use crate::domain::dashboard::ChartOutcome;
use crate::domain::track::TrackRecord;
use crate::errors::DeriveError;

/// Builds the chart `id` names from `records`.
///
/// Only charts that parse release dates can fail; the rest always succeed,
/// including on an empty slice.
pub fn derive(id: ChartId, records: &[TrackRecord]) -> Result<Chart, DeriveError> {
  let chart = match id {
    ChartId::Analytical(chart) => match chart {
      AnalyticalChart::EnergyLoudness => analytical::energy_loudness(records),
      AnalyticalChart::PopularityLoudness => analytical::popularity_loudness(records),
      AnalyticalChart::SongsPerYear => analytical::songs_per_year(records)?,
      AnalyticalChart::Top10Artists => analytical::top_10_artists(records),
      AnalyticalChart::Genres => analytical::genres(records),
      AnalyticalChart::Heatmap => analytical::heatmap(records),
      AnalyticalChart::PopularityHistogram => analytical::popularity_histogram(records),
      AnalyticalChart::DanceabilityEnergy => analytical::danceability_energy(records),
      AnalyticalChart::PopularityOverTime => analytical::popularity_over_time(records)?,
      AnalyticalChart::LoudnessByGenre => analytical::loudness_by_genre(records),
    },
    ChartId::Kpi(kpi) => match kpi {
      KpiChart::ArtistCount => kpi::artist_count(records),
      KpiChart::SongCount => kpi::song_count(records),
      KpiChart::GenreCount => kpi::genre_count(records),
      KpiChart::AlbumCount => kpi::album_count(records),
    },
  };

  Ok(chart)
}

/// Looks `identifier` up and derives it. `"none"` and unknown identifiers
/// give `Ok(None)`.
pub fn render(identifier: &str, records: &[TrackRecord]) -> Result<Option<Chart>, DeriveError> {
  match ChartId::parse_selection(identifier) {
    Some(id) => derive(id, records).map(Some),
    None => Ok(None),
  }
}

/// Like [`derive`], folding the failure into the outcome so one bad slot
/// does not take down the rest of a dashboard.
pub fn resolve(id: Option<ChartId>, records: &[TrackRecord]) -> ChartOutcome {
  let Some(id) = id else {
    return ChartOutcome::NoChart;
  };

  match derive(id, records) {
    Ok(chart) => {
      tracing::debug!(chart = %id, kind = %chart.kind(), records = records.len(), "chart derived");
      ChartOutcome::Chart { chart }
    }
    Err(err) => {
      tracing::warn!(chart = %id, error = %err, "chart derivation failed");
      ChartOutcome::Failed { reason: err.to_string() }
    }
  }
}
