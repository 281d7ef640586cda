use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::catalog::stats::{mean, ols, pearson, quantile, ranked_counts};
use crate::domain::chart::{
  BarData, BoxData, BoxGroup, Chart, ChartData, ChartStyle, HeatmapData, HistogramBin, HistogramData, LineData,
  LinePoint, Palette, ScatterData, ScatterPoint, TreemapData,
};
use crate::domain::release_date::ReleaseDate;
use crate::domain::track::{AUDIO_FEATURES, TrackRecord};
use crate::errors::DeriveError;

const TOP_N: usize = 10;
const POPULARITY_BIN_WIDTH: u32 = 5;
const POPULARITY_MAX: u32 = 100;

fn chart(title: &str, x_label: &str, y_label: &str, palette: Palette, data: ChartData) -> Chart {
  Chart {
    title: title.to_string(),
    x_label: Some(x_label.to_string()),
    y_label: Some(y_label.to_string()),
    style: ChartStyle::dark(palette),
    data,
  }
}

/// Scatter of `y` against `x` with an OLS trendline, colored by `color`.
fn regression(
  records: &[TrackRecord],
  x: impl Fn(&TrackRecord) -> f64,
  y: impl Fn(&TrackRecord) -> f64,
  color: impl Fn(&TrackRecord) -> f64,
  color_by: &str,
) -> ScatterData {
  let points: Vec<ScatterPoint> =
    records.iter().map(|r| ScatterPoint { x: x(r), y: y(r), color: color(r), label: r.name.clone() }).collect();

  let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
  let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

  ScatterData { trendline: ols(&xs, &ys), points, color_by: color_by.to_string() }
}

pub fn energy_loudness(records: &[TrackRecord]) -> Chart {
  let data = regression(records, |r| r.energy, |r| r.loudness, |r| r.energy, "energy");
  chart("Energy vs Loudness", "Energy", "Loudness", Palette::Viridis, ChartData::Scatter(data))
}

pub fn popularity_loudness(records: &[TrackRecord]) -> Chart {
  let data = regression(records, |r| r.popularity as f64, |r| r.loudness, |r| r.popularity as f64, "popularity");
  chart("Popularity vs Loudness", "Popularity", "Loudness", Palette::Viridis, ChartData::Scatter(data))
}

pub fn danceability_energy(records: &[TrackRecord]) -> Chart {
  let data = regression(records, |r| r.danceability, |r| r.energy, |r| r.energy, "energy");
  chart("Danceability vs Energy", "Danceability", "Energy", Palette::Viridis, ChartData::Scatter(data))
}

/// One bin per distinct release year, ascending.
pub fn songs_per_year(records: &[TrackRecord]) -> Result<Chart, DeriveError> {
  let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();

  for record in records {
    let date: ReleaseDate = record.release_date.parse()?;
    *per_year.entry(date.year()).or_default() += 1;
  }

  let bins = per_year
    .into_iter()
    .map(|(year, count)| HistogramBin { start: year as f64, end: (year + 1) as f64, count })
    .collect();

  Ok(chart("Number of Songs per Year", "Year", "Count", Palette::Teal, ChartData::Histogram(HistogramData { bins })))
}

pub fn top_10_artists(records: &[TrackRecord]) -> Chart {
  let mut bars = ranked_counts(records.iter().map(|r| r.artist.as_str()));
  bars.truncate(TOP_N);

  chart("Top 10 Artists", "Artist", "Count", Palette::Mint, ChartData::Bar(BarData { bars }))
}

/// A track tagged with several genres counts once for each of them.
pub fn genres(records: &[TrackRecord]) -> Chart {
  let mut tiles = ranked_counts(records.iter().flat_map(|r| r.genre_tokens()));
  tiles.truncate(TOP_N);

  Chart {
    title: "Top 10 Genres (Treemap)".to_string(),
    x_label: None,
    y_label: None,
    style: ChartStyle::dark(Palette::Viridis),
    data: ChartData::Treemap(TreemapData { tiles }),
  }
}

/// Pearson correlation between every pair of audio features.
///
/// With fewer than two records every cell is undefined; the chart is still
/// produced so a dashboard slot shows an empty grid instead of failing.
pub fn heatmap(records: &[TrackRecord]) -> Chart {
  let columns: Vec<Vec<f64>> = (0..AUDIO_FEATURES.len())
    .map(|i| records.iter().map(|r| r.audio_features()[i]).collect())
    .collect();

  let cells = columns.iter().map(|a| columns.iter().map(|b| pearson(a, b)).collect()).collect();

  chart(
    "Correlation Heatmap Between Variables",
    "Features",
    "Features",
    Palette::Viridis,
    ChartData::Heatmap(HeatmapData { labels: AUDIO_FEATURES.iter().map(|s| s.to_string()).collect(), cells }),
  )
}

/// Fixed 5-point buckets over 0..=100; out of range values are clamped.
pub fn popularity_histogram(records: &[TrackRecord]) -> Chart {
  let bin_count = (POPULARITY_MAX / POPULARITY_BIN_WIDTH) as usize;
  let mut bins: Vec<HistogramBin> = (0..bin_count)
    .map(|i| {
      let start = (i as u32 * POPULARITY_BIN_WIDTH) as f64;
      HistogramBin { start, end: start + POPULARITY_BIN_WIDTH as f64, count: 0 }
    })
    .collect();

  for record in records {
    let value = record.popularity.clamp(0, POPULARITY_MAX as i32) as u32;
    // 100 lands in the last, closed bucket.
    let i = ((value / POPULARITY_BIN_WIDTH) as usize).min(bin_count - 1);
    bins[i].count += 1;
  }

  let data = ChartData::Histogram(HistogramData { bins });
  chart("Popularity Distribution", "Popularity", "Count", Palette::Default, data)
}

/// Mean popularity per exact release date, ascending.
pub fn popularity_over_time(records: &[TrackRecord]) -> Result<Chart, DeriveError> {
  let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

  for record in records {
    let date: ReleaseDate = record.release_date.parse()?;
    by_date.entry(date.to_date()).or_default().push(record.popularity as f64);
  }

  let points = by_date.into_iter().map(|(x, values)| LinePoint { x, y: mean(&values) }).collect();

  Ok(chart("Popularity Over Time", "Date", "Popularity", Palette::Dark2, ChartData::Line(LineData { points })))
}

/// Loudness distribution per genre, genres in first-seen order.
pub fn loudness_by_genre(records: &[TrackRecord]) -> Chart {
  let mut order: Vec<&str> = Vec::new();
  let mut values: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

  for record in records {
    for genre in record.genre_tokens() {
      let bucket = values.entry(genre).or_insert_with(|| {
        order.push(genre);
        Vec::new()
      });
      bucket.push(record.loudness);
    }
  }

  let groups = order
    .into_iter()
    .filter_map(|genre| values.remove(genre).map(|v| box_group(genre, v)))
    .collect();

  chart("Loudness by Genre", "Genres", "Loudness", Palette::D3, ChartData::Box(BoxData { groups }))
}

fn box_group(label: &str, values: Vec<f64>) -> BoxGroup {
  let mut sorted = values.clone();
  sorted.sort_by(f64::total_cmp);

  BoxGroup {
    label: label.to_string(),
    min: sorted[0],
    q1: quantile(&sorted, 0.25),
    median: quantile(&sorted, 0.5),
    q3: quantile(&sorted, 0.75),
    max: sorted[sorted.len() - 1],
    values,
  }
}
