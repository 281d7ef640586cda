use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A derived visualization, built fresh on every request and never stored.
///
/// The payload variant determines the chart kind; presentation adapters turn
/// it into whatever widget they render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
  pub title: String,
  pub x_label: Option<String>,
  pub y_label: Option<String>,
  pub style: ChartStyle,
  pub data: ChartData,
}

impl Chart {
  pub fn kind(&self) -> ChartKind {
    match &self.data {
      ChartData::Scatter(_) => ChartKind::Scatter,
      ChartData::Histogram(_) => ChartKind::Histogram,
      ChartData::Bar(_) => ChartKind::Bar,
      ChartData::Treemap(_) => ChartKind::Treemap,
      ChartData::Heatmap(_) => ChartKind::Heatmap,
      ChartData::Line(_) => ChartKind::Line,
      ChartData::Box(_) => ChartKind::Box,
      ChartData::Indicator(_) => ChartKind::Indicator,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
  Scatter,
  Histogram,
  Bar,
  Treemap,
  Heatmap,
  Line,
  Box,
  Indicator,
}

impl fmt::Display for ChartKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      ChartKind::Scatter => "scatter",
      ChartKind::Histogram => "histogram",
      ChartKind::Bar => "bar",
      ChartKind::Treemap => "treemap",
      ChartKind::Heatmap => "heatmap",
      ChartKind::Line => "line",
      ChartKind::Box => "box",
      ChartKind::Indicator => "indicator",
    };
    write!(f, "{text}")
  }
}

/// Visual theme shared by every chart. Only the dark theme exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
  pub theme: Theme,
  pub palette: Palette,
  /// Fixed widget height in pixels, used by the compact KPI tiles.
  pub height: Option<u32>,
}

impl ChartStyle {
  pub const fn dark(palette: Palette) -> Self {
    ChartStyle { theme: Theme::Dark, palette, height: None }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
  #[serde(rename = "plotly_dark")]
  Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
  /// Continuous scale for color-by-value traces.
  Viridis,
  /// Solid `rgb(42, 120, 142)` fill.
  Teal,
  /// Solid `rgb(40, 168, 131)` fill.
  Mint,
  /// Qualitative sequence for line traces.
  Dark2,
  /// Qualitative sequence for per-category traces.
  D3,
  /// Renderer default.
  Default,
}

/// Series data, one variant per chart kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
  Scatter(ScatterData),
  Histogram(HistogramData),
  Bar(BarData),
  Treemap(TreemapData),
  Heatmap(HeatmapData),
  Line(LineData),
  Box(BoxData),
  Indicator(IndicatorData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterData {
  pub points: Vec<ScatterPoint>,
  /// Name of the field the point color encodes.
  pub color_by: String,
  /// Ordinary least squares fit, absent when it is undefined.
  pub trendline: Option<Trendline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
  pub x: f64,
  pub y: f64,
  pub color: f64,
  /// Hover label (track name).
  pub label: String,
}

/// `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trendline {
  pub slope: f64,
  pub intercept: f64,
  pub r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramData {
  pub bins: Vec<HistogramBin>,
}

/// Half-open `[start, end)` bucket; the last bucket of a bounded range is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
  pub start: f64,
  pub end: f64,
  pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
  pub bars: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
  pub label: String,
  pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapData {
  /// Top-level tiles; they all hang from a single unnamed root.
  pub tiles: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
  pub labels: Vec<String>,
  /// Row-major square matrix. `None` marks an undefined cell (too few
  /// samples or a constant column) instead of a NaN.
  pub cells: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineData {
  pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
  pub x: NaiveDate,
  pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxData {
  pub groups: Vec<BoxGroup>,
}

/// Distribution of one category. `values` keeps every point so the
/// renderer can draw them next to the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGroup {
  pub label: String,
  pub values: Vec<f64>,
  pub min: f64,
  pub q1: f64,
  pub median: f64,
  pub q3: f64,
  pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorData {
  pub value: u64,
}
