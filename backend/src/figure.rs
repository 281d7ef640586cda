//! Plotly figure JSON for derived charts.
//!
//! One function per chart kind builds the traces; the layout is shared.

use datalens_core::domain::chart::{
  BarData, BoxData, Chart, ChartData, HeatmapData, HistogramData, IndicatorData, LineData, Palette, ScatterData,
  Theme, TreemapData,
};
use datalens_core::domain::{ChartOutcome, Slot};
use serde::Serialize;
use serde_json::{Value, json};

const TEAL: &str = "rgb(42, 120, 142)";
const MINT: &str = "rgb(40, 168, 131)";

const DARK2: [&str; 8] = ["#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666"];
const D3: [&str; 10] =
  ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf"];

/// A chart slot as the browser receives it.
#[derive(Debug, Serialize)]
pub struct Widget {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub slot: Option<Slot>,
  pub identifier: Option<String>,
  #[serde(flatten)]
  pub body: WidgetBody,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WidgetBody {
  Chart { figure: Value },
  NoChart,
  Failed { reason: String },
}

impl Widget {
  pub fn new(slot: Option<Slot>, identifier: Option<String>, outcome: &ChartOutcome) -> Self {
    let body = match outcome {
      ChartOutcome::Chart { chart } => WidgetBody::Chart { figure: figure(chart) },
      ChartOutcome::NoChart => WidgetBody::NoChart,
      ChartOutcome::Failed { reason } => WidgetBody::Failed { reason: reason.clone() },
    };
    Widget { slot, identifier, body }
  }
}

pub fn figure(chart: &Chart) -> Value {
  let data = match &chart.data {
    ChartData::Scatter(s) => scatter(s, chart.style.palette),
    ChartData::Histogram(h) => histogram(h, chart.style.palette),
    ChartData::Bar(b) => bar(b, chart.style.palette),
    ChartData::Treemap(t) => treemap(t),
    ChartData::Heatmap(h) => heatmap(h),
    ChartData::Line(l) => line(l, chart.style.palette),
    ChartData::Box(b) => box_plot(b, chart.style.palette),
    ChartData::Indicator(i) => indicator(i, &chart.title),
  };

  json!({ "data": data, "layout": layout(chart) })
}

fn layout(chart: &Chart) -> Value {
  let template = match chart.style.theme {
    Theme::Dark => "plotly_dark",
  };

  let mut layout = json!({ "template": template });
  // Indicators carry their title on the trace.
  if !matches!(chart.data, ChartData::Indicator(_)) {
    layout["title"] = json!({ "text": chart.title });
  }
  if let Some(x) = &chart.x_label {
    layout["xaxis"] = json!({ "title": { "text": x } });
  }
  if let Some(y) = &chart.y_label {
    layout["yaxis"] = json!({ "title": { "text": y } });
  }
  if let Some(height) = chart.style.height {
    layout["height"] = json!(height);
  }
  layout
}

/// Single fill color for one-series traces.
fn solid(palette: Palette) -> Option<&'static str> {
  match palette {
    Palette::Teal => Some(TEAL),
    Palette::Mint => Some(MINT),
    Palette::Dark2 => Some(DARK2[0]),
    Palette::D3 => Some(D3[0]),
    Palette::Viridis | Palette::Default => None,
  }
}

fn marker(palette: Palette) -> Value {
  solid(palette).map(|c| json!({ "color": c })).unwrap_or_else(|| json!({}))
}

fn scatter(data: &ScatterData, palette: Palette) -> Vec<Value> {
  let xs: Vec<f64> = data.points.iter().map(|p| p.x).collect();
  let mut traces = vec![json!({
    "type": "scatter",
    "mode": "markers",
    "x": xs,
    "y": data.points.iter().map(|p| p.y).collect::<Vec<_>>(),
    "text": data.points.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(),
    "marker": {
      "color": data.points.iter().map(|p| p.color).collect::<Vec<_>>(),
      "colorscale": if palette == Palette::Viridis { "Viridis" } else { "Plotly3" },
      "showscale": true,
      "colorbar": { "title": { "text": data.color_by } },
    },
    "showlegend": false,
  })];

  if let Some(fit) = data.trendline {
    let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    traces.push(json!({
      "type": "scatter",
      "mode": "lines",
      "name": format!("OLS trendline (R² = {:.3})", fit.r_squared),
      "x": [lo, hi],
      "y": [fit.slope * lo + fit.intercept, fit.slope * hi + fit.intercept],
      "showlegend": false,
    }));
  }

  traces
}

/// Bins arrive pre-counted, so they are drawn as adjacent bars.
fn histogram(data: &HistogramData, palette: Palette) -> Vec<Value> {
  vec![json!({
    "type": "bar",
    "x": data.bins.iter().map(|b| (b.start + b.end) / 2.0).collect::<Vec<_>>(),
    "y": data.bins.iter().map(|b| b.count).collect::<Vec<_>>(),
    "width": data.bins.iter().map(|b| b.end - b.start).collect::<Vec<_>>(),
    "marker": marker(palette),
  })]
}

fn bar(data: &BarData, palette: Palette) -> Vec<Value> {
  vec![json!({
    "type": "bar",
    "x": data.bars.iter().map(|b| b.label.as_str()).collect::<Vec<_>>(),
    "y": data.bars.iter().map(|b| b.count).collect::<Vec<_>>(),
    "marker": marker(palette),
  })]
}

fn treemap(data: &TreemapData) -> Vec<Value> {
  vec![json!({
    "type": "treemap",
    "labels": data.tiles.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
    "parents": vec![""; data.tiles.len()],
    "values": data.tiles.iter().map(|t| t.count).collect::<Vec<_>>(),
    "marker": { "colorscale": "Viridis" },
  })]
}

/// Undefined cells become JSON `null`, which plotly leaves blank.
fn heatmap(data: &HeatmapData) -> Vec<Value> {
  vec![json!({
    "type": "heatmap",
    "x": data.labels,
    "y": data.labels,
    "z": data.cells,
    "zmin": -1.0,
    "zmax": 1.0,
    "colorscale": "Viridis",
  })]
}

fn line(data: &LineData, palette: Palette) -> Vec<Value> {
  vec![json!({
    "type": "scatter",
    "mode": "lines",
    "x": data.points.iter().map(|p| p.x.to_string()).collect::<Vec<_>>(),
    "y": data.points.iter().map(|p| p.y).collect::<Vec<_>>(),
    "line": marker(palette),
  })]
}

fn box_plot(data: &BoxData, palette: Palette) -> Vec<Value> {
  data
    .groups
    .iter()
    .enumerate()
    .map(|(i, g)| {
      let mut trace = json!({
        "type": "box",
        "name": g.label,
        "y": g.values,
        "boxpoints": "all",
      });
      if palette == Palette::D3 {
        trace["marker"] = json!({ "color": D3[i % D3.len()] });
      }
      trace
    })
    .collect()
}

fn indicator(data: &IndicatorData, title: &str) -> Vec<Value> {
  vec![json!({
    "type": "indicator",
    "mode": "number",
    "value": data.value,
    "title": { "text": title },
  })]
}
