//! Small numeric helpers shared by the derivations.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::domain::chart::{CategoryCount, Trendline};

/// Counts occurrences and orders them by descending count.
///
/// Ties keep the order in which labels were first seen, which is what a
/// stable sort over first-seen order gives.
pub fn ranked_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
  let mut index: HashMap<&str, usize> = HashMap::new();
  let mut counts: Vec<CategoryCount> = Vec::new();

  for label in labels {
    match index.get(label) {
      Some(&i) => counts[i].count += 1,
      None => {
        index.insert(label, counts.len());
        counts.push(CategoryCount { label: label.to_string(), count: 1 });
      }
    }
  }

  counts.sort_by(|a, b| b.count.cmp(&a.count));
  counts
}

pub fn distinct_count<'a>(values: impl IntoIterator<Item = &'a str>) -> u64 {
  values.into_iter().collect::<HashSet<_>>().len() as u64
}

/// Ordinary least squares fit of `y` on `x`.
///
/// Undefined with fewer than two points or when every `x` is equal.
pub fn ols(xs: &[f64], ys: &[f64]) -> Option<Trendline> {
  let n = xs.len().min(ys.len());
  if n < 2 {
    return None;
  }

  let mean_x = mean(&xs[..n]);
  let mean_y = mean(&ys[..n]);

  let mut sxx = 0.0;
  let mut sxy = 0.0;
  let mut syy = 0.0;
  for (x, y) in xs.iter().zip(ys) {
    let dx = x - mean_x;
    let dy = y - mean_y;
    sxx += dx * dx;
    sxy += dx * dy;
    syy += dy * dy;
  }

  if sxx == 0.0 {
    return None;
  }

  let slope = sxy / sxx;
  let intercept = mean_y - slope * mean_x;
  // A horizontal cloud is perfectly explained by a flat line.
  let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

  Some(Trendline { slope, intercept, r_squared })
}

/// Pearson correlation of two equally long samples.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
  let n = xs.len().min(ys.len());
  if n < 2 {
    return None;
  }

  let mean_x = mean(&xs[..n]);
  let mean_y = mean(&ys[..n]);

  let mut sxx = 0.0;
  let mut syy = 0.0;
  let mut sxy = 0.0;
  for (x, y) in xs.iter().zip(ys) {
    let dx = x - mean_x;
    let dy = y - mean_y;
    sxx += dx * dx;
    syy += dy * dy;
    sxy += dx * dy;
  }

  if sxx == 0.0 || syy == 0.0 {
    return None;
  }

  Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

pub fn mean(values: &[f64]) -> f64 {
  if values.is_empty() { 0.0 } else { values.iter().sum::<f64>() / values.len() as f64 }
}

/// Quantile of an ascending, non-empty sample, interpolating linearly
/// between the two closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
  debug_assert!(!sorted.is_empty());

  let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
  let lo = pos.floor() as usize;
  let hi = pos.ceil() as usize;
  let frac = pos - lo as f64;

  sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
