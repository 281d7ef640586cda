use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::DeriveError;

/// Release date with the precision the source actually provided.
///
/// Streaming APIs report album dates as a bare year, a year and month, or a
/// full day depending on how much the label published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReleaseDate {
  Year(i32),
  YearMonth(i32, u32),
  Day(NaiveDate),
}

impl ReleaseDate {
  pub fn year(&self) -> i32 {
    match self {
      ReleaseDate::Year(y) | ReleaseDate::YearMonth(y, _) => *y,
      ReleaseDate::Day(d) => d.year(),
    }
  }

  /// Widens the value to a calendar day: the first day of the year or month
  /// when the precision is coarser than a day.
  pub fn to_date(&self) -> NaiveDate {
    match self {
      // Both were validated on parse, so the fallbacks are never taken.
      ReleaseDate::Year(y) => NaiveDate::from_ymd_opt(*y, 1, 1).unwrap_or(NaiveDate::MIN),
      ReleaseDate::YearMonth(y, m) => NaiveDate::from_ymd_opt(*y, *m, 1).unwrap_or(NaiveDate::MIN),
      ReleaseDate::Day(d) => *d,
    }
  }
}

impl FromStr for ReleaseDate {
  type Err = DeriveError;

  /// Dispatches on length: 4 chars is a year, 7 chars is `YYYY-MM`, anything
  /// else must be a full `YYYY-MM-DD` date.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let malformed = || DeriveError::MalformedDate(s.to_string());

    match s.len() {
      4 => {
        let year = parse_year(s).ok_or_else(malformed)?;
        Ok(ReleaseDate::Year(year))
      }
      7 => {
        let (y, m) = s.split_once('-').ok_or_else(malformed)?;
        let year = parse_year(y).ok_or_else(malformed)?;
        let month = m.parse::<u32>().map_err(|_| malformed())?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(malformed)?;
        Ok(ReleaseDate::YearMonth(year, month))
      }
      _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").map(ReleaseDate::Day).map_err(|_| malformed()),
    }
  }
}

fn parse_year(s: &str) -> Option<i32> {
  if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) { s.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_three_precisions_share_the_year() {
    for raw in ["2017", "2017-11", "2017-11-12"] {
      let parsed: ReleaseDate = raw.parse().unwrap();
      assert_eq!(parsed.year(), 2017, "{raw}");
    }
  }

  #[test]
  fn coarse_dates_widen_to_first_day() {
    let y: ReleaseDate = "1998".parse().unwrap();
    let ym: ReleaseDate = "1998-05".parse().unwrap();

    assert_eq!(y.to_date(), NaiveDate::from_ymd_opt(1998, 1, 1).unwrap());
    assert_eq!(ym.to_date(), NaiveDate::from_ymd_opt(1998, 5, 1).unwrap());
  }

  #[test]
  fn malformed_dates_are_rejected() {
    for raw in ["", "19x8", "1998-13", "May 1998", "1998-02-30"] {
      let err = raw.parse::<ReleaseDate>().unwrap_err();
      assert!(matches!(err, DeriveError::MalformedDate(ref s) if s == raw), "{raw}");
    }
  }
}
