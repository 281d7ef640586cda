use crate::catalog::stats::distinct_count;
use crate::domain::chart::{Chart, ChartData, ChartStyle, IndicatorData, Palette};
use crate::domain::chart_id::KpiChart;
use crate::domain::track::TrackRecord;

const TILE_HEIGHT: u32 = 225;

fn indicator(kind: KpiChart, value: u64) -> Chart {
  Chart {
    title: kind.label().to_string(),
    x_label: None,
    y_label: None,
    style: ChartStyle { height: Some(TILE_HEIGHT), ..ChartStyle::dark(Palette::Default) },
    data: ChartData::Indicator(IndicatorData { value }),
  }
}

pub fn artist_count(records: &[TrackRecord]) -> Chart {
  indicator(KpiChart::ArtistCount, distinct_count(records.iter().map(|r| r.artist.as_str())))
}

/// Distinct track *names*: two tracks with the same title count once.
pub fn song_count(records: &[TrackRecord]) -> Chart {
  indicator(KpiChart::SongCount, distinct_count(records.iter().map(|r| r.name.as_str())))
}

pub fn genre_count(records: &[TrackRecord]) -> Chart {
  indicator(KpiChart::GenreCount, distinct_count(records.iter().flat_map(|r| r.genre_tokens())))
}

pub fn album_count(records: &[TrackRecord]) -> Chart {
  indicator(KpiChart::AlbumCount, distinct_count(records.iter().map(|r| r.album.as_str())))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::UserId;
  use crate::domain::track::fixtures::track;

  fn value(chart: &Chart) -> u64 {
    match chart.data {
      ChartData::Indicator(IndicatorData { value }) => value,
      ref other => panic!("not an indicator: {other:?}"),
    }
  }

  #[test]
  fn song_count_collapses_shared_names() {
    let user = UserId::new();
    let records = vec![
      TrackRecord { track_id: "1".into(), ..track(user, "Intro", "A") },
      TrackRecord { track_id: "2".into(), ..track(user, "Intro", "B") },
      TrackRecord { track_id: "3".into(), ..track(user, "Outro", "B") },
    ];

    assert_eq!(value(&song_count(&records)), 2);
    assert_eq!(value(&artist_count(&records)), 2);
  }

  #[test]
  fn genre_count_uses_exploded_tokens() {
    let user = UserId::new();
    let records = vec![
      TrackRecord { genres: "pop, dance pop".into(), ..track(user, "a", "x") },
      TrackRecord { genres: "pop,rock".into(), ..track(user, "b", "x") },
    ];

    assert_eq!(value(&genre_count(&records)), 3);
  }

  #[test]
  fn empty_library_counts_zero() {
    for chart in [artist_count(&[]), song_count(&[]), genre_count(&[]), album_count(&[])] {
      assert_eq!(value(&chart), 0);
      assert_eq!(chart.style.height, Some(225));
    }
  }

  #[test]
  fn titles_follow_menu_labels() {
    assert_eq!(album_count(&[]).title, "Album Count");
  }
}
