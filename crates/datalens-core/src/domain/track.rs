use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};

/// One ingested track of a user's library, with its audio features.
///
/// Records are written in bulk by the ingestion collaborator and are
/// immutable afterwards. The order in which a repository returns them is
/// the ingestion order, and "first seen" tie-breaks depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
  /// Identifier from the streaming source, unique per user.
  pub track_id: String,
  pub name: String,
  pub album: String,
  pub artist: String,
  /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, exactly as the source reports it.
  ///
  /// Kept as a string because the precision varies per album; see
  /// [`ReleaseDate`](crate::domain::release_date::ReleaseDate) for parsing.
  pub release_date: String,

  // --- Audio features ---
  pub acousticness: f64,
  pub danceability: f64,
  pub energy: f64,
  pub instrumentalness: f64,
  pub liveness: f64,
  /// Average loudness in dB (usually negative).
  pub loudness: f64,
  pub speechiness: f64,
  /// Beats per minute.
  pub tempo: f64,
  pub valence: f64,
  /// Pitch class, `-1` when undetected.
  pub key: i32,
  /// `1` major, `0` minor.
  pub mode: i32,
  pub time_signature: i32,
  pub duration_ms: i64,

  /// Artist popularity, 0..=100.
  pub popularity: i32,
  /// Comma-joined genre tags. Not normalized; may be empty.
  pub genres: String,
  pub user_id: UserId,
}

impl TrackRecord {
  /// Splits the `genres` column into individual tags.
  ///
  /// Tokens are trimmed and empty ones dropped, so `""` yields nothing and a
  /// multi-genre track yields one token per tag.
  pub fn genre_tokens(&self) -> impl Iterator<Item = &str> {
    self.genres.split(',').map(str::trim).filter(|g| !g.is_empty())
  }

  /// The nine floating point audio features, in [`AUDIO_FEATURES`] order.
  pub fn audio_features(&self) -> [f64; 9] {
    [
      self.acousticness,
      self.danceability,
      self.energy,
      self.instrumentalness,
      self.liveness,
      self.loudness,
      self.speechiness,
      self.tempo,
      self.valence,
    ]
  }
}

/// Names of the values returned by [`TrackRecord::audio_features`].
pub const AUDIO_FEATURES: [&str; 9] = [
  "acousticness",
  "danceability",
  "energy",
  "instrumentalness",
  "liveness",
  "loudness",
  "speechiness",
  "tempo",
  "valence",
];
