use axum::{Json, extract::State, http::StatusCode};
use datalens_core::domain::{TrackRecord, UserId};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiResult;
use crate::session::CurrentUser;

/// A track as the ingestion collaborator sends it. The owner comes from
/// the request, never from the payload.
#[derive(Debug, Deserialize)]
pub struct TrackDto {
  pub track_id: String,
  pub name: String,
  #[serde(default)]
  pub album: String,
  pub artist: String,
  pub release_date: String,
  pub acousticness: f64,
  pub danceability: f64,
  pub energy: f64,
  pub instrumentalness: f64,
  pub liveness: f64,
  pub loudness: f64,
  pub speechiness: f64,
  pub tempo: f64,
  pub valence: f64,
  pub key: i32,
  pub mode: i32,
  pub time_signature: i32,
  pub duration_ms: i64,
  pub popularity: i32,
  #[serde(default)]
  pub genres: String,
}

impl TrackDto {
  fn into_record(self, user_id: UserId) -> TrackRecord {
    TrackRecord {
      track_id: self.track_id,
      name: self.name,
      album: self.album,
      artist: self.artist,
      release_date: self.release_date,
      acousticness: self.acousticness,
      danceability: self.danceability,
      energy: self.energy,
      instrumentalness: self.instrumentalness,
      liveness: self.liveness,
      loudness: self.loudness,
      speechiness: self.speechiness,
      tempo: self.tempo,
      valence: self.valence,
      key: self.key,
      mode: self.mode,
      time_signature: self.time_signature,
      duration_ms: self.duration_ms,
      popularity: self.popularity,
      genres: self.genres,
      user_id,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
  pub offered: usize,
  pub added: usize,
}

/// POST /api/library/tracks
pub async fn import(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Json(tracks): Json<Vec<TrackDto>>,
) -> ApiResult<Json<ImportSummary>> {
  let offered = tracks.len();
  let records = tracks.into_iter().map(|t| t.into_record(user)).collect();

  let added = state.library.import_tracks(user, records).await?;
  Ok(Json(ImportSummary { offered, added }))
}

/// DELETE /api/library
///
/// Removes the user's tracks, dashboards and editor draft.
pub async fn purge(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<StatusCode> {
  state.library.purge_user(user).await?;
  state.discard_draft(user);
  Ok(StatusCode::NO_CONTENT)
}
