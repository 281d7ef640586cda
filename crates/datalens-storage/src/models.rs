use crate::schema::dashboards;
use crate::schema::tracks;

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use datalens_core::domain::{DashboardDefinition, DashboardId, TrackRecord, UserId};

use crate::StorageError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = tracks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackRow {
  pub id: i32,
  pub user_id: String,
  pub track_id: String,
  pub name: String,
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
  pub genres: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tracks)]
pub struct NewTrackRow<'a> {
  pub user_id: String,
  pub track_id: &'a str,
  pub name: &'a str,
  pub album: &'a str,
  pub artist: &'a str,
  pub release_date: &'a str,
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
  pub genres: &'a str,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = dashboards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DashboardRow {
  pub id: String,
  pub user_id: String,
  pub name: String,
  pub kpi_1: Option<String>,
  pub kpi_2: Option<String>,
  pub kpi_3: Option<String>,
  pub kpi_4: Option<String>,
  pub viz_1: Option<String>,
  pub viz_2: Option<String>,
  pub viz_3: Option<String>,
  pub viz_4: Option<String>,
  pub created_at: String,
}

fn parse_uuid(column: &str, value: &str) -> Result<Uuid, StorageError> {
  Uuid::parse_str(value).map_err(|e| StorageError::Corrupt(format!("{column} '{value}': {e}")))
}

impl<'a> NewTrackRow<'a> {
  /// The owner comes from the caller, not from the record.
  pub fn from_record(user: UserId, record: &'a TrackRecord) -> Self {
    NewTrackRow {
      user_id: user.to_string(),
      track_id: &record.track_id,
      name: &record.name,
      album: &record.album,
      artist: &record.artist,
      release_date: &record.release_date,
      acousticness: record.acousticness,
      danceability: record.danceability,
      energy: record.energy,
      instrumentalness: record.instrumentalness,
      liveness: record.liveness,
      loudness: record.loudness,
      speechiness: record.speechiness,
      tempo: record.tempo,
      valence: record.valence,
      key: record.key,
      mode: record.mode,
      time_signature: record.time_signature,
      duration_ms: record.duration_ms,
      popularity: record.popularity,
      genres: &record.genres,
    }
  }
}

impl TryFrom<TrackRow> for TrackRecord {
  type Error = StorageError;

  fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
    Ok(TrackRecord {
      user_id: UserId::from_uuid(parse_uuid("tracks.user_id", &row.user_id)?),
      track_id: row.track_id,
      name: row.name,
      album: row.album,
      artist: row.artist,
      release_date: row.release_date,
      acousticness: row.acousticness,
      danceability: row.danceability,
      energy: row.energy,
      instrumentalness: row.instrumentalness,
      liveness: row.liveness,
      loudness: row.loudness,
      speechiness: row.speechiness,
      tempo: row.tempo,
      valence: row.valence,
      key: row.key,
      mode: row.mode,
      time_signature: row.time_signature,
      duration_ms: row.duration_ms,
      popularity: row.popularity,
      genres: row.genres,
    })
  }
}

impl From<&DashboardDefinition> for DashboardRow {
  fn from(d: &DashboardDefinition) -> Self {
    let [kpi_1, kpi_2, kpi_3, kpi_4, viz_1, viz_2, viz_3, viz_4] = d.slots.clone();

    DashboardRow {
      id: d.id.to_string(),
      user_id: d.user_id.to_string(),
      name: d.name.clone(),
      kpi_1,
      kpi_2,
      kpi_3,
      kpi_4,
      viz_1,
      viz_2,
      viz_3,
      viz_4,
      // Fixed width, so text order is creation order.
      created_at: d.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
    }
  }
}

impl TryFrom<DashboardRow> for DashboardDefinition {
  type Error = StorageError;

  fn try_from(row: DashboardRow) -> Result<Self, Self::Error> {
    let created_at = DateTime::parse_from_rfc3339(&row.created_at)
      .map_err(|e| StorageError::Corrupt(format!("dashboards.created_at '{}': {e}", row.created_at)))?
      .with_timezone(&Utc);

    Ok(DashboardDefinition {
      id: DashboardId::from_uuid(parse_uuid("dashboards.id", &row.id)?),
      user_id: UserId::from_uuid(parse_uuid("dashboards.user_id", &row.user_id)?),
      name: row.name,
      slots: [row.kpi_1, row.kpi_2, row.kpi_3, row.kpi_4, row.viz_1, row.viz_2, row.viz_3, row.viz_4],
      created_at,
    })
  }
}
