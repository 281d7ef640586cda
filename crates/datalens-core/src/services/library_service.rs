use std::sync::Arc;

use crate::domain::{TrackRecord, UserId};
use crate::errors::{CoreError, ValidationError};
use crate::ports::{DashboardRepository, TrackRepository};

/// Entry point for the ingestion collaborator and for account cleanup.
///
/// Track records are written in bulk and never edited; the catalog only
/// ever reads them back through [`LibraryService::tracks`].
pub struct LibraryService<T, D>
where
  T: TrackRepository + ?Sized,
  D: DashboardRepository + ?Sized,
{
  tracks: Arc<T>,
  dashboards: Arc<D>,
}

impl<T, D> LibraryService<T, D>
where
  T: TrackRepository + ?Sized,
  D: DashboardRepository + ?Sized,
{
  pub fn new(tracks: Arc<T>, dashboards: Arc<D>) -> Self {
    Self { tracks, dashboards }
  }

  /// Stores `records` for `user` and returns how many were new.
  ///
  /// The whole batch is rejected if any record lacks a track id, name or
  /// artist. Tracks the user already has (same track id) are skipped.
  pub async fn import_tracks(&self, user: UserId, records: Vec<TrackRecord>) -> Result<usize, CoreError> {
    for record in &records {
      validate(record)?;
    }

    let mut seen = std::collections::HashSet::new();
    let batch: Vec<TrackRecord> = records
      .into_iter()
      .filter(|r| seen.insert(r.track_id.clone()))
      .map(|r| TrackRecord { user_id: user, ..r })
      .collect();

    let added = self.tracks.insert_records(user, &batch).await?;
    tracing::info!(user = %user, offered = batch.len(), added, "imported tracks");

    Ok(added)
  }

  /// All records of `user`, in ingestion order.
  pub async fn tracks(&self, user: UserId) -> Result<Vec<TrackRecord>, CoreError> {
    Ok(self.tracks.records_for_user(user).await?)
  }

  /// Removes everything owned by `user`: dashboards first, then tracks.
  pub async fn purge_user(&self, user: UserId) -> Result<(), CoreError> {
    let dashboards = self.dashboards.delete_for_user(user).await?;
    let tracks = self.tracks.delete_for_user(user).await?;
    tracing::info!(user = %user, dashboards, tracks, "purged user data");

    Ok(())
  }
}

fn validate(record: &TrackRecord) -> Result<(), ValidationError> {
  let missing = if record.track_id.trim().is_empty() {
    Some("missing track id")
  } else if record.name.trim().is_empty() {
    Some("missing name")
  } else if record.artist.trim().is_empty() {
    Some("missing artist")
  } else {
    None
  };

  match missing {
    Some(reason) => {
      Err(ValidationError::InvalidTrack { track_id: record.track_id.clone(), reason: reason.to_string() })
    }
    None => Ok(()),
  }
}
