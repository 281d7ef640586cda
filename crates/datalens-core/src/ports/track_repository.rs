use async_trait::async_trait;

use crate::domain::{TrackRecord, UserId};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  /// A uniqueness constraint rejected the write.
  #[error("conflict: {0}")]
  Conflict(String),
  #[error("storage error: {0}")]
  Storage(String),
}

/// Read side of the ingested library, plus the bulk write used by ingestion.
#[async_trait]
pub trait TrackRepository: Send + Sync {
  /// All records of `user`, in ingestion order. Empty when nothing was ingested.
  async fn records_for_user(&self, user: UserId) -> Result<Vec<TrackRecord>, RepoError>;

  /// Inserts the records whose `track_id` the user does not have yet and
  /// returns how many were added.
  async fn insert_records(&self, user: UserId, records: &[TrackRecord]) -> Result<usize, RepoError>;

  async fn delete_for_user(&self, user: UserId) -> Result<usize, RepoError>;
}
