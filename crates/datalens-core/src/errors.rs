use thiserror::Error;

use crate::ports::RepoError;

/// Core error. The shells (HTTP, CLI) map it to responses or log lines.
#[derive(Debug, Error)]
pub enum CoreError {
  /// The record or definition store failed. Not retried here.
  #[error("repository error: {0}")]
  Repository(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("not found")]
  NotFound,
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::NotFound,
      other => CoreError::Repository(other.to_string()),
    }
  }
}

/// User-correctable input problems. No state is changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("dashboard name is required")]
  EmptyName,

  #[error("a dashboard named '{0}' already exists")]
  NameTaken(String),

  #[error("save was not requested")]
  SaveNotRequested,

  #[error("select at least one chart before saving")]
  NoSelection,

  #[error("invalid track '{track_id}': {reason}")]
  InvalidTrack { track_id: String, reason: String },
}

/// Failure of a single chart derivation. Callers isolate it to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
  #[error("malformed release date: '{0}'")]
  MalformedDate(String),
}
