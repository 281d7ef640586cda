use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{DashboardDefinition, DashboardId, TrackRecord, UserId};
use crate::ports::{DashboardRepository, RepoError, TrackRepository};

/// Process-local implementation of both repositories.
///
/// Used by tests and by throwaway sessions that do not need a database.
/// Clones are not shared; wrap it in an `Arc` to share one instance.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
  tracks: Mutex<Vec<TrackRecord>>,
  dashboards: Mutex<Vec<DashboardDefinition>>,
}

impl InMemoryLibrary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored dashboard rows, across all users.
  pub fn dashboard_rows(&self) -> usize {
    self.dashboards.lock().map(|d| d.len()).unwrap_or(0)
  }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepoError> {
  m.lock().map_err(|_| RepoError::Storage("in-memory store mutex poisoned".to_string()))
}

#[async_trait]
impl TrackRepository for InMemoryLibrary {
  async fn records_for_user(&self, user: UserId) -> Result<Vec<TrackRecord>, RepoError> {
    let tracks = lock(&self.tracks)?;
    Ok(tracks.iter().filter(|t| t.user_id == user).cloned().collect())
  }

  async fn insert_records(&self, user: UserId, records: &[TrackRecord]) -> Result<usize, RepoError> {
    let mut tracks = lock(&self.tracks)?;
    let mut added = 0;

    for record in records {
      let exists = tracks.iter().any(|t| t.user_id == user && t.track_id == record.track_id);
      if !exists {
        tracks.push(TrackRecord { user_id: user, ..record.clone() });
        added += 1;
      }
    }

    Ok(added)
  }

  async fn delete_for_user(&self, user: UserId) -> Result<usize, RepoError> {
    let mut tracks = lock(&self.tracks)?;
    let before = tracks.len();
    tracks.retain(|t| t.user_id != user);
    Ok(before - tracks.len())
  }
}

#[async_trait]
impl DashboardRepository for InMemoryLibrary {
  async fn insert(&self, definition: &DashboardDefinition) -> Result<(), RepoError> {
    let mut dashboards = lock(&self.dashboards)?;

    if dashboards.iter().any(|d| d.user_id == definition.user_id && d.name == definition.name) {
      return Err(RepoError::Conflict(format!("dashboard name '{}'", definition.name)));
    }

    dashboards.push(definition.clone());
    Ok(())
  }

  async fn get(&self, id: DashboardId) -> Result<Option<DashboardDefinition>, RepoError> {
    let dashboards = lock(&self.dashboards)?;
    Ok(dashboards.iter().find(|d| d.id == id).cloned())
  }

  async fn list_for_user(&self, user: UserId) -> Result<Vec<DashboardDefinition>, RepoError> {
    let dashboards = lock(&self.dashboards)?;
    Ok(dashboards.iter().filter(|d| d.user_id == user).cloned().collect())
  }

  async fn name_taken(&self, user: UserId, name: &str) -> Result<bool, RepoError> {
    let dashboards = lock(&self.dashboards)?;
    Ok(dashboards.iter().any(|d| d.user_id == user && d.name == name))
  }

  async fn delete_for_user(&self, user: UserId) -> Result<usize, RepoError> {
    let mut dashboards = lock(&self.dashboards)?;
    let before = dashboards.len();
    dashboards.retain(|d| d.user_id != user);
    Ok(before - dashboards.len())
  }
}
