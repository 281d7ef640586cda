use async_trait::async_trait;

use crate::domain::{DashboardDefinition, DashboardId, UserId};
use crate::ports::RepoError;

/// Persistence of dashboard definitions. Rows are only ever inserted.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
  /// Stores a new definition. A name the user already owns is a
  /// [`RepoError::Conflict`].
  async fn insert(&self, definition: &DashboardDefinition) -> Result<(), RepoError>;

  async fn get(&self, id: DashboardId) -> Result<Option<DashboardDefinition>, RepoError>;

  /// Definitions of `user`, oldest first.
  async fn list_for_user(&self, user: UserId) -> Result<Vec<DashboardDefinition>, RepoError>;

  async fn name_taken(&self, user: UserId, name: &str) -> Result<bool, RepoError>;

  async fn delete_for_user(&self, user: UserId) -> Result<usize, RepoError>;
}
