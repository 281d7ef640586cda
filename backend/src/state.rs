use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use datalens_core::domain::{DashboardDraft, UserId};
use datalens_core::ports::{DashboardRepository, TrackRepository};
use datalens_core::services::{DashboardService, LibraryService};

pub type SharedDashboardService = DashboardService<dyn TrackRepository, dyn DashboardRepository>;
pub type SharedLibraryService = LibraryService<dyn TrackRepository, dyn DashboardRepository>;

/// One editor draft per user, each behind its own async lock.
///
/// Entries live for the life of the process and are only removed by
/// [`AppState::discard_draft`] (account purge). Memory grows with the number
/// of distinct users that opened the editor.
type Drafts = Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<DashboardDraft>>>>;

#[derive(Clone)]
pub struct AppState {
  pub dashboards: Arc<SharedDashboardService>,
  pub library: Arc<SharedLibraryService>,
  drafts: Arc<Drafts>,
}

impl AppState {
  pub fn new(tracks: Arc<dyn TrackRepository>, dashboards: Arc<dyn DashboardRepository>) -> Self {
    Self {
      dashboards: Arc::new(DashboardService::new(tracks.clone(), dashboards.clone())),
      library: Arc::new(LibraryService::new(tracks, dashboards)),
      drafts: Arc::new(Mutex::new(HashMap::new())),
    }
  }

  /// The editor draft of `user`, created empty on first use.
  pub fn draft(&self, user: UserId) -> Arc<tokio::sync::Mutex<DashboardDraft>> {
    let mut drafts = self.drafts.lock().unwrap_or_else(PoisonError::into_inner);
    drafts.entry(user).or_default().clone()
  }

  /// Drops the editor draft of `user`, if any.
  pub fn discard_draft(&self, user: UserId) {
    self.drafts.lock().unwrap_or_else(PoisonError::into_inner).remove(&user);
  }
}
