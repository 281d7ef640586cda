pub mod dashboard_repository;
pub mod memory;
pub mod track_repository;

pub use dashboard_repository::DashboardRepository;
pub use memory::InMemoryLibrary;
pub use track_repository::{RepoError, TrackRepository};
