pub mod dashboard_service;
pub mod library_service;

pub use dashboard_service::DashboardService;
pub use library_service::LibraryService;
