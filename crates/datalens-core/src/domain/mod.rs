pub mod chart;
pub mod chart_id;
pub mod dashboard;
pub mod ids;
pub mod release_date;
pub mod slot;
pub mod track;

pub use chart::{Chart, ChartData, ChartKind};
pub use chart_id::{AnalyticalChart, ChartId, KpiChart, NONE_ID};
pub use dashboard::{ChartOutcome, DashboardDefinition, DashboardDraft, DashboardView, SlotValues, SlotView};
pub use ids::{DashboardId, UserId};
pub use release_date::ReleaseDate;
pub use slot::{Slot, SlotKind};
pub use track::TrackRecord;
