pub mod collection;
pub mod dashboard;
pub mod server;

pub use collection::CollectionService;
pub use dashboard::{DashboardService, DashboardView};
pub use server::ServerService;
