//! Boundary between the fetch layer and the core transforms.

pub mod api;
pub mod decode;
pub mod error;

use std::future::Future;

use crate::domain::{ObservationRecord, SnapshotRow};

pub use api::ApiClient;
pub use error::SourceError;

/// Latest ranked snapshot, in chart order
pub trait SnapshotSource {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Vec<SnapshotRow>, SourceError>> + Send;
}

/// Historical observations for the trend view
pub trait HistorySource {
    fn fetch_history(&self) -> impl Future<Output = Result<Vec<ObservationRecord>, SourceError>> + Send;
}

/// Starts a new collection run and resolves once it has finished
pub trait CollectionTrigger {
    fn trigger_collection(&self) -> impl Future<Output = Result<(), SourceError>> + Send;
}
