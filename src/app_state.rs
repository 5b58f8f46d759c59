//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{dataset::Dataset, filters::RegionFilterPlacement};

/// The state of the REST server.
///
/// The dataset is loaded once and shared read-only between requests, so
/// cloning the state is cheap and needs no locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The enrollment records loaded at startup.
    pub dataset: Arc<Dataset>,

    /// Whether the region filter is global or per page.
    pub region_filter: RegionFilterPlacement,
}

impl AppState {
    /// Create a new [AppState] from a loaded dataset.
    pub fn new(dataset: Arc<Dataset>, region_filter: RegionFilterPlacement) -> Self {
        Self {
            dataset,
            region_filter,
        }
    }
}
