//! Application state for the web layer.

use std::sync::Arc;

use crate::graph::ConnectivityGraph;
use crate::planner::SearchConfig;
use crate::repository::{CachedRepository, MemoryRepository};

/// Repository type served by the application.
pub type AppRepository = CachedRepository<MemoryRepository>;

/// Shared application state.
///
/// The graph is the one loaded at startup. Queries search their own clone
/// of it, so repairs made during a query are not shared.
#[derive(Clone)]
pub struct AppState {
    /// Stop and service data
    pub repository: Arc<AppRepository>,

    /// Connectivity graph loaded at startup
    pub graph: Arc<ConnectivityGraph>,

    /// Path search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(repository: AppRepository, graph: ConnectivityGraph, config: SearchConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            graph: Arc::new(graph),
            config: Arc::new(config),
        }
    }
}
