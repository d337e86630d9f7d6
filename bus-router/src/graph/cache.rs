//! Disk cache for the connectivity graph.
//!
//! Building the graph walks every stop in the repository, so the result is
//! kept as a JSON file. The cache is trusted as-is: there is no version or
//! freshness check. Stops that are missing from a stale cache are filled in
//! lazily by [`ConnectivityGraph::repair`] during search, and a full rebuild
//! is the caller's choice.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::ConnectivityGraph;
use crate::repository::{Repository, RepositoryError};

/// Errors reading or writing the graph cache file.
#[derive(Debug, thiserror::Error)]
pub enum GraphCacheError {
    /// File could not be read or written
    #[error("graph cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not a graph
    #[error("graph cache is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the graph disk cache.
#[derive(Debug, Clone)]
pub struct GraphCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
}

impl GraphCacheConfig {
    /// Create a new cache config with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for GraphCacheConfig {
    fn default() -> Self {
        // Default to a cache file in the current directory
        Self::new("graph.json")
    }
}

/// Disk cache for the connectivity graph.
#[derive(Debug, Clone)]
pub struct GraphCache {
    config: GraphCacheConfig,
}

impl GraphCache {
    /// Create a new graph cache with the given config.
    pub fn new(config: GraphCacheConfig) -> Self {
        Self { config }
    }

    /// Read the cached graph.
    pub fn load(&self) -> Result<ConnectivityGraph, GraphCacheError> {
        let contents = std::fs::read_to_string(&self.config.path)?;
        Ok(ConnectivityGraph::from_json(&contents)?)
    }

    /// Write a graph to the cache file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, graph: &ConnectivityGraph) -> Result<(), GraphCacheError> {
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = graph.to_json()?;
        std::fs::write(&self.config.path, json)?;
        Ok(())
    }

    /// Load the cached graph, or build it from the repository.
    ///
    /// With `use_cache` set, a readable cache file is returned unchanged.
    /// Otherwise, and whenever the file is missing or corrupt, the graph is
    /// rebuilt and written back. A failed write is logged, not returned.
    pub fn load_or_build<R: Repository + ?Sized>(
        &self,
        repository: &R,
        use_cache: bool,
    ) -> Result<ConnectivityGraph, RepositoryError> {
        if use_cache {
            match self.load() {
                Ok(graph) => {
                    info!(
                        path = %self.config.path.display(),
                        nodes = graph.node_count(),
                        "Loaded connectivity graph from cache"
                    );
                    return Ok(graph);
                }
                Err(e) => {
                    warn!(
                        path = %self.config.path.display(),
                        error = %e,
                        "Graph cache unavailable, rebuilding"
                    );
                }
            }
        }

        let graph = ConnectivityGraph::build(repository)?;
        if let Err(e) = self.save(&graph) {
            warn!(
                path = %self.config.path.display(),
                error = %e,
                "Failed to write graph cache"
            );
        }
        Ok(graph)
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
