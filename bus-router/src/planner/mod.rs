//! Path planner over the stop connectivity graph.
//!
//! Answers "which buses get me from stop A to stop B?" in four stages:
//! bounded breadth-first search for stop sequences, expansion of each
//! sequence into the services that can ride it, deduplication of
//! operationally identical itineraries, and ranking by distance or by
//! number of services.

mod bfs;
mod config;
mod expand;
mod rank;
mod ranked;
mod search;


pub use bfs::{PathSearchResult, search_paths};
pub use config::SearchConfig;
pub use expand::{Expander, expand_path, hop_distance};
pub use rank::{deduplicate, rank_itineraries};
pub use ranked::{Ranked, RankedResultSet};
pub use search::{Planner, PlannerError, SearchResult};
