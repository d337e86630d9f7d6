//! Web layer for the bus route finder.
//!
//! A thin JSON API over the planner. Handlers only parse parameters, run
//! the synchronous planner on the blocking pool and shape responses.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppRepository, AppState};
