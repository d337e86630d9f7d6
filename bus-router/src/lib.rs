//! Bus route finder.
//!
//! Finds and ranks bus itineraries between two stops: which services to
//! ride, where to change, and how far each option travels.

pub mod domain;
pub mod graph;
pub mod planner;
pub mod repository;
pub mod web;
