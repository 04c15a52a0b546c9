//! Roster Engine for food-truck staffing.
//!
//! This crate decides whether employees can be assigned to event shifts,
//! ranks eligible candidates by proximity and cost, derives the live
//! check-in state of a shift, and records check-in/check-out clock events.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod time;
