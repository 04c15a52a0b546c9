//! Configuration loading and management for the Roster Engine.
//!
//! This module provides functionality to load engine settings (assignment
//! buffer, ranking threshold, check-in window, geocode cache TTL) from YAML.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Check-in opens {} minutes early", config.config().check_in.opens_minutes_before_start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CheckInPolicy, EngineConfig, GeocodingConfig, MAX_CACHE_TTL_SECONDS, RankingConfig,
    SchedulingConfig,
};
