//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, MAX_CACHE_TTL_SECONDS};

/// Loads and provides access to engine configuration.
///
/// # File Layout
///
/// ```text
/// config/engine.yaml
/// scheduling:
///   assignment_buffer_minutes: 60
///   apply_buffer_to_truck_assignments: false
/// ranking:
///   equal_distance_threshold_km: 5.0
/// check_in:
///   opens_minutes_before_start: 240
///   closes_minutes_after_start: 60
///   overtime_grace_minutes: 240
/// geocoding:
///   cache_ttl_seconds: 3600
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("Buffer: {} minutes", loader.config().scheduling.assignment_buffer_minutes);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (e.g. a negative ranking threshold)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<EngineConfig>(path)?;
        Self::validate(path, &config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(path: &Path, config: &EngineConfig) -> EngineResult<()> {
        let threshold = config.ranking.equal_distance_threshold_km;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "ranking.equal_distance_threshold_km must be a non-negative number, got {}",
                    threshold
                ),
            });
        }

        let ttl = config.geocoding.cache_ttl_seconds;
        if ttl > MAX_CACHE_TTL_SECONDS {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "geocoding.cache_ttl_seconds must be at most {}, got {}",
                    MAX_CACHE_TTL_SECONDS, ttl
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::io::Write;

    fn config_path() -> &'static str {
        "./config/engine.yaml"
    }

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "roster_engine_{}_{}.yaml",
            name,
            uuid::Uuid::new_v4()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_shipped_configuration_matches_defaults() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        assert_eq!(result.unwrap().config(), &EngineConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/engine.yaml") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let path = write_temp("invalid", "scheduling: [not, a, map");
        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let path = write_temp("negative", "ranking:\n  equal_distance_threshold_km: -1.0\n");
        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();
        match result {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("equal_distance_threshold_km"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_cache_ttl_rejected() {
        let path = write_temp("ttl", "geocoding:\n  cache_ttl_seconds: 10000000000000\n");
        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();
        match result {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("cache_ttl_seconds"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_ten_year_cache_ttl_accepted() {
        let path = write_temp(
            "ttl_max",
            &format!("geocoding:\n  cache_ttl_seconds: {}\n", MAX_CACHE_TTL_SECONDS),
        );
        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let path = write_temp(
            "override",
            "scheduling:\n  assignment_buffer_minutes: 30\n  apply_buffer_to_truck_assignments: true\n",
        );
        let loader = ConfigLoader::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(
            loader.config().scheduling.assignment_buffer(),
            Duration::minutes(30)
        );
        assert!(loader.config().scheduling.apply_buffer_to_truck_assignments);
    }
}
