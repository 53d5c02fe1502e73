//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section is optional; a missing file yields the defaults.
//! Command-line flags are layered on top by the binary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::defaults;
use crate::engine::ranker::DEFAULT_RELEGATION_ZONE;
use crate::table::DuplicatePolicy;
use crate::types::LeagueError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub league: LeagueConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LeagueConfig {
    pub name: String,
    /// Number of bottom teams flagged as the relegation zone.
    pub relegation_zone: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            name: defaults::LEAGUE_NAME.to_string(),
            relegation_zone: DEFAULT_RELEGATION_ZONE,
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct InputConfig {
    pub points_csv: Option<PathBuf>,
    pub fixtures_csv: Option<PathBuf>,
    pub predictions: Option<PathBuf>,
    /// Drop fixtures dated before today.
    pub upcoming_only: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub json_report: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.input.points_csv.is_some() != self.input.fixtures_csv.is_some() {
            return Err(LeagueError::Config(
                "points_csv and fixtures_csv must be given together".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.league.relegation_zone, 2);
        assert_eq!(cfg.league.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(cfg.league.name, "Cricket League");
        assert!(cfg.input.points_csv.is_none());
        assert!(!cfg.input.upcoming_only);
    }

    #[test]
    fn test_full_config() {
        let cfg = AppConfig::from_toml(
            r#"
            [league]
            name = "Division 2"
            relegation_zone = 3
            duplicate_policy = "last_write_wins"

            [input]
            points_csv = "data/points.csv"
            fixtures_csv = "data/fixtures.csv"
            upcoming_only = true

            [output]
            json_report = "out/report.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.league.name, "Division 2");
        assert_eq!(cfg.league.relegation_zone, 3);
        assert_eq!(cfg.league.duplicate_policy, DuplicatePolicy::LastWriteWins);
        assert_eq!(cfg.input.points_csv, Some(PathBuf::from("data/points.csv")));
        assert!(cfg.input.upcoming_only);
        assert_eq!(cfg.output.json_report, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn test_unknown_duplicate_policy_rejected() {
        assert!(AppConfig::from_toml("[league]\nduplicate_policy = \"merge\"\n").is_err());
    }

    #[test]
    fn test_points_without_fixtures_rejected() {
        let err = AppConfig::from_toml("[input]\npoints_csv = \"p.csv\"\n").unwrap_err();
        assert!(err.to_string().contains("must be given together"), "{err}");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let cfg = AppConfig::load_or_default(Path::new("/nonexistent/relegation.toml")).unwrap();
        assert_eq!(cfg.league.relegation_zone, 2);
    }
}
