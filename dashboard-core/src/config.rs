use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::{
    location::DEFAULT_GEOLOCATION_URL,
    model::Coordinates,
    provider::{
        open_meteo::DEFAULT_FORECAST_URL,
        transport::{DEFAULT_LOCATIONS_URL, DEFAULT_STATIONBOARD_URL},
    },
    select::{NearestSelector, OrdinalSelector, Overflow, SelectionStrategy, StationSelector},
};

/// Upstream API endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast: String,
    pub locations: String,
    pub stationboard: String,
    pub geolocation: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: DEFAULT_FORECAST_URL.to_string(),
            locations: DEFAULT_LOCATIONS_URL.to_string(),
            stationboard: DEFAULT_STATIONBOARD_URL.to_string(),
            geolocation: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Maximum departures requested from the stationboard.
    pub limit: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub strategy: SelectionStrategy,
    /// Only used by the ordinal strategy.
    pub index: usize,
    pub overflow: Overflow,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::default(),
            index: OrdinalSelector::DEFAULT_INDEX,
            overflow: Overflow::default(),
        }
    }
}

impl SelectionConfig {
    pub fn selector(&self) -> Box<dyn StationSelector> {
        match self.strategy {
            SelectionStrategy::Nearest => Box::new(NearestSelector),
            SelectionStrategy::Ordinal => Box::new(OrdinalSelector::new(self.index, self.overflow)),
        }
    }
}

/// Top-level configuration, read from TOML. Never written back.
///
/// Example TOML:
/// ```toml
/// [board]
/// limit = 8
///
/// [selection]
/// strategy = "ordinal"
/// index = 5
/// overflow = "clamp"
///
/// [location]
/// latitude = 46.5197
/// longitude = 6.6323
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub board: BoardConfig,
    pub selection: SelectionConfig,
    /// Fixed position; when absent the position comes from IP geolocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}

impl Config {
    /// Load config from the default path, or return defaults if there is no file yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "dashboard", "dashboard-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.board.limit, 5);
        assert_eq!(cfg.selection.strategy, SelectionStrategy::Nearest);
        assert_eq!(cfg.selection.index, 5);
        assert_eq!(cfg.endpoints.forecast, "https://api.open-meteo.com/v1/forecast");
        assert!(cfg.location.is_none());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = Config::from_toml(
            r#"
            [selection]
            strategy = "ordinal"
            overflow = "clamp"

            [endpoints]
            stationboard = "http://localhost:8080/stationboard"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.selection.strategy, SelectionStrategy::Ordinal);
        assert_eq!(cfg.selection.overflow, Overflow::ClampToLast);
        assert_eq!(cfg.selection.index, 5);
        assert_eq!(cfg.endpoints.stationboard, "http://localhost:8080/stationboard");
        assert_eq!(cfg.endpoints.locations, DEFAULT_LOCATIONS_URL);
        assert_eq!(cfg.board.limit, 5);
    }

    #[test]
    fn fixed_location_is_read() {
        let cfg = Config::from_toml("[location]\nlatitude = 46.5\nlongitude = 6.6\n").unwrap();
        assert_eq!(cfg.location, Some(Coordinates::new(46.5, 6.6)));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let err = Config::from_toml("[selection]\nstrategy = \"random\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn toml_roundtrip_keeps_values() {
        let mut cfg = Config::default();
        cfg.board.limit = 8;
        cfg.location = Some(Coordinates::new(47.0, 8.0));

        let back = Config::from_toml(&cfg.to_toml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_explicit_file_names_the_path() {
        let err = Config::load_from(Path::new("/nonexistent/dashboard.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dashboard.toml"));
    }
}
