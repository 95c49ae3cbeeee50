//! Station selection strategies.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::DashboardError;
use crate::model::{Coordinates, StationCandidate};

/// Picks the station whose departures get shown.
pub trait StationSelector: Send + Sync + Debug {
    fn select_station(
        &self,
        candidates: &[StationCandidate],
        origin: Coordinates,
    ) -> Result<String, DashboardError>;
}

/// What [`OrdinalSelector`] does when the list is shorter than its index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    #[default]
    Fail,
    #[serde(alias = "clamp")]
    ClampToLast,
}

/// Fixed-position pick, ignoring distance entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalSelector {
    pub index: usize,
    pub overflow: Overflow,
}

impl OrdinalSelector {
    pub const DEFAULT_INDEX: usize = 5;

    pub fn new(index: usize, overflow: Overflow) -> Self {
        Self { index, overflow }
    }
}

impl Default for OrdinalSelector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INDEX, Overflow::Fail)
    }
}

impl StationSelector for OrdinalSelector {
    fn select_station(
        &self,
        candidates: &[StationCandidate],
        _origin: Coordinates,
    ) -> Result<String, DashboardError> {
        let out_of_range =
            || DashboardError::IndexOutOfRange { index: self.index, available: candidates.len() };

        let picked = match (candidates.get(self.index), self.overflow) {
            (Some(c), _) => c,
            (None, Overflow::ClampToLast) => candidates.last().ok_or_else(out_of_range)?,
            (None, Overflow::Fail) => return Err(out_of_range()),
        };

        Ok(picked.name.clone())
    }
}

/// Closest candidate to the origin.
///
/// Uses the API-reported distance when present, otherwise the great-circle
/// distance from the candidate's coordinates. Candidates with neither rank
/// last; ties keep API order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestSelector;

impl NearestSelector {
    fn distance(candidate: &StationCandidate, origin: &Coordinates) -> f64 {
        candidate
            .distance_m
            .or_else(|| candidate.coordinates.map(|c| origin.distance_m(&c)))
            .filter(|d| d.is_finite())
            .unwrap_or(f64::INFINITY)
    }
}

impl StationSelector for NearestSelector {
    fn select_station(
        &self,
        candidates: &[StationCandidate],
        origin: Coordinates,
    ) -> Result<String, DashboardError> {
        candidates
            .iter()
            .map(|c| (Self::distance(c, &origin), c))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, c)| c.name.clone())
            .ok_or(DashboardError::IndexOutOfRange { index: 0, available: 0 })
    }
}

/// Which strategy the config/CLI asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    #[default]
    Nearest,
    Ordinal,
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::Nearest => "nearest",
            SelectionStrategy::Ordinal => "ordinal",
        }
    }
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SelectionStrategy {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "nearest" => Ok(SelectionStrategy::Nearest),
            "ordinal" => Ok(SelectionStrategy::Ordinal),
            _ => Err(anyhow::anyhow!(
                "Unknown selection strategy '{value}'. Supported strategies: nearest, ordinal."
            )),
        }
    }
}
