use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::DashboardError,
    http::HttpClient,
    model::{Coordinates, StationCandidate},
};

use super::TransitProvider;

pub const DEFAULT_LOCATIONS_URL: &str = "https://transport.opendata.ch/v1/locations";
pub const DEFAULT_STATIONBOARD_URL: &str = "https://transport.opendata.ch/v1/stationboard";

/// Swiss public transport API (transport.opendata.ch).
#[derive(Debug, Clone)]
pub struct TransportProvider {
    http: Arc<dyn HttpClient>,
    locations_url: String,
    stationboard_url: String,
}

impl TransportProvider {
    pub fn new(http: Arc<dyn HttpClient>, locations_url: String, stationboard_url: String) -> Self {
        Self { http, locations_url, stationboard_url }
    }
}

// The API's `x` is latitude and `y` is longitude.
#[derive(Debug, Deserialize)]
struct TpCoordinate {
    x: Option<f64>,
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TpStation {
    name: String,
    distance: Option<f64>,
    coordinate: Option<TpCoordinate>,
}

#[derive(Debug, Deserialize)]
struct TpLocationsResponse {
    stations: Vec<TpStation>,
}

impl From<TpStation> for StationCandidate {
    fn from(station: TpStation) -> Self {
        let coordinates = station.coordinate.and_then(|c| match (c.x, c.y) {
            (Some(x), Some(y)) => Some(Coordinates::new(x, y)),
            _ => None,
        });

        StationCandidate { name: station.name, distance_m: station.distance, coordinates }
    }
}

#[async_trait]
impl TransitProvider for TransportProvider {
    async fn fetch_nearby_stations(
        &self,
        at: Coordinates,
    ) -> Result<Vec<StationCandidate>, DashboardError> {
        let body = self
            .http
            .get_json(
                &self.locations_url,
                &[("x", at.latitude.to_string()), ("y", at.longitude.to_string())],
            )
            .await?;

        let parsed: TpLocationsResponse = serde_json::from_value(body)
            .map_err(|e| DashboardError::data_format("locations", e.to_string()))?;

        tracing::debug!(count = parsed.stations.len(), "station candidates");

        Ok(parsed.stations.into_iter().map(StationCandidate::from).collect())
    }

    async fn fetch_departure_board(&self, station: &str, limit: u32) -> Result<Value, DashboardError> {
        self.http
            .get_json(
                &self.stationboard_url,
                &[("station", station.to_string()), ("limit", limit.to_string())],
            )
            .await
    }
}
