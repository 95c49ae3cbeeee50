use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

use crate::{
    Config,
    error::DashboardError,
    http::HttpClient,
    model::{Coordinates, RawForecast, StationCandidate},
    provider::{open_meteo::OpenMeteoProvider, transport::TransportProvider},
};

pub mod open_meteo;
pub mod transport;

/// Daily forecast source.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, at: Coordinates) -> Result<RawForecast, DashboardError>;
}

/// Station lookup and departure boards.
#[async_trait]
pub trait TransitProvider: Send + Sync + Debug {
    async fn fetch_nearby_stations(
        &self,
        at: Coordinates,
    ) -> Result<Vec<StationCandidate>, DashboardError>;

    /// Raw stationboard payload, to be passed through [`crate::normalize`].
    async fn fetch_departure_board(&self, station: &str, limit: u32) -> Result<Value, DashboardError>;
}

/// Construct the weather provider for the configured endpoint.
pub fn weather_provider_from_config(
    config: &Config,
    http: Arc<dyn HttpClient>,
) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::new(http, config.endpoints.forecast.clone()))
}

/// Construct the transit provider for the configured endpoints.
pub fn transit_provider_from_config(
    config: &Config,
    http: Arc<dyn HttpClient>,
) -> Box<dyn TransitProvider> {
    Box::new(TransportProvider::new(
        http,
        config.endpoints.locations.clone(),
        config.endpoints.stationboard.clone(),
    ))
}

#[cfg(test)]
pub(crate) mod fake {
    //! Canned HTTP responses keyed by URL, with a request log.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct FakeHttp {
        responses: HashMap<String, Result<Value, DashboardError>>,
        pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeHttp {
        pub fn with(mut self, url: &str, response: Result<Value, DashboardError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
        }

        pub fn query_of(&self, url: &str) -> Vec<(String, String)> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u == url)
                .map(|(_, q)| q.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl HttpClient for FakeHttp {
        async fn get_json(
            &self,
            url: &str,
            query: &[(&str, String)],
        ) -> Result<Value, DashboardError> {
            self.requests.lock().unwrap().push((
                url.to_string(),
                query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            ));

            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(DashboardError::network(url, "no canned response")))
        }
    }
}
