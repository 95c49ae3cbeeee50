use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::DashboardError,
    http::HttpClient,
    model::{Coordinates, RawForecast},
};

use super::WeatherProvider;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Open-Meteo daily temperature forecast.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Arc<dyn HttpClient>,
    url: String,
}

impl OpenMeteoProvider {
    pub fn new(http: Arc<dyn HttpClient>, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_forecast(&self, at: Coordinates) -> Result<RawForecast, DashboardError> {
        let body = self
            .http
            .get_json(
                &self.url,
                &[
                    ("latitude", at.latitude.to_string()),
                    ("longitude", at.longitude.to_string()),
                    ("daily", "temperature_2m_max,temperature_2m_min".to_string()),
                ],
            )
            .await?;

        serde_json::from_value(body).map_err(|e| DashboardError::data_format("forecast", e.to_string()))
    }
}
