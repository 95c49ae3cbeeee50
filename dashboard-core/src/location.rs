//! Where the user is.

use async_trait::async_trait;
use serde::Deserialize;
use std::{fmt::Debug, sync::Arc};

use crate::{error::DashboardError, http::HttpClient, model::Coordinates};

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// One-shot position lookup. No retry, no cancellation.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn acquire_coordinates(&self) -> Result<Coordinates, DashboardError>;
}

/// Coordinates given up front by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn acquire_coordinates(&self) -> Result<Coordinates, DashboardError> {
        let Coordinates { latitude, longitude } = self.0;

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DashboardError::LocationUnavailable(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DashboardError::LocationUnavailable(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(self.0)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocation {
    http: Arc<dyn HttpClient>,
    url: String,
}

impl IpLocation {
    pub fn new(http: Arc<dyn HttpClient>, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl LocationSource for IpLocation {
    async fn acquire_coordinates(&self) -> Result<Coordinates, DashboardError> {
        // Every failure here means "we don't know where you are".
        let body = self
            .http
            .get_json(&self.url, &[])
            .await
            .map_err(|e| DashboardError::LocationUnavailable(e.to_string()))?;

        let parsed: IpApiResponse = serde_json::from_value(body)
            .map_err(|e| DashboardError::LocationUnavailable(format!("unexpected response: {e}")))?;

        if parsed.status != "success" {
            return Err(DashboardError::LocationUnavailable(
                parsed.message.unwrap_or_else(|| format!("lookup status '{}'", parsed.status)),
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => FixedLocation(Coordinates::new(lat, lon)).acquire_coordinates().await,
            _ => Err(DashboardError::LocationUnavailable("response carried no position".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::FakeHttp;
    use serde_json::json;

    const URL: &str = "http://geo.test/json";

    fn ip_location(response: Result<serde_json::Value, DashboardError>) -> IpLocation {
        IpLocation::new(Arc::new(FakeHttp::default().with(URL, response)), URL.to_string())
    }

    #[tokio::test]
    async fn fixed_location_returns_its_coordinates() {
        let here = Coordinates::new(46.5197, 6.6323);
        assert_eq!(FixedLocation(here).acquire_coordinates().await.unwrap(), here);
    }

    #[tokio::test]
    async fn fixed_location_rejects_impossible_values() {
        for bad in [Coordinates::new(91.0, 0.0), Coordinates::new(0.0, -181.0), Coordinates::new(f64::NAN, 0.0)]
        {
            let err = FixedLocation(bad).acquire_coordinates().await.unwrap_err();
            assert!(matches!(err, DashboardError::LocationUnavailable(_)), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn ip_location_reads_lat_lon() {
        let source = ip_location(Ok(json!({
            "status": "success",
            "country": "Switzerland",
            "city": "Lausanne",
            "lat": 46.5196,
            "lon": 6.6323
        })));

        let at = source.acquire_coordinates().await.unwrap();
        assert_eq!(at, Coordinates::new(46.5196, 6.6323));
    }

    #[tokio::test]
    async fn ip_location_failure_status_is_location_unavailable() {
        let source = ip_location(Ok(json!({ "status": "fail", "message": "private range" })));

        let err = source.acquire_coordinates().await.unwrap_err();
        assert_eq!(err, DashboardError::LocationUnavailable("private range".into()));
    }

    #[tokio::test]
    async fn ip_location_network_error_is_location_unavailable() {
        let source = ip_location(Err(DashboardError::network(URL, "timed out")));

        let err = source.acquire_coordinates().await.unwrap_err();
        assert!(matches!(err, DashboardError::LocationUnavailable(msg) if msg.contains("timed out")));
    }
}
