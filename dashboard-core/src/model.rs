use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// A position in degrees, as reported by a location source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance in metres.
    pub fn distance_m(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

/// Today's temperature range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub min_temperature_c: f64,
    pub max_temperature_c: f64,
}

/// Daily series as returned by the forecast API; index 0 is today.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecast {
    pub daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailySeries {
    pub temperature_2m_min: Vec<Option<f64>>,
    pub temperature_2m_max: Vec<Option<f64>>,
}

impl ForecastSummary {
    /// Take today's values out of the daily series.
    pub fn from_raw(raw: &RawForecast) -> Result<Self, DashboardError> {
        let today = |series: &[Option<f64>], name: &str| {
            series.first().copied().flatten().ok_or_else(|| {
                DashboardError::data_format("forecast", format!("no value for today in `{name}`"))
            })
        };

        Ok(Self {
            min_temperature_c: today(&raw.daily.temperature_2m_min, "temperature_2m_min")?,
            max_temperature_c: today(&raw.daily.temperature_2m_max, "temperature_2m_max")?,
        })
    }
}

/// One entry of the transit-location query, in API order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationCandidate {
    pub name: String,
    /// Distance from the queried point, when the API reports it.
    pub distance_m: Option<f64>,
    pub coordinates: Option<Coordinates>,
}

impl StationCandidate {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), distance_m: None, coordinates: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDeparture {
    /// Always `HH:MM`, 24-hour, zero-padded.
    pub departure_time: String,
    pub destination: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedStationBoard {
    pub station: String,
    pub departures: Vec<NormalizedDeparture>,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub coordinates: Coordinates,
    pub forecast: ForecastSummary,
    pub board: NormalizedStationBoard,
}
