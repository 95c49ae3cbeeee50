//! The dashboard run: locate, fetch weather and nearby stations together,
//! pick a station, fetch and normalize its departures, render.

use std::sync::Arc;

use crate::{
    Config,
    error::DashboardError,
    http::HttpClient,
    location::{FixedLocation, IpLocation, LocationSource},
    model::{Dashboard, ForecastSummary},
    normalize::normalize,
    provider::{
        TransitProvider, WeatherProvider, transit_provider_from_config,
        weather_provider_from_config,
    },
    render::PresentationSink,
    select::StationSelector,
};

#[derive(Debug)]
pub struct DashboardPipeline {
    location: Box<dyn LocationSource>,
    weather: Box<dyn WeatherProvider>,
    transit: Box<dyn TransitProvider>,
    selector: Box<dyn StationSelector>,
    board_limit: u32,
}

impl DashboardPipeline {
    pub fn new(
        location: Box<dyn LocationSource>,
        weather: Box<dyn WeatherProvider>,
        transit: Box<dyn TransitProvider>,
        selector: Box<dyn StationSelector>,
        board_limit: u32,
    ) -> Self {
        Self { location, weather, transit, selector, board_limit }
    }

    /// Wire every stage from config, sharing one HTTP client.
    pub fn from_config(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let location: Box<dyn LocationSource> = match config.location {
            Some(at) => Box::new(FixedLocation(at)),
            None => Box::new(IpLocation::new(http.clone(), config.endpoints.geolocation.clone())),
        };

        Self::new(
            location,
            weather_provider_from_config(config, http.clone()),
            transit_provider_from_config(config, http),
            config.selection.selector(),
            config.board.limit,
        )
    }

    /// Run once. The first failure ends the run and is the only one reported;
    /// anything already rendered stays in the sink.
    pub async fn run(&self, sink: &mut dyn PresentationSink) -> Result<Dashboard, DashboardError> {
        let result = self.run_inner(sink).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "dashboard run failed");
        }
        result
    }

    async fn run_inner(&self, sink: &mut dyn PresentationSink) -> Result<Dashboard, DashboardError> {
        let coordinates = self.location.acquire_coordinates().await?;
        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "location acquired"
        );

        let (raw_forecast, candidates) = tokio::try_join!(
            self.weather.fetch_forecast(coordinates),
            self.transit.fetch_nearby_stations(coordinates),
        )?;

        let forecast = ForecastSummary::from_raw(&raw_forecast)?;
        sink.render_weather(forecast.min_temperature_c, forecast.max_temperature_c);

        let station = self.selector.select_station(&candidates, coordinates)?;
        tracing::debug!(%station, candidates = candidates.len(), "station selected");

        let raw_board = self.transit.fetch_departure_board(&station, self.board_limit).await?;
        let board = normalize(raw_board)?;
        tracing::debug!(station = %board.station, departures = board.departures.len(), "board normalized");

        sink.render_station_name(&board.station);
        for departure in &board.departures {
            sink.render_train_row(departure);
        }

        Ok(Dashboard { coordinates, forecast, board })
    }
}
