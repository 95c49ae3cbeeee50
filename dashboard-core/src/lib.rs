//! Core library for the `dashboard` CLI.
//!
//! This crate defines:
//! - Configuration (endpoints, board size, station selection, fixed location)
//! - Location sources and the HTTP capability every fetcher goes through
//! - Weather and transit providers
//! - Stationboard normalization and station selection
//! - Presentation sinks and the pipeline tying it all together
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod http;
pub mod location;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod select;

pub use config::Config;
pub use error::DashboardError;
pub use http::{HttpClient, ReqwestHttp};
pub use location::{FixedLocation, IpLocation, LocationSource};
pub use model::{
    Coordinates, Dashboard, ForecastSummary, NormalizedDeparture, NormalizedStationBoard,
    StationCandidate,
};
pub use normalize::{normalize, normalize_in};
pub use pipeline::DashboardPipeline;
pub use provider::{TransitProvider, WeatherProvider};
pub use render::{HtmlSink, NullSink, PresentationSink, TextSink};
pub use select::{NearestSelector, OrdinalSelector, Overflow, SelectionStrategy, StationSelector};
