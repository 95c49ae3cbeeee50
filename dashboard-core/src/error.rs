//! Error kinds shared by every pipeline stage.

/// The single failure type of a dashboard run.
///
/// Each stage returns one of these unchanged; nothing recovers locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    /// The location source refused or could not determine a position.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    /// Transport failure or a non-success HTTP status.
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// A payload did not have the expected shape.
    #[error("unexpected {what} payload: {message}")]
    DataFormat { what: &'static str, message: String },

    /// Station selection asked for a candidate that does not exist.
    #[error("no station candidate at position {index} ({available} available)")]
    IndexOutOfRange { index: usize, available: usize },
}

impl DashboardError {
    pub(crate) fn data_format(what: &'static str, message: impl Into<String>) -> Self {
        DashboardError::DataFormat { what, message: message.into() }
    }

    pub(crate) fn network(url: &str, message: impl Into<String>) -> Self {
        DashboardError::Network { url: url.to_string(), message: message.into() }
    }
}
