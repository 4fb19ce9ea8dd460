//! Error types for weather lookups.

use std::fmt;

use thiserror::Error;

/// Result type alias for weather lookups.
pub type Result<T> = std::result::Result<T, WeatherError>;

/// The upstream call a multi-step lookup was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    Geocode,
    Point,
    Stations,
    Observation,
    Forecast,
    AirQuality,
}

impl fmt::Display for LookupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStep::Geocode => "geocoding",
            LookupStep::Point => "point",
            LookupStep::Stations => "observation stations",
            LookupStep::Observation => "latest observation",
            LookupStep::Forecast => "gridpoint forecast",
            LookupStep::AirQuality => "air quality",
        };
        f.write_str(name)
    }
}

/// Weather lookup error types.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("Request to {url} failed with status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    /// A place name did not resolve to coordinates.
    #[error("Unable to find location for '{0}'")]
    LocationNotFound(String),

    /// Caller input rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered but had nothing usable.
    #[error("No data available: {0}")]
    NoData(String),

    /// A failure inside one step of a multi-step lookup.
    #[error("{step} lookup failed: {source}")]
    Lookup {
        step: LookupStep,
        #[source]
        source: Box<WeatherError>,
    },
}

impl WeatherError {
    /// Tags this error with the lookup step that produced it.
    pub fn at(self, step: LookupStep) -> Self {
        WeatherError::Lookup {
            step,
            source: Box::new(self),
        }
    }

    /// The innermost error, with any step wrappers removed.
    pub fn root(&self) -> &WeatherError {
        match self {
            WeatherError::Lookup { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the caller supplied something that cannot be served: bad
    /// input, an unknown place, or a point outside NWS coverage.
    pub fn is_caller_error(&self) -> bool {
        match self {
            WeatherError::Lookup {
                step: LookupStep::Point,
                source,
            } => matches!(
                source.as_ref(),
                WeatherError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND
            ) || source.is_caller_error(),
            WeatherError::Lookup { source, .. } => source.is_caller_error(),
            WeatherError::InvalidInput(_) | WeatherError::LocationNotFound(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Network(e.to_string())
    }
}
