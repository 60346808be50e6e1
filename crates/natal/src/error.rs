use thiserror::Error;

/// Errors that can occur while computing a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("Ascendant is numerically unstable at latitude {latitude}: {detail}")]
    NumericInstability { latitude: f64, detail: String },
    #[error("Longitude {value} cannot be mapped to a zodiac sign")]
    OutOfRange { value: f64 },
    #[error("Ephemeris provider {provider} failed: {message}")]
    Provider { provider: String, message: String },
}

impl ChartError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for failures of an external provider, the only kind the
    /// low-precision engine may stand in for.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

/// Errors from resolving a city name to coordinates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("City name is empty")]
    EmptyQuery,
    #[error("No coordinates known for {city}")]
    NotFound { city: String },
    #[error("City table is malformed: {message}")]
    InvalidTable { message: String },
}
