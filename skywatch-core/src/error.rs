use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Failed to fetch weather data. Please check your network connection.";
pub const GENERIC_API_ERROR_MESSAGE: &str = "Unable to fetch weather data for this location.";
pub const PARSE_ERROR_MESSAGE: &str = "Received malformed weather data from the provider.";

/// Failure of a single weather fetch. None of these are retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A 2xx body that does not have the expected shape.
    #[error("failed to parse weather response: {0}")]
    Parse(String),
}

impl FetchError {
    /// The string shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            FetchError::Api { message, .. } => message.clone(),
            FetchError::Parse(_) => PARSE_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Why no device position could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}
