use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::FetchError, model::Coordinate, model::WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// A source of current weather for a coordinate.
///
/// Each call is a single best-effort attempt: no retries and no caching.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_weather(&self, coordinate: Coordinate) -> Result<WeatherSnapshot, FetchError>;
}
