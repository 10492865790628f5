//! Sources of the "current position" of the machine running skywatch.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, info, warn};

use crate::{
    error::LocationError,
    model::{Coordinate, PositionOptions},
};

pub const IP_API_BASE_URL: &str = "http://ip-api.com";

/// Platform capability that answers "where am I?".
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinate, LocationError>;
}

/// Approximates the device position from its public IP address (ip-api.com).
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    base_url: String,
    http: Client,
}

impl IpGeolocator {
    pub fn new() -> Self {
        Self::with_base_url(IP_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn lookup(&self) -> Result<Coordinate, LocationError> {
        let url = format!("{}/json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("fields", "status,message,lat,lon,city")])
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LocationError::Denied);
        }
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "geolocation service returned {status}"
            )));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        match body {
            IpApiResponse {
                status,
                lat: Some(lat),
                lon: Some(lon),
                city,
                ..
            } if status == "success" => {
                info!(lat, lon, city = city.as_deref().unwrap_or("?"), "resolved position from IP");
                Ok(Coordinate::new(lat, lon))
            }
            IpApiResponse { message, .. } => Err(LocationError::Unavailable(
                message.unwrap_or_else(|| "geolocation service returned no position".into()),
            )),
        }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinate, LocationError> {
        // IP lookups have a single accuracy level and are never cached,
        // so only the timeout applies here.
        debug!(
            high_accuracy = options.high_accuracy,
            timeout = ?options.timeout,
            "requesting position from IP geolocation"
        );

        match tokio::time::timeout(options.timeout, self.lookup()).await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!(error = %e, "IP geolocation failed");
                }
                result
            }
            Err(_) => {
                warn!("IP geolocation timed out");
                Err(LocationError::Timeout)
            }
        }
    }
}

/// A position supplied by the user, treated as a device fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinate);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Used when geolocation is switched off in the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}
