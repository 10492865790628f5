use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback position used whenever the device position is not available.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    latitude: 19.0760,
    longitude: 72.8777,
};

macro_rules! default_location_name {
    () => {
        "Mumbai"
    };
}
pub(crate) use default_location_name;

pub const DEFAULT_LOCATION_NAME: &str = default_location_name!();

/// A point on the globe, in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Options forwarded to the position source on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached position that may be returned. Zero forces a fresh lookup.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Everything shown for one location at one point in time.
///
/// Produced wholesale by a successful fetch and replaced, never merged, by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    pub coordinate: Coordinate,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub sea_level_hpa: Option<f64>,
    pub ground_level_hpa: Option<f64>,
    pub visibility_m: u32,
    pub wind_speed_mps: f64,
    pub wind_deg: f64,
    pub cloudiness_pct: u8,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub condition_id: u32,
    /// Primary category as reported by the provider, e.g. "Rain" or "Clouds".
    pub condition: String,
    pub description: String,
    pub icon_code: String,
}

/// Whether the device position may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Initial,
    Prompt,
    Granted,
    Denied,
}

/// Where the coordinate behind the current data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Device,
    Default,
}

/// Coarse safety category derived from temperature and reported conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionTag {
    Cold,
    Hot,
    Rainy,
    Thunder,
    Snowy,
    Moderate,
}

impl ConditionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionTag::Cold => "cold",
            ConditionTag::Hot => "hot",
            ConditionTag::Rainy => "rainy",
            ConditionTag::Thunder => "thunder",
            ConditionTag::Snowy => "snowy",
            ConditionTag::Moderate => "moderate",
        }
    }

    pub const fn all() -> &'static [ConditionTag] {
        &[
            ConditionTag::Cold,
            ConditionTag::Hot,
            ConditionTag::Rainy,
            ConditionTag::Thunder,
            ConditionTag::Snowy,
            ConditionTag::Moderate,
        ]
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_position_options_force_fresh_fix() {
        let opts = PositionOptions::default();
        assert!(opts.high_accuracy);
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.maximum_age, Duration::ZERO);
    }

    #[test]
    fn coordinate_displays_four_decimals() {
        assert_eq!(DEFAULT_COORDINATE.to_string(), "19.0760, 72.8777");
    }

    #[test]
    fn permission_serializes_lowercase() {
        let json = serde_json::to_string(&PermissionState::Denied).unwrap();
        assert_eq!(json, "\"denied\"");
    }
}
