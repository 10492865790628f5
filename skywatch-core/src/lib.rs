//! Core library for the `skywatch` CLI.
//!
//! This crate defines:
//! - The locate → fetch → classify → advise pipeline
//! - Pluggable geolocation and weather sources
//! - Application state with a single reducer
//! - Configuration & credentials handling
//!
//! It is used by `skywatch-cli`, but the pipeline has no terminal dependencies.

pub mod advisory;
pub mod app;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod state;

pub use advisory::{AdvisoryIcon, AdvisoryItem, Tone, WeatherIcon, advisories_for, weather_icon};
pub use app::WeatherApp;
pub use classify::classify;
pub use client::{OpenWeatherClient, WeatherClient};
pub use config::{Config, GeolocationMode};
pub use error::{FetchError, LocationError};
pub use location::{FixedGeolocator, Geolocator, IpGeolocator, UnsupportedGeolocator};
pub use model::{
    ConditionTag, Coordinate, DEFAULT_COORDINATE, DEFAULT_LOCATION_NAME, LocationSource,
    PermissionState, PositionOptions, WeatherSnapshot,
};
pub use state::{AppState, Event, Ready, View};
