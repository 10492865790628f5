//! The locate → fetch pipeline driving [`AppState`].

use tracing::{info, warn};

use crate::{
    client::WeatherClient,
    location::Geolocator,
    model::{Coordinate, DEFAULT_COORDINATE, PositionOptions},
    state::{AppState, Event},
};

/// Operations take `&mut self`, so at most one request is in flight. Every
/// operation starts by moving the state into a fresh activity, so a future
/// dropped mid-request does not leave the app stuck loading.
#[derive(Debug)]
pub struct WeatherApp {
    state: AppState,
    geolocator: Box<dyn Geolocator>,
    client: Box<dyn WeatherClient>,
    options: PositionOptions,
}

impl WeatherApp {
    pub fn new(geolocator: Box<dyn Geolocator>, client: Box<dyn WeatherClient>) -> Self {
        Self {
            state: AppState::new(),
            geolocator,
            client,
            options: PositionOptions::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// On-load flow: locate the device and fall back to the default
    /// coordinate if that fails.
    pub async fn start(&mut self) -> &AppState {
        self.locate_and_fetch(true).await;
        &self.state
    }

    /// User asked to try geolocation again. A failure leaves the user at the
    /// permission prompt instead of fetching the default.
    pub async fn retry_location(&mut self) -> &AppState {
        self.locate_and_fetch(false).await;
        &self.state
    }

    /// User chose the default location without granting device access.
    pub async fn use_default_location(&mut self) -> &AppState {
        self.state.apply(Event::DefaultChosen);
        self.fetch(DEFAULT_COORDINATE).await;
        &self.state
    }

    async fn locate_and_fetch(&mut self, fallback: bool) {
        self.state.apply(Event::LocateRequested);

        match self.geolocator.current_position(&self.options).await {
            Ok(coordinate) => {
                info!(%coordinate, "using device position");
                self.state.apply(Event::PositionAcquired);
                self.fetch(coordinate).await;
            }
            Err(error) => {
                warn!(%error, fallback, "could not determine device position");
                self.state.apply(Event::PositionFailed { error, fallback });
                if fallback {
                    self.fetch(DEFAULT_COORDINATE).await;
                }
            }
        }
    }

    async fn fetch(&mut self, coordinate: Coordinate) {
        self.state.apply(Event::FetchStarted);

        match self.client.fetch_weather(coordinate).await {
            Ok(snapshot) => self.state.apply(Event::FetchSucceeded(snapshot)),
            Err(err) => {
                warn!(error = %err, "weather fetch failed");
                self.state.apply(Event::FetchFailed(err));
            }
        }
    }
}
