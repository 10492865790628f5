//! Application state and the single function allowed to change it.

use serde::Serialize;
use tracing::debug;

use crate::{
    advisory::{AdvisoryItem, WeatherIcon, advisories_for, weather_icon},
    classify::classify,
    error::{FetchError, LocationError},
    model::{ConditionTag, LocationSource, PermissionState, WeatherSnapshot, default_location_name},
};

pub const DEFAULT_FALLBACK_NOTICE: &str = concat!(
    "Using default location (",
    default_location_name!(),
    ") as location access was not granted."
);
pub const UNSUPPORTED_FALLBACK_NOTICE: &str = concat!(
    "Geolocation is not supported on this system. Using default location (",
    default_location_name!(),
    ")."
);
pub const LOCATION_DENIED_MESSAGE: &str =
    "Location access denied or blocked. Please allow location access to get current weather.";
pub const LOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this system.";
pub const PROMPT_FALLBACK_MESSAGE: &str =
    "Location access was blocked or denied. Try again or use the default.";

/// What the application is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Locating,
    Fetching,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LocateRequested,
    PositionAcquired,
    /// `fallback` is set when the default location will be fetched next.
    PositionFailed { error: LocationError, fallback: bool },
    DefaultChosen,
    FetchStarted,
    FetchSucceeded(WeatherSnapshot),
    FetchFailed(FetchError),
}

/// Everything the presentation layer needs.
///
/// `snapshot` and `error` are never both set. `notice` is a soft warning that
/// may accompany data.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    permission: PermissionState,
    source: Option<LocationSource>,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
    notice: Option<String>,
    activity: Activity,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn source(&self) -> Option<LocationSource> {
        self.source
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_loading(&self) -> bool {
        self.activity != Activity::Idle
    }

    pub fn apply(&mut self, event: Event) {
        debug!(?event, "applying state event");

        match event {
            Event::LocateRequested => {
                self.permission = PermissionState::Prompt;
                self.activity = Activity::Locating;
                self.error = None;
                self.notice = None;
            }
            Event::PositionAcquired => {
                self.permission = PermissionState::Granted;
                self.source = Some(LocationSource::Device);
            }
            Event::PositionFailed { error, fallback: true } => {
                self.permission = PermissionState::Denied;
                self.source = Some(LocationSource::Default);
                self.notice = Some(
                    match error {
                        LocationError::Unsupported => UNSUPPORTED_FALLBACK_NOTICE,
                        _ => DEFAULT_FALLBACK_NOTICE,
                    }
                    .to_string(),
                );
            }
            Event::PositionFailed { error, fallback: false } => {
                self.permission = PermissionState::Denied;
                self.activity = Activity::Idle;
                self.snapshot = None;
                self.error = Some(
                    match error {
                        LocationError::Unsupported => LOCATION_UNSUPPORTED_MESSAGE,
                        _ => LOCATION_DENIED_MESSAGE,
                    }
                    .to_string(),
                );
            }
            Event::DefaultChosen => {
                self.permission = PermissionState::Denied;
                self.source = Some(LocationSource::Default);
                self.notice = Some(DEFAULT_FALLBACK_NOTICE.to_string());
            }
            Event::FetchStarted => {
                self.activity = Activity::Fetching;
                self.error = None;
            }
            Event::FetchSucceeded(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
                self.activity = Activity::Idle;
            }
            Event::FetchFailed(err) => {
                self.snapshot = None;
                self.error = Some(err.user_message());
                self.activity = Activity::Idle;
            }
        }
    }

    /// Derive the single view that should be on screen.
    pub fn view(&self) -> View<'_> {
        if self.is_loading() {
            let message = match self.activity {
                Activity::Locating => "Requesting location permission...",
                _ => "Fetching weather data...",
            };
            return View::Loading { message };
        }

        if let Some(snapshot) = &self.snapshot {
            let condition = classify(snapshot.temperature_c, &snapshot.condition);
            return View::Ready(Ready {
                snapshot,
                condition,
                icon: weather_icon(&snapshot.condition, &snapshot.icon_code),
                advisories: advisories_for(condition),
                warning: self.notice.as_deref(),
            });
        }

        if self.permission == PermissionState::Denied {
            let message = self
                .error
                .as_deref()
                .or(self.notice.as_deref())
                .unwrap_or(PROMPT_FALLBACK_MESSAGE);
            return View::PermissionPrompt { message };
        }

        match &self.error {
            Some(message) => View::Failed { message },
            None => View::Idle,
        }
    }
}

/// The mutually exclusive screens of the application.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Idle,
    Loading { message: &'static str },
    PermissionPrompt { message: &'a str },
    Failed { message: &'a str },
    Ready(Ready<'a>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ready<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub condition: ConditionTag,
    pub icon: WeatherIcon,
    pub advisories: &'static [AdvisoryItem; 3],
    /// Inline banner shown above the data.
    pub warning: Option<&'a str>,
}
