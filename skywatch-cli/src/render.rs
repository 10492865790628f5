//! Plain-text and JSON output for the view states.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use skywatch_core::{
    AdvisoryIcon, AppState, LocationSource, PermissionState, Ready, WeatherIcon,
};

/// The data screen: warning banner, headline card, details, tips, footer.
pub struct ReadyScreen<'a>(pub &'a Ready<'a>);

impl fmt::Display for ReadyScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ready = self.0;
        let s = ready.snapshot;

        if let Some(warning) = ready.warning {
            writeln!(f, "⚠  {warning}")?;
            writeln!(f)?;
        }

        writeln!(f, "📍 {}, {}", s.location_name, s.country)?;
        writeln!(
            f,
            "{}  {}  {}",
            weather_glyph(ready.icon),
            temperature(s.temperature_c),
            capitalize_words(&s.description)
        )?;
        writeln!(f, "   Feels like {} · {}", temperature(s.feels_like_c), s.condition)?;
        writeln!(f)?;

        writeln!(f, "Weather Details")?;
        detail(f, "Feels Like", temperature(s.feels_like_c))?;
        detail(f, "Humidity", format!("{}%", s.humidity_pct))?;
        detail(f, "Wind Speed", format!("{} m/s ({}°)", s.wind_speed_mps, s.wind_deg))?;
        detail(f, "Pressure", format!("{} hPa", s.pressure_hpa))?;
        detail(f, "Visibility", visibility_km(s.visibility_m))?;
        detail(f, "Cloudiness", format!("{}%", s.cloudiness_pct))?;
        detail(f, "Sunrise", clock_time(s.sunrise))?;
        detail(f, "Sunset", clock_time(s.sunset))?;
        detail(f, "Min Temp", temperature(s.temp_min_c))?;
        detail(f, "Max Temp", temperature(s.temp_max_c))?;
        if let Some(sea) = s.sea_level_hpa {
            detail(f, "Sea Level", format!("{sea} hPa"))?;
        }
        if let Some(ground) = s.ground_level_hpa {
            detail(f, "Ground Level", format!("{ground} hPa"))?;
        }
        writeln!(f)?;

        writeln!(f, "Safety & Health Tips ({})", ready.condition)?;
        for item in ready.advisories {
            writeln!(f, "  {} {}", advisory_glyph(item.icon), item.text)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Last updated: {}",
            s.observed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            f,
            "Latitude: {:.4}, Longitude: {:.4}",
            s.coordinate.latitude, s.coordinate.longitude
        )
    }
}

/// Shown when location access failed and there is nothing to display.
pub struct PromptScreen<'a>(pub &'a str);

impl fmt::Display for PromptScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📍 Location Required")?;
        writeln!(
            f,
            "To provide accurate weather, please allow location access or choose a default."
        )?;
        writeln!(f, "⚠  {}", self.0)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    permission: PermissionState,
    source: Option<LocationSource>,
    #[serde(flatten)]
    ready: &'a Ready<'a>,
}

pub fn json(state: &AppState, ready: &Ready<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        permission: state.permission(),
        source: state.source(),
        ready,
    })
}

fn detail(f: &mut fmt::Formatter<'_>, label: &str, value: String) -> fmt::Result {
    writeln!(f, "  {label:<13}{value}")
}

fn temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

fn visibility_km(meters: u32) -> String {
    format!("{:.1} km", f64::from(meters) / 1000.0)
}

fn clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%I:%M %p").to_string()
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn weather_glyph(icon: WeatherIcon) -> &'static str {
    match icon {
        WeatherIcon::Sun => "☀️",
        WeatherIcon::Moon => "🌙",
        WeatherIcon::Cloud => "☁️",
        WeatherIcon::CloudRain => "🌧️",
        WeatherIcon::Snowflake => "❄️",
        WeatherIcon::Zap => "⚡",
    }
}

fn advisory_glyph(icon: AdvisoryIcon) -> &'static str {
    match icon {
        AdvisoryIcon::Thermometer => "🌡️",
        AdvisoryIcon::Coffee => "☕",
        AdvisoryIcon::Heart => "❤️",
        AdvisoryIcon::Droplets => "💧",
        AdvisoryIcon::Sun => "☀️",
        AdvisoryIcon::AlertTriangle => "⚠️",
        AdvisoryIcon::AlertCircle => "❗",
        AdvisoryIcon::Umbrella => "☂️",
        AdvisoryIcon::Battery => "🔋",
        AdvisoryIcon::Home => "🏠",
        AdvisoryIcon::Zap => "⚡",
        AdvisoryIcon::Snowflake => "❄️",
    }
}
