use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    error::{FetchError, GENERIC_API_ERROR_MESSAGE},
    model::{Coordinate, WeatherSnapshot},
};

use super::WeatherClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at another host serving the same API, e.g. a test server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
    sea_level: Option<f64>,
    grnd_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    visibility: u32,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
    name: String,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, FetchError> {
        let primary = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse("response contained no weather conditions".into()))?;

        Ok(WeatherSnapshot {
            location_name: self.name,
            country: self.sys.country,
            coordinate: Coordinate::new(self.coord.lat, self.coord.lon),
            observed_at: unix_to_utc(self.dt)?,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            sea_level_hpa: self.main.sea_level,
            ground_level_hpa: self.main.grnd_level,
            visibility_m: self.visibility,
            wind_speed_mps: self.wind.speed,
            wind_deg: self.wind.deg,
            cloudiness_pct: self.clouds.all,
            sunrise: unix_to_utc(self.sys.sunrise)?,
            sunset: unix_to_utc(self.sys.sunset)?,
            condition_id: primary.id,
            condition: primary.main,
            description: primary.description,
            icon_code: primary.icon,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_weather(&self, coordinate: Coordinate) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/weather", self.base_url);
        debug!(lat = coordinate.latitude, lon = coordinate.longitude, "requesting current weather");

        // without_url keeps the api key out of error messages
        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OwErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_API_ERROR_MESSAGE.to_string());

            warn!(status = status.as_u16(), %message, "OpenWeather request failed");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        let snapshot = parsed.into_snapshot()?;

        info!(
            location = %snapshot.location_name,
            country = %snapshot.country,
            temp = snapshot.temperature_c,
            "fetched current weather"
        );
        Ok(snapshot)
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| FetchError::Parse(format!("timestamp {ts} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "coord": { "lon": 72.8777, "lat": 19.076 },
            "weather": [{ "id": 721, "main": "Haze", "description": "haze", "icon": "50d" }],
            "main": {
                "temp": 31.2, "feels_like": 35.4, "temp_min": 30.1, "temp_max": 31.9,
                "pressure": 1009, "humidity": 62, "sea_level": 1009, "grnd_level": 1008
            },
            "visibility": 3000,
            "wind": { "speed": 4.12, "deg": 270 },
            "clouds": { "all": 20 },
            "dt": 1717400000,
            "sys": { "country": "IN", "sunrise": 1717374000, "sunset": 1717421400 },
            "name": "Mumbai",
            "cod": 200
        })
    }

    #[test]
    fn converts_provider_payload() {
        let parsed: OwCurrentResponse = serde_json::from_value(sample()).unwrap();
        let snap = parsed.into_snapshot().unwrap();

        assert_eq!(snap.location_name, "Mumbai");
        assert_eq!(snap.country, "IN");
        assert_eq!(snap.condition, "Haze");
        assert_eq!(snap.icon_code, "50d");
        assert_eq!(snap.humidity_pct, 62);
        assert_eq!(snap.sea_level_hpa, Some(1009.0));
        assert_eq!(snap.observed_at.timestamp(), 1717400000);
        assert_eq!(snap.coordinate, Coordinate::new(19.076, 72.8777));
    }

    #[test]
    fn optional_pressure_levels_may_be_absent() {
        let mut value = sample();
        let main = value["main"].as_object_mut().unwrap();
        main.remove("sea_level");
        main.remove("grnd_level");

        let parsed: OwCurrentResponse = serde_json::from_value(value).unwrap();
        let snap = parsed.into_snapshot().unwrap();
        assert_eq!(snap.sea_level_hpa, None);
        assert_eq!(snap.ground_level_hpa, None);
    }

    #[test]
    fn empty_weather_list_is_a_parse_failure() {
        let mut value = sample();
        value["weather"] = serde_json::json!([]);

        let parsed: OwCurrentResponse = serde_json::from_value(value).unwrap();
        let err = parsed.into_snapshot().unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = OpenWeatherClient::with_base_url("KEY".into(), "http://localhost:1/");
        assert_eq!(client.base_url, "http://localhost:1");
    }
}
