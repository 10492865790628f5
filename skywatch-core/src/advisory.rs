//! Static safety guidance and icon lookups.

use serde::Serialize;

use crate::model::ConditionTag;

use AdvisoryIcon as I;

/// Icon shown next to an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryIcon {
    Thermometer,
    Coffee,
    Heart,
    Droplets,
    Sun,
    AlertTriangle,
    AlertCircle,
    Umbrella,
    Battery,
    Home,
    Zap,
    Snowflake,
}

/// Colour family used to style an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Blue,
    Orange,
    Red,
    Yellow,
    Green,
    Pink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvisoryItem {
    pub icon: AdvisoryIcon,
    pub text: &'static str,
    pub tone: Tone,
}

const fn item(icon: AdvisoryIcon, text: &'static str, tone: Tone) -> AdvisoryItem {
    AdvisoryItem { icon, text, tone }
}

const COLD: [AdvisoryItem; 3] = [
    item(I::Thermometer, "Stay moisturized and protect your skin", Tone::Blue),
    item(I::Coffee, "Eat hot and fresh food to maintain body heat", Tone::Orange),
    item(I::Heart, "Use warm woolen clothes and dress in layers", Tone::Red),
];

const HOT: [AdvisoryItem; 3] = [
    item(I::Droplets, "Stay hydrated, drink plenty of water", Tone::Blue),
    item(I::Sun, "Use sunscreen, especially if it is too hot", Tone::Yellow),
    item(I::AlertTriangle, "Wear a sun hat and eat cooling fruits", Tone::Red),
];

const RAINY: [AdvisoryItem; 3] = [
    item(I::Umbrella, "Carry an umbrella and wear rain gear", Tone::Blue),
    item(I::Battery, "Keep phones and devices charged (emergency)", Tone::Green),
    item(I::Home, "Stay home if possible, or drive cautiously", Tone::Yellow),
];

const THUNDER: [AdvisoryItem; 3] = [
    item(I::Home, "Stay home and avoid going outside", Tone::Red),
    item(I::Zap, "Unplug electrical devices", Tone::Yellow),
    item(I::Battery, "Keep emergency devices charged", Tone::Green),
];

const SNOWY: [AdvisoryItem; 3] = [
    item(I::Snowflake, "Dress in warm, waterproof layers", Tone::Blue),
    item(I::Home, "Limit outdoor exposure and stay warm", Tone::Orange),
    item(I::AlertCircle, "Be cautious of icy roads and pathways", Tone::Red),
];

const MODERATE: [AdvisoryItem; 3] = [
    item(I::Sun, "Enjoy the pleasant weather", Tone::Green),
    item(I::Heart, "Stay active and healthy", Tone::Pink),
    item(I::Droplets, "Stay hydrated throughout the day", Tone::Blue),
];

/// The three pieces of guidance for a condition, in display order.
pub fn advisories_for(tag: ConditionTag) -> &'static [AdvisoryItem; 3] {
    match tag {
        ConditionTag::Cold => &COLD,
        ConditionTag::Hot => &HOT,
        ConditionTag::Rainy => &RAINY,
        ConditionTag::Thunder => &THUNDER,
        ConditionTag::Snowy => &SNOWY,
        ConditionTag::Moderate => &MODERATE,
    }
}

/// Large icon representing the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sun,
    Moon,
    Cloud,
    CloudRain,
    Snowflake,
    Zap,
}

/// Pick the headline icon from the provider's category and icon code
/// (codes ending in `n` are night variants, e.g. `01n`).
pub fn weather_icon(category: &str, icon_code: &str) -> WeatherIcon {
    let night = icon_code.contains('n');

    match category.to_lowercase().as_str() {
        "clear" if night => WeatherIcon::Moon,
        "clear" => WeatherIcon::Sun,
        "rain" | "drizzle" => WeatherIcon::CloudRain,
        "snow" => WeatherIcon::Snowflake,
        "thunderstorm" => WeatherIcon::Zap,
        _ => WeatherIcon::Cloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_has_three_advisories() {
        for tag in ConditionTag::all() {
            let items = advisories_for(*tag);
            assert_eq!(items.len(), 3, "{tag}");
            assert!(items.iter().all(|i| !i.text.is_empty()));
        }
    }

    #[test]
    fn moderate_is_the_pleasant_weather_set() {
        let items = advisories_for(ConditionTag::Moderate);
        assert_eq!(items[0].text, "Enjoy the pleasant weather");
        assert_eq!(items[2].icon, AdvisoryIcon::Droplets);
    }

    #[test]
    fn thunder_starts_with_staying_indoors() {
        let items = advisories_for(ConditionTag::Thunder);
        assert_eq!(items[0].text, "Stay home and avoid going outside");
        assert_eq!(items[1].text, "Unplug electrical devices");
    }

    #[test]
    fn clear_sky_switches_to_moon_at_night() {
        assert_eq!(weather_icon("Clear", "01d"), WeatherIcon::Sun);
        assert_eq!(weather_icon("Clear", "01n"), WeatherIcon::Moon);
    }

    #[test]
    fn icon_lookup_by_category() {
        assert_eq!(weather_icon("Clouds", "03d"), WeatherIcon::Cloud);
        assert_eq!(weather_icon("drizzle", "09d"), WeatherIcon::CloudRain);
        assert_eq!(weather_icon("Snow", "13d"), WeatherIcon::Snowflake);
        assert_eq!(weather_icon("Thunderstorm", "11n"), WeatherIcon::Zap);
        assert_eq!(weather_icon("Haze", "50d"), WeatherIcon::Cloud);
    }
}
