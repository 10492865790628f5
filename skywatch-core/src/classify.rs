use crate::model::ConditionTag;

/// Below this temperature (°C) conditions count as cold.
pub const COLD_BELOW_C: f64 = 28.0;
/// Above this temperature (°C) conditions count as hot.
pub const HOT_ABOVE_C: f64 = 32.0;

/// Map a temperature and the provider's weather category to a [`ConditionTag`].
///
/// Category matches (case-insensitive substring) always win over temperature,
/// checked in order: thunder, rain/drizzle, snow. The temperature band is
/// deliberately asymmetric: `[28, 32]` inclusive is moderate.
pub fn classify(temperature_c: f64, category: &str) -> ConditionTag {
    let category = category.to_lowercase();

    if category.contains("thunder") {
        ConditionTag::Thunder
    } else if category.contains("rain") || category.contains("drizzle") {
        ConditionTag::Rainy
    } else if category.contains("snow") {
        ConditionTag::Snowy
    } else if temperature_c < COLD_BELOW_C {
        ConditionTag::Cold
    } else if temperature_c > HOT_ABOVE_C {
        ConditionTag::Hot
    } else {
        ConditionTag::Moderate
    }
}
