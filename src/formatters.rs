use std::collections::HashMap;

use crate::constants::FORECAST_PERIODS;
use crate::models::{
    AirQualityResponse, AlertFeature, ForecastResponse, Measurement, ObservationProperties,
    StationProperties,
};

const NOT_AVAILABLE: &str = "N/A";

/// Formats the alerts that matched a type filter, one line each
pub fn format_alerts(matches: &[&AlertFeature], state: &str, event_type: &str) -> String {
    if matches.is_empty() {
        let event_type = event_type.trim();
        return if event_type.is_empty() {
            format!("No active alerts for {}.", state)
        } else {
            format!("No active {} alerts for {}.", event_type, state)
        };
    }

    matches
        .iter()
        .map(|feature| {
            let props = &feature.properties;
            let summary = props
                .headline
                .as_deref()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(&props.area_desc);
            format!(
                "{} | Severity: {} | {}",
                props.event,
                or_unknown(&props.severity),
                summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the first few forecast periods as precipitation chances
pub fn format_precipitation(forecast: &ForecastResponse) -> String {
    let mut output = String::from("Precipitation Forecast:");
    for period in forecast.properties.periods.iter().take(FORECAST_PERIODS) {
        let chance = period
            .probability_of_precipitation
            .value
            .map(|v| format!("{:.0}%", v))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        output.push_str(&format!(
            "\n{}: {} chance of precipitation ({})",
            period.name,
            chance,
            or_unknown(&period.short_forecast)
        ));
    }
    output
}

/// Formats the latest station observation
pub fn format_observation(
    place: &str,
    station: &StationProperties,
    observation: &ObservationProperties,
) -> String {
    let conditions = observation
        .text_description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("Unknown");

    format!(
        "Current Weather in {}:\nTemperature: {}\nConditions: {}\nWind Speed: {}\nHumidity: {}\nStation: {} ({})",
        place,
        format_temperature(&observation.temperature),
        conditions,
        format_measurement(&observation.wind_speed),
        format_measurement(&observation.relative_humidity),
        station.station_identifier,
        or_unknown(&station.name),
    )
}

/// Formats current air quality: the US AQI with its category, then pollutants
pub fn format_air_quality(place: &str, air: &AirQualityResponse) -> String {
    let Some(current) = &air.current else {
        return format!("No air quality data for {}.", place);
    };

    let index = match current.us_aqi {
        Some(aqi) => format!("{:.0} ({})", aqi, aqi_category(aqi)),
        None => NOT_AVAILABLE.to_string(),
    };

    let units = &air.current_units;
    format!(
        "Air Quality at {}:\nUS AQI: {}\nPM2.5: {}\nPM10: {}\nCO: {}\nNO\u{2082}: {}\nO\u{2083}: {}",
        place,
        index,
        reading(current.pm2_5, units, "pm2_5"),
        reading(current.pm10, units, "pm10"),
        reading(current.carbon_monoxide, units, "carbon_monoxide"),
        reading(current.nitrogen_dioxide, units, "nitrogen_dioxide"),
        reading(current.ozone, units, "ozone"),
    )
}

/// EPA category for a US AQI value
pub fn aqi_category(aqi: f64) -> &'static str {
    match aqi {
        a if a <= 50.0 => "Good",
        a if a <= 100.0 => "Moderate",
        a if a <= 150.0 => "Unhealthy for Sensitive Groups",
        a if a <= 200.0 => "Unhealthy",
        a if a <= 300.0 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

fn reading(value: Option<f64>, units: &HashMap<String, String>, key: &str) -> String {
    match value {
        Some(v) => match units.get(key) {
            Some(unit) => format!("{:.1} {}", v, unit),
            None => format!("{:.1}", v),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

fn format_temperature(temperature: &Measurement) -> String {
    match (temperature.value, unit_suffix(&temperature.unit_code)) {
        (Some(c), "degC") => format!("{:.1}\u{00b0}C ({:.1}\u{00b0}F)", c, c * 9.0 / 5.0 + 32.0),
        (Some(f), "degF") => format!("{:.1}\u{00b0}F", f),
        (Some(v), unit) => format!("{:.1} {}", v, unit),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}

fn format_measurement(measurement: &Measurement) -> String {
    match (measurement.value, unit_suffix(&measurement.unit_code)) {
        (Some(v), "km_h-1") => format!("{:.1} km/h", v),
        (Some(v), "m_s-1") => format!("{:.1} m/s", v),
        (Some(v), "percent") => format!("{:.0}%", v),
        (Some(v), "") => format!("{:.1}", v),
        (Some(v), unit) => format!("{:.1} {}", v, unit),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}

/// "wmoUnit:degC" -> "degC"
fn unit_suffix(unit_code: &str) -> &str {
    unit_code.rsplit(':').next().unwrap_or(unit_code)
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "Unknown"
    } else {
        value
    }
}
