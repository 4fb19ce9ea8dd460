use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

// ============================================================================
// Caller Inputs
// ============================================================================

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidInput(format!(
                "latitude {} must be between -90 and 90",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidInput(format!(
                "longitude {} must be between -180 and 180",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Path segment for `/points/{lat},{lon}`. NWS answers requests with more
    /// than four decimals with a redirect, so round here.
    pub fn point_path(&self) -> String {
        format!(
            "{},{}",
            trim_decimals(self.latitude),
            trim_decimals(self.longitude)
        )
    }
}

fn trim_decimals(value: f64) -> String {
    let rounded = format!("{:.4}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = WeatherError;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| WeatherError::InvalidInput(format!("'{}' is not 'lat,lon'", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| WeatherError::InvalidInput(format!("'{}' is not a number", part.trim())))
        };
        Coordinates::new(parse(lat)?, parse(lon)?)
    }
}

/// Where to look up current conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates(Coordinates),
    Place(String),
}

impl Location {
    /// A `"lat,lon"` string becomes coordinates, anything else non-blank a
    /// place name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WeatherError::InvalidInput(
                "location must not be empty".to_string(),
            ));
        }

        if let Some((lat, lon)) = input.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                return Coordinates::new(lat, lon).map(Location::Coordinates);
            }
        }

        Ok(Location::Place(input.to_string()))
    }
}

// ============================================================================
// National Weather Service API Models
// ============================================================================

/// A value with a WMO unit code, e.g. `{"unitCode": "wmoUnit:degC", "value": 21.5}`.
#[derive(Debug, Default, Deserialize)]
pub struct Measurement {
    #[serde(rename = "unitCode", default)]
    pub unit_code: String,
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

#[derive(Debug, Deserialize)]
pub struct AlertProperties {
    #[serde(default)]
    pub event: String,
    pub headline: Option<String>,
    #[serde(default)]
    pub severity: String,
    #[serde(rename = "areaDesc", default)]
    pub area_desc: String,
}

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    #[serde(rename = "gridId")]
    pub grid_id: String,
    #[serde(rename = "gridX")]
    pub grid_x: i32,
    #[serde(rename = "gridY")]
    pub grid_y: i32,
    pub forecast: Option<String>,
    #[serde(rename = "observationStations")]
    pub observation_stations: Option<String>,
    #[serde(rename = "relativeLocation")]
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
pub struct RelativeLocation {
    pub properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize)]
pub struct RelativeLocationProperties {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub features: Vec<StationFeature>,
}

#[derive(Debug, Deserialize)]
pub struct StationFeature {
    pub properties: StationProperties,
}

#[derive(Debug, Deserialize)]
pub struct StationProperties {
    #[serde(rename = "stationIdentifier")]
    pub station_identifier: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObservationResponse {
    pub properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
pub struct ObservationProperties {
    #[serde(rename = "textDescription")]
    pub text_description: Option<String>,
    #[serde(default)]
    pub temperature: Measurement,
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: Measurement,
    #[serde(rename = "relativeHumidity", default)]
    pub relative_humidity: Measurement,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    #[serde(rename = "shortForecast", default)]
    pub short_forecast: String,
    #[serde(rename = "probabilityOfPrecipitation", default)]
    pub probability_of_precipitation: Measurement,
}

// ============================================================================
// Open-Meteo API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub admin1: Option<String>,
    pub country: Option<String>,
}

impl GeocodingResult {
    /// "Sacramento, California, United States" with whatever parts exist.
    pub fn label(&self) -> String {
        [Some(&self.name), self.admin1.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize)]
pub struct AirQualityResponse {
    pub current: Option<AirQualityCurrent>,
    #[serde(default)]
    pub current_units: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityCurrent {
    pub us_aqi: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub ozone: Option<f64>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherByCityRequest {
    /// City name (e.g. "Sacramento", "New York") or "latitude,longitude"
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsByTypeRequest {
    /// Two-letter US state code (e.g. "CA", "TX")
    pub state: String,
    /// Alert type to match against the event name, case-insensitively (e.g. "Flood", "Tornado Warning")
    pub event_type: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CoordinatesRequest {
    /// Latitude of the location (-90 to 90)
    pub latitude: f64,
    /// Longitude of the location (-180 to 180)
    pub longitude: f64,
}

impl CoordinatesRequest {
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }
}
