//! The four weather lookups. Each is a short chain of GETs ending in a
//! formatted string; nothing is kept between calls.

use crate::client::WeatherClient;
use crate::error::{LookupStep, Result, WeatherError};
use crate::formatters::{format_air_quality, format_alerts, format_observation, format_precipitation};
use crate::models::{
    AirQualityResponse, AlertResponse, Coordinates, ForecastResponse, GeocodingResponse, Location,
    ObservationResponse, PointsProperties, PointsResponse, StationsResponse,
};


/// Pollutants requested from the air quality API.
const AIR_QUALITY_FIELDS: &str = "us_aqi,pm10,pm2_5,carbon_monoxide,nitrogen_dioxide,ozone";

/// Whether an alert's event name matches a type filter: case-insensitive
/// substring, and a blank filter matches everything.
pub fn event_matches(event: &str, event_type: &str) -> bool {
    event
        .to_lowercase()
        .contains(&event_type.trim().to_lowercase())
}

impl WeatherClient {
    /// Current conditions from the nearest NWS observation station.
    pub async fn current_weather(&self, location: &Location) -> Result<String> {
        let (coordinates, label) = match location {
            Location::Coordinates(coordinates) => (*coordinates, None),
            Location::Place(name) => {
                let (coordinates, label) = self.geocode(name).await?;
                (coordinates, Some(label))
            }
        };

        let point = self.point(&coordinates).await?;
        let label = label.unwrap_or_else(|| match &point.relative_location {
            Some(rel) => format!("{}, {}", rel.properties.city, rel.properties.state),
            None => coordinates.to_string(),
        });

        let stations_url = point.observation_stations.ok_or_else(|| {
            WeatherError::NoData(format!("no observation stations for {}", coordinates))
                .at(LookupStep::Point)
        })?;

        let stations: StationsResponse = self
            .get_json(&stations_url, &[])
            .await
            .map_err(|e| e.at(LookupStep::Stations))?;
        let station = stations
            .features
            .into_iter()
            .next()
            .map(|f| f.properties)
            .ok_or_else(|| {
                WeatherError::NoData(format!("no observation stations near {}", label))
                    .at(LookupStep::Stations)
            })?;

        let observation_url = format!(
            "{}/stations/{}/observations/latest",
            self.config().nws_api_base,
            station.station_identifier
        );
        let observation: ObservationResponse = self
            .get_json(&observation_url, &[])
            .await
            .map_err(|e| e.at(LookupStep::Observation))?;

        Ok(format_observation(&label, &station, &observation.properties))
    }

    /// Active alerts for a state, filtered by event type.
    pub async fn alerts_by_type(&self, state: &str, event_type: &str) -> Result<String> {
        if state.trim().is_empty() {
            return Err(WeatherError::InvalidInput(
                "state code must not be empty".to_string(),
            ));
        }

        let url = format!("{}/alerts/active/area/{}", self.config().nws_api_base, state);
        let alerts: AlertResponse = self.get_json(&url, &[]).await?;

        let matches: Vec<_> = alerts
            .features
            .iter()
            .filter(|f| event_matches(&f.properties.event, event_type))
            .collect();

        tracing::debug!(
            state,
            event_type,
            total = alerts.features.len(),
            matched = matches.len(),
            "filtered alerts"
        );

        Ok(format_alerts(&matches, state, event_type))
    }

    /// Precipitation chance for the next few gridpoint forecast periods.
    pub async fn precipitation_chance(&self, coordinates: &Coordinates) -> Result<String> {
        let point = self.point(coordinates).await?;

        let forecast_url = point.forecast.ok_or_else(|| {
            WeatherError::NoData(format!(
                "no forecast for gridpoint {}/{},{}",
                point.grid_id, point.grid_x, point.grid_y
            ))
            .at(LookupStep::Point)
        })?;

        let forecast: ForecastResponse = self
            .get_json(&forecast_url, &[])
            .await
            .map_err(|e| e.at(LookupStep::Forecast))?;

        if forecast.properties.periods.is_empty() {
            return Err(WeatherError::NoData(format!("empty forecast for {}", coordinates))
                .at(LookupStep::Forecast));
        }

        Ok(format_precipitation(&forecast))
    }

    /// Current air quality index and pollutant readings.
    pub async fn air_quality(&self, coordinates: &Coordinates) -> Result<String> {
        let url = format!("{}/air-quality", self.config().air_quality_api_base);
        let query = [
            ("latitude", coordinates.latitude().to_string()),
            ("longitude", coordinates.longitude().to_string()),
            ("current", AIR_QUALITY_FIELDS.to_string()),
        ];

        let air: AirQualityResponse = self
            .get_json(&url, &query)
            .await
            .map_err(|e| e.at(LookupStep::AirQuality))?;

        if air.current.is_none() {
            return Err(
                WeatherError::NoData(format!("no air quality readings for {}", coordinates))
                    .at(LookupStep::AirQuality),
            );
        }

        Ok(format_air_quality(&coordinates.to_string(), &air))
    }

    /// Resolves a place name to coordinates and a display label.
    async fn geocode(&self, name: &str) -> Result<(Coordinates, String)> {
        let url = format!("{}/search", self.config().geocoding_api_base);
        let query = [
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        let response: GeocodingResponse = self
            .get_json(&url, &query)
            .await
            .map_err(|e| e.at(LookupStep::Geocode))?;

        let place = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()).at(LookupStep::Geocode))?;

        let coordinates = Coordinates::new(place.latitude, place.longitude)
            .map_err(|e| e.at(LookupStep::Geocode))?;
        Ok((coordinates, place.label()))
    }

    /// First step of every NWS lookup: `/points/{lat},{lon}`.
    async fn point(&self, coordinates: &Coordinates) -> Result<PointsProperties> {
        let url = format!(
            "{}/points/{}",
            self.config().nws_api_base,
            coordinates.point_path()
        );
        let point: PointsResponse = self
            .get_json(&url, &[])
            .await
            .map_err(|e| e.at(LookupStep::Point))?;
        Ok(point.properties)
    }
}
