//! # nws-weather-mcp
//!
//! National Weather Service lookups exposed as MCP tools, with a small CLI
//! that calls the same functions.
//!
//! ## Tools
//!
//! - `get_weather_by_city`: current conditions from the nearest observation station
//! - `get_alerts_by_type`: active alerts for a state, filtered by event type
//! - `get_precipitation_chance`: precipitation chance for the next five forecast periods
//! - `get_air_quality`: US AQI and pollutant readings
//!
//! ## Usage
//!
//! ```bash
//! nws-weather-mcp alerts CA --event-type "Tornado Warning"
//! nws-weather-mcp forecast 38.58 -121.49
//! nws-weather-mcp serve
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod lookups;
pub mod models;
pub mod service;

pub use client::WeatherClient;
pub use config::Config;
pub use error::{LookupStep, Result, WeatherError};
pub use models::{Coordinates, Location};
pub use service::Weather;
