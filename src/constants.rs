/// User agent string for HTTP requests. NWS rejects requests without one.
pub const USER_AGENT: &str = "nws-weather-mcp/0.1.0";

/// Accept header sent with every request
pub const ACCEPT: &str = "application/geo+json, application/json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Open-Meteo geocoding API base URL, used to resolve place names
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Open-Meteo air quality API base URL
pub const AIR_QUALITY_API_BASE: &str = "https://air-quality-api.open-meteo.com/v1";

/// Request timeout applied to every outbound call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of forecast periods rendered by the precipitation lookup
pub const FORECAST_PERIODS: usize = 5;
