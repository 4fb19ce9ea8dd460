//! Runtime configuration. There is no config file; everything defaults to
//! the public endpoints and only the timeout is exposed on the command line.

use std::time::Duration;

use crate::constants::{
    AIR_QUALITY_API_BASE, DEFAULT_TIMEOUT_SECS, GEOCODING_API_BASE, NWS_API_BASE, USER_AGENT,
};

#[derive(Debug, Clone)]
pub struct Config {
    /// National Weather Service API base.
    pub nws_api_base: String,
    /// Geocoding API base used for place names.
    pub geocoding_api_base: String,
    /// Air quality API base.
    pub air_quality_api_base: String,
    /// Identifying `User-Agent` header value.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nws_api_base: NWS_API_BASE.to_string(),
            geocoding_api_base: GEOCODING_API_BASE.to_string(),
            air_quality_api_base: AIR_QUALITY_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Points every endpoint at a single base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            nws_api_base: base_url.clone(),
            geocoding_api_base: base_url.clone(),
            air_quality_api_base: base_url,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
