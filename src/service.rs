use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::WeatherClient;
use crate::config::Config;
use crate::error::WeatherError;
use crate::models::{CoordinatesRequest, GetAlertsByTypeRequest, GetWeatherByCityRequest, Location};

/// MCP tool server over the weather lookups
#[derive(Clone)]
pub struct Weather {
    client: Arc<WeatherClient>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: Config) -> Result<Self> {
        let client = WeatherClient::new(config)?;

        Ok(Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        })
    }
}

/// Maps a lookup failure onto an MCP error. Bad input and places NWS cannot
/// serve are the caller's to fix; everything else is reported as internal.
pub fn to_mcp_error(err: WeatherError) -> McpError {
    tracing::warn!(error = %err, "tool call failed");
    if err.is_caller_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather lookups backed by the National Weather Service API: current \
                conditions, active alerts by type, precipitation chances and air quality \
                for US locations."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    #[tool(description = "Get current weather conditions for a city. Provide a city name (e.g. 'Sacramento', 'New York') or coordinates as 'latitude,longitude'.")]
    async fn get_weather_by_city(
        &self,
        Parameters(request): Parameters<GetWeatherByCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting current weather for: {}", request.city);

        let location = Location::parse(&request.city).map_err(to_mcp_error)?;
        let text = self
            .client
            .current_weather(&location)
            .await
            .map_err(to_mcp_error)?;

        text_result(text)
    }

    #[tool(description = "Get active weather alerts of a given type for a US state. Provide a two-letter state code (e.g. 'CA', 'TX') and an event type matched case-insensitively against the alert name (e.g. 'Flood', 'Tornado Warning').")]
    async fn get_alerts_by_type(
        &self,
        Parameters(request): Parameters<GetAlertsByTypeRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting '{}' alerts for state: {}",
            request.event_type,
            request.state
        );

        let text = self
            .client
            .alerts_by_type(&request.state, &request.event_type)
            .await
            .map_err(to_mcp_error)?;

        text_result(text)
    }

    #[tool(description = "Get the chance of precipitation for the next five forecast periods at a US location. Provide latitude and longitude (e.g. latitude: 38.58, longitude: -121.49).")]
    async fn get_precipitation_chance(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting precipitation chance for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let coordinates = request.coordinates().map_err(to_mcp_error)?;
        let text = self
            .client
            .precipitation_chance(&coordinates)
            .await
            .map_err(to_mcp_error)?;

        text_result(text)
    }

    #[tool(description = "Get current air quality for a location: US AQI with its category plus PM2.5, PM10, CO, NO2 and O3 readings. Provide latitude and longitude.")]
    async fn get_air_quality(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting air quality for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let coordinates = request.coordinates().map_err(to_mcp_error)?;
        let text = self
            .client
            .air_quality(&coordinates)
            .await
            .map_err(to_mcp_error)?;

        text_result(text)
    }
}
