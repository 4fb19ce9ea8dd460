use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::constants;
use crate::error::{Result, WeatherError};

/// HTTP access to the weather providers. Cheap to share; holds no per-call state.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: Config,
}

impl WeatherClient {
    /// Creates a client with the identifying headers and timeout from `config`
    pub fn new(config: Config) -> Result<Self> {
        if config.user_agent.trim().is_empty() {
            return Err(WeatherError::InvalidInput(
                "user agent must not be empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(constants::ACCEPT));

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(url, ?query, "GET");

        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, %status, "request failed");
            return Err(WeatherError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(url, error = %e, "could not decode response");
            WeatherError::Malformed {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertResponse;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(Config::with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_sends_identifying_header_and_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/alerts/active/area/CA"))
            .and(header("user-agent", constants::USER_AGENT))
            .and(query_param("status", "actual"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "features": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let url = format!("{}/alerts/active/area/CA", mock_server.uri());
        let alerts: AlertResponse = client
            .get_json(&url, &[("status", "actual".to_string())])
            .await
            .unwrap();

        assert!(alerts.features.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get_json::<AlertResponse>(&mock_server.uri(), &[])
            .await
            .unwrap_err();

        match err {
            WeatherError::Status { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get_json::<AlertResponse>(&mock_server.uri(), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let client = WeatherClient::new(Config::default()).unwrap();

        // Nothing listens on port 1
        let err = client
            .get_json::<AlertResponse>("http://127.0.0.1:1/alerts", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::Network(_)));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let config = Config {
            user_agent: "  ".to_string(),
            ..Config::default()
        };
        assert!(WeatherClient::new(config).is_err());
    }
}
