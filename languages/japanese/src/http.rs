use serde_json::Value;
use tango_config::network::NetworkConfig;
use tango_sources::SourceError;

/// Shared blocking-free HTTP access for all sources.
///
/// One attempt per call, bounded by the configured timeout. Non-2xx answers
/// become [`SourceError::Status`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    debug: bool,
}

impl HttpClient {
    pub fn new(network: &NetworkConfig, debug: bool) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(network.timeout())
            .user_agent(network.user_agent.clone())
            .build()?;

        Ok(Self { client, debug })
    }

    async fn send(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response, SourceError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response)
    }

    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        let body = self.send(url, query).await?.text().await?;
        if self.debug {
            tracing::debug!("Raw response from {}: {}", url, body);
        }
        Ok(body)
    }

    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, SourceError> {
        let body = self.get_text(url, query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let bytes = self.send(url, &[]).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
