use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, RequestBuilder, Response};
use rest_pki::{client::RestClient, models::UploadModel};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{config::ClientConfig, error::RestError};

pub const UPLOAD_PATH: &str = "Api/Uploads";

/// A [`RestClient`] that reaches the service over HTTP, authenticating each
/// request with the configured bearer token
#[derive(Debug, Clone)]
pub struct RestPkiClient {
    config: ClientConfig,
    http: Client,
}

impl RestPkiClient {
    pub fn new(config: ClientConfig) -> Result<Self, RestError> {
        let mut builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(config.timeout());
        }

        let http = builder.build().map_err(|error| RestError::Configuration {
            msg: format!("Could not build HTTP client: {error}"),
        })?;

        Ok(RestPkiClient { config, http })
    }

    /// Shortcut for a client configured from `REST_PKI_*` environment
    /// variables
    pub fn from_env() -> Result<Self, RestError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.config.access_token())
    }

    async fn send(&self, url: &Url, request: RequestBuilder) -> Result<Response, RestError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|source| RestError::Unreachable {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RestError::from_status(url.as_str(), status, &body))
    }

    async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, RestError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|error| RestError::InvalidResponse {
                url: url.to_string(),
                msg: error.to_string(),
            })?;

        serde_json::from_slice(&bytes).map_err(|error| RestError::InvalidResponse {
            url: url.to_string(),
            msg: error.to_string(),
        })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RestClient for RestPkiClient {
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.config.resolve(path)?;
        debug!("POST {}", url);

        let response = self.send(&url, self.http.post(url.clone()).json(body)).await?;
        Ok(Self::decode(&url, response).await?)
    }

    async fn upload(&self, content: &[u8]) -> Result<String> {
        let url = self.config.resolve(UPLOAD_PATH)?;
        debug!("Uploading {} bytes to {}", content.len(), url);

        let request = self
            .http
            .post(url.clone())
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(content.to_vec());
        let response = self.send(&url, request).await?;
        let upload: UploadModel = Self::decode(&url, response).await?;

        Ok(upload.blob_token)
    }

    async fn download(&self, location: &str) -> Result<Vec<u8>> {
        let url = self.config.resolve(location)?;
        debug!("Downloading {}", url);

        let response = self.send(&url, self.http.get(url.clone())).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|error| RestError::InvalidResponse {
                url: url.to_string(),
                msg: error.to_string(),
            })?;

        Ok(bytes.to_vec())
    }

    fn inline_content_threshold(&self) -> usize {
        self.config.inline_content_threshold()
    }
}
