use std::time::Duration;

use rest_pki::client::DEFAULT_INLINE_CONTENT_THRESHOLD;
use url::Url;

use crate::error::RestError;

pub const ENDPOINT_VARIABLE: &str = "REST_PKI_ENDPOINT";
pub const ACCESS_TOKEN_VARIABLE: &str = "REST_PKI_ACCESS_TOKEN";
pub const TIMEOUT_VARIABLE: &str = "REST_PKI_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the service lives and how to talk to it
#[derive(Debug, Clone)]
pub struct ClientConfig {
    endpoint: Url,
    access_token: String,
    timeout: Duration,
    inline_content_threshold: usize,
}

impl ClientConfig {
    pub fn new(endpoint: &str, access_token: &str) -> Result<Self, RestError> {
        // Without the trailing slash, joining `Api/...` would replace the
        // last path segment of the endpoint
        let endpoint = match endpoint.ends_with('/') {
            true => endpoint.to_string(),
            false => format!("{endpoint}/"),
        };
        let endpoint = Url::parse(&endpoint).map_err(|error| RestError::Configuration {
            msg: format!("Invalid endpoint {endpoint}: {error}"),
        })?;

        if access_token.is_empty() {
            return Err(RestError::Configuration {
                msg: "The access token is empty".into(),
            });
        }

        Ok(ClientConfig {
            endpoint,
            access_token: access_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            inline_content_threshold: DEFAULT_INLINE_CONTENT_THRESHOLD,
        })
    }

    /// Read `REST_PKI_ENDPOINT`, `REST_PKI_ACCESS_TOKEN` and, optionally,
    /// `REST_PKI_TIMEOUT_SECS` from the environment
    pub fn from_env() -> Result<Self, RestError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, RestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| RestError::Configuration {
                msg: format!("{name} is not set"),
            })
        };

        let mut config = ClientConfig::new(
            &required(ENDPOINT_VARIABLE)?,
            &required(ACCESS_TOKEN_VARIABLE)?,
        )?;

        if let Some(timeout) = lookup(TIMEOUT_VARIABLE) {
            let seconds = timeout
                .trim()
                .parse::<u64>()
                .map_err(|error| RestError::Configuration {
                    msg: format!("{TIMEOUT_VARIABLE} is not a number of seconds: {error}"),
                })?;
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_inline_content_threshold(mut self, threshold: usize) -> Self {
        self.inline_content_threshold = threshold;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn inline_content_threshold(&self) -> usize {
        self.inline_content_threshold
    }

    /// Resolve an API path or an absolute URL against the endpoint
    pub fn resolve(&self, location: &str) -> Result<Url, RestError> {
        self.endpoint
            .join(location)
            .map_err(|error| RestError::Configuration {
                msg: format!("Cannot resolve {location} against {}: {error}", self.endpoint),
            })
    }
}
