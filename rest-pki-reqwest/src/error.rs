//! Error types for the HTTP transport

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error types for the HTTP transport
#[derive(Error, Debug)]
pub enum RestError {
    /// The service could not be reached at all
    #[error("REST PKI could not be reached at {url}: {source}")]
    Unreachable {
        /// Address of the request
        url: String,
        /// Underlying transport failure
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status
    #[error("REST PKI returned {status} for {url}{}", describe(.code, .message))]
    Status {
        /// Address of the request
        url: String,
        /// HTTP status of the response
        status: StatusCode,
        /// Error code reported by the service, if any
        code: Option<String>,
        /// Error message reported by the service, if any
        message: Option<String>,
    },
    /// The response body could not be decoded
    #[error("Could not decode response from {url}: {msg}")]
    InvalidResponse {
        /// Address of the request
        url: String,
        /// Error message
        msg: String,
    },
    /// Configuration errors
    #[error("Invalid REST PKI configuration: {msg}")]
    Configuration {
        /// Error message
        msg: String,
    },
}

fn describe(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(": {message} ({code})"),
        (None, Some(message)) => format!(": {message}"),
        (Some(code), None) => format!(" ({code})"),
        (None, None) => String::new(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorModel {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestError {
    /// Build a status error from a response body, picking up the code and
    /// message when the service reported them as JSON
    pub fn from_status(url: &str, status: StatusCode, body: &str) -> Self {
        let model = serde_json::from_str::<ErrorModel>(body).ok();
        let (code, message) = match model {
            Some(model) => (model.code, model.message),
            None => (None, None),
        };

        RestError::Status {
            url: url.to_string(),
            status,
            code,
            message,
        }
    }

    /// The HTTP status, when the service answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
