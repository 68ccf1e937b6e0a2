use std::{collections::HashMap, sync::Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::client::RestClient;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
}

/// An in-memory stand-in for the service. Answers POSTs with canned
/// responses keyed by path and records every call it receives.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, Value>,
    blobs: HashMap<String, Vec<u8>>,
    inline_content_threshold: Option<usize>,

    calls: Mutex<Vec<RecordedCall>>,
    uploads: Mutex<Vec<Vec<u8>>>,
}

impl MockClient {
    pub fn new() -> Self {
        MockClient::default()
    }

    pub fn responding(mut self, path: &str, response: Value) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    pub fn serving_blob(mut self, location: &str, content: &[u8]) -> Self {
        self.blobs.insert(location.to_string(), content.to_vec());
        self
    }

    pub fn with_inline_content_threshold(mut self, threshold: usize) -> Self {
        self.inline_content_threshold = Some(threshold);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path == path)
            .collect()
    }

    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RestClient for MockClient {
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            body: body.clone(),
        });

        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("Unexpected request to {}", path))
    }

    async fn upload(&self, content: &[u8]) -> Result<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(content.to_vec());
        Ok(format!("blob-{}", uploads.len()))
    }

    async fn download(&self, location: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(location)
            .cloned()
            .ok_or_else(|| anyhow!("Nothing to download at {}", location))
    }

    fn inline_content_threshold(&self) -> usize {
        self.inline_content_threshold
            .unwrap_or(crate::client::DEFAULT_INLINE_CONTENT_THRESHOLD)
    }
}
