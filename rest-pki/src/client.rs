use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Content at or below this many bytes is sent inline (base64) rather than
/// uploaded ahead of the request
pub const DEFAULT_INLINE_CONTENT_THRESHOLD: usize = 1024 * 1024;

#[cfg(not(target_arch = "wasm32"))]
pub trait RestClientConditionalSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<C> RestClientConditionalSendSync for C where C: RestClient + Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait RestClientConditionalSendSync {}

#[cfg(target_arch = "wasm32")]
impl<C> RestClientConditionalSendSync for C where C: RestClient {}

/// This trait must be implemented by a struct that is able to reach the REST
/// PKI service. It represents the minimum API surface the explorers need:
/// JSON round trips against API paths, plus moving raw bytes in and out of
/// the service's blob storage.
///
/// Paths are relative to the service endpoint (e.g.
/// `Api/CadesSignatures/Open`).
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait RestClient: RestClientConditionalSendSync {
    /// POST a JSON body and return the decoded JSON response
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    /// Store raw bytes on the service, returning a blob token that can be
    /// used to reference them in later requests
    async fn upload(&self, content: &[u8]) -> Result<String>;

    /// Fetch raw bytes, given either an absolute URL or a path relative to
    /// the service endpoint
    async fn download(&self, location: &str) -> Result<Vec<u8>>;

    /// Content up to this size is embedded in requests instead of uploaded
    fn inline_content_threshold(&self) -> usize {
        DEFAULT_INLINE_CONTENT_THRESHOLD
    }
}

/// Serialize a request, POST it, and decode the response into `R`
pub async fn post_json<C, B, R>(client: &C, path: &str, body: &B) -> Result<R>
where
    C: RestClient + ?Sized,
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let body = serde_json::to_value(body)
        .with_context(|| format!("Could not serialize request for {path}"))?;
    let response = client.post(path, &body).await?;

    serde_json::from_value(response)
        .with_context(|| format!("Could not parse response from {path}"))
}
