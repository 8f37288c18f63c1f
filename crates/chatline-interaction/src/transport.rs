//! Transport seam used by the request client.
//!
//! A transport receives a fully built request (final URL, merged headers,
//! serialized body) and hands back the status line, headers and a body
//! stream. Deadlines and cancellation are handled by the caller, which drops
//! the transport future when the request is abandoned.

use async_trait::async_trait;
use chatline_core::RequestError;
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};
use std::collections::BTreeMap;

/// Raw response body chunks.
pub type BodyStream = BoxStream<'static, Result<Vec<u8>, RequestError>>;

/// Request as it goes on the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Response head plus an unread body.
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: BodyStream,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, RequestError>;
}

/// Flattens a header map; repeated names are joined with `, `.
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    flat
}

/// Production transport backed by `reqwest`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (proxies, TLS roots, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, RequestError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let headers = flatten_headers(response.headers());
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(map_reqwest_error))
            .boxed();

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    let trace = format!("{:?}", err);
    let normalized = if err.is_timeout() {
        RequestError::timeout()
    } else if err.is_builder() {
        RequestError::invalid_request(err.to_string(), "ERR_INVALID_REQUEST")
    } else if err.is_connect() {
        RequestError::network(err.to_string(), Some("ECONNREFUSED"))
    } else if err.is_body() || err.is_decode() {
        RequestError::network(err.to_string(), Some("ECONNRESET"))
    } else {
        RequestError::network(err.to_string(), None)
    };
    normalized.with_trace(trace)
}
