//! Resilient request client.
//!
//! Every call goes through [`RequestClient::send`], which:
//!
//! 1. merges `Content-Type: application/json` with the caller's headers
//!    (caller wins),
//! 2. appends `params` to the URI query in insertion order,
//! 3. races the transport against a per-request cancellation token and the
//!    optional deadline,
//! 4. reads the body leniently (JSON when it parses, raw text otherwise) or
//!    hands back the raw stream,
//! 5. rejects non-2xx responses with the same response shape, and
//! 6. normalizes transport failures into a single [`RequestError`], logged
//!    once here.

use crate::transport::{BodyStream, ReqwestTransport, Transport, TransportRequest, TransportResponse};
use chatline_core::{ChatlineError, RequestError};
use futures::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Options for a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Query parameters, appended in insertion order.
    pub params: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    /// Hand back the raw body stream instead of parsing it.
    pub return_stream: bool,
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Vec::new(),
            body: None,
            params: Vec::new(),
            timeout: None,
            return_stream: false,
            cancel: None,
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Lets the caller abort the request. Aborts surface as timeouts.
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn stream(mut self) -> Self {
        self.return_stream = true;
        self
    }
}

/// Response body as handed back to the caller.
pub enum ResponseBody {
    /// Parsed JSON, or `Value::String` holding the raw text when parsing failed.
    Json(Value),
    Stream(BodyStream),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Stream(_) => None,
        }
    }

    /// Parsed body; a stream body yields `Value::Null`.
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Stream(_) => Value::Null,
        }
    }

    pub fn into_stream(self) -> Option<BodyStream> {
        match self {
            Self::Json(_) => None,
            Self::Stream(stream) => Some(stream),
        }
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Formatted response. Success and HTTP failure share this shape.
#[derive(Debug)]
pub struct FetchResponse {
    pub body: ResponseBody,
    pub status_code: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub ok: bool,
}

#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure (network, timeout, request construction).
    #[error(transparent)]
    Request(#[from] RequestError),
    /// Non-2xx status; the response is carried through untouched.
    #[error("HTTP {} {}", .0.status_code, .0.status_text)]
    Status(FetchResponse),
}

impl FetchError {
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Request(err) => Some(err),
            Self::Status(_) => None,
        }
    }

    pub fn response(&self) -> Option<&FetchResponse> {
        match self {
            Self::Request(_) => None,
            Self::Status(response) => Some(response),
        }
    }
}

impl From<FetchError> for ChatlineError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Request(err) => ChatlineError::Request(err),
            FetchError::Status(response) => ChatlineError::Status {
                status: response.status_code,
                body: response.body.into_json(),
            },
        }
    }
}

/// HTTP client with deadline/cancellation and error normalization.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    default_timeout: Option<Duration>,
}

impl Default for RequestClient {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::new()))
    }
}

impl RequestClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            default_timeout: None,
        }
    }

    /// Deadline applied when a request does not set its own.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Sends a request. See the module docs for the full contract.
    pub async fn send(&self, options: RequestOptions) -> Result<FetchResponse, FetchError> {
        let method = options.method.clone();
        let uri = options.uri.clone();

        let outcome = self.execute(options).await;
        match &outcome {
            Ok(response) => {
                tracing::debug!(
                    status = response.status_code,
                    "[RequestClient] {} {} completed",
                    method,
                    uri
                );
            }
            Err(FetchError::Status(response)) => {
                tracing::warn!(
                    status = response.status_code,
                    "[RequestClient] {} {} rejected: {} {}",
                    method,
                    uri,
                    response.status_code,
                    response.status_text
                );
            }
            Err(FetchError::Request(err)) => {
                tracing::error!(
                    kind = ?err.kind,
                    name = %err.name,
                    code = ?err.code,
                    "[RequestClient] {} {} failed: {} - {}",
                    method,
                    uri,
                    err.name,
                    err.message
                );
            }
        }
        outcome
    }

    async fn execute(&self, options: RequestOptions) -> Result<FetchResponse, FetchError> {
        let request = build_request(&options)?;
        let token = options.cancel.clone().unwrap_or_else(CancellationToken::new);
        let deadline = options.timeout.or(self.default_timeout);
        let return_stream = options.return_stream;

        let exchange = async {
            let response = self.transport.execute(request).await?;
            format_response(response, return_stream).await
        };

        // The sleep lives inside this future, so it is dropped (never fires)
        // once the exchange settles.
        let deadline_elapsed = async {
            match deadline {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            outcome = exchange => outcome,
            _ = token.cancelled() => Err(RequestError::timeout().into()),
            _ = deadline_elapsed => {
                token.cancel();
                Err(RequestError::timeout().into())
            }
        }
    }
}

fn build_request(options: &RequestOptions) -> Result<TransportRequest, RequestError> {
    let mut url = Url::parse(&options.uri).map_err(|e| {
        RequestError::invalid_request(format!("Invalid URL: {}", options.uri), "ERR_INVALID_URL")
            .with_trace(format!("{:?}", e))
    })?;
    if !options.params.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in &options.params {
            query.append_pair(key, value);
        }
    }

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            RequestError::invalid_request(format!("Invalid header name: {}", name), "ERR_INVALID_HEADER")
                .with_trace(format!("{:?}", e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            RequestError::invalid_request(
                format!("Invalid value for header {}", name),
                "ERR_INVALID_HEADER",
            )
            .with_trace(format!("{:?}", e))
        })?;
        headers.insert(name, value);
    }

    let body = options
        .body
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| {
            RequestError::invalid_request(format!("Unserializable body: {}", e), "ERR_INVALID_BODY")
                .with_trace(format!("{:?}", e))
        })?;

    Ok(TransportRequest {
        method: options.method.clone(),
        url,
        headers,
        body,
    })
}

async fn format_response(
    response: TransportResponse,
    return_stream: bool,
) -> Result<FetchResponse, FetchError> {
    let TransportResponse {
        status,
        status_text,
        headers,
        body,
    } = response;

    let body = if return_stream {
        ResponseBody::Stream(body)
    } else {
        ResponseBody::Json(parse_lenient(&read_text(body).await?))
    };

    let formatted = FetchResponse {
        body,
        status_code: status,
        status_text,
        headers,
        ok: (200..300).contains(&status),
    };

    if formatted.ok {
        Ok(formatted)
    } else {
        Err(FetchError::Status(formatted))
    }
}

async fn read_text(mut body: BodyStream) -> Result<String, RequestError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = body.next().await {
        bytes.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// JSON when `raw` parses, otherwise the raw text as a JSON string.
pub fn parse_lenient(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
