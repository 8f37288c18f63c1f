#![allow(dead_code)]

use async_trait::async_trait;
use chatline_core::RequestError;
use chatline_interaction::{Transport, TransportRequest, TransportResponse};
use futures::StreamExt;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Respond {
        status: u16,
        status_text: String,
        body: String,
        headers: BTreeMap<String, String>,
    },
    Fail(RequestError),
}

/// Transport that records requests and answers with a canned reply.
pub struct MockTransport {
    reply: Reply,
    delay: Option<Duration>,
    requests: Mutex<Vec<TransportRequest>>,
    completed: Arc<AtomicBool>,
}

impl MockTransport {
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Respond {
                status,
                status_text: status_text(status).to_string(),
                body: body.into(),
                headers: BTreeMap::new(),
            },
            delay: None,
            requests: Mutex::new(Vec::new()),
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing(err: RequestError) -> Self {
        Self {
            reply: Reply::Fail(err),
            delay: None,
            requests: Mutex::new(Vec::new()),
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let Reply::Respond { headers, .. } = &mut self.reply {
            headers.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Delays the reply; the transport future only completes after `delay`.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().expect("a request was sent")
    }

    /// True once a delayed exchange ran to completion.
    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, RequestError> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.store(true, Ordering::SeqCst);

        match self.reply.clone() {
            Reply::Fail(err) => Err(err),
            Reply::Respond {
                status,
                status_text,
                body,
                headers,
            } => {
                let chunks: Vec<Result<Vec<u8>, RequestError>> = body
                    .into_bytes()
                    .chunks(4)
                    .map(|chunk| Ok(chunk.to_vec()))
                    .collect();
                Ok(TransportResponse {
                    status,
                    status_text,
                    headers,
                    body: futures::stream::iter(chunks).boxed(),
                })
            }
        }
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}
