//! HTTP interaction layer for Chatline.
//!
//! - [`request_client`]: resilient request client (timeout/cancellation,
//!   header and query handling, lenient JSON bodies, error normalization).
//! - [`transport`]: the seam the client sends through, with a reqwest
//!   implementation.
//! - [`assistant_service`]: the remote assistant REST contract built on the
//!   client.

pub mod assistant_service;
pub mod request_client;
pub mod transport;

pub use assistant_service::EnterpriseAssistantService;
pub use request_client::{FetchError, FetchResponse, RequestClient, RequestOptions, ResponseBody};
pub use transport::{BodyStream, ReqwestTransport, Transport, TransportRequest, TransportResponse};
