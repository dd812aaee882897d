//! Sending a validated form to the mail API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::SubmitError;

mod http;
mod payload;

pub use http::HttpMailApi;
pub use payload::Payload;

/// A successful (2xx) response from the mail API.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub status: StatusCode,
    /// Parsed response body. Its shape is not inspected.
    pub body: Value,
}

/// Async submission trait.
///
/// Implement this trait to submit through something other than HTTP, or to stub
/// the endpoint in tests. One call is one attempt: implementations must not retry.
#[async_trait]
pub trait MailApi: Send + Sync + 'static {
    /// Submit the payload. Non-success responses come back as [`SubmitError::Rejected`].
    async fn send(&self, payload: Payload) -> Result<Delivery, SubmitError>;
}
