use reqwest::StatusCode;
use serde_json::Value;

use crate::Notice;

pub const SEND_FAILED: &str = "Failed to send email.";
pub const GENERIC_FAILURE: &str = "Something went wrong.";

// What the user sees:
// - server rejections show the server's `message` when it sent one
// - transport and decode failures show a fixed message, details go to the log only

#[derive(Debug, thiserror::Error, Notice)]
pub enum SubmitError {
    #[error("{}", rejection_message(.message))]
    #[notice(Error)]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("request failed: {0}")]
    #[notice(Error, "Something went wrong.")]
    Transport(#[from] reqwest::Error),

    #[error("error response ({status}) has a null body")]
    #[notice(Error, "Something went wrong.")]
    NullBody { status: StatusCode },

    #[error("response body is not JSON: {0}")]
    #[notice(Error, "Something went wrong.")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    /// Builds a rejection from a non-success response body.
    ///
    /// A `null` body has no members to look up, so it counts as a failed response
    /// rather than a rejection without a message.
    pub fn rejected(status: StatusCode, body: &Value) -> Self {
        if body.is_null() {
            return SubmitError::NullBody { status };
        }
        SubmitError::Rejected {
            status,
            message: server_message(body),
        }
    }
}

fn rejection_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or(SEND_FAILED)
}

/// The string `message` member of a JSON object body, if any.
///
/// Empty strings count as absent.
pub fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}
