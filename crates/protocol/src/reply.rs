use crate::messages::{ErrorBody, Flashcard};

/// Message used when a failed reply carries no usable description
pub const GENERIC_FAILURE: &str = "Failed to generate flashcards";

/// Why a `/generate` reply could not be turned into cards
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// Non-2xx status; holds the server's description or [`GENERIC_FAILURE`]
    #[error("{0}")]
    Server(String),
    /// 2xx status but the body is not a card list
    #[error("{0}")]
    Malformed(String),
}

/// Check if an HTTP status counts as success
pub const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

/// Decode a `/generate` reply.
///
/// `Ok(None)` means the server answered `null`; callers treat it like an
/// empty batch.
pub fn decode_generate_reply(
    status: u16,
    body: &str,
) -> Result<Option<Vec<Flashcard>>, ReplyError> {
    if !is_success(status) {
        return Err(ReplyError::Server(server_description(body)));
    }

    serde_json::from_str::<Option<Vec<Flashcard>>>(body)
        .map_err(|e| ReplyError::Malformed(e.to_string()))
}

/// Pull the `error` field out of a failure body.
/// Absent, empty or unparsable descriptions fall back to the generic message.
fn server_description(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
