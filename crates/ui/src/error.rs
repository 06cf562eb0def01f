use flashcards_protocol::ReplyError;
use wasm_bindgen::{JsCast, JsValue};

/// Everything that can end a submission without cards.
///
/// `Display` yields exactly the text shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlashcardError {
    #[error("Please select a file to upload")]
    NoFileSelected,
    /// Non-2xx reply, description supplied by the server
    #[error("{0}")]
    Server(String),
    /// Network failure or a body that is not a card list
    #[error("{0}")]
    Transport(String),
    #[error("No flashcards were generated. Please try a different document.")]
    EmptyResult,
}

impl From<ReplyError> for FlashcardError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Server(msg) => Self::Server(msg),
            ReplyError::Malformed(msg) => Self::Transport(msg),
        }
    }
}

impl From<TransportError> for FlashcardError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.message)
    }
}

/// Failure below HTTP: no reply was received or it could not be read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JsValue> for TransportError {
    fn from(value: JsValue) -> Self {
        // fetch rejects with a TypeError whose message is the useful part
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return Self::new(String::from(err.message()));
        }
        value
            .as_string()
            .map_or_else(|| Self::new("Network request failed"), Self::new)
    }
}
