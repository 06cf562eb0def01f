//! Shared protocol types for flashcards-web
//!
//! Defines the JSON structures exchanged with the `/generate` endpoint and
//! the multipart field names the page sends.

pub mod messages;
pub mod reply;

pub use messages::*;
pub use reply::*;
