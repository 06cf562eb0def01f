use serde::{Deserialize, Serialize};

/// Endpoint that turns an uploaded document into flashcards
pub const GENERATE_PATH: &str = "/generate";

/// Multipart field carrying the uploaded document
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the difficulty hint
pub const DIFFICULTY_FIELD: &str = "difficulty";

/// A single question/answer pair produced by the generator.
///
/// Cards have no identity beyond their position in the reply. A field the
/// server leaves out renders as empty text rather than failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Difficulty hint forwarded to the generator.
///
/// The accepted values belong to the server; the page only relays whatever
/// the selector holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(String);

impl Difficulty {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Difficulty {
    // Same value the server assumes when the field is missing
    fn default() -> Self {
        Self("Medium".to_string())
    }
}

impl From<&str> for Difficulty {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a non-2xx reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Feedback categories offered after a batch is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Cards were too easy
    Easy,
    /// Cards were too hard
    Hard,
    /// Difficulty was right
    Perfect,
    /// Any other category name, kept as given
    Other(String),
}

impl FeedbackKind {
    /// Acknowledgment shown to the user for this category
    pub fn acknowledgment(&self) -> &'static str {
        match self {
            Self::Easy => "Thank you! We'll generate harder flashcards next time.",
            Self::Hard => "Thank you! We'll make flashcards easier next time.",
            Self::Perfect => "Awesome! Glad the difficulty was just right!",
            Self::Other(_) => "Thank you for your feedback!",
        }
    }
}

impl From<&str> for FeedbackKind {
    fn from(s: &str) -> Self {
        match s {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            "perfect" => Self::Perfect,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
            Self::Perfect => "perfect",
            Self::Other(s) => s,
        };
        write!(f, "{s}")
    }
}
