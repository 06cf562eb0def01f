use flashcards_protocol::Flashcard;

/// Page regions the controller drives.
///
/// Each method is one capability slot; implementations own how the page
/// shows it. Methods take `&self` because the view is shared with timer
/// callbacks.
pub trait FlashcardView {
    /// Show the chosen file name (or the placeholder)
    fn set_file_label(&self, label: &str);

    /// Disable submit and show the spinner while a request is in flight
    fn set_busy(&self, busy: bool);

    fn hide_cards(&self);

    /// Replace any shown cards with `cards`, in order, and show the grid
    fn render_cards(&self, cards: &[Flashcard]);

    /// Show the error banner with the given text
    fn show_error(&self, banner: &str);

    fn hide_error(&self);

    /// Blocking acknowledgment (feedback)
    fn acknowledge(&self, message: &str);
}

/// Banner text for an error message
pub fn error_banner(message: &str) -> String {
    format!("\u{274c} Error: {message}")
}
