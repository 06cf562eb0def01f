//! Card markup and entrance timing
//!
//! Pure helpers shared by the DOM view; nothing here touches the browser.

use flashcards_protocol::Flashcard;

/// Class carried by every card element
pub const CARD_CLASS: &str = "flashcard";

/// Class toggled on a card when it is clicked
pub const FLIPPED_CLASS: &str = "flipped";

/// Initial card style; cards start hidden and slide in once their delay elapses
pub const ENTRANCE_STYLE: &str = "
    .flashcard {
        opacity: 0;
        transform: translateY(20px);
        transition: opacity 0.5s ease, transform 0.5s ease;
    }
";

/// Escape text for insertion into HTML so server-supplied strings stay literal
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Inner HTML for the card at `index`: question on the front, answer on the back
pub fn card_markup(index: usize, card: &Flashcard) -> String {
    format!(
        r#"
            <div class="flashcard-inner">
                <div class="flashcard-front">
                    <div class="flashcard-label">Question {}</div>
                    <div class="flashcard-content">{}</div>
                </div>
                <div class="flashcard-back">
                    <div class="flashcard-label">Answer</div>
                    <div class="flashcard-content">{}</div>
                </div>
            </div>
        "#,
        index + 1,
        escape_html(&card.question),
        escape_html(&card.answer),
    )
}

/// Entrance delay for the card at `index`
pub fn stagger_delay_ms(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(step_ms)
}
