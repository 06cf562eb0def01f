//! Browser implementation of [`FlashcardView`]
//!
//! Binds the page elements once at startup; a missing element is a startup
//! error rather than a silent no-op later.

use flashcards_protocol::{Difficulty, Flashcard};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, Element, File, HtmlButtonElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement,
};

use crate::card::{card_markup, stagger_delay_ms, CARD_CLASS, ENTRANCE_STYLE, FLIPPED_CLASS};
use crate::config::UiConfig;
use crate::timer::BrowserScheduler;
use crate::view::FlashcardView;

/// Element IDs the page must provide
pub mod ids {
    pub const FILE_INPUT: &str = "fileInput";
    pub const FILE_NAME: &str = "fileName";
    pub const UPLOAD_FORM: &str = "uploadForm";
    pub const DIFFICULTY: &str = "difficulty";
    pub const GENERATE_BTN: &str = "generateBtn";
    pub const LOADING_SPINNER: &str = "loadingSpinner";
    pub const FLASHCARDS_CONTAINER: &str = "flashcardsContainer";
    pub const FLASHCARDS_GRID: &str = "flashcardsGrid";
    pub const ERROR_MESSAGE: &str = "errorMessage";
    pub const CARD_COUNT: &str = "cardCount";
}

/// Look up an element by id and cast it
pub fn element_by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{id} not found")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

/// Add the initial card style to `<head>`
pub fn install_card_styles(doc: &Document) -> Result<(), JsValue> {
    let style = doc.create_element("style")?;
    style.set_text_content(Some(ENTRANCE_STYLE));
    doc.head().ok_or("document has no <head>")?.append_child(&style)?;
    Ok(())
}

fn set_display(el: &HtmlElement, display: &str) {
    let _ = el.style().set_property("display", display);
}

pub struct DomView {
    document: Document,
    file_input: HtmlInputElement,
    file_name: Element,
    difficulty: HtmlSelectElement,
    generate_btn: HtmlButtonElement,
    spinner: HtmlElement,
    container: HtmlElement,
    grid: Element,
    error_message: HtmlElement,
    card_count: Element,
    timers: BrowserScheduler,
    stagger_ms: u32,
    fade_ms: u32,
}

impl DomView {
    pub fn bind(doc: &Document, config: &UiConfig) -> Result<Self, JsValue> {
        Ok(Self {
            document: doc.clone(),
            file_input: element_by_id(doc, ids::FILE_INPUT)?,
            file_name: element_by_id(doc, ids::FILE_NAME)?,
            difficulty: element_by_id(doc, ids::DIFFICULTY)?,
            generate_btn: element_by_id(doc, ids::GENERATE_BTN)?,
            spinner: element_by_id(doc, ids::LOADING_SPINNER)?,
            container: element_by_id(doc, ids::FLASHCARDS_CONTAINER)?,
            grid: element_by_id(doc, ids::FLASHCARDS_GRID)?,
            error_message: element_by_id(doc, ids::ERROR_MESSAGE)?,
            card_count: element_by_id(doc, ids::CARD_COUNT)?,
            timers: BrowserScheduler,
            stagger_ms: config.card_stagger_ms,
            fade_ms: config.container_fade_ms,
        })
    }

    pub fn file_input(&self) -> &HtmlInputElement {
        &self.file_input
    }

    /// First file in the picker, if any
    pub fn selected_file(&self) -> Option<File> {
        self.file_input.files().and_then(|files| files.get(0))
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::new(self.difficulty.value())
    }

    /// Create one card, wire its flip toggle and queue its entrance
    fn append_card(&self, index: usize, card: &Flashcard) -> Result<(), JsValue> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        el.set_class_name(CARD_CLASS);
        el.set_attribute("data-index", &index.to_string())?;
        el.set_inner_html(&card_markup(index, card));

        // Flip state lives on the element's class list
        let target = el.clone();
        let on_click = Closure::wrap(Box::new(move || {
            let _ = target.class_list().toggle(FLIPPED_CLASS);
        }) as Box<dyn FnMut()>);
        el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        self.grid.append_child(&el)?;

        self.timers.detach(
            stagger_delay_ms(index, self.stagger_ms),
            Box::new(move || {
                let style = el.style();
                let _ = style.set_property("opacity", "1");
                let _ = style.set_property("transform", "translateY(0)");
            }),
        );
        Ok(())
    }
}

impl FlashcardView for DomView {
    fn set_file_label(&self, label: &str) {
        self.file_name.set_text_content(Some(label));
    }

    fn set_busy(&self, busy: bool) {
        self.generate_btn.set_disabled(busy);
        set_display(&self.spinner, if busy { "block" } else { "none" });
    }

    fn hide_cards(&self) {
        set_display(&self.container, "none");
    }

    fn render_cards(&self, cards: &[Flashcard]) {
        self.grid.set_inner_html("");

        let mut shown = 0usize;
        for (index, card) in cards.iter().enumerate() {
            match self.append_card(index, card) {
                Ok(()) => shown += 1,
                Err(e) => tracing::error!(index, error = ?e, "failed to create card element"),
            }
        }
        // Count what actually made it onto the page
        self.card_count.set_text_content(Some(&shown.to_string()));

        set_display(&self.container, "block");
        let _ = self.container.style().set_property("opacity", "0");
        let container = self.container.clone();
        self.timers.detach(
            self.fade_ms,
            Box::new(move || {
                let style = container.style();
                let _ = style.set_property("transition", "opacity 0.5s ease");
                let _ = style.set_property("opacity", "1");
            }),
        );
    }

    fn show_error(&self, banner: &str) {
        self.error_message.set_text_content(Some(banner));
        set_display(&self.error_message, "block");
    }

    fn hide_error(&self) {
        set_display(&self.error_message, "none");
    }

    fn acknowledge(&self, message: &str) {
        if let Some(win) = window() {
            let _ = win.alert_with_message(message);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const ROOT_ID: &str = "flashcards-test-root";

    const PAGE: &str = r#"
        <form id="uploadForm">
            <input type="file" id="fileInput">
            <span id="fileName">Choose PDF or DOCX file</span>
            <select id="difficulty"><option value="Medium" selected>Medium</option></select>
            <button type="submit" id="generateBtn">Generate</button>
        </form>
        <div id="loadingSpinner" style="display: none"></div>
        <div id="errorMessage" style="display: none"></div>
        <div id="flashcardsContainer" style="display: none">
            <span id="cardCount">0</span>
            <div id="flashcardsGrid"></div>
        </div>
    "#;

    /// Fresh page skeleton bound to a new view
    fn page() -> DomView {
        let doc = window().and_then(|w| w.document()).expect("document");
        if let Some(old) = doc.get_element_by_id(ROOT_ID) {
            old.remove();
        }
        let root = doc.create_element("div").expect("create root");
        root.set_id(ROOT_ID);
        root.set_inner_html(PAGE);
        doc.body().expect("body").append_child(&root).expect("append root");

        DomView::bind(&doc, &UiConfig::default()).expect("bind page")
    }

    fn card_at(view: &DomView, index: u32) -> HtmlElement {
        view.grid
            .children()
            .item(index)
            .expect("card element")
            .dyn_into()
            .expect("card is an HtmlElement")
    }

    fn display_of(el: &HtmlElement) -> String {
        el.style().get_property_value("display").unwrap_or_default()
    }

    fn is_flipped(card: &HtmlElement) -> bool {
        card.class_list().contains(FLIPPED_CLASS)
    }

    #[wasm_bindgen_test]
    fn test_cards_render_in_order_escaped_and_counted() {
        let view = page();
        view.render_cards(&[
            Flashcard::new("<script>alert(1)</script>", "a & b"),
            Flashcard::new("Q2", "A2"),
            Flashcard::new("Q3", "A3"),
        ]);

        assert_eq!(view.grid.children().length(), 3);
        for i in 0..3u32 {
            let card = card_at(&view, i);
            assert_eq!(card.get_attribute("data-index"), Some(i.to_string()));
            assert!(card.class_list().contains(CARD_CLASS));
        }

        // Server text stays literal
        assert!(view.grid.query_selector("script").expect("query").is_none());
        let first = card_at(&view, 0).text_content().unwrap_or_default();
        assert!(first.contains("Question 1"));
        assert!(first.contains("<script>alert(1)</script>"));
        assert!(first.contains("a & b"));
        assert!(card_at(&view, 2).text_content().unwrap_or_default().contains("Q3"));

        assert_eq!(view.card_count.text_content().as_deref(), Some("3"));
        assert_eq!(display_of(&view.container), "block");
    }

    #[wasm_bindgen_test]
    fn test_count_matches_cards_on_page() {
        let view = page();
        view.render_cards(&[Flashcard::new("Q1", "A1"), Flashcard::new("Q2", "A2")]);
        view.render_cards(&[Flashcard::new("only", "one")]);

        assert_eq!(view.grid.children().length(), 1);
        assert_eq!(view.card_count.text_content().as_deref(), Some("1"));
    }

    #[wasm_bindgen_test]
    fn test_flip_toggles_only_clicked_card() {
        let view = page();
        view.render_cards(&[Flashcard::new("Q1", "A1"), Flashcard::new("Q2", "A2")]);
        let (first, second) = (card_at(&view, 0), card_at(&view, 1));

        first.click();
        assert!(is_flipped(&first));
        assert!(!is_flipped(&second));

        second.click();
        assert!(is_flipped(&first));
        assert!(is_flipped(&second));

        first.click();
        assert!(!is_flipped(&first));
        assert!(is_flipped(&second));
    }

    #[wasm_bindgen_test]
    fn test_busy_disables_button_and_shows_spinner() {
        let view = page();

        view.set_busy(true);
        assert!(view.generate_btn.disabled());
        assert_eq!(display_of(&view.spinner), "block");

        view.set_busy(false);
        assert!(!view.generate_btn.disabled());
        assert_eq!(display_of(&view.spinner), "none");
    }
}
