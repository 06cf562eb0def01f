mod card;
mod config;
mod controller;
mod dom;
mod error;
mod logging;
mod timer;
mod transport;
mod view;

#[cfg(test)]
mod testing;

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, Window};

pub use card::{card_markup, escape_html, stagger_delay_ms};
pub use config::UiConfig;
pub use controller::{SubmitOutcome, UiState, UploadController};
pub use dom::DomView;
pub use error::{FlashcardError, TransportError};
pub use timer::{BrowserScheduler, Scheduler, TimeoutHandle};
pub use transport::{FetchTransport, GenerateTransport, HttpReply, NamedFile, UploadRequest};
pub use view::{error_banner, FlashcardView};

type PageController = UploadController<DomView, FetchTransport, BrowserScheduler>;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = UiConfig::from_window();
    logging::init(config.log_level);

    let window = web_sys::window().ok_or("no global `window` exists")?;
    let document = window.document().ok_or("should have a document on window")?;

    dom::install_card_styles(&document)?;

    let view = Rc::new(DomView::bind(&document, &config)?);
    let controller = Rc::new(UploadController::new(
        Rc::clone(&view),
        FetchTransport,
        BrowserScheduler,
        config,
    ));

    setup_file_input(&view, &controller)?;
    setup_form_submit(&document, &view, &controller)?;
    setup_feedback_hook(&window, &controller)?;

    tracing::info!(endpoint = %controller.config().endpoint, "flashcards page ready");
    Ok(())
}

// ============================================================================
// Event wiring: DOM -> controller
// ============================================================================

fn setup_file_input(view: &Rc<DomView>, controller: &Rc<PageController>) -> Result<(), JsValue> {
    let view_change = Rc::clone(view);
    let controller = Rc::clone(controller);
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        let file = view_change.selected_file();
        controller.on_file_chosen(file.as_ref());
    }) as Box<dyn FnMut(Event)>);

    view.file_input()
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

fn setup_form_submit(
    document: &Document,
    view: &Rc<DomView>,
    controller: &Rc<PageController>,
) -> Result<(), JsValue> {
    let form: web_sys::Element = dom::element_by_id(document, dom::ids::UPLOAD_FORM)?;

    let view = Rc::clone(view);
    let controller = Rc::clone(controller);
    let on_submit = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();

        let file = view.selected_file();
        let difficulty = view.difficulty();
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            if let SubmitOutcome::Failed(err) = controller.on_submit(file, difficulty).await {
                tracing::debug!(error = %err, "submission ended with an error");
            }
        });
    }) as Box<dyn FnMut(Event)>);

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

/// Expose `window.sendFeedback(kind)` for the page's feedback buttons
fn setup_feedback_hook(window: &Window, controller: &Rc<PageController>) -> Result<(), JsValue> {
    let controller = Rc::clone(controller);
    let callback = Closure::wrap(Box::new(move |kind: JsValue| {
        controller.send_feedback(&kind.as_string().unwrap_or_default());
    }) as Box<dyn FnMut(JsValue)>);

    js_sys::Reflect::set(window, &"sendFeedback".into(), callback.as_ref())?;
    callback.forget();
    Ok(())
}
