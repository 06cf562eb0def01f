//! Upload → generate → render cycle
//!
//! [`UploadController`] owns every user-visible transition on the page. The
//! page regions, the network and the clock are injected so the whole cycle
//! runs without a browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flashcards_protocol::{decode_generate_reply, Difficulty, FeedbackKind, Flashcard};
use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::error::FlashcardError;
use crate::timer::Scheduler;
use crate::transport::{GenerateTransport, NamedFile, UploadRequest};
use crate::view::{error_banner, FlashcardView};

/// Which region of the page is in the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    /// Request in flight; submit disabled
    Loading,
    ShowingCards,
    ShowingError,
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Number of cards shown
    Rendered(usize),
    Failed(FlashcardError),
    /// A newer submission started before this reply arrived; the reply was dropped
    Superseded,
}

pub struct UploadController<V, T, S>
where
    S: Scheduler,
{
    view: Rc<V>,
    transport: T,
    scheduler: S,
    config: UiConfig,
    state: Rc<Cell<UiState>>,
    /// Bumped per submission; replies carrying an older value are stale
    generation: Cell<u64>,
    error_timer: RefCell<Option<S::Handle>>,
}

impl<V, T, S> UploadController<V, T, S>
where
    V: FlashcardView + 'static,
    T: GenerateTransport,
    S: Scheduler,
{
    pub fn new(view: Rc<V>, transport: T, scheduler: S, config: UiConfig) -> Self {
        Self {
            view,
            transport,
            scheduler,
            config,
            state: Rc::new(Cell::new(UiState::Idle)),
            generation: Cell::new(0),
            error_timer: RefCell::new(None),
        }
    }

    pub fn state(&self) -> UiState {
        self.state.get()
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Update the file label after the picker changes
    pub fn on_file_chosen(&self, selection: Option<&T::File>) {
        let label = selection.map_or_else(|| self.config.file_placeholder.clone(), |f| f.name());
        self.view.set_file_label(&label);
    }

    /// Handle a form submission.
    ///
    /// Every failure ends in the error banner. Submit is re-enabled and the
    /// spinner hidden on every exit path, including when the future is dropped.
    pub async fn on_submit(&self, file: Option<T::File>, difficulty: Difficulty) -> SubmitOutcome {
        let Some(file) = file else {
            if self.state.get() == UiState::Loading {
                // Nothing can clean up after the in-flight request now
                self.next_generation();
                self.view.set_busy(false);
            }
            let err = FlashcardError::NoFileSelected;
            self.show_error(&err.to_string());
            return SubmitOutcome::Failed(err);
        };

        let generation = self.begin_loading();
        let _busy = BusyGuard {
            view: &*self.view,
            state: &self.state,
            current: &self.generation,
            generation,
        };

        let request = UploadRequest { file, difficulty };
        info!(
            file = %request.file.name(),
            difficulty = %request.difficulty,
            generation,
            "uploading document"
        );
        let result = self.request_cards(&request).await;
        drop(request);

        if self.generation.get() != generation {
            debug!(generation, "discarding superseded reply");
            return SubmitOutcome::Superseded;
        }

        match result {
            Ok(cards) => match self.render_flashcards(cards.as_deref()) {
                Ok(count) => SubmitOutcome::Rendered(count),
                Err(err) => SubmitOutcome::Failed(err),
            },
            Err(err) => {
                warn!(error = %err, "flashcard generation failed");
                self.show_error(&err.to_string());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Show a batch of cards. An empty or missing batch is an error.
    pub fn render_flashcards(&self, cards: Option<&[Flashcard]>) -> Result<usize, FlashcardError> {
        let cards = match cards {
            Some(cards) if !cards.is_empty() => cards,
            _ => {
                let err = FlashcardError::EmptyResult;
                self.show_error(&err.to_string());
                return Err(err);
            }
        };

        self.cancel_error_timer();
        self.view.hide_error();
        self.view.render_cards(cards);
        self.state.set(UiState::ShowingCards);
        info!(count = cards.len(), "rendered flashcards");
        Ok(cards.len())
    }

    /// Show the error banner and schedule it to hide.
    /// A previously scheduled hide is cancelled first.
    pub fn show_error(&self, message: &str) {
        self.cancel_error_timer();
        self.view.hide_cards();
        self.view.show_error(&error_banner(message));
        self.state.set(UiState::ShowingError);

        let view = Rc::clone(&self.view);
        let state = Rc::clone(&self.state);
        let handle = self.scheduler.schedule(
            self.config.error_display_ms,
            Box::new(move || {
                view.hide_error();
                if state.get() == UiState::ShowingError {
                    state.set(UiState::Idle);
                }
            }),
        );
        *self.error_timer.borrow_mut() = Some(handle);
    }

    /// Acknowledge feedback locally. Nothing is sent anywhere.
    pub fn send_feedback(&self, kind: &str) {
        let kind = FeedbackKind::from(kind);
        info!(%kind, "feedback");
        self.view.acknowledge(kind.acknowledgment());
    }

    async fn request_cards(
        &self,
        request: &UploadRequest<T::File>,
    ) -> Result<Option<Vec<Flashcard>>, FlashcardError> {
        let reply = self
            .transport
            .post_generate(&self.config.endpoint, request)
            .await?;
        debug!(status = reply.status, bytes = reply.body.len(), "generate reply");
        decode_generate_reply(reply.status, &reply.body).map_err(FlashcardError::from)
    }

    fn begin_loading(&self) -> u64 {
        let generation = self.next_generation();
        self.cancel_error_timer();
        self.view.set_busy(true);
        self.view.hide_cards();
        self.view.hide_error();
        self.state.set(UiState::Loading);
        generation
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        generation
    }

    fn cancel_error_timer(&self) {
        let pending = self.error_timer.borrow_mut().take();
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
    }
}

/// Ends the busy state when a submission finishes, unless a newer one owns it
struct BusyGuard<'a, V: FlashcardView> {
    view: &'a V,
    state: &'a Cell<UiState>,
    current: &'a Cell<u64>,
    generation: u64,
}

impl<V: FlashcardView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        if self.current.get() != self.generation {
            return;
        }
        self.view.set_busy(false);
        if self.state.get() == UiState::Loading {
            self.state.set(UiState::Idle);
        }
    }
}
