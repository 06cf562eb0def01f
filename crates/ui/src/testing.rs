//! Test doubles for the controller's capabilities

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use flashcards_protocol::Flashcard;
use futures::channel::oneshot;

use crate::error::TransportError;
use crate::timer::Scheduler;
use crate::transport::{GenerateTransport, HttpReply, NamedFile, UploadRequest};
use crate::view::FlashcardView;

/// Everything the controller did to the page
#[derive(Debug, Clone, Default)]
pub struct ViewLog {
    pub file_label: Option<String>,
    pub busy: bool,
    pub busy_changes: Vec<bool>,
    pub cards_visible: bool,
    pub cards: Vec<Flashcard>,
    pub card_count: Option<usize>,
    pub render_calls: usize,
    pub error: Option<String>,
    pub acknowledgments: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    log: RefCell<ViewLog>,
}

impl RecordingView {
    pub fn log(&self) -> ViewLog {
        self.log.borrow().clone()
    }
}

impl FlashcardView for RecordingView {
    fn set_file_label(&self, label: &str) {
        self.log.borrow_mut().file_label = Some(label.to_string());
    }

    fn set_busy(&self, busy: bool) {
        let mut log = self.log.borrow_mut();
        log.busy = busy;
        log.busy_changes.push(busy);
    }

    fn hide_cards(&self) {
        self.log.borrow_mut().cards_visible = false;
    }

    fn render_cards(&self, cards: &[Flashcard]) {
        let mut log = self.log.borrow_mut();
        log.cards = cards.to_vec();
        log.card_count = Some(cards.len());
        log.cards_visible = true;
        log.render_calls += 1;
    }

    fn show_error(&self, banner: &str) {
        self.log.borrow_mut().error = Some(banner.to_string());
    }

    fn hide_error(&self) {
        self.log.borrow_mut().error = None;
    }

    fn acknowledge(&self, message: &str) {
        self.log.borrow_mut().acknowledgments.push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFile(String);

impl StubFile {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl NamedFile for StubFile {
    fn name(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub file_name: String,
    pub difficulty: String,
}

type ReplyResult = Result<HttpReply, TransportError>;

enum ScriptedReply {
    Ready(ReplyResult),
    Pending(oneshot::Receiver<ReplyResult>),
}

#[derive(Default)]
struct Script {
    replies: VecDeque<ScriptedReply>,
    calls: Vec<RecordedCall>,
}

/// Answers each POST with the next scripted reply
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn push_reply(&self, reply: ReplyResult) {
        self.script
            .borrow_mut()
            .replies
            .push_back(ScriptedReply::Ready(reply));
    }

    /// Queue a reply that resolves when the returned sender fires
    pub fn push_pending(&self) -> oneshot::Sender<ReplyResult> {
        let (tx, rx) = oneshot::channel();
        self.script
            .borrow_mut()
            .replies
            .push_back(ScriptedReply::Pending(rx));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.borrow().calls.clone()
    }
}

#[async_trait(?Send)]
impl GenerateTransport for ScriptedTransport {
    type File = StubFile;

    async fn post_generate(
        &self,
        endpoint: &str,
        request: &UploadRequest<StubFile>,
    ) -> Result<HttpReply, TransportError> {
        let next = {
            let mut script = self.script.borrow_mut();
            script.calls.push(RecordedCall {
                endpoint: endpoint.to_string(),
                file_name: request.file.name(),
                difficulty: request.difficulty.to_string(),
            });
            script.replies.pop_front()
        };

        match next {
            Some(ScriptedReply::Ready(reply)) => reply,
            Some(ScriptedReply::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::new("reply dropped"))),
            None => Err(TransportError::new("no scripted reply")),
        }
    }
}

struct Timer {
    id: u64,
    due: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

/// Scheduler driven by [`ManualScheduler::advance`]
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    /// Move time forward, running every task that comes due in order
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                earliest.map(|i| {
                    let timer = clock.timers.remove(i);
                    clock.now = timer.due;
                    timer.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> u64 {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + u64::from(delay_ms);
        clock.timers.push(Timer { id, due, task });
        id
    }

    fn cancel(&self, handle: u64) {
        self.clock.borrow_mut().timers.retain(|t| t.id != handle);
    }
}
