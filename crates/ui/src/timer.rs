use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::window;

/// One-shot delayed tasks
pub trait Scheduler {
    type Handle;

    /// Run `task` once after `delay_ms`
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Drop a task that has not run yet. Cancelling a finished task is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// `setTimeout` / `clearTimeout` on the page window
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// A pending browser timeout.
///
/// Owns the callback, so cancelling or dropping the handle clears the
/// timeout and frees the closure with it.
pub struct TimeoutHandle {
    id: Option<i32>,
    _callback: Option<Closure<dyn FnMut()>>,
}

impl TimeoutHandle {
    const fn unset() -> Self {
        Self {
            id: None,
            _callback: None,
        }
    }

    /// Whether the browser accepted the timeout
    pub const fn is_set(&self) -> bool {
        self.id.is_some()
    }
}

impl std::fmt::Debug for TimeoutHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutHandle").field("id", &self.id).finish()
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        // Clearing an id that already fired is harmless
        if let (Some(win), Some(id)) = (window(), self.id) {
            win.clear_timeout_with_handle(id);
        }
    }
}

fn set_timeout(callback: &JsValue, delay_ms: u32) -> Option<i32> {
    let Some(win) = window() else {
        tracing::warn!("no window, dropping timer");
        return None;
    };

    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    match win.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
    {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(error = ?e, "setTimeout failed");
            None
        }
    }
}

impl BrowserScheduler {
    /// Fire-and-forget variant of [`Scheduler::schedule`] for tasks that are
    /// never cancelled. The closure frees itself once it has run.
    pub fn detach(self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(task);
        let _ = set_timeout(&callback, delay_ms);
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimeoutHandle {
        let callback: Closure<dyn FnMut()> = Closure::once(task);
        match set_timeout(callback.as_ref(), delay_ms) {
            Some(id) => TimeoutHandle {
                id: Some(id),
                _callback: Some(callback),
            },
            None => TimeoutHandle::unset(),
        }
    }

    fn cancel(&self, handle: TimeoutHandle) {
        drop(handle);
    }
}
