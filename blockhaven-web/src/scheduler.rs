use std::collections::HashMap;

use blockhaven_site::{Deferred, Scheduler, TimerHandle};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom::{js_error_message, window};

/// `setTimeout`-backed scheduler. Fired tasks are routed back into the
/// running site through [`crate::runtime::fire_timer`].
#[derive(Default)]
pub struct BrowserScheduler {
    next: u64,
    pending: HashMap<TimerHandle, (i32, Closure<dyn FnMut()>)>,
    /// Closures whose timers already ran; dropped on the next firing, never
    /// from inside their own call.
    spent: Vec<Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when `handle`'s timeout runs, before its task is dispatched.
    pub fn retire(&mut self, handle: TimerHandle) {
        self.spent.clear();
        if let Some((_, closure)) = self.pending.remove(&handle) {
            self.spent.push(closure);
        }
    }
}

impl Scheduler<Deferred> for BrowserScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Deferred) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next += 1;
        let closure: Closure<dyn FnMut()> =
            Closure::once(move || crate::runtime::fire_timer(handle, task));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window().set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => {
                self.pending.insert(handle, (id, closure));
            }
            Err(err) => log::error!("setTimeout failed: {}", js_error_message(&err)),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending
            .remove(&handle)
            .map(|(id, _closure)| window().clear_timeout_with_handle(id))
            .is_some()
    }
}
