//! # Cancellable polling
//!
//! Background refresh loops (chat messages, connectivity checks) are spawned
//! tasks that sleep between ticks. A plain `spawn` loop cannot be stopped when
//! the thing it polls goes away, so every loop here is tied to a
//! [`PollHandle`]: the loop captures the handle's generation at start and
//! exits as soon as the generation moves on. Cancelling is just bumping the
//! counter; the stale loop notices on its next tick.

use dioxus::prelude::*;

/// Cross-platform async sleep for UI timers.
pub async fn sleep_secs(secs: u32) {
    sleep_ms(secs as u64 * 1000).await;
}

/// Millisecond variant, used for input debouncing.
pub async fn sleep_ms(millis: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(millis)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
}

/// Cancellation handle for a polling loop, backed by a generation counter.
#[derive(Clone, Copy, PartialEq)]
pub struct PollHandle {
    generation: Signal<u64>,
}

impl PollHandle {
    pub fn new(generation: Signal<u64>) -> Self {
        Self { generation }
    }

    /// Start a new polling run, invalidating any previous one. Returns the
    /// token the loop must check with [`PollHandle::is_live`] on every tick.
    pub fn start(&mut self) -> u64 {
        let next = (self.generation)() + 1;
        self.generation.set(next);
        next
    }

    /// Stop whatever loop is currently running.
    pub fn cancel(&mut self) {
        let next = (self.generation)() + 1;
        self.generation.set(next);
    }

    /// Whether the loop holding `token` is still the current one.
    pub fn is_live(&self, token: u64) -> bool {
        (self.generation)() == token
    }
}

/// Create a [`PollHandle`] owned by the current component.
pub fn use_poll_handle() -> PollHandle {
    PollHandle::new(use_signal(|| 0))
}
