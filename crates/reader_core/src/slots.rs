use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistResult {
    pub text: String,
    /// Selection the reader flagged before asking for an explanation.
    pub flagged_excerpt: Option<String>,
    pub failed: bool,
}

impl AssistResult {
    pub fn ok(text: impl Into<String>, flagged_excerpt: Option<String>) -> Self {
        Self {
            text: text.into(),
            flagged_excerpt,
            failed: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flagged_excerpt: None,
            failed: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlotState {
    #[default]
    Empty,
    Awaiting,
    Ready(AssistResult),
}

impl SlotState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::Awaiting)
    }

    pub fn result(&self) -> Option<&AssistResult> {
        match self {
            Self::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.result().map(|result| result.text.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTicket(u64);

struct SlotInner {
    state: watch::Sender<SlotState>,
    generation: AtomicU64,
}

/// One result area (summary, explanation or quiz). Only the most recent
/// request may write its result; earlier ones are fenced out by generation.
#[derive(Clone)]
pub struct AssistSlot {
    inner: Arc<SlotInner>,
}

impl AssistSlot {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SlotState::Empty);
        Self {
            inner: Arc::new(SlotInner {
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn begin(&self) -> SlotTicket {
        let mut ticket = SlotTicket(0);
        self.inner.state.send_modify(|state| {
            ticket = SlotTicket(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1);
            *state = SlotState::Awaiting;
        });
        ticket
    }

    /// Applies `result` if `ticket` is still the latest request. Returns
    /// whether it was applied.
    pub fn finish(&self, ticket: SlotTicket, result: AssistResult) -> bool {
        self.inner.state.send_if_modified(|state| {
            if self.inner.generation.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            *state = SlotState::Ready(result);
            true
        })
    }

    pub fn clear(&self) {
        self.inner.state.send_modify(|state| {
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            *state = SlotState::Empty;
        });
    }

    pub fn state(&self) -> SlotState {
        self.inner.state.borrow().clone()
    }

    pub fn is_awaiting(&self) -> bool {
        self.inner.state.borrow().is_awaiting()
    }

    pub fn subscribe(&self) -> watch::Receiver<SlotState> {
        self.inner.state.subscribe()
    }
}

impl Default for AssistSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/slots_tests.rs"]
mod tests;
