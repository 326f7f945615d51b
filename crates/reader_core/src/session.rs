use std::time::{Duration, Instant};

/// Position and timing of one pass through a document.
#[derive(Debug, Clone)]
pub struct ReadingSession {
    index: usize,
    len: usize,
    baseline_wpm: Option<u32>,
    started_at: Instant,
    paragraph_started_at: Instant,
}

impl ReadingSession {
    pub fn start(len: usize, now: Instant) -> Self {
        Self {
            index: 0,
            len,
            baseline_wpm: None,
            started_at: now,
            paragraph_started_at: now,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.len
    }

    pub fn baseline_wpm(&self) -> Option<u32> {
        self.baseline_wpm
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn paragraph_started_at(&self) -> Instant {
        self.paragraph_started_at
    }

    pub fn elapsed_since_start(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn elapsed_on_paragraph(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.paragraph_started_at)
    }

    /// Stores the baseline unless one is already set. Returns whether it was stored.
    pub fn record_baseline(&mut self, wpm: u32) -> bool {
        if self.baseline_wpm.is_some() {
            return false;
        }
        self.baseline_wpm = Some(wpm);
        true
    }

    /// Moves to the next paragraph. At the last one nothing changes.
    pub fn step_forward(&mut self, now: Instant) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.index += 1;
        self.paragraph_started_at = now;
        true
    }

    /// Moves to the previous paragraph. At the first one nothing changes.
    pub fn step_back(&mut self, now: Instant) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.index -= 1;
        self.paragraph_started_at = now;
        true
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
