/// Remembers whether the quiz in flight was raised by a distraction, so the
/// sticky flag is cleared only once that quiz is answered.
#[derive(Debug, Default)]
pub struct DistractionTracker {
    seen: bool,
    pending: bool,
}

impl DistractionTracker {
    /// Feed the distraction flag as read just before polling the controller,
    /// which quizzes on the same rising edge.
    pub fn observe(&mut self, distracted: bool) {
        if distracted && !self.seen {
            self.pending = true;
        }
        self.seen = distracted;
    }

    /// A quiz result landed. Returns whether the distraction flag should be cleared.
    pub fn quiz_answered(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
#[path = "tests/attention_tests.rs"]
mod tests;
