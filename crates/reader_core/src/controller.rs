//! Pacing and gesture state machine behind the reader view.
//!
//! Every assist trigger spawns its completion call and returns at once with
//! the task handle; results land in the matching [`AssistSlot`].

use std::{sync::Arc, time::Duration};

use completion::{AssistAction, CompletionError, TextCompletionService};
use shared::domain::{Document, Paragraph};
use thiserror::Error;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    clock::Clock,
    pacing::PacingConfig,
    session::ReadingSession,
    signals::{Signal, SignalSource},
    slots::{AssistResult, AssistSlot, SlotState},
};

pub const SUMMARY_FAILED: &str = "Error summarizing paragraph.";
pub const EXPLANATION_FAILED: &str = "Error simplifying text.";
pub const ATTENTION_QUIZ_FAILED: &str = "Error generating attention-check questions.";
pub const FULL_QUIZ_FAILED: &str = "Error generating full-article questions.";

#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    pub pacing: PacingConfig,
    /// Upper bound for a single assist call. `None` waits indefinitely.
    pub assist_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
enum AssistError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("assist request timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Clone)]
enum AssistRequest {
    Summarize { paragraph: String },
    Explain { text: String, excerpt: Option<String> },
    AttentionQuiz { text: String },
    FullQuiz { text: String },
}

impl AssistRequest {
    fn action(&self) -> AssistAction {
        match self {
            Self::Summarize { .. } => AssistAction::Summarize,
            Self::Explain { .. } => AssistAction::Explain,
            Self::AttentionQuiz { .. } | Self::FullQuiz { .. } => AssistAction::Questions,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Summarize { .. } => SUMMARY_FAILED,
            Self::Explain { .. } => EXPLANATION_FAILED,
            Self::AttentionQuiz { .. } => ATTENTION_QUIZ_FAILED,
            Self::FullQuiz { .. } => FULL_QUIZ_FAILED,
        }
    }

    async fn call(&self, service: &dyn TextCompletionService) -> Result<String, CompletionError> {
        match self {
            Self::Summarize { paragraph } => service.summarize(paragraph, "").await,
            Self::Explain { text, .. } => service.explain(text).await,
            Self::AttentionQuiz { text } | Self::FullQuiz { text } => {
                service.generate_questions(text).await
            }
        }
    }

    fn into_result(self, text: String) -> AssistResult {
        match self {
            Self::Explain { excerpt, .. } => AssistResult::ok(text, excerpt),
            _ => AssistResult::ok(text, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderStatus {
    pub index: usize,
    pub total: usize,
    pub baseline_wpm: Option<u32>,
    pub help_needed: bool,
    pub loading: bool,
    pub attention_check_visible: bool,
}

pub struct ReaderController {
    document: Document,
    session: ReadingSession,
    config: ControllerConfig,
    clock: Arc<dyn Clock>,
    service: Arc<dyn TextCompletionService>,
    summary: AssistSlot,
    explanation: AssistSlot,
    quiz: AssistSlot,
    attention_check: Arc<watch::Sender<bool>>,
    selection: Option<String>,
    distraction_seen: bool,
}

impl ReaderController {
    pub fn new(
        document: Document,
        service: Arc<dyn TextCompletionService>,
        clock: Arc<dyn Clock>,
        config: ControllerConfig,
    ) -> Self {
        let session = ReadingSession::start(document.len(), clock.now());
        let (attention_check, _) = watch::channel(false);
        Self {
            document,
            session,
            config,
            clock,
            service,
            summary: AssistSlot::new(),
            explanation: AssistSlot::new(),
            quiz: AssistSlot::new(),
            attention_check: Arc::new(attention_check),
            selection: None,
            distraction_seen: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> &ReadingSession {
        &self.session
    }

    pub fn current_index(&self) -> usize {
        self.session.index()
    }

    pub fn current_paragraph(&self) -> Option<&Paragraph> {
        self.document.get(self.session.index())
    }

    fn current_text(&self) -> &str {
        self.current_paragraph().map(Paragraph::text).unwrap_or("")
    }

    pub fn baseline_wpm(&self) -> Option<u32> {
        self.session.baseline_wpm()
    }

    /// Records the baseline on the first call, then moves to the next
    /// paragraph unless already at the last one.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        if self.session.baseline_wpm().is_none() {
            if let Some(paragraph) = self.current_paragraph().filter(|p| !p.is_empty()) {
                let words = paragraph.word_count();
                let elapsed = self.session.elapsed_since_start(now);
                let wpm = self.config.pacing.baseline_wpm(words, elapsed);
                self.session.record_baseline(wpm);
                debug!(wpm, words, ?elapsed, "recorded baseline reading speed");
            }
        }

        if self.session.step_forward(now) {
            self.reset_paragraph_state();
        }
    }

    pub fn retreat(&mut self) {
        let now = self.clock.now();
        if self.session.step_back(now) {
            self.reset_paragraph_state();
        }
    }

    fn reset_paragraph_state(&mut self) {
        self.summary.clear();
        self.explanation.clear();
        self.selection = None;
    }

    pub fn expected_reading_time(&self) -> Duration {
        let words = self.current_paragraph().map_or(0, Paragraph::word_count);
        self.config
            .pacing
            .expected_reading_time(words, self.session.baseline_wpm())
    }

    /// Whether the reader looks stuck on the current paragraph. Always true
    /// until a baseline exists; never true for an empty document.
    pub fn is_help_needed(&self) -> bool {
        let Some(paragraph) = self.current_paragraph() else {
            return false;
        };
        let baseline = self.session.baseline_wpm();
        if baseline.is_none() {
            return true;
        }
        let elapsed = self.session.elapsed_on_paragraph(self.clock.now());
        self.config
            .pacing
            .is_slow(paragraph.word_count(), baseline, elapsed)
    }

    pub fn set_selection(&mut self, selection: Option<&str>) {
        self.selection = selection
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Pinch gesture: summarize the current paragraph and consume the
    /// one-shot flags. Does nothing on an empty paragraph.
    pub fn on_pinch(&mut self, signals: &mut dyn SignalSource) -> Option<JoinHandle<()>> {
        let handle = self.summarize_current()?;
        signals.reset_one_shot();
        Some(handle)
    }

    /// Head-tilt gesture: explain the selection, or the whole paragraph when
    /// nothing is selected, and consume the one-shot flags.
    pub fn on_head_tilt(&mut self, signals: &mut dyn SignalSource) -> Option<JoinHandle<()>> {
        if self.current_text().is_empty() {
            return None;
        }
        let handle = self.explain_selection_or_paragraph();
        signals.reset_one_shot();
        handle
    }

    /// Distraction: quiz the reader on the current paragraph. The sticky
    /// distraction flag is left for the caller to clear once the quiz is shown.
    pub fn on_distracted(&mut self) -> Option<JoinHandle<()>> {
        let text = self.current_text();
        if text.is_empty() {
            return None;
        }
        let request = AssistRequest::AttentionQuiz {
            text: text.to_string(),
        };
        self.attention_check.send_replace(true);
        Some(self.dispatch(&self.quiz, request))
    }

    pub fn on_request_full_quiz(&mut self) -> Option<JoinHandle<()>> {
        if self.document.is_empty() {
            return None;
        }
        let request = AssistRequest::FullQuiz {
            text: self.document.full_text(),
        };
        Some(self.dispatch(&self.quiz, request))
    }

    pub fn summarize_current(&mut self) -> Option<JoinHandle<()>> {
        let paragraph = self.current_text();
        if paragraph.is_empty() {
            return None;
        }
        let request = AssistRequest::Summarize {
            paragraph: paragraph.to_string(),
        };
        Some(self.dispatch(&self.summary, request))
    }

    pub fn explain_selection_or_paragraph(&mut self) -> Option<JoinHandle<()>> {
        let excerpt = self.selection.clone();
        let text = match &excerpt {
            Some(selection) => selection.clone(),
            None => self.current_text().to_string(),
        };
        if text.is_empty() {
            return None;
        }
        let request = AssistRequest::Explain { text, excerpt };
        Some(self.dispatch(&self.explanation, request))
    }

    /// Reads `signals` and runs the matching gesture handlers. Distraction
    /// fires on its rising edge only.
    pub fn poll_signals(&mut self, signals: &mut dyn SignalSource) -> Vec<JoinHandle<()>> {
        let snapshot = signals.poll();
        let mut handles = Vec::new();

        if snapshot.is_raised(Signal::Pinch) {
            handles.extend(self.on_pinch(signals));
        }
        if snapshot.is_raised(Signal::HeadTilt) {
            handles.extend(self.on_head_tilt(signals));
        }

        let distracted = snapshot.is_raised(Signal::Distracted);
        if distracted && !self.distraction_seen {
            handles.extend(self.on_distracted());
        }
        self.distraction_seen = distracted;

        handles
    }

    pub fn dismiss_attention_check(&mut self) {
        self.attention_check.send_replace(false);
    }

    pub fn attention_check_visible(&self) -> bool {
        *self.attention_check.borrow()
    }

    pub fn summary(&self) -> SlotState {
        self.summary.state()
    }

    pub fn explanation(&self) -> SlotState {
        self.explanation.state()
    }

    pub fn quiz(&self) -> SlotState {
        self.quiz.state()
    }

    pub fn subscribe_summary(&self) -> watch::Receiver<SlotState> {
        self.summary.subscribe()
    }

    pub fn subscribe_explanation(&self) -> watch::Receiver<SlotState> {
        self.explanation.subscribe()
    }

    pub fn subscribe_quiz(&self) -> watch::Receiver<SlotState> {
        self.quiz.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.summary.is_awaiting() || self.explanation.is_awaiting() || self.quiz.is_awaiting()
    }

    pub fn status(&self) -> ReaderStatus {
        ReaderStatus {
            index: self.session.index(),
            total: self.document.len(),
            baseline_wpm: self.session.baseline_wpm(),
            help_needed: self.is_help_needed(),
            loading: self.is_loading(),
            attention_check_visible: self.attention_check_visible(),
        }
    }

    fn dispatch(&self, slot: &AssistSlot, request: AssistRequest) -> JoinHandle<()> {
        let slot = slot.clone();
        let ticket = slot.begin();
        let service = Arc::clone(&self.service);
        let attention_check = Arc::clone(&self.attention_check);
        let timeout = self.config.assist_timeout;
        let action = request.action();
        debug!(action = action.label(), "dispatching assist request");

        tokio::spawn(async move {
            let outcome = match timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, request.call(service.as_ref())).await {
                        Ok(result) => result.map_err(AssistError::from),
                        Err(_) => Err(AssistError::TimedOut(limit)),
                    }
                }
                None => request
                    .call(service.as_ref())
                    .await
                    .map_err(AssistError::from),
            };

            let opens_attention_check =
                outcome.is_ok() && matches!(request, AssistRequest::FullQuiz { .. });
            let result = match outcome {
                Ok(text) => request.into_result(text),
                Err(error) => {
                    warn!(action = action.label(), %error, "assist request failed");
                    AssistResult::placeholder(request.placeholder())
                }
            };

            if !slot.finish(ticket, result) {
                debug!(action = action.label(), "discarding stale assist result");
                return;
            }
            if opens_attention_check {
                attention_check.send_replace(true);
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
