//! Gesture signals and the sources that produce them.
//!
//! Pinch and head tilt are one-shot: the consumer clears both together right
//! after acting on either. Distraction is sticky and stays raised until the
//! consumer clears it explicitly.

use std::future::Future;

use tokio::{sync::mpsc, task::JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Pinch,
    HeadTilt,
    Distracted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    OneShot,
    Sticky,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Pinch, Signal::HeadTilt, Signal::Distracted];

    pub fn latch(self) -> Latch {
        match self {
            Self::Pinch | Self::HeadTilt => Latch::OneShot,
            Self::Distracted => Latch::Sticky,
        }
    }

    /// Demo key bindings: P, H and D.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'p' => Some(Self::Pinch),
            'h' => Some(Self::HeadTilt),
            'd' => Some(Self::Distracted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalState {
    pinch: bool,
    head_tilt: bool,
    distracted: bool,
}

impl SignalState {
    pub fn raise(&mut self, signal: Signal) {
        *self.flag_mut(signal) = true;
    }

    pub fn clear(&mut self, signal: Signal) {
        *self.flag_mut(signal) = false;
    }

    pub fn is_raised(&self, signal: Signal) -> bool {
        match signal {
            Signal::Pinch => self.pinch,
            Signal::HeadTilt => self.head_tilt,
            Signal::Distracted => self.distracted,
        }
    }

    pub fn reset_one_shot(&mut self) {
        for signal in Signal::ALL {
            if signal.latch() == Latch::OneShot {
                self.clear(signal);
            }
        }
    }

    pub fn pinch(&self) -> bool {
        self.pinch
    }

    pub fn head_tilt(&self) -> bool {
        self.head_tilt
    }

    pub fn distracted(&self) -> bool {
        self.distracted
    }

    fn flag_mut(&mut self, signal: Signal) -> &mut bool {
        match signal {
            Signal::Pinch => &mut self.pinch,
            Signal::HeadTilt => &mut self.head_tilt,
            Signal::Distracted => &mut self.distracted,
        }
    }
}

pub trait SignalSource: Send {
    /// Current flags, after taking in anything the source has produced.
    fn poll(&mut self) -> SignalState;
    fn reset_one_shot(&mut self);
    fn clear(&mut self, signal: Signal);
}

/// Keyboard stand-in for a gesture detector.
#[derive(Debug, Default)]
pub struct KeyboardSignals {
    state: SignalState,
}

impl KeyboardSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, signal: Signal) {
        self.state.raise(signal);
    }

    pub fn press(&mut self, key: char) -> Option<Signal> {
        let signal = Signal::from_key(key)?;
        self.raise(signal);
        Some(signal)
    }
}

impl SignalSource for KeyboardSignals {
    fn poll(&mut self) -> SignalState {
        self.state
    }

    fn reset_one_shot(&mut self) {
        self.state.reset_one_shot();
    }

    fn clear(&mut self, signal: Signal) {
        self.state.clear(signal);
    }
}

/// Signals pushed by a detector task (for example a vision model) over a
/// channel. The task is aborted when this source is dropped.
pub struct DetectorSignals {
    rx: mpsc::Receiver<Signal>,
    state: SignalState,
    feed: JoinHandle<()>,
}

impl DetectorSignals {
    /// Spawns `detector` on the current tokio runtime.
    pub fn spawn<F, Fut>(capacity: usize, detector: F) -> Self
    where
        F: FnOnce(mpsc::Sender<Signal>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let feed = tokio::spawn(detector(tx));
        Self {
            rx,
            state: SignalState::default(),
            feed,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.feed.is_finished()
    }
}

impl SignalSource for DetectorSignals {
    fn poll(&mut self) -> SignalState {
        while let Ok(signal) = self.rx.try_recv() {
            self.state.raise(signal);
        }
        self.state
    }

    fn reset_one_shot(&mut self) {
        self.state.reset_one_shot();
    }

    fn clear(&mut self, signal: Signal) {
        self.state.clear(signal);
    }
}

impl Drop for DetectorSignals {
    fn drop(&mut self) {
        self.feed.abort();
    }
}

#[cfg(test)]
#[path = "tests/signals_tests.rs"]
mod tests;
