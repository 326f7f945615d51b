pub mod clock;
pub mod controller;
pub mod pacing;
pub mod session;
pub mod signals;
pub mod slots;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{ControllerConfig, ReaderController, ReaderStatus};
pub use pacing::PacingConfig;
pub use session::ReadingSession;
pub use signals::{DetectorSignals, KeyboardSignals, Latch, Signal, SignalSource, SignalState};
pub use slots::{AssistResult, AssistSlot, SlotState};
