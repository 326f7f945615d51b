use super::*;
use tokio::sync::oneshot;

#[test]
fn one_shot_reset_keeps_distraction() {
    let mut state = SignalState::default();
    for signal in Signal::ALL {
        state.raise(signal);
    }

    state.reset_one_shot();
    assert!(!state.pinch());
    assert!(!state.head_tilt());
    assert!(state.distracted());

    state.clear(Signal::Distracted);
    assert_eq!(state, SignalState::default());
}

#[test]
fn keyboard_binds_p_h_d_case_insensitively() {
    let mut keyboard = KeyboardSignals::new();
    assert_eq!(keyboard.press('P'), Some(Signal::Pinch));
    assert_eq!(keyboard.press('h'), Some(Signal::HeadTilt));
    assert_eq!(keyboard.press('x'), None);

    let state = keyboard.poll();
    assert!(state.pinch());
    assert!(state.head_tilt());
    assert!(!state.distracted());

    keyboard.reset_one_shot();
    assert_eq!(keyboard.poll(), SignalState::default());
}

#[test]
fn latch_tags_match_signal_kind() {
    assert_eq!(Signal::Pinch.latch(), Latch::OneShot);
    assert_eq!(Signal::HeadTilt.latch(), Latch::OneShot);
    assert_eq!(Signal::Distracted.latch(), Latch::Sticky);
}

#[tokio::test]
async fn detector_signals_are_collected_on_poll() {
    let (sent_tx, sent_rx) = oneshot::channel();
    let mut source = DetectorSignals::spawn(4, move |tx| async move {
        let _ = tx.send(Signal::Distracted).await;
        let _ = sent_tx.send(());
        std::future::pending::<()>().await;
    });

    sent_rx.await.expect("detector sent");
    assert!(source.poll().distracted());
    assert!(source.is_running());

    source.reset_one_shot();
    assert!(source.poll().distracted());
}

#[tokio::test]
async fn dropping_detector_source_stops_its_task() {
    let (alive_tx, alive_rx) = oneshot::channel::<()>();
    let (started_tx, started_rx) = oneshot::channel();
    let source = DetectorSignals::spawn(1, move |_tx| async move {
        let _alive = alive_tx;
        let _ = started_tx.send(());
        std::future::pending::<()>().await;
    });

    started_rx.await.expect("detector started");
    drop(source);
    assert!(alive_rx.await.is_err(), "detector task should be released");
}
