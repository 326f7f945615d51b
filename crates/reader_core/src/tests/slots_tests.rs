use super::*;

#[test]
fn latest_request_wins_and_stale_results_are_dropped() {
    let slot = AssistSlot::new();
    let first = slot.begin();
    let second = slot.begin();
    assert!(slot.is_awaiting());

    assert!(slot.finish(second, AssistResult::ok("second", None)));
    assert!(!slot.finish(first, AssistResult::ok("first", None)));
    assert_eq!(slot.state().text(), Some("second"));
}

#[test]
fn clear_fences_out_in_flight_request() {
    let slot = AssistSlot::new();
    let ticket = slot.begin();
    slot.clear();

    assert!(!slot.finish(ticket, AssistResult::ok("late", None)));
    assert_eq!(slot.state(), SlotState::Empty);
}

#[tokio::test]
async fn subscribers_see_completion() {
    let slot = AssistSlot::new();
    let mut rx = slot.subscribe();
    let ticket = slot.begin();
    rx.changed().await.expect("awaiting");
    assert!(rx.borrow_and_update().is_awaiting());

    slot.finish(ticket, AssistResult::placeholder("Error summarizing paragraph."));
    rx.changed().await.expect("ready");
    let state = rx.borrow_and_update().clone();
    let result = state.result().expect("result");
    assert!(result.failed);
    assert_eq!(result.text, "Error summarizing paragraph.");
}
