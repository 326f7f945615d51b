use super::*;

#[test]
fn requested_quiz_leaves_distraction_alone() {
    let mut tracker = DistractionTracker::default();
    tracker.observe(false);
    assert!(!tracker.quiz_answered());
}

#[test]
fn distraction_quiz_clears_once() {
    let mut tracker = DistractionTracker::default();
    tracker.observe(true);
    tracker.observe(true);
    assert!(tracker.quiz_answered());
    assert!(!tracker.quiz_answered());
}

#[test]
fn held_flag_does_not_queue_another_clear() {
    let mut tracker = DistractionTracker::default();
    tracker.observe(true);
    assert!(tracker.quiz_answered());

    tracker.observe(true);
    assert!(!tracker.quiz_answered());

    tracker.observe(false);
    tracker.observe(true);
    assert!(tracker.quiz_answered());
}
