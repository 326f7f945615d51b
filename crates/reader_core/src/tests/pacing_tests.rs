use super::*;

#[test]
fn baseline_is_clamped_to_reading_range() {
    let pacing = PacingConfig::default();
    assert_eq!(pacing.baseline_wpm(5, Duration::from_secs(60)), 120);
    assert_eq!(pacing.baseline_wpm(1_000, Duration::from_secs(60)), 400);
    assert_eq!(pacing.baseline_wpm(250, Duration::from_secs(60)), 250);
}

#[test]
fn baseline_rounds_to_nearest_word() {
    let pacing = PacingConfig::default();
    // 200 words in 59 s is 203.39 wpm.
    assert_eq!(pacing.baseline_wpm(200, Duration::from_secs(59)), 203);
    // 301 words in 60.1 s is 300.499 wpm.
    assert_eq!(pacing.baseline_wpm(301, Duration::from_millis(60_100)), 300);
}

#[test]
fn zero_elapsed_baseline_uses_upper_bound() {
    let pacing = PacingConfig::default();
    assert_eq!(pacing.baseline_wpm(3, Duration::ZERO), 400);
}

#[test]
fn expected_time_falls_back_to_default_speed() {
    let pacing = PacingConfig::default();
    assert_eq!(
        pacing.expected_reading_time(220, None),
        Duration::from_secs(60)
    );
    assert_eq!(
        pacing.expected_reading_time(120, Some(120)),
        Duration::from_secs(60)
    );
    assert_eq!(pacing.effective_wpm(Some(0)), 220);
}

#[test]
fn slow_threshold_is_strict() {
    let pacing = PacingConfig::default();
    assert!(!pacing.is_slow(120, Some(120), Duration::from_millis(102_000)));
    assert!(pacing.is_slow(120, Some(120), Duration::from_millis(102_001)));
    assert!(!pacing.is_slow(120, Some(120), Duration::from_millis(60_000)));
}

#[test]
fn empty_paragraph_is_slow_as_soon_as_time_passes() {
    let pacing = PacingConfig::default();
    assert!(!pacing.is_slow(0, None, Duration::ZERO));
    assert!(pacing.is_slow(0, None, Duration::from_micros(1)));
}
