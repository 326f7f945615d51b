//! Reading-pace arithmetic: baseline speed and the "stuck" threshold.

use std::time::Duration;

const MICROS_PER_MINUTE: u128 = 60_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Words per minute assumed before a baseline exists.
    pub fallback_wpm: u32,
    pub min_baseline_wpm: u32,
    pub max_baseline_wpm: u32,
    /// Help is suggested once elapsed time exceeds this share of the
    /// expected time, in percent.
    pub slow_factor_percent: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            fallback_wpm: 220,
            min_baseline_wpm: 120,
            max_baseline_wpm: 400,
            slow_factor_percent: 170,
        }
    }
}

impl PacingConfig {
    /// Rounded words-per-minute for `words` read in `elapsed`, clamped to the
    /// baseline range. Zero elapsed time counts as the fastest reader.
    pub fn baseline_wpm(&self, words: usize, elapsed: Duration) -> u32 {
        let upper = self.max_baseline_wpm.max(self.min_baseline_wpm);
        let micros = elapsed.as_micros();
        if micros == 0 {
            return upper;
        }

        let wpm = words as f64 * MICROS_PER_MINUTE as f64 / micros as f64;
        let rounded = wpm.round();
        if rounded >= upper as f64 {
            upper
        } else {
            (rounded as u32).max(self.min_baseline_wpm)
        }
    }

    pub fn effective_wpm(&self, baseline_wpm: Option<u32>) -> u32 {
        baseline_wpm
            .filter(|wpm| *wpm > 0)
            .unwrap_or(self.fallback_wpm)
            .max(1)
    }

    pub fn expected_reading_time(&self, words: usize, baseline_wpm: Option<u32>) -> Duration {
        let wpm = self.effective_wpm(baseline_wpm) as u128;
        let micros = words as u128 * MICROS_PER_MINUTE / wpm;
        Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX))
    }

    /// Strictly slower than `slow_factor_percent` of the expected time.
    /// Compared in integer microseconds so the boundary itself is not slow.
    pub fn is_slow(&self, words: usize, baseline_wpm: Option<u32>, elapsed: Duration) -> bool {
        let wpm = self.effective_wpm(baseline_wpm) as u128;
        let lhs = elapsed.as_micros() * wpm * 100;
        let rhs = words as u128 * MICROS_PER_MINUTE * self.slow_factor_percent as u128;
        lhs > rhs
    }
}

#[cfg(test)]
#[path = "tests/pacing_tests.rs"]
mod tests;
