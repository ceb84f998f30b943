//! Interstitial countdown
//!
//! The interstitial page runs this machine in the browser; the script in
//! `api::services::pages` follows the same transitions and constants. It is a
//! UX guard only: the target URL is always present in the page.

/// Seconds added when a skip is refused.
pub const PENALTY_SECONDS: u64 = 10;

/// Skips are refused while more than this share of the wait is left.
pub const SKIP_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    /// Page hidden; no time is consumed.
    Paused,
    /// Navigation to the target has been triggered.
    Elapsed,
}

/// Result of a skip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipOutcome {
    Honored,
    /// Refused; `remaining` grew by [`PENALTY_SECONDS`].
    Penalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    original: u64,
    remaining: u64,
    state: CountdownState,
}

impl Countdown {
    /// Start a countdown. Zero seconds elapses immediately.
    pub fn new(seconds: u64) -> Self {
        Self {
            original: seconds,
            remaining: seconds,
            state: if seconds == 0 {
                CountdownState::Elapsed
            } else {
                CountdownState::Running
            },
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn original(&self) -> u64 {
        self.original
    }

    pub fn hidden(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    pub fn visible(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    /// One second passed. Only consumes time while running.
    pub fn tick(&mut self) -> CountdownState {
        if self.state == CountdownState::Running {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.state = CountdownState::Elapsed;
            }
        }
        self.state
    }

    /// Manual skip. Refused while `remaining / original > 0.8`.
    pub fn skip(&mut self) -> SkipOutcome {
        if self.state == CountdownState::Elapsed {
            return SkipOutcome::Honored;
        }

        let share = if self.original > 0 {
            self.remaining as f64 / self.original as f64
        } else {
            0.0
        };

        if share > SKIP_THRESHOLD {
            self.remaining = self.remaining.saturating_add(PENALTY_SECONDS);
            SkipOutcome::Penalized
        } else {
            self.remaining = 0;
            self.state = CountdownState::Elapsed;
            SkipOutcome::Honored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_down_to_elapsed() {
        let mut countdown = Countdown::new(3);
        assert_eq!(countdown.tick(), CountdownState::Running);
        assert_eq!(countdown.tick(), CountdownState::Running);
        assert_eq!(countdown.tick(), CountdownState::Elapsed);
        assert_eq!(countdown.remaining(), 0);
        // 到 0 之后不再变化
        assert_eq!(countdown.tick(), CountdownState::Elapsed);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_zero_seconds_elapses_immediately() {
        assert_eq!(Countdown::new(0).state(), CountdownState::Elapsed);
    }

    #[test]
    fn test_hidden_pauses_without_consuming_time() {
        let mut countdown = Countdown::new(5);
        countdown.tick();
        countdown.hidden();
        countdown.hidden();
        for _ in 0..10 {
            assert_eq!(countdown.tick(), CountdownState::Paused);
        }
        assert_eq!(countdown.remaining(), 4);

        countdown.visible();
        countdown.visible();
        assert_eq!(countdown.state(), CountdownState::Running);
        countdown.tick();
        assert_eq!(countdown.remaining(), 3);
    }

    #[test]
    fn test_early_skip_is_penalized() {
        let mut countdown = Countdown::new(10);
        countdown.tick();
        // 9/10 > 0.8
        assert_eq!(countdown.skip(), SkipOutcome::Penalized);
        assert_eq!(countdown.remaining(), 19);
        assert_eq!(countdown.state(), CountdownState::Running);
    }

    #[test]
    fn test_skip_at_threshold_is_honored() {
        let mut countdown = Countdown::new(10);
        countdown.tick();
        countdown.tick();
        // 8/10 == 0.8, not above
        assert_eq!(countdown.skip(), SkipOutcome::Honored);
        assert_eq!(countdown.state(), CountdownState::Elapsed);
    }

    #[test]
    fn test_skip_while_paused_uses_same_rule() {
        let mut countdown = Countdown::new(5);
        countdown.hidden();
        assert_eq!(countdown.skip(), SkipOutcome::Penalized);
        assert_eq!(countdown.state(), CountdownState::Paused);
        assert_eq!(countdown.remaining(), 15);
    }

    #[test]
    fn test_penalty_stacks() {
        let mut countdown = Countdown::new(5);
        countdown.skip();
        countdown.skip();
        assert_eq!(countdown.remaining(), 25);
        assert_eq!(countdown.original(), 5);
    }
}
