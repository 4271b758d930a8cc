//! Focus session countdown timer.
//!
//! The timer is a small state machine ticked by the TUI event loop rather
//! than an ambient interval: `tick` consumes wall-clock time only while the
//! timer is running, and `reset` is the explicit stop signal.

use std::time::Instant;

/// Default focus session length: 25 minutes.
pub const SESSION_SECS: u64 = 25 * 60;

/// Timer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Finished,
}

/// Countdown timer for a single focus session.
pub struct FocusTimer {
    session_secs: u64,
    remaining: u64,
    state: TimerState,
    last_tick: Option<Instant>,
}

impl FocusTimer {
    pub fn new(session_secs: u64) -> Self {
        FocusTimer {
            session_secs,
            remaining: session_secs,
            state: TimerState::Idle,
            last_tick: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Start counting down. Starting after a finished session begins a
    /// fresh one; starting while running is a no-op.
    pub fn start(&mut self) {
        match self.state {
            TimerState::Running => {}
            TimerState::Idle | TimerState::Finished => {
                if self.state == TimerState::Finished || self.remaining == 0 {
                    self.remaining = self.session_secs;
                }
                self.state = TimerState::Running;
                self.last_tick = Some(Instant::now());
            }
        }
    }

    /// Stop the countdown and restore the full session. This is the only
    /// cancellation: there is no pause.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = self.session_secs;
        self.last_tick = None;
    }

    /// Consume wall-clock time since the last tick. Returns true on the tick
    /// where the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(Instant::now());
            return false;
        };
        let elapsed = last.elapsed().as_secs();
        if elapsed == 0 {
            return false;
        }
        // Advance last_tick by the whole seconds consumed so sub-second
        // remainders carry over to the next tick.
        self.last_tick = Some(last + std::time::Duration::from_secs(elapsed));
        self.advance(elapsed)
    }

    /// Count down by a number of seconds. Returns true when the session
    /// finishes on this call.
    fn advance(&mut self, secs: u64) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(secs);
        if self.remaining == 0 {
            self.state = TimerState::Finished;
            self.last_tick = None;
            return true;
        }
        false
    }
}

/// Format seconds as MM:SS.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(3 * 60 + 7), "03:07");
    }

    #[test]
    fn test_countdown_and_finish() {
        let mut timer = FocusTimer::new(3);
        timer.start();
        assert!(timer.is_running());
        assert!(!timer.advance(1));
        assert_eq!(timer.remaining_secs(), 2);
        assert!(timer.advance(2));
        assert_eq!(timer.state(), TimerState::Finished);
        assert_eq!(timer.remaining_secs(), 0);
        // Finished timers do not keep counting.
        assert!(!timer.advance(1));
    }

    #[test]
    fn test_reset_is_explicit_stop() {
        let mut timer = FocusTimer::new(10);
        timer.start();
        timer.advance(4);
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 10);
        // Idle timers ignore elapsed time.
        assert!(!timer.advance(5));
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_start_after_finish_begins_new_session() {
        let mut timer = FocusTimer::new(2);
        timer.start();
        timer.advance(2);
        assert_eq!(timer.state(), TimerState::Finished);
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.remaining_secs(), 2);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = FocusTimer::new(10);
        timer.start();
        timer.advance(3);
        timer.start();
        assert_eq!(timer.remaining_secs(), 7);
    }
}
