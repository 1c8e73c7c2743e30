use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, info};

use crate::util::format_time;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Countdown seconds at or below which the warning flag is raised.
pub const WARNING_THRESHOLD_SECS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClockState {
    Waiting,
    Running,
    Paused,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ClockMode {
    /// Counts `current_time` down to zero, then finishes.
    Countdown,
    /// Counts elapsed time up with no ceiling; only `finish` ends it.
    Stopwatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TickOutcome {
    Ignored,
    Ticked,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub total_time: u32,
    pub current_time: u32,
    pub elapsed: u32,
    pub is_running: bool,
    pub is_finished: bool,
    pub started_at: Option<DateTime<Local>>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            total_time: 0,
            current_time: 0,
            elapsed: 0,
            is_running: false,
            is_finished: false,
            started_at: None,
        }
    }
}

/// The periodic tick task.
///
/// Exists only while the clock is running; pausing, resetting, finishing or
/// dropping the clock drops it.
#[derive(Debug)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    pub fn every(period: Duration) -> Self {
        Self {
            period,
            next_due: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    fn advance(&mut self) {
        self.next_due += self.period;
    }
}

/// Countdown/elapsed timer driven by explicit ticks.
#[derive(Debug)]
pub struct TestClock {
    mode: ClockMode,
    state: ClockState,
    timer: TimerState,
    interval: Option<Interval>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            mode: ClockMode::Countdown,
            state: ClockState::Waiting,
            timer: TimerState::default(),
            interval: None,
        }
    }

    /// Begin a countdown of `duration` seconds. Only valid while waiting.
    pub fn start(&mut self, duration: u32) -> bool {
        if self.state != ClockState::Waiting || duration == 0 {
            debug!(state = %self.state, duration, "ignoring clock start");
            return false;
        }
        self.mode = ClockMode::Countdown;
        self.timer = TimerState {
            total_time: duration,
            current_time: duration,
            ..TimerState::default()
        };
        self.run();
        info!(duration, "countdown started");
        true
    }

    /// Begin counting elapsed time with no ceiling. Only valid while waiting.
    pub fn start_stopwatch(&mut self) -> bool {
        if self.state != ClockState::Waiting {
            debug!(state = %self.state, "ignoring stopwatch start");
            return false;
        }
        self.mode = ClockMode::Stopwatch;
        self.timer = TimerState::default();
        self.run();
        info!("stopwatch started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != ClockState::Running {
            debug!(state = %self.state, "ignoring clock pause");
            return false;
        }
        self.interval = None;
        self.timer.is_running = false;
        self.state = ClockState::Paused;
        info!(elapsed = self.timer.elapsed, "clock paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        let has_time_left = self.mode == ClockMode::Stopwatch || self.timer.current_time > 0;
        if self.state != ClockState::Paused || !has_time_left {
            debug!(state = %self.state, "ignoring clock resume");
            return false;
        }
        self.run();
        info!(elapsed = self.timer.elapsed, "clock resumed");
        true
    }

    /// Stop ticking for good, whatever time is left.
    pub fn finish(&mut self) -> bool {
        if matches!(self.state, ClockState::Waiting | ClockState::Finished) {
            debug!(state = %self.state, "ignoring forced finish");
            return false;
        }
        self.complete();
        true
    }

    /// Back to `waiting` with zero time.
    pub fn reset(&mut self) {
        self.interval = None;
        self.mode = ClockMode::Countdown;
        self.state = ClockState::Waiting;
        self.timer = TimerState::default();
    }

    /// Preset a countdown length without starting it.
    pub fn set_duration(&mut self, duration: u32) -> bool {
        if self.state == ClockState::Running {
            return false;
        }
        self.reset();
        self.timer.total_time = duration;
        self.timer.current_time = duration;
        true
    }

    /// Move the remaining time by `delta` seconds, clamped at zero.
    pub fn add_time(&mut self, delta: i64) -> bool {
        if self.state == ClockState::Finished || self.mode == ClockMode::Stopwatch {
            return false;
        }
        let current = (self.timer.current_time as i64 + delta).clamp(0, u32::MAX as i64) as u32;
        self.timer.current_time = current;
        self.timer.total_time = self.timer.total_time.max(current);
        true
    }

    /// Advance one second. Countdowns finish when they reach zero.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != ClockState::Running {
            return TickOutcome::Ignored;
        }
        if let Some(interval) = self.interval.as_mut() {
            interval.advance();
        }
        self.timer.elapsed += 1;

        if self.mode == ClockMode::Countdown {
            self.timer.current_time = self.timer.current_time.saturating_sub(1);
            if self.timer.current_time == 0 {
                self.complete();
                return TickOutcome::Finished;
            }
        }
        TickOutcome::Ticked
    }

    /// How long a host may wait before the next tick is due; `None` when not ticking.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.interval.as_ref().map(|i| i.until_due(now))
    }

    pub fn interval(&self) -> Option<&Interval> {
        self.interval.as_ref()
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == ClockState::Finished
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.current_time
    }

    pub fn elapsed(&self) -> u32 {
        self.timer.elapsed
    }

    /// Percentage of the countdown used up; 0 without a countdown.
    pub fn progress(&self) -> f64 {
        let t = &self.timer;
        if t.total_time == 0 {
            return 0.0;
        }
        (t.total_time - t.current_time.min(t.total_time)) as f64 / t.total_time as f64 * 100.0
    }

    pub fn is_warning(&self) -> bool {
        self.state == ClockState::Running
            && self.mode == ClockMode::Countdown
            && (1..=WARNING_THRESHOLD_SECS).contains(&self.timer.current_time)
    }

    /// Remaining time for a countdown, elapsed time for a stopwatch.
    pub fn formatted_time(&self) -> String {
        match self.mode {
            ClockMode::Countdown => format_time(self.timer.current_time),
            ClockMode::Stopwatch => format_time(self.timer.elapsed),
        }
    }

    fn run(&mut self) {
        self.interval = Some(Interval::every(TICK_INTERVAL));
        self.timer.is_running = true;
        self.timer.started_at = Some(Local::now());
        self.state = ClockState::Running;
    }

    fn complete(&mut self) {
        self.interval = None;
        self.timer.is_running = false;
        self.timer.is_finished = true;
        self.state = ClockState::Finished;
        info!(elapsed = self.timer.elapsed, "clock finished");
    }
}
