//! Idle-triggered playback.
//!
//! The scheduler flips to [`PlaybackMode::Manual`] on any input and back to
//! [`PlaybackMode::Autoplay`] once the wall clock shows no input for the idle
//! threshold. Checks run on a fixed cadence owned by an [`IdleTimer`], never on
//! render tick counts.

use std::time::{Duration, Instant};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackMode {
    Autoplay,
    Manual,
}

impl PlaybackMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Autoplay => "auto",
            Self::Manual => "manual",
        }
    }
}

/// Scheduled idle check. Armed on interaction, disarmed on resume and teardown.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    interval: Duration,
    next_check: Option<Instant>,
}

impl IdleTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_check: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_check = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_check = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_check.is_some()
    }

    pub fn next_check(&self) -> Option<Instant> {
        self.next_check
    }

    /// True when a check is due at `now`; reschedules to the next cadence point after `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        let Some(at) = self.next_check else {
            return false;
        };
        if now < at {
            return false;
        }
        if self.interval.is_zero() {
            return true;
        }
        let behind = now.duration_since(at).as_nanos() / self.interval.as_nanos();
        let skip = u32::try_from(behind + 1).unwrap_or(u32::MAX);
        self.next_check = at.checked_add(self.interval.saturating_mul(skip));
        true
    }
}

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    mode: PlaybackMode,
    last_interaction: Option<Instant>,
    idle_threshold: Duration,
    timer: IdleTimer,
}

impl AutoplayScheduler {
    pub fn new(idle_threshold: Duration, poll_interval: Duration) -> Self {
        Self {
            mode: PlaybackMode::Autoplay,
            last_interaction: None,
            idle_threshold,
            timer: IdleTimer::new(poll_interval),
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_autoplay(&self) -> bool {
        self.mode == PlaybackMode::Autoplay
    }

    pub fn last_interaction(&self) -> Option<Instant> {
        self.last_interaction
    }

    pub fn timer(&self) -> &IdleTimer {
        &self.timer
    }

    pub fn record_interaction(&mut self, now: Instant) {
        if self.mode == PlaybackMode::Autoplay {
            info!("playback_mode auto->manual");
        }
        self.mode = PlaybackMode::Manual;
        self.last_interaction = Some(now);
        self.timer.arm(now);
    }

    /// Threshold check. Returns true when it resumed autoplay.
    pub fn check_idle(&mut self, now: Instant) -> bool {
        if self.mode != PlaybackMode::Manual {
            return false;
        }
        let idle = match self.last_interaction {
            Some(t) => now.saturating_duration_since(t),
            None => Duration::MAX,
        };
        if idle < self.idle_threshold {
            return false;
        }
        self.mode = PlaybackMode::Autoplay;
        self.timer.disarm();
        info!("playback_mode manual->auto idle_ms={}", idle.as_millis());
        true
    }

    /// Run the idle check if the timer is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.due(now) {
            self.check_idle(now)
        } else {
            false
        }
    }

    pub fn stop(&mut self) {
        self.timer.disarm();
    }
}
