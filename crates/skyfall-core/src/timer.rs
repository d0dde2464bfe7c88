//! Uniform cooldown scheduler.
//!
//! Every cadence in the encounter (attack timers, windups, shield break,
//! escort bursts, spawn intervals) is a `Timer`: armed at a timestamp with a
//! duration, due once the elapsed time reaches it. A disarmed cadence is
//! modeled as `Option<Timer>::None` by its owner.

use serde::{Deserialize, Serialize};

/// A one-shot deadline measured in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    /// Timestamp at which the timer was armed.
    pub started_at: f64,
    /// Duration until due.
    pub duration: f64,
}

impl Timer {
    /// Arm a timer at `now` for `duration` milliseconds.
    pub fn armed(now: f64, duration: f64) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    /// A timer that is already due.
    pub fn ready() -> Self {
        Self {
            started_at: 0.0,
            duration: 0.0,
        }
    }

    /// True once `elapsed >= duration`.
    pub fn is_due(&self, now: f64) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Milliseconds since the timer was armed.
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.started_at
    }

    /// Fraction of the duration that has elapsed, clamped to [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed(now) / self.duration).clamp(0.0, 1.0)
    }

    /// Absolute timestamp at which the timer becomes due.
    pub fn deadline(&self) -> f64 {
        self.started_at + self.duration
    }

    /// Re-arm in place.
    pub fn rearm(&mut self, now: f64, duration: f64) {
        self.started_at = now;
        self.duration = duration;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::ready()
    }
}
