//! Cooldown Gate
//!
//! The "ready at time T" primitive shared by attacks, skills and deployment.
//! Checking a gate never changes it: callers stamp the gate only once the
//! gated action has actually happened, so a failed skill roll leaves the
//! cooldown untouched.

use super::Timestamp;

/// Returns true when at least `duration` seconds separate `now` from `last_time`.
///
/// A gate that has never fired (`last_time == None`) is always ready.
pub fn ready(now: Timestamp, last_time: Option<Timestamp>, duration: f32) -> bool {
    match last_time {
        Some(last) => now - last >= duration,
        None => true,
    }
}

/// A cooldown duration plus the time it was last triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownGate {
    /// Required interval between two triggers, in seconds
    pub duration: f32,
    last_time: Option<Timestamp>,
}

impl CooldownGate {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            last_time: None,
        }
    }

    pub fn is_ready(&self, now: Timestamp) -> bool {
        ready(now, self.last_time, self.duration)
    }

    /// Record that the gated action happened at `now`.
    pub fn trigger(&mut self, now: Timestamp) {
        self.last_time = Some(now);
    }

    pub fn last_time(&self) -> Option<Timestamp> {
        self.last_time
    }

    /// Seconds left until the gate opens (0.0 when ready).
    pub fn remaining(&self, now: Timestamp) -> f32 {
        match self.last_time {
            Some(last) => (self.duration - (now - last)).max(0.0),
            None => 0.0,
        }
    }
}
