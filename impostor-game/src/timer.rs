//! Debate countdown shown after every player has seen their card
use crate::config::clamp_debate_minutes;

/// Remaining time under which the countdown is flagged as urgent.
pub const URGENT_THRESHOLD_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    Running(u32),
    /// Emitted once, on the first tick after reaching zero.
    Expired,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateTimer {
    total: u32,
    remaining: u32,
    expired: bool,
}

impl DebateTimer {
    /// Countdown of `minutes` (clamped to the configurable range).
    #[must_use]
    pub fn new(minutes: u8) -> Self {
        let total = u32::from(clamp_debate_minutes(minutes)) * 60;
        Self {
            total,
            remaining: total,
            expired: false,
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> TimerTick {
        if self.remaining > 0 {
            self.remaining -= 1;
            TimerTick::Running(self.remaining)
        } else if self.expired {
            TimerTick::Idle
        } else {
            self.expired = true;
            TimerTick::Expired
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.expired
    }

    #[must_use]
    pub fn fraction_remaining(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.remaining) / f64::from(self.total)
        }
    }

    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.remaining < URGENT_THRESHOLD_SECS
    }

    /// `MM:SS`
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
