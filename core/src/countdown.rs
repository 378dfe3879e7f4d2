use serde::{Deserialize, Serialize};

/// Number of discrete ticks left before a transient effect ends, advanced by the caller once per frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u16,
}

impl Countdown {
    pub const fn new(ticks: u16) -> Self {
        Self { remaining: ticks }
    }

    pub const fn remaining(self) -> u16 {
        self.remaining
    }

    pub const fn is_expired(self) -> bool {
        self.remaining == 0
    }

    /// Advances one tick, returns whether the countdown has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_expired()
    }
}
