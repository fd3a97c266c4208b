pub const DEFAULT_MINUTES: u32 = 10;

/// Rows without a usable duration get the default. Zero counts as unset,
/// like the original template did.
pub fn minutes_or_default(minutes: Option<u32>) -> u32 {
    minutes.filter(|minutes| *minutes != 0).unwrap_or(DEFAULT_MINUTES)
}

/// Remaining lifetime of one download link. Ticked once per second by its
/// row component; the component stops the ticker once `expired` reports
/// true, so the counter never has to go below zero.
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(minutes: u32) -> Self {
        Self {
            remaining: minutes.saturating_mul(60),
        }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }

    /// `minutes:seconds`, seconds zero-padded to two digits.
    pub fn label(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
