use rand::Rng;

use crate::controls::{delay_to_ms, Level};

/// One-shot countdown to the next random image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceTimer {
    remaining: f32, // seconds
}

impl AdvanceTimer {
    pub fn start(delay: Level) -> Self {
        Self {
            remaining: delay_to_ms(delay) / 1000.0,
        }
    }

    /// Counts down by `dt` seconds. Returns true exactly once, when the timer runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt.max(0.0);
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Uniformly picks an index other than `current`.
///
/// With fewer than two images there is nothing to advance to, so this
/// returns `None` instead of rerolling forever.
pub fn pick_next_index<R: Rng + ?Sized>(rng: &mut R, len: usize, current: usize) -> Option<usize> {
    if len < 2 {
        return None;
    }
    if current >= len {
        return Some(rng.random_range(0..len));
    }
    // Draw among the len-1 other slots and skip over the current one
    let pick = rng.random_range(0..len - 1);
    Some(if pick >= current { pick + 1 } else { pick })
}
