#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Line clear scoring, indexed by rows cleared (level 1 values, multiplied by level)
pub const LINE_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

// Level progression
pub const STARTING_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 20;
pub const SCORE_PER_LEVEL: u32 = 500; // One level per 500 points

// Gravity timing (milliseconds between automatic drops)
pub const BASE_DROP_MS: u64 = 800;
pub const DROP_MS_PER_LEVEL: u64 = 40;
pub const MIN_DROP_MS: u64 = 80;

/// Drop interval for a level: 800ms at level 1, 40ms faster per level, 80ms floor.
#[must_use]
pub fn drop_interval_for_level(level: u32) -> Duration {
    let ms = BASE_DROP_MS
        .saturating_sub(u64::from(level.saturating_sub(1)) * DROP_MS_PER_LEVEL)
        .max(MIN_DROP_MS);
    Duration::from_millis(ms)
}
