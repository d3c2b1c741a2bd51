//! Dartboard Scorer - tap-to-score engine for 501 darts
//!
//! Core modules:
//! - `board`: Dartboard geometry and hit resolution (pure, stateless)
//! - `game`: Turn engine (players, throws, busts, wins)
//! - `export`: Tabular export of a finished match
//! - `settings`: User-tunable timings and board sizing

pub mod board;
pub mod export;
pub mod game;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::{BoardLayout, Hit, Ring, resolve_hit};
pub use game::{MatchState, ThrowOutcome, TurnPhase};
pub use settings::Settings;

use glam::Vec2;

/// Board and game constants
pub mod consts {
    /// Countdown target every player starts from
    pub const STARTING_SCORE: i32 = 501;
    /// Throws per turn
    pub const THROWS_PER_TURN: u8 = 3;

    /// Number of wedges around the board
    pub const SEGMENT_COUNT: usize = 20;
    /// Sector rotation between the wedge sequence and screen sectors
    pub const SEGMENT_OFFSET: i32 = -5;

    /// Margin around the board (ratio of base size)
    pub const SVG_MARGIN_RATIO: f32 = 0.135;
    /// Space reserved for the number ring (ratio of base size)
    pub const NUMBERS_MARGIN_RATIO: f32 = 0.093;
    /// Upper bound on the board base size in pixels
    pub const MAX_BASE_SIZE: f32 = 470.0;

    /// Ring radii as ratios of base size, outermost first
    pub const BOARD_OUTER_RATIO: f32 = 0.49;
    pub const DOUBLE_OUTER_RATIO: f32 = 0.475;
    pub const DOUBLE_INNER_RATIO: f32 = 0.43;
    pub const TRIPLE_OUTER_RATIO: f32 = 0.29;
    pub const TRIPLE_INNER_RATIO: f32 = 0.235;
    pub const BULL_OUTER_RATIO: f32 = 0.095;
    pub const BULL_INNER_RATIO: f32 = 0.045;
    /// Number labels sit this far (ratio of base size) outside the double ring
    pub const NUMBER_RING_OFFSET_RATIO: f32 = 0.053;

    /// Delay before a busted player's turn passes on (ms)
    pub const BUST_DELAY_MS: u64 = 1200;
    /// Delay before a completed turn passes on (ms)
    pub const TURN_COMPLETE_DELAY_MS: u64 = 100;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Convert polar (r, angle) to screen coordinates around `center`.
///
/// Angle 0 points up and grows clockwise, matching a screen whose y axis
/// points down.
#[inline]
pub fn polar_to_screen(center: Vec2, r: f32, angle: f32) -> Vec2 {
    Vec2::new(center.x + r * angle.sin(), center.y - r * angle.cos())
}

/// Convert a screen point to (r, angle) around `center`, angle in [0, 2π)
#[inline]
pub fn screen_to_polar(center: Vec2, point: Vec2) -> (f32, f32) {
    let d = point - center;
    (d.length(), normalize_angle(d.x.atan2(-d.y)))
}
