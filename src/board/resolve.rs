//! Tap position to scoring zone

use glam::Vec2;

use super::hit::Hit;
use super::layout::BoardLayout;
use super::wedge::{WEDGE_SEQUENCE, wedge_index_at};
use crate::screen_to_polar;

/// Resolve a tap at (`tap_x`, `tap_y`) in board-local coordinates.
///
/// Never fails: taps off the board, on the unscored rim, or with
/// non-finite coordinates come back as a miss.
pub fn resolve_hit(layout: &BoardLayout, tap_x: f32, tap_y: f32) -> Hit {
    let pos = Vec2::new(tap_x, tap_y);
    let (r, theta) = screen_to_polar(layout.center, pos);

    let ring = layout.ring_at(r);
    if !ring.uses_wedge() {
        log::debug!("tap ({tap_x:.1}, {tap_y:.1}) r={r:.1} -> {ring:?}");
        return Hit::new(ring, None, pos);
    }

    let index = wedge_index_at(theta);
    let hit = Hit::new(ring, Some(WEDGE_SEQUENCE[index]), pos);
    log::debug!("tap ({tap_x:.1}, {tap_y:.1}) r={r:.1} -> {hit}");
    hit
}
