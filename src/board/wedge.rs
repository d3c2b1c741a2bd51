//! Wedge geometry for the 20 numbered slices of the board
//!
//! Angles use the screen convention from the crate root: 0 points up and
//! grows clockwise. A `Segment` is one ring band clipped to one wedge, the
//! unit a renderer fills with a single colour.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hit::Ring;
use super::layout::BoardLayout;
use crate::consts::{SEGMENT_COUNT, SEGMENT_OFFSET};
use crate::{normalize_angle, polar_to_screen};

/// Face values in clockwise board order, starting from the top
pub const WEDGE_SEQUENCE: [u8; SEGMENT_COUNT] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Angular width of one wedge
pub const ANGLE_PER_SEGMENT: f32 = TAU / SEGMENT_COUNT as f32;

/// Screen sector a wedge is drawn in
fn sector_of(index: usize) -> usize {
    (index as i32 + SEGMENT_OFFSET).rem_euclid(SEGMENT_COUNT as i32) as usize
}

/// Wedge index under a screen angle.
///
/// Sector 0 starts half a wedge before the 3 o'clock direction; the sector
/// offset then rotates the sequence so index 0 ("20") sits at the top.
pub fn wedge_index_at(theta: f32) -> usize {
    let start = FRAC_PI_2 - ANGLE_PER_SEGMENT / 2.0;
    let angle = normalize_angle(theta - start);
    // NaN casts to 0; the modulo absorbs a division that rounds up to 20
    let sector = (angle / ANGLE_PER_SEGMENT).floor() as usize % SEGMENT_COUNT;
    (sector as i32 - SEGMENT_OFFSET).rem_euclid(SEGMENT_COUNT as i32) as usize
}

/// One numbered slice of the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    /// Position in `WEDGE_SEQUENCE`
    pub index: usize,
    /// Face value (1-20)
    pub value: u8,
    /// Centre angle, normalized to [0, 2π)
    pub center_angle: f32,
    /// Counter-clockwise edge, normalized to [0, 2π)
    pub start_angle: f32,
    /// Clockwise edge, normalized to [0, 2π)
    pub end_angle: f32,
}

impl Wedge {
    pub fn new(index: usize) -> Self {
        let index = index % SEGMENT_COUNT;
        let center = FRAC_PI_2 + sector_of(index) as f32 * ANGLE_PER_SEGMENT;
        Self {
            index,
            value: WEDGE_SEQUENCE[index],
            center_angle: normalize_angle(center),
            start_angle: normalize_angle(center - ANGLE_PER_SEGMENT / 2.0),
            end_angle: normalize_angle(center + ANGLE_PER_SEGMENT / 2.0),
        }
    }

    /// Wedge showing the given face value
    pub fn for_value(value: u8) -> Option<Self> {
        WEDGE_SEQUENCE
            .iter()
            .position(|&v| v == value)
            .map(Self::new)
    }

    /// Check if an angle falls in this wedge (start inclusive, end exclusive)
    pub fn contains_angle(&self, theta: f32) -> bool {
        angle_in_range(normalize_angle(theta), self.start_angle, self.end_angle)
    }

    /// The band of this wedge covered by `ring` (None for `Miss`)
    pub fn segment(&self, layout: &BoardLayout, ring: Ring) -> Option<Segment> {
        let (inner_radius, outer_radius) = layout.band(ring)?;
        Some(Segment {
            center: layout.center,
            inner_radius,
            outer_radius,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
        })
    }
}

/// All 20 wedges in sequence order
pub fn wedges() -> [Wedge; SEGMENT_COUNT] {
    std::array::from_fn(Wedge::new)
}

fn angle_in_range(theta: f32, start: f32, end: f32) -> bool {
    if start <= end {
        theta >= start && theta < end
    } else {
        // Wraps through 0 (the wedge at the top)
        theta >= start || theta < end
    }
}

/// A ring band clipped to one wedge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Board centre the radii are measured from
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl Segment {
    /// Angular span (handles wraparound)
    pub fn angular_span(&self) -> f32 {
        let mut span = self.end_angle - self.start_angle;
        if span <= 0.0 {
            span += TAU;
        }
        span
    }

    /// Check if a screen point lies inside the band
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (r, theta) = crate::screen_to_polar(self.center, point);
        let radial = if self.inner_radius <= 0.0 {
            r <= self.outer_radius
        } else {
            r > self.inner_radius && r <= self.outer_radius
        };
        radial && angle_in_range(theta, self.start_angle, self.end_angle)
    }

    /// Centre of the band (mid radius, mid angle)
    pub fn center_point(&self) -> Vec2 {
        let mid_r = (self.inner_radius + self.outer_radius) / 2.0;
        let mid_theta = self.start_angle + self.angular_span() / 2.0;
        polar_to_screen(self.center, mid_r, mid_theta)
    }

    /// SVG path data: outer arc clockwise, inner arc back, closed
    pub fn svg_path(&self) -> String {
        let end = self.start_angle + self.angular_span();
        let start_outer = polar_to_screen(self.center, self.outer_radius, self.start_angle);
        let end_outer = polar_to_screen(self.center, self.outer_radius, end);
        let start_inner = polar_to_screen(self.center, self.inner_radius, end);
        let end_inner = polar_to_screen(self.center, self.inner_radius, self.start_angle);
        let large_arc = u8::from(self.angular_span() > PI);
        let (r1, r2) = (self.inner_radius, self.outer_radius);
        [
            format!("M {} {}", start_outer.x, start_outer.y),
            format!("A {r2} {r2} 0 {large_arc} 1 {} {}", end_outer.x, end_outer.y),
            format!("L {} {}", start_inner.x, start_inner.y),
            format!("A {r1} {r1} 0 {large_arc} 0 {} {}", end_inner.x, end_inner.y),
            "Z".to_string(),
        ]
        .join(" ")
    }
}
