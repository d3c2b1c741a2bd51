//! Board layout derived from the available viewport width
//!
//! All radii are measured from the board centre in screen pixels. Rings are
//! nested strictly: bull inside single-inner inside treble inside
//! single-outer inside double, with a thin unscored rim outside the double.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hit::Ring;
use super::wedge::Wedge;
use crate::consts::*;
use crate::polar_to_screen;

/// Rejected custom radii
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("radius `{0}` is not a finite positive number")]
    InvalidRadius(&'static str),
    #[error("radius `{outer}` must be larger than `{inner}`")]
    NotNested {
        outer: &'static str,
        inner: &'static str,
    },
}

/// Ring thresholds, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingRadii {
    /// Edge of the playing surface; beyond this is a plain miss
    pub board_outer: f32,
    pub double_outer: f32,
    /// Also the outer edge of the outer single band
    pub double_inner: f32,
    /// Also the inner edge of the outer single band
    pub triple_outer: f32,
    /// Also the outer edge of the inner single band
    pub triple_inner: f32,
    /// Also the inner edge of the inner single band
    pub bull_outer: f32,
    pub bull_inner: f32,
}

impl RingRadii {
    /// Standard proportions for a board of the given base size
    pub fn from_base(base_size: f32) -> Self {
        Self {
            board_outer: base_size * BOARD_OUTER_RATIO,
            double_outer: base_size * DOUBLE_OUTER_RATIO,
            double_inner: base_size * DOUBLE_INNER_RATIO,
            triple_outer: base_size * TRIPLE_OUTER_RATIO,
            triple_inner: base_size * TRIPLE_INNER_RATIO,
            bull_outer: base_size * BULL_OUTER_RATIO,
            bull_inner: base_size * BULL_INNER_RATIO,
        }
    }

    fn named(&self) -> [(&'static str, f32); 7] {
        [
            ("board_outer", self.board_outer),
            ("double_outer", self.double_outer),
            ("double_inner", self.double_inner),
            ("triple_outer", self.triple_outer),
            ("triple_inner", self.triple_inner),
            ("bull_outer", self.bull_outer),
            ("bull_inner", self.bull_inner),
        ]
    }

    /// Check every radius is finite and positive and the rings nest.
    ///
    /// The board edge may coincide with the double ring (no rim); every
    /// other pair must be strictly decreasing.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let named = self.named();
        for (name, r) in named {
            if !r.is_finite() || r <= 0.0 {
                return Err(LayoutError::InvalidRadius(name));
            }
        }
        for (i, pair) in named.windows(2).enumerate() {
            let ((outer, ro), (inner, ri)) = (pair[0], pair[1]);
            let nested = if i == 0 { ro >= ri } else { ro > ri };
            if !nested {
                return Err(LayoutError::NotNested { outer, inner });
            }
        }
        Ok(())
    }
}

/// Immutable board geometry for one viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Side of the square drawing area (board plus margins)
    pub size: f32,
    /// Board centre in drawing-area coordinates
    pub center: Vec2,
    /// Board diameter scalar all ratios are taken from
    pub base_size: f32,
    /// Margin between the drawing area edge and the board
    pub margin: f32,
    /// Room reserved for the number ring
    pub numbers_margin: f32,
    pub radii: RingRadii,
}

impl BoardLayout {
    /// Fit the board into `available_width`, capped at `max_base_size`.
    ///
    /// A non-finite or non-positive width produces a degenerate layout on
    /// which every tap is a miss.
    pub fn from_available_width(available_width: f32, max_base_size: f32) -> Self {
        let total_margin_ratio = 2.0 * SVG_MARGIN_RATIO + 2.0 * NUMBERS_MARGIN_RATIO;
        let fitted = available_width / (1.0 + total_margin_ratio);
        let base_size = if fitted.is_finite() && fitted > 0.0 {
            fitted.min(max_base_size)
        } else {
            0.0
        };
        let margin = base_size * SVG_MARGIN_RATIO;
        let size = base_size + margin * 2.0;
        Self {
            size,
            center: Vec2::splat(size / 2.0),
            base_size,
            margin,
            numbers_margin: base_size * NUMBERS_MARGIN_RATIO,
            radii: RingRadii::from_base(base_size),
        }
    }

    /// Standard proportions around an explicit centre
    pub fn new(center: Vec2, base_size: f32) -> Self {
        let base_size = if base_size.is_finite() { base_size.max(0.0) } else { 0.0 };
        let margin = base_size * SVG_MARGIN_RATIO;
        Self {
            size: base_size + margin * 2.0,
            center,
            base_size,
            margin,
            numbers_margin: base_size * NUMBERS_MARGIN_RATIO,
            radii: RingRadii::from_base(base_size),
        }
    }

    /// Explicit radii, validated for nesting
    pub fn with_radii(center: Vec2, base_size: f32, radii: RingRadii) -> Result<Self, LayoutError> {
        radii.validate()?;
        let mut layout = Self::new(center, base_size);
        layout.radii = radii;
        Ok(layout)
    }

    /// True when the board has no area to hit
    pub fn is_degenerate(&self) -> bool {
        !(self.radii.board_outer > 0.0) || !self.center.is_finite()
    }

    /// Inner and outer radius of a scoring band (None for `Miss`).
    ///
    /// A band owns its outer edge and excludes its inner edge, except the
    /// inner bull which includes the centre.
    pub fn band(&self, ring: Ring) -> Option<(f32, f32)> {
        let r = &self.radii;
        match ring {
            Ring::Miss => None,
            Ring::InnerBull => Some((0.0, r.bull_inner)),
            Ring::OuterBull => Some((r.bull_inner, r.bull_outer)),
            Ring::SingleInner => Some((r.bull_outer, r.triple_inner)),
            Ring::Triple => Some((r.triple_inner, r.triple_outer)),
            Ring::SingleOuter => Some((r.triple_outer, r.double_inner)),
            Ring::Double => Some((r.double_inner, r.double_outer)),
        }
    }

    /// Which ring a radial distance falls in
    pub fn ring_at(&self, r: f32) -> Ring {
        let rr = &self.radii;
        // NaN and negative distances fail the first comparison
        if self.is_degenerate() || !(r >= 0.0) || r > rr.board_outer {
            Ring::Miss
        } else if r <= rr.bull_inner {
            Ring::InnerBull
        } else if r <= rr.bull_outer {
            Ring::OuterBull
        } else if r > rr.double_inner && r <= rr.double_outer {
            Ring::Double
        } else if r > rr.triple_inner && r <= rr.triple_outer {
            Ring::Triple
        } else if r > rr.triple_outer && r <= rr.double_inner {
            Ring::SingleOuter
        } else if r > rr.bull_outer && r <= rr.triple_inner {
            Ring::SingleInner
        } else {
            // Rim between the double ring and the board edge
            Ring::Miss
        }
    }

    /// Radius of the number labels
    pub fn number_radius(&self) -> f32 {
        self.radii.double_outer + self.base_size * NUMBER_RING_OFFSET_RATIO
    }

    /// Where the number label for a wedge is drawn
    pub fn number_position(&self, wedge: &Wedge) -> Vec2 {
        polar_to_screen(self.center, self.number_radius(), wedge.center_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_available_width_fits_margins() {
        let layout = BoardLayout::from_available_width(364.0, MAX_BASE_SIZE);
        // 364 / 1.456 = 250
        assert!((layout.base_size - 250.0).abs() < 1e-3);
        assert!((layout.margin - 33.75).abs() < 1e-3);
        assert!((layout.size - 317.5).abs() < 1e-3);
        assert_eq!(layout.center, Vec2::splat(layout.size / 2.0));
        assert!((layout.radii.double_outer - 118.75).abs() < 1e-3);
    }

    #[test]
    fn test_from_available_width_caps_base_size() {
        let layout = BoardLayout::from_available_width(5000.0, MAX_BASE_SIZE);
        assert_eq!(layout.base_size, MAX_BASE_SIZE);
    }

    #[test]
    fn test_degenerate_width() {
        for w in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let layout = BoardLayout::from_available_width(w, MAX_BASE_SIZE);
            assert!(layout.is_degenerate(), "width {w} should be degenerate");
            assert_eq!(layout.ring_at(0.0), Ring::Miss);
        }
    }

    #[test]
    fn test_standard_radii_nest() {
        assert_eq!(RingRadii::from_base(400.0).validate(), Ok(()));
    }

    #[test]
    fn test_with_radii_rejects_overlap() {
        let mut radii = RingRadii::from_base(400.0);
        radii.triple_outer = radii.double_inner + 1.0;
        assert_eq!(
            BoardLayout::with_radii(Vec2::ZERO, 400.0, radii),
            Err(LayoutError::NotNested {
                outer: "double_inner",
                inner: "triple_outer"
            })
        );

        let mut radii = RingRadii::from_base(400.0);
        radii.bull_inner = f32::NAN;
        assert_eq!(
            radii.validate(),
            Err(LayoutError::InvalidRadius("bull_inner"))
        );
    }

    #[test]
    fn test_ring_boundaries_belong_to_inner_band() {
        let layout = BoardLayout::new(Vec2::ZERO, 400.0);
        let r = layout.radii;
        assert_eq!(layout.ring_at(0.0), Ring::InnerBull);
        assert_eq!(layout.ring_at(r.bull_inner), Ring::InnerBull);
        assert_eq!(layout.ring_at(r.bull_outer), Ring::OuterBull);
        assert_eq!(layout.ring_at(r.triple_inner), Ring::SingleInner);
        assert_eq!(layout.ring_at(r.triple_outer), Ring::Triple);
        assert_eq!(layout.ring_at(r.double_inner), Ring::SingleOuter);
        assert_eq!(layout.ring_at(r.double_outer), Ring::Double);
        assert_eq!(layout.ring_at(r.board_outer), Ring::Miss);
        assert_eq!(layout.ring_at(r.board_outer + 1.0), Ring::Miss);
    }

    #[test]
    fn test_rim_is_miss() {
        let layout = BoardLayout::new(Vec2::ZERO, 400.0);
        let rim = (layout.radii.double_outer + layout.radii.board_outer) / 2.0;
        assert_eq!(layout.ring_at(rim), Ring::Miss);
    }

    #[test]
    fn test_bad_distances_are_miss() {
        let layout = BoardLayout::new(Vec2::ZERO, 400.0);
        assert_eq!(layout.ring_at(f32::NAN), Ring::Miss);
        assert_eq!(layout.ring_at(-1.0), Ring::Miss);
    }
}
