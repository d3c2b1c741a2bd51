//! Automatic thrower for demo and idle play
//!
//! Aims at a target picked from the remaining score, then scatters the tap
//! uniformly within a disc. Seeded so a demo match replays exactly.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::board::{BoardLayout, Ring, Wedge};

/// What the bot is trying to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub ring: Ring,
    /// Face value for wedge rings, None for bulls
    pub wedge_value: Option<u8>,
}

impl Target {
    fn wedge(ring: Ring, value: u8) -> Self {
        Self {
            ring,
            wedge_value: Some(value),
        }
    }

    fn bull(ring: Ring) -> Self {
        Self {
            ring,
            wedge_value: None,
        }
    }

    /// Choose a target for the given remaining score.
    ///
    /// Treble 20 while that cannot bust, otherwise a one-dart finish when
    /// one exists, otherwise single 20 to chip away.
    pub fn for_remaining(remaining: i32) -> Self {
        match remaining {
            r if r > 60 => Self::wedge(Ring::Triple, 20),
            50 => Self::bull(Ring::InnerBull),
            25 => Self::bull(Ring::OuterBull),
            r if r <= 20 => Self::wedge(Ring::SingleOuter, r.max(1) as u8),
            r if r % 2 == 0 && r <= 40 => Self::wedge(Ring::Double, (r / 2) as u8),
            r if r % 3 == 0 => Self::wedge(Ring::Triple, (r / 3) as u8),
            _ => Self::wedge(Ring::SingleOuter, 20),
        }
    }

    /// Centre of the target zone on `layout`
    pub fn aim_point(&self, layout: &BoardLayout) -> Vec2 {
        let wedge = self
            .wedge_value
            .and_then(Wedge::for_value)
            .unwrap_or_else(|| Wedge::new(0));
        match self.ring {
            Ring::InnerBull => layout.center,
            ring => wedge
                .segment(layout, ring)
                .map_or(layout.center, |s| s.center_point()),
        }
    }
}

/// Seeded dart thrower
#[derive(Debug, Clone)]
pub struct Bot {
    rng: Pcg32,
    /// Maximum scatter distance in pixels
    pub spread: f32,
}

impl Bot {
    pub fn new(seed: u64, spread: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            spread: spread.max(0.0),
        }
    }

    /// Tap position for a throw at the current remaining score
    pub fn throw(&mut self, layout: &BoardLayout, remaining: i32) -> Vec2 {
        let aim = Target::for_remaining(remaining).aim_point(layout);
        // sqrt keeps the scatter uniform over the disc area
        let dist = self.spread * self.rng.random::<f32>().sqrt();
        let angle = self.rng.random_range(0.0..TAU);
        aim + Vec2::new(angle.cos(), angle.sin()) * dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::resolve_hit;

    fn layout() -> BoardLayout {
        BoardLayout::new(Vec2::new(250.0, 250.0), 400.0)
    }

    #[test]
    fn test_target_choice() {
        assert_eq!(Target::for_remaining(501), Target::wedge(Ring::Triple, 20));
        assert_eq!(Target::for_remaining(50), Target::bull(Ring::InnerBull));
        assert_eq!(Target::for_remaining(40), Target::wedge(Ring::Double, 20));
        assert_eq!(Target::for_remaining(57), Target::wedge(Ring::Triple, 19));
        assert_eq!(Target::for_remaining(13), Target::wedge(Ring::SingleOuter, 13));
        assert_eq!(Target::for_remaining(41), Target::wedge(Ring::SingleOuter, 20));
    }

    #[test]
    fn test_zero_spread_hits_target() {
        let layout = layout();
        let mut bot = Bot::new(7, 0.0);
        for remaining in [501, 60, 50, 36, 25, 19] {
            let p = bot.throw(&layout, remaining);
            let hit = resolve_hit(&layout, p.x, p.y);
            assert_eq!(hit.score() as i32, remaining.min(60), "at {remaining}");
        }
    }

    #[test]
    fn test_same_seed_same_throws() {
        let layout = layout();
        let mut a = Bot::new(42, 30.0);
        let mut b = Bot::new(42, 30.0);
        for _ in 0..10 {
            assert_eq!(a.throw(&layout, 301), b.throw(&layout, 301));
        }
    }

    #[test]
    fn test_scatter_stays_within_spread() {
        let layout = layout();
        let aim = Target::for_remaining(501).aim_point(&layout);
        let mut bot = Bot::new(3, 12.0);
        for _ in 0..100 {
            assert!((bot.throw(&layout, 501) - aim).length() <= 12.0 + 1e-3);
        }
    }
}
