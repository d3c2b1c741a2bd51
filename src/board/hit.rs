//! Dart hits and the standard scoring table

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Scoring band a dart landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ring {
    Miss,
    InnerBull,
    OuterBull,
    Double,
    Triple,
    SingleOuter,
    SingleInner,
}

impl Ring {
    /// All scoring rings, innermost first
    pub const SCORING: [Ring; 6] = [
        Ring::InnerBull,
        Ring::OuterBull,
        Ring::SingleInner,
        Ring::Triple,
        Ring::SingleOuter,
        Ring::Double,
    ];

    /// Whether the face value of the wedge matters for this ring
    pub fn uses_wedge(&self) -> bool {
        matches!(
            self,
            Ring::Double | Ring::Triple | Ring::SingleOuter | Ring::SingleInner
        )
    }

    /// Score multiplier applied to the wedge value
    pub fn multiplier(&self) -> u32 {
        match self {
            Ring::Double => 2,
            Ring::Triple => 3,
            Ring::SingleOuter | Ring::SingleInner => 1,
            Ring::Miss | Ring::InnerBull | Ring::OuterBull => 0,
        }
    }
}

/// Score for a ring and wedge face value.
///
/// Bulls ignore the wedge value; a wedge ring without a value scores 0.
pub fn score_value(ring: Ring, wedge_value: Option<u8>) -> u32 {
    match ring {
        Ring::Miss => 0,
        Ring::OuterBull => 25,
        Ring::InnerBull => 50,
        _ => wedge_value.map_or(0, |v| ring.multiplier() * u32::from(v)),
    }
}

/// One dart throw. Never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub ring: Ring,
    /// Face value of the wedge, only for double/treble/single rings
    pub wedge_value: Option<u8>,
    /// Tap position in board-local coordinates (for marker drawing)
    pub pos: Vec2,
}

impl Hit {
    pub fn new(ring: Ring, wedge_value: Option<u8>, pos: Vec2) -> Self {
        let wedge_value = if ring.uses_wedge() { wedge_value } else { None };
        Self {
            ring,
            wedge_value,
            pos,
        }
    }

    /// A miss at the given position
    pub fn miss(pos: Vec2) -> Self {
        Self::new(Ring::Miss, None, pos)
    }

    pub fn score(&self) -> u32 {
        score_value(self.ring, self.wedge_value)
    }

    /// Human readable label, e.g. "Triple 20 (60)"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = self.score();
        match (self.ring, self.wedge_value) {
            (Ring::InnerBull, _) => write!(f, "Inner Bull ({score})"),
            (Ring::OuterBull, _) => write!(f, "Outer Bull ({score})"),
            (Ring::Double, Some(v)) => write!(f, "Double {v} ({score})"),
            (Ring::Triple, Some(v)) => write!(f, "Triple {v} ({score})"),
            (Ring::SingleOuter | Ring::SingleInner, Some(v)) => write!(f, "Single {v} ({score})"),
            _ => write!(f, "Miss (0)"),
        }
    }
}
