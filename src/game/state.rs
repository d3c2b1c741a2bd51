//! Match state and core scoring types
//!
//! All state a host needs to redraw the scoreboard lives here. Scores are
//! never stored; they are recomputed from each player's hit history.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Hit;
use crate::consts::*;

/// Where the match currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Roster is empty
    NoPlayers,
    /// Current player may throw
    AwaitingThrow,
    /// Third dart thrown, waiting for the turn to pass on
    TurnComplete,
    /// Current player overshot, turn voided, waiting to pass on
    Bust,
    /// Current player reached exactly zero
    Won,
}

/// Why a turn is about to pass to the next player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceReason {
    TurnComplete,
    Bust,
}

/// Deferred "next player" command for the host event loop.
///
/// The host waits `delay` and then calls `fire_advance` with `token`. Any
/// reset, selection or removal invalidates the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledAdvance {
    pub token: u64,
    pub reason: AdvanceReason,
    pub delay: Duration,
}

impl ScheduledAdvance {
    /// Token as read back from a JavaScript number; `None` unless it is a
    /// whole non-negative value
    pub fn token_from_js_number(value: f64) -> Option<u64> {
        (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64)
            .then_some(value as u64)
    }
}

/// Delays for the two deferred advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTimings {
    pub bust_delay: Duration,
    pub turn_complete_delay: Duration,
}

impl Default for TurnTimings {
    fn default() -> Self {
        Self {
            bust_delay: Duration::from_millis(BUST_DELAY_MS),
            turn_complete_delay: Duration::from_millis(TURN_COMPLETE_DELAY_MS),
        }
    }
}

impl TurnTimings {
    pub fn delay_for(&self, reason: AdvanceReason) -> Duration {
        match reason {
            AdvanceReason::TurnComplete => self.turn_complete_delay,
            AdvanceReason::Bust => self.bust_delay,
        }
    }
}

/// A player and their throw history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Display name (uniqueness not enforced)
    pub name: String,
    pub hits: Vec<Hit>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hits: Vec::new(),
        }
    }

    /// Sum of all recorded darts
    pub fn total_scored(&self) -> i32 {
        self.hits.iter().map(|h| h.score() as i32).sum()
    }

    /// Points left to reach zero (negative only transiently during a bust)
    pub fn remaining_score(&self) -> i32 {
        STARTING_SCORE - self.total_scored()
    }
}

/// Complete match state (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) players: Vec<Player>,
    pub(crate) current_player: Option<usize>,
    pub(crate) throws_this_turn: u8,
    /// Hit count of every player when the current turn began
    pub(crate) turn_start_hits: Vec<usize>,
    pub(crate) winner: Option<usize>,
    pub(crate) bust: bool,
    pub timings: TurnTimings,
    #[serde(default)]
    pub(crate) pending: Option<ScheduledAdvance>,
    /// Next advance token; survives resets so stale host timers never match
    #[serde(default = "first_token")]
    next_token: u64,
}

fn first_token() -> u64 {
    1
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(TurnTimings::default())
    }
}

impl MatchState {
    pub fn new(timings: TurnTimings) -> Self {
        Self {
            players: Vec::new(),
            current_player: None,
            throws_this_turn: 0,
            turn_start_hits: Vec::new(),
            winner: None,
            bust: false,
            timings,
            pending: None,
            next_token: first_token(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> Option<usize> {
        self.current_player
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player.and_then(|i| self.players.get(i))
    }

    pub fn throws_this_turn(&self) -> u8 {
        self.throws_this_turn
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|i| self.players.get(i))
    }

    pub fn is_bust(&self) -> bool {
        self.bust
    }

    /// The advance the host should currently be timing, if any
    pub fn pending_advance(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    /// Hit count of player `index` when the current turn began
    pub fn turn_start_hits(&self, index: usize) -> Option<usize> {
        self.turn_start_hits.get(index).copied()
    }

    /// Remaining score of player `index`
    pub fn remaining_score(&self, index: usize) -> Option<i32> {
        self.players.get(index).map(Player::remaining_score)
    }

    pub fn phase(&self) -> TurnPhase {
        if self.players.is_empty() || self.current_player.is_none() {
            TurnPhase::NoPlayers
        } else if self.winner.is_some() {
            TurnPhase::Won
        } else if self.bust {
            TurnPhase::Bust
        } else if self.pending.is_some() {
            TurnPhase::TurnComplete
        } else {
            TurnPhase::AwaitingThrow
        }
    }

    /// Every recorded dart with its player index, for marker drawing
    pub fn markers(&self) -> impl Iterator<Item = (usize, &Hit)> + '_ {
        self.players
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.hits.iter().map(move |h| (i, h)))
    }

    /// One-line prompt describing what happens next
    pub fn status_message(&self) -> String {
        if self.players.is_empty() {
            return "Add at least one player to play.".to_string();
        }
        if let Some(winner) = self.winner() {
            return format!("{} has won!", winner.name);
        }
        match (self.current_player(), self.phase()) {
            (None, _) => "Select a player to play.".to_string(),
            (Some(_), TurnPhase::Bust) => "Bust! Next player's turn...".to_string(),
            (Some(_), TurnPhase::TurnComplete) => "Turn complete!".to_string(),
            (Some(p), _) => format!("{}, tap the dartboard to drop a marker.", p.name),
        }
    }

    /// Record every player's hit count as the start of a new turn
    pub(crate) fn snapshot_turn_starts(&mut self) {
        self.turn_start_hits = self.players.iter().map(|p| p.hits.len()).collect();
        log::debug!("turn starts: {:?}", self.turn_start_hits);
    }

    /// Retake snapshots if they no longer line up with the roster
    /// (e.g. a hand-edited or truncated snapshot was deserialized)
    pub(crate) fn repair_turn_starts(&mut self) {
        if self.turn_start_hits.len() != self.players.len() {
            log::warn!(
                "turn starts out of step ({} for {} players), retaking",
                self.turn_start_hits.len(),
                self.players.len()
            );
            self.snapshot_turn_starts();
        }
    }

    pub(crate) fn schedule(&mut self, reason: AdvanceReason) -> ScheduledAdvance {
        let advance = ScheduledAdvance {
            token: self.next_token,
            reason,
            delay: self.timings.delay_for(reason),
        };
        self.next_token += 1;
        self.pending = Some(advance);
        advance
    }

    pub(crate) fn cancel_pending(&mut self) {
        if let Some(advance) = self.pending.take() {
            log::debug!("cancelled pending advance {}", advance.token);
        }
    }

    /// Clear everything but keep the token counter and timings
    pub(crate) fn clear_keeping_tokens(&mut self) {
        let next_token = self.next_token;
        *self = Self::new(self.timings);
        self.next_token = next_token;
    }
}
