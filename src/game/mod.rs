//! Turn engine module
//!
//! Match state plus the transitions that mutate it. Deferred turn changes
//! are handed to the host as `ScheduledAdvance` commands instead of timers,
//! so everything here runs synchronously and deterministically.

pub mod bot;
pub mod state;
pub mod turn;

pub use bot::{Bot, Target};
pub use state::{AdvanceReason, MatchState, Player, ScheduledAdvance, TurnPhase, TurnTimings};
pub use turn::{
    ThrowOutcome, add_player, clear_scores, fire_advance, full_reset, record_throw, remove_player,
    select_player,
};
