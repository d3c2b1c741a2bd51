//! Turn engine transitions
//!
//! Each operation takes the match explicitly and mutates it in place.
//! Nothing here fails: a call that does not apply in the current state is
//! a no-op, reported through the return value.

use serde::Serialize;

use super::state::{AdvanceReason, MatchState, Player, ScheduledAdvance, TurnPhase};
use crate::board::Hit;
use crate::consts::THROWS_PER_TURN;

/// Result of offering a dart to the turn engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ThrowOutcome {
    /// Not accepted (no current player, turn over, bust or won)
    Ignored,
    /// Recorded; the turn continues
    Scored { remaining: i32, throws_this_turn: u8 },
    /// Third dart recorded; the host should time `advance`
    TurnComplete {
        remaining: i32,
        advance: ScheduledAdvance,
    },
    /// Overshot zero; the whole turn was voided
    Bust { advance: ScheduledAdvance },
    /// Reached exactly zero
    Won { player: usize },
}

impl ThrowOutcome {
    /// Deferred advance the host must schedule, if any
    pub fn scheduled(&self) -> Option<ScheduledAdvance> {
        match self {
            ThrowOutcome::TurnComplete { advance, .. } | ThrowOutcome::Bust { advance } => {
                Some(*advance)
            }
            _ => None,
        }
    }
}

/// Append a player, returning their index.
///
/// Blank names become "Player N". The first player becomes current.
pub fn add_player(state: &mut MatchState, name: &str) -> usize {
    let trimmed = name.trim();
    let name = if trimmed.is_empty() {
        format!("Player {}", state.players.len() + 1)
    } else {
        trimmed.to_string()
    };
    log::info!("player added: {name}");
    state.repair_turn_starts();
    state.players.push(Player::new(name));
    state.turn_start_hits.push(0);

    let index = state.players.len() - 1;
    if state.current_player.is_none() {
        state.current_player = Some(index);
        state.throws_this_turn = 0;
        state.snapshot_turn_starts();
    }
    index
}

/// Remove player `index`; returns false if there is no such player.
///
/// Any pending advance is cancelled, since it was scheduled against the old
/// roster. If one was pending, or the throwing player was removed, whoever
/// is current starts a fresh turn. Otherwise a turn in progress carries on.
pub fn remove_player(state: &mut MatchState, index: usize) -> bool {
    if index >= state.players.len() {
        return false;
    }
    state.repair_turn_starts();
    let removed = state.players.remove(index);
    if index < state.turn_start_hits.len() {
        state.turn_start_hits.remove(index);
    }
    log::info!("player removed: {}", removed.name);

    state.winner = match state.winner {
        Some(w) if w == index => None,
        Some(w) if w > index => Some(w - 1),
        other => other,
    };

    if state.players.is_empty() {
        state.clear_keeping_tokens();
        return true;
    }

    let had_pending = state.pending.is_some();
    state.cancel_pending();
    let current_removed = match state.current_player {
        Some(current) if current == index => {
            state.current_player = Some(index.saturating_sub(1));
            true
        }
        Some(current) if current > index => {
            state.current_player = Some(current - 1);
            false
        }
        _ => false,
    };
    if had_pending || current_removed {
        state.bust = false;
        state.throws_this_turn = 0;
        state.snapshot_turn_starts();
    }
    true
}

/// Make player `index` current and start them on a fresh turn
pub fn select_player(state: &mut MatchState, index: usize) -> bool {
    if index >= state.players.len() {
        return false;
    }
    state.cancel_pending();
    state.current_player = Some(index);
    state.winner = None;
    state.bust = false;
    state.throws_this_turn = 0;
    state.snapshot_turn_starts();
    log::info!("selected player: {}", state.players[index].name);
    true
}

/// Record one dart for the current player
pub fn record_throw(state: &mut MatchState, hit: Hit) -> ThrowOutcome {
    if state.phase() != TurnPhase::AwaitingThrow || state.throws_this_turn >= THROWS_PER_TURN {
        return ThrowOutcome::Ignored;
    }
    let Some(current) = state.current_player else {
        return ThrowOutcome::Ignored;
    };
    state.repair_turn_starts();
    let turn_start = state.turn_start_hits.get(current).copied();
    let Some(player) = state.players.get_mut(current) else {
        return ThrowOutcome::Ignored;
    };

    player.hits.push(hit);
    let remaining = player.remaining_score();

    if remaining == 0 {
        log::info!("{} wins with {hit}", player.name);
        state.winner = Some(current);
        state.throws_this_turn += 1;
        return ThrowOutcome::Won { player: current };
    }

    if remaining < 0 {
        let keep = turn_start.unwrap_or(0).min(player.hits.len());
        player.hits.truncate(keep);
        log::info!(
            "{} busts with {hit}, back to {}",
            player.name,
            player.remaining_score()
        );
        state.bust = true;
        state.throws_this_turn = 0;
        let advance = state.schedule(AdvanceReason::Bust);
        return ThrowOutcome::Bust { advance };
    }

    state.throws_this_turn += 1;
    if state.throws_this_turn >= THROWS_PER_TURN {
        state.throws_this_turn = 0;
        let advance = state.schedule(AdvanceReason::TurnComplete);
        log::debug!("turn complete, advance {} scheduled", advance.token);
        return ThrowOutcome::TurnComplete { remaining, advance };
    }

    ThrowOutcome::Scored {
        remaining,
        throws_this_turn: state.throws_this_turn,
    }
}

/// Apply a previously scheduled advance.
///
/// Returns false (and changes nothing) when `token` is stale: the match was
/// reset, cleared, or the roster or throwing player changed since it was
/// scheduled.
pub fn fire_advance(state: &mut MatchState, token: u64) -> bool {
    match state.pending {
        Some(advance) if advance.token == token => {}
        _ => {
            log::warn!("ignoring stale advance {token}");
            return false;
        }
    }
    state.pending = None;
    state.bust = false;
    state.throws_this_turn = 0;

    let count = state.players.len();
    state.current_player = match (state.current_player, count) {
        (_, 0) => None,
        (Some(current), n) => Some((current + 1) % n),
        (None, _) => Some(0),
    };
    state.snapshot_turn_starts();

    if let Some(player) = state.current_player() {
        log::info!("next up: {} on {}", player.name, player.remaining_score());
    }
    true
}

/// Wipe every player's darts; roster and current player stay
pub fn clear_scores(state: &mut MatchState) {
    state.cancel_pending();
    for player in &mut state.players {
        player.hits.clear();
    }
    state.winner = None;
    state.bust = false;
    state.throws_this_turn = 0;
    state.snapshot_turn_starts();
    log::info!("scores cleared");
}

/// Back to an empty match, as on first load
pub fn full_reset(state: &mut MatchState) {
    state.clear_keeping_tokens();
    log::info!("match reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Ring;
    use glam::Vec2;

    fn dart(ring: Ring, value: u8) -> Hit {
        Hit::new(ring, Some(value), Vec2::ZERO)
    }

    fn t20() -> Hit {
        dart(Ring::Triple, 20)
    }

    fn with_players(names: &[&str]) -> MatchState {
        let mut state = MatchState::default();
        for n in names {
            add_player(&mut state, n);
        }
        state
    }

    /// Give the current player hits worth `points` without touching turn state
    fn preload(state: &mut MatchState, index: usize, points: u32) {
        let mut left = points;
        while left > 0 {
            let take = left.min(20) as u8;
            state.players[index].hits.push(dart(Ring::SingleOuter, take));
            left -= u32::from(take);
        }
        state.snapshot_turn_starts();
    }

    #[test]
    fn test_taps_drive_a_turn() {
        use crate::board::{BoardLayout, resolve_hit};

        let layout = BoardLayout::from_available_width(600.0, crate::consts::MAX_BASE_SIZE);
        let treble = (layout.radii.triple_inner + layout.radii.triple_outer) / 2.0;
        let (x, y) = (layout.center.x, layout.center.y - treble);

        let mut state = with_players(&["Alice"]);
        let mut counts = Vec::new();
        let mut last = ThrowOutcome::Ignored;
        for _ in 0..3 {
            last = record_throw(&mut state, resolve_hit(&layout, x, y));
            counts.push(state.throws_this_turn());
        }
        assert_eq!(counts, [1, 2, 0]);
        assert_eq!(state.remaining_score(0), Some(321));
        let advance = last.scheduled().unwrap();
        assert!(fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player().unwrap().name, "Alice");
        assert_eq!(state.markers().count(), 3);
    }

    #[test]
    fn test_add_first_player_becomes_current() {
        let mut state = MatchState::default();
        assert_eq!(add_player(&mut state, "  Alice "), 0);
        assert_eq!(state.players()[0].name, "Alice");
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);

        assert_eq!(add_player(&mut state, "   "), 1);
        assert_eq!(state.players()[1].name, "Player 2");
        assert_eq!(state.current_player_index(), Some(0));
    }

    #[test]
    fn test_three_darts_then_wrap_single_player() {
        let mut state = with_players(&["Alice"]);

        assert_eq!(
            record_throw(&mut state, t20()),
            ThrowOutcome::Scored {
                remaining: 441,
                throws_this_turn: 1,
            }
        );
        assert_eq!(state.throws_this_turn(), 1);
        record_throw(&mut state, t20());
        assert_eq!(state.throws_this_turn(), 2);

        let outcome = record_throw(&mut state, t20());
        let ThrowOutcome::TurnComplete { remaining, advance } = outcome else {
            panic!("expected turn complete, got {outcome:?}");
        };
        assert_eq!(remaining, 321);
        assert_eq!(advance.reason, AdvanceReason::TurnComplete);
        assert_eq!(state.throws_this_turn(), 0);
        assert_eq!(state.phase(), TurnPhase::TurnComplete);
        assert_eq!(state.status_message(), "Turn complete!");

        // No fourth dart while the advance is pending
        assert_eq!(record_throw(&mut state, t20()), ThrowOutcome::Ignored);

        assert!(fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);
        assert_eq!(state.remaining_score(0), Some(321));
        assert_eq!(state.turn_start_hits(0), Some(3));
    }

    #[test]
    fn test_turn_passes_to_next_player() {
        let mut state = with_players(&["Alice", "Bob"]);
        for _ in 0..2 {
            record_throw(&mut state, dart(Ring::SingleInner, 1));
        }
        let advance = record_throw(&mut state, dart(Ring::SingleInner, 1))
            .scheduled()
            .unwrap();
        assert!(fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player_index(), Some(1));
        assert_eq!(state.status_message(), "Bob, tap the dartboard to drop a marker.");

        // Firing the same token twice does nothing
        assert!(!fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player_index(), Some(1));
    }

    #[test]
    fn test_bust_voids_whole_turn() {
        let mut state = with_players(&["Alice"]);
        preload(&mut state, 0, 501 - 40);
        let before = state.players()[0].hits.clone();

        record_throw(&mut state, dart(Ring::SingleOuter, 10));
        assert_eq!(state.remaining_score(0), Some(30));

        // Treble 11 is 33, three more than needed
        let outcome = record_throw(&mut state, dart(Ring::Triple, 11));
        let ThrowOutcome::Bust { advance } = outcome else {
            panic!("expected bust, got {outcome:?}");
        };
        assert_eq!(state.players()[0].hits, before);
        assert_eq!(state.remaining_score(0), Some(40));
        assert!(state.is_bust());
        assert_eq!(state.throws_this_turn(), 0);
        assert_eq!(state.phase(), TurnPhase::Bust);
        assert_eq!(advance.delay, state.timings.bust_delay);
        assert_eq!(record_throw(&mut state, t20()), ThrowOutcome::Ignored);

        assert!(fire_advance(&mut state, advance.token));
        assert!(!state.is_bust());
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);
        assert_eq!(state.remaining_score(0), Some(40));
    }

    #[test]
    fn test_bust_from_forty_then_same_player_again() {
        let mut state = with_players(&["Alice"]);
        preload(&mut state, 0, 501 - 40);
        let hits_before = state.players()[0].hits.len();

        // Treble 14 is 42, two more than needed
        let advance = record_throw(&mut state, dart(Ring::Triple, 14))
            .scheduled()
            .unwrap();
        assert_eq!(advance.reason, AdvanceReason::Bust);
        assert_eq!(state.players()[0].hits.len(), hits_before);
        assert_eq!(state.status_message(), "Bust! Next player's turn...");

        assert!(fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.throws_this_turn(), 0);
        assert_eq!(state.remaining_score(0), Some(40));
        assert!(matches!(
            record_throw(&mut state, dart(Ring::Double, 20)),
            ThrowOutcome::Won { player: 0 }
        ));
    }

    #[test]
    fn test_inner_bull_finish_wins() {
        let mut state = with_players(&["Alice", "Bob"]);
        preload(&mut state, 0, 501 - 50);
        let outcome = record_throw(&mut state, Hit::new(Ring::InnerBull, None, Vec2::ZERO));
        assert_eq!(outcome, ThrowOutcome::Won { player: 0 });
        assert_eq!(state.winner_index(), Some(0));
        assert_eq!(state.remaining_score(0), Some(0));
        assert_eq!(state.throws_this_turn(), 1);
        assert_eq!(state.phase(), TurnPhase::Won);
        assert_eq!(state.status_message(), "Alice has won!");
        assert!(state.pending_advance().is_none());

        // Winner cannot keep throwing
        assert_eq!(record_throw(&mut state, t20()), ThrowOutcome::Ignored);
        assert_eq!(state.players()[0].hits.len(), 24);

        // Selecting a player clears the win
        assert!(select_player(&mut state, 1));
        assert_eq!(state.winner_index(), None);
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);
    }

    #[test]
    fn test_no_current_player_ignores_throw() {
        let mut state = MatchState::default();
        assert_eq!(record_throw(&mut state, t20()), ThrowOutcome::Ignored);
    }

    #[test]
    fn test_select_cancels_pending_advance() {
        let mut state = with_players(&["Alice", "Bob", "Cara"]);
        record_throw(&mut state, t20());
        record_throw(&mut state, t20());
        let advance = record_throw(&mut state, t20()).scheduled().unwrap();

        assert!(select_player(&mut state, 2));
        assert!(state.pending_advance().is_none());
        assert!(!fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player_index(), Some(2));
        assert!(!select_player(&mut state, 3));
    }

    #[test]
    fn test_remove_reindexes_current() {
        let mut state = with_players(&["A", "B", "C"]);
        select_player(&mut state, 2);
        assert!(remove_player(&mut state, 0));
        assert_eq!(state.current_player_index(), Some(1));
        assert_eq!(state.current_player().unwrap().name, "C");

        // Removing the current player falls back to the previous one
        assert!(remove_player(&mut state, 1));
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.current_player().unwrap().name, "B");

        // Removing index 0 while current stays at 0
        add_player(&mut state, "D");
        assert!(remove_player(&mut state, 0));
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.current_player().unwrap().name, "D");

        assert!(remove_player(&mut state, 0));
        assert_eq!(state.current_player_index(), None);
        assert_eq!(state.phase(), TurnPhase::NoPlayers);
        assert!(!remove_player(&mut state, 0));
    }

    #[test]
    fn test_remove_busting_player_cancels_timer() {
        let mut state = with_players(&["Alice", "Bob"]);
        preload(&mut state, 0, 501 - 10);
        let advance = record_throw(&mut state, t20()).scheduled().unwrap();
        assert!(state.is_bust());

        assert!(remove_player(&mut state, 0));
        assert!(!state.is_bust());
        assert!(!fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player().unwrap().name, "Bob");
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);
    }

    #[test]
    fn test_remove_other_player_mid_turn_keeps_turn() {
        let mut state = with_players(&["Alice", "Bob", "Cara"]);
        select_player(&mut state, 1);
        record_throw(&mut state, t20());

        assert!(remove_player(&mut state, 0));
        assert_eq!(state.current_player().unwrap().name, "Bob");
        assert_eq!(state.throws_this_turn(), 1);
        assert_eq!(state.turn_start_hits(0), Some(0));
        record_throw(&mut state, t20());
        let advance = record_throw(&mut state, t20()).scheduled().unwrap();
        assert!(fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player().unwrap().name, "Cara");
    }

    #[test]
    fn test_remove_other_player_during_bust_cancels_timer() {
        let mut state = with_players(&["Alice", "Bob", "Cara"]);
        preload(&mut state, 0, 501 - 10);
        let advance = record_throw(&mut state, t20()).scheduled().unwrap();
        assert_eq!(state.phase(), TurnPhase::Bust);

        assert!(remove_player(&mut state, 2));
        assert_eq!(state.pending_advance(), None);
        assert!(!fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player_index(), Some(0));
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);
        assert_eq!(state.throws_this_turn(), 0);
        assert_eq!(state.remaining_score(0), Some(10));
    }

    #[test]
    fn test_remove_other_player_after_third_dart_cancels_timer() {
        let mut state = with_players(&["Alice", "Bob", "Cara"]);
        select_player(&mut state, 1);
        record_throw(&mut state, t20());
        record_throw(&mut state, t20());
        let advance = record_throw(&mut state, t20()).scheduled().unwrap();

        assert!(remove_player(&mut state, 0));
        assert!(!fire_advance(&mut state, advance.token));
        assert_eq!(state.current_player().unwrap().name, "Bob");
        assert_eq!(state.phase(), TurnPhase::AwaitingThrow);
    }

    #[test]
    fn test_short_turn_starts_from_snapshot_do_not_panic() {
        let mut state = with_players(&["Alice", "Bob"]);
        record_throw(&mut state, t20());
        let mut json = serde_json::to_value(&state).unwrap();
        json["turn_start_hits"] = serde_json::json!([]);
        let mut back: MatchState = serde_json::from_value(json).unwrap();

        assert!(remove_player(&mut back, 1));
        assert_eq!(back.players().len(), 1);
        assert_eq!(back.turn_start_hits(0), Some(1));

        let mut json = serde_json::to_value(&state).unwrap();
        json["turn_start_hits"] = serde_json::json!([0]);
        let mut back: MatchState = serde_json::from_value(json).unwrap();
        assert_eq!(add_player(&mut back, "Cara"), 2);
        assert_eq!(back.turn_start_hits(2), Some(0));
        assert!(matches!(
            record_throw(&mut back, t20()),
            ThrowOutcome::Scored { .. }
        ));
    }

    #[test]
    fn test_remove_winner_clears_win() {
        let mut state = with_players(&["Alice", "Bob"]);
        preload(&mut state, 0, 501 - 50);
        record_throw(&mut state, Hit::new(Ring::InnerBull, None, Vec2::ZERO));
        assert!(remove_player(&mut state, 1));
        assert_eq!(state.winner_index(), Some(0));
        assert!(remove_player(&mut state, 0));
        assert_eq!(state.winner_index(), None);
    }

    #[test]
    fn test_clear_scores_keeps_roster() {
        let mut state = with_players(&["Alice", "Bob"]);
        select_player(&mut state, 1);
        record_throw(&mut state, t20());
        clear_scores(&mut state);
        assert_eq!(state.players().len(), 2);
        assert_eq!(state.current_player_index(), Some(1));
        assert!(state.players().iter().all(|p| p.hits.is_empty()));
        assert_eq!(state.throws_this_turn(), 0);
        assert_eq!(state.turn_start_hits(1), Some(0));
    }

    #[test]
    fn test_full_reset_invalidates_timers() {
        let mut state = with_players(&["Alice"]);
        preload(&mut state, 0, 500);
        let stale = record_throw(&mut state, t20()).scheduled().unwrap();
        full_reset(&mut state);
        assert_eq!(state.phase(), TurnPhase::NoPlayers);
        assert!(state.players().is_empty());

        // A new advance after the reset must not share the stale token
        add_player(&mut state, "Bob");
        preload(&mut state, 0, 500);
        let fresh = record_throw(&mut state, t20()).scheduled().unwrap();
        assert_ne!(fresh.token, stale.token);
        assert!(!fire_advance(&mut state, stale.token));
        assert!(state.is_bust());
        assert!(fire_advance(&mut state, fresh.token));
    }
}
