//! Dartboard Scorer entry point
//!
//! Native builds play a seeded bot match and print the CSV export. The web
//! build is driven from JavaScript through `dartboard_scorer::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dartboard_scorer::export::{match_rows, to_csv};
    use dartboard_scorer::game::{Bot, MatchState, add_player, fire_advance, record_throw};
    use dartboard_scorer::{Settings, resolve_hit};

    /// Demo viewport width in pixels
    const VIEWPORT_WIDTH: f32 = 720.0;
    /// Give up on a match that drags on this long
    const MAX_DARTS: usize = 600;

    env_logger::init();
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(501);
    log::info!("Dartboard Scorer demo starting (seed {seed})");

    let settings = Settings::load();
    let layout = settings.board_layout(VIEWPORT_WIDTH);
    let mut state = MatchState::new(settings.turn_timings());
    let mut bots = Vec::new();
    for (i, name) in ["Alice", "Bob"].into_iter().enumerate() {
        add_player(&mut state, name);
        bots.push(Bot::new(seed.wrapping_add(i as u64), layout.base_size * 0.04));
    }

    let mut darts = 0;
    while state.winner_index().is_none() && darts < MAX_DARTS {
        let Some(current) = state.current_player_index() else {
            break;
        };
        let remaining = state.remaining_score(current).unwrap_or(0);
        let tap = bots[current].throw(&layout, remaining);
        let outcome = record_throw(&mut state, resolve_hit(&layout, tap.x, tap.y));
        darts += 1;

        // No real clock here: fire deferred advances straight away
        if let Some(advance) = outcome.scheduled() {
            log::debug!("skipping {:?} wait for {:?}", advance.delay, advance.reason);
            fire_advance(&mut state, advance.token);
        }
    }

    log::info!("{} ({darts} darts)", state.status_message());
    match to_csv(&match_rows(&state)) {
        Ok(csv) => println!("{csv}"),
        Err(e) => {
            log::error!("Export failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is dartboard_scorer::web::start, this is just to satisfy the compiler
}
