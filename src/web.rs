//! Browser host bindings
//!
//! JavaScript owns rendering and timers. Taps come in as board-local pixel
//! coordinates; when a tap schedules an advance the returned JSON carries a
//! token and a delay, and JS calls `fire_advance(token)` once it elapses.

use wasm_bindgen::prelude::*;

use crate::board::{BoardLayout, resolve_hit, wedges};
use crate::export::{match_rows, to_csv};
use crate::game::{self, MatchState, ScheduledAdvance};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Dartboard Scorer (web) starting...");
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// One scoreboard: settings, current layout and match
#[wasm_bindgen]
pub struct Scoreboard {
    settings: Settings,
    layout: BoardLayout,
    state: MatchState,
}

#[wasm_bindgen]
impl Scoreboard {
    /// `settings_json` may be omitted for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, settings_json: Option<String>) -> Result<Scoreboard, JsError> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(js_err)?,
            None => Settings::load(),
        };
        Ok(Self {
            layout: settings.board_layout(viewport_width),
            state: MatchState::new(settings.turn_timings()),
            settings,
        })
    }

    /// Recompute the board for a new viewport width
    pub fn resize(&mut self, viewport_width: f32) {
        self.layout = self.settings.board_layout(viewport_width);
    }

    /// Board geometry plus wedge bounds for drawing
    pub fn layout(&self) -> Result<String, JsError> {
        let body = serde_json::json!({
            "layout": self.layout,
            "numberRadius": self.layout.number_radius(),
            "wedges": wedges(),
        });
        serde_json::to_string(&body).map_err(js_err)
    }

    /// Resolve and record a tap; returns the hit and outcome as JSON
    pub fn tap(&mut self, x: f32, y: f32) -> Result<String, JsError> {
        let hit = resolve_hit(&self.layout, x, y);
        let outcome = game::record_throw(&mut self.state, hit);
        let advance = outcome.scheduled().map(|a| {
            serde_json::json!({
                "token": a.token,
                "delayMs": a.delay.as_millis() as u64,
            })
        });
        let body = serde_json::json!({
            "hit": hit,
            "label": hit.label(),
            "outcome": outcome,
            "advance": advance,
        });
        serde_json::to_string(&body).map_err(js_err)
    }

    /// `token` as received in the tap JSON (a plain JS number)
    pub fn fire_advance(&mut self, token: f64) -> bool {
        match ScheduledAdvance::token_from_js_number(token) {
            Some(token) => game::fire_advance(&mut self.state, token),
            None => {
                log::warn!("ignoring malformed advance token {token}");
                false
            }
        }
    }

    pub fn add_player(&mut self, name: &str) -> usize {
        game::add_player(&mut self.state, name)
    }

    pub fn remove_player(&mut self, index: usize) -> bool {
        game::remove_player(&mut self.state, index)
    }

    pub fn select_player(&mut self, index: usize) -> bool {
        game::select_player(&mut self.state, index)
    }

    pub fn clear_scores(&mut self) {
        game::clear_scores(&mut self.state);
    }

    pub fn full_reset(&mut self) {
        game::full_reset(&mut self.state);
    }

    pub fn status(&self) -> String {
        self.state.status_message()
    }

    /// Whole match state as JSON (players, hits, turn)
    pub fn snapshot(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.state).map_err(js_err)
    }

    pub fn export_csv(&self) -> Result<String, JsError> {
        to_csv(&match_rows(&self.state)).map_err(js_err)
    }
}
