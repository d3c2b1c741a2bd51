//! Tabular export of a match
//!
//! One row per dart with the score left after it, plus a trailing
//! "WINNER!" row under the winner's darts. Encoded as CSV (every cell
//! quoted, CRLF between rows) or JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::STARTING_SCORE;
use crate::game::{MatchState, Player};

/// Export failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Player")]
    pub player: String,
    /// 1-based dart number; empty on the winner row
    #[serde(rename = "Throw")]
    pub throw: Option<usize>,
    #[serde(rename = "Hit")]
    pub hit: String,
    /// Remaining score after this dart, floored at 0; empty on the winner row
    #[serde(rename = "Score After")]
    pub score_after: Option<i32>,
}

impl ExportRow {
    fn winner(name: &str) -> Self {
        Self {
            player: name.to_string(),
            throw: None,
            hit: "WINNER!".to_string(),
            score_after: None,
        }
    }
}

/// Build export rows (header not included)
pub fn export_rows(
    players: &[Player],
    winner: Option<usize>,
    starting_score: i32,
) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for (i, player) in players.iter().enumerate() {
        let mut score = starting_score;
        for (n, hit) in player.hits.iter().enumerate() {
            score -= hit.score() as i32;
            rows.push(ExportRow {
                player: player.name.clone(),
                throw: Some(n + 1),
                hit: hit.label(),
                score_after: Some(score.max(0)),
            });
        }
        if winner == Some(i) {
            rows.push(ExportRow::winner(&player.name));
        }
    }
    rows
}

/// Export rows for the current state of a match
pub fn match_rows(state: &MatchState) -> Vec<ExportRow> {
    export_rows(state.players(), state.winner_index(), STARTING_SCORE)
}

/// CSV with a header row, every cell quoted, rows joined by CRLF
pub fn to_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    if rows.is_empty() {
        writer.write_record(["Player", "Throw", "Hit", "Score After"])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut text = String::from_utf8(bytes)?;
    // Rows are joined, not terminated
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}

/// Pretty JSON array of row objects
pub fn to_json(rows: &[ExportRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write the CSV export of a match to `path`
pub fn write_csv(path: impl AsRef<Path>, state: &MatchState) -> Result<(), ExportError> {
    let path = path.as_ref();
    let csv = to_csv(&match_rows(state))?;
    std::fs::write(path, csv)?;
    log::info!("exported match to {}", path.display());
    Ok(())
}
