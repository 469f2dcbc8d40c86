//! chess.com published-data API response types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::filter::Color;

/// Ruleset tag of standard chess; every other tag is a variant.
pub const STANDARD_RULES: &str = "chess";

/// Response of `GET /pub/player/{username}/games/archives`.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveList {
    pub archives: Vec<String>,
}

/// Response of one monthly archive URL.
///
/// Games stay as raw JSON until each one is decoded on its own, so a single
/// odd record cannot fail the whole month.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveBatch {
    pub games: Vec<serde_json::Value>,
}

/// One game from a monthly archive.
///
/// Every field is optional: a record missing something the filter needs is
/// rejected by the filter, never treated as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameRecord {
    /// PGN text of the game.
    pub pgn: Option<String>,
    /// Ruleset tag (`chess`, `chess960`, `crazyhouse`, ...).
    pub rules: Option<String>,
    /// Time-control class (`bullet`, `blitz`, `rapid`, `daily`).
    pub time_class: Option<String>,
    /// Completion time in seconds since the Unix epoch.
    pub end_time: Option<i64>,
    /// Player with the white pieces.
    pub white: Option<Side>,
    /// Player with the black pieces.
    pub black: Option<Side>,
    /// Game page, used for logging only.
    pub url: Option<String>,
}

/// Side-assignment sub-object of a game record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Side {
    /// Account name of the player on this side.
    pub username: Option<String>,
}

impl GameRecord {
    /// Decodes one element of an archive's `games` array.
    ///
    /// Returns `None` when the element is not an object of the expected shape.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    /// Username of the player who had `color`.
    #[must_use]
    pub fn username_for(&self, color: Color) -> Option<&str> {
        let side = match color {
            Color::White => self.white.as_ref(),
            Color::Black => self.black.as_ref(),
        };
        side.and_then(|side| side.username.as_deref())
    }

    /// Completion instant, when present and representable.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.end_time
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}
