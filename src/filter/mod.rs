//! Game selection criteria shared by both download pipelines.
//!
//! A [`FilterSpec`] is built once per invocation from user options and never
//! mutated afterwards. Mode names use the public vocabulary (`bullet`,
//! `blitz`, `rapid`, `classical`, `correspondence`, ...); call
//! [`FilterSpec::for_server`] to obtain a copy in a server's own terms.

mod record;

pub use record::{Rejection, accept, rejections};

use std::fmt;
use std::str::FromStr;

use crate::calendar::{DateBound, DateWindow};
use crate::download::Server;

/// Side of the board a player had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// White pieces.
    White,
    /// Black pieces.
    Black,
}

impl Color {
    /// Returns the lowercase label used by both servers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            other => Err(format!("unknown color '{other}' (expected white or black)")),
        }
    }
}

/// Which games to keep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    color: Option<Color>,
    username: Option<String>,
    modes: Vec<String>,
    window: DateWindow,
}

impl FilterSpec {
    /// A spec that accepts every standard game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only games where `username` played `color`.
    #[must_use]
    pub fn with_color(mut self, color: Color, username: impl Into<String>) -> Self {
        self.color = Some(color);
        self.username = Some(username.into());
        self
    }

    /// Keeps only games whose mode is one of `modes`. An empty list keeps all.
    ///
    /// Blank names are dropped and duplicates collapse; order is preserved.
    #[must_use]
    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = dedup_modes(modes.into_iter().map(Into::into));
        self
    }

    /// Keeps only games that ended within `[lower, upper]`.
    #[must_use]
    pub fn with_window(mut self, lower: DateBound, upper: DateBound) -> Self {
        self.window = DateWindow::new(lower, upper);
        self
    }

    /// Selected color, if any.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Username the color applies to.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Allowed mode names; empty means all modes.
    #[must_use]
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Completion-time window.
    #[must_use]
    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Returns this spec with mode names translated to `server`'s vocabulary.
    ///
    /// chess.com calls correspondence games `daily`; lichess uses the public
    /// names as-is.
    #[must_use]
    pub fn for_server(&self, server: Server) -> Self {
        let modes = match server {
            Server::ChessCom => dedup_modes(self.modes.iter().map(|mode| {
                if mode == "correspondence" {
                    "daily".to_string()
                } else {
                    mode.clone()
                }
            })),
            Server::Lichess => self.modes.clone(),
        };
        Self {
            modes,
            ..self.clone()
        }
    }
}

fn dedup_modes(modes: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for mode in modes {
        let mode = mode.trim();
        if !mode.is_empty() && !out.iter().any(|seen| seen == mode) {
            out.push(mode.to_string());
        }
    }
    out
}
