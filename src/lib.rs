//! PGN Downloader Library
//!
//! This library downloads a player's game history from chess.com or lichess,
//! keeps the games that match a filter (color played, time-control mode, date
//! window) and writes them as PGN text to a single output file.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`calendar`] - Date expressions, unit boundaries and date windows
//! - [`filter`] - Selection criteria and the per-record accept/reject decision
//! - [`chess_com`] - Monthly archive pipeline with range pruning
//! - [`lichess`] - Streamed export pipeline with separator counting
//! - [`download`] - HTTP client, output file handling and the `GameSource` trait

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calendar;
pub mod chess_com;
pub mod download;
pub mod filter;
pub mod lichess;
mod user_agent;

// Re-export commonly used types
pub use calendar::{DateBound, DateParseError, DateWindow, parse_bound, parse_date};
pub use chess_com::ChessComSource;
pub use download::{
    DownloadError, DownloadStats, GameSource, HttpClient, ProgressReporter, Server,
    SilentProgress, build_source, download_to_path,
};
pub use filter::{Color, FilterSpec};
pub use lichess::LichessSource;
