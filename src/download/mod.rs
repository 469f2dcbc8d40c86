//! Download plumbing shared by both game servers.
//!
//! Each server is one implementation of [`GameSource`]: "download the games
//! of a user that match a [`FilterSpec`] into a sink". The chess.com source
//! works through discrete monthly JSON batches, the lichess source copies one
//! continuous PGN stream, so they share this capability and nothing else.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pgn_downloader::download::{HttpClient, Server, SilentProgress, build_source, download_to_path};
//! use pgn_downloader::filter::FilterSpec;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let source = build_source(Server::Lichess, client);
//! let stats = download_to_path(
//!     source.as_ref(),
//!     "alice",
//!     &FilterSpec::new().with_modes(["blitz"]),
//!     Path::new("alice.pgn"),
//!     &SilentProgress,
//! )
//! .await?;
//! println!("Downloaded {} games", stats.games);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
mod output;
mod progress;

#[cfg(test)]
pub(crate) use progress::recording::RecordingProgress;

pub use client::HttpClient;
pub use error::DownloadError;
pub use output::create_exclusive;
pub use progress::{ProgressReporter, SilentProgress};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{info, instrument, warn};

use crate::chess_com::ChessComSource;
use crate::filter::FilterSpec;
use crate::lichess::LichessSource;

/// Game server to download from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Server {
    /// chess.com published-data API (monthly archives).
    ChessCom,
    /// lichess.org game export API (PGN stream).
    Lichess,
}

impl Server {
    /// Stable identifier used on the command line and in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChessCom => "chess-com",
            Self::Lichess => "lichess",
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ChessCom => "chess.com",
            Self::Lichess => "lichess",
        })
    }
}

impl FromStr for Server {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chess-com" | "chesscom" | "chess.com" => Ok(Self::ChessCom),
            "lichess" | "lichess.org" => Ok(Self::Lichess),
            other => Err(format!(
                "unknown server '{other}' (expected chess-com or lichess)"
            )),
        }
    }
}

/// Outcome of a finished download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Games written to the sink (for a stream, the number of separators seen).
    pub games: u64,
    /// Bytes written to the sink.
    pub bytes: u64,
    /// Monthly archives fetched.
    pub batches_fetched: u64,
    /// Monthly archives skipped without fetching.
    pub batches_skipped: u64,
    /// Records decoded but not selected.
    pub records_rejected: u64,
}

/// A server that can deliver a user's games filtered by a [`FilterSpec`].
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Which server this source talks to.
    fn server(&self) -> Server;

    /// Writes the matching games of `username` to `sink`.
    ///
    /// `spec` uses the public mode vocabulary; each source translates it.
    ///
    /// # Errors
    ///
    /// Any transport failure aborts the download; bytes already written stay
    /// in the sink.
    async fn download(
        &self,
        username: &str,
        spec: &FilterSpec,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
        progress: &dyn ProgressReporter,
    ) -> Result<DownloadStats, DownloadError>;
}

/// Builds the source for `server` with production endpoints.
#[must_use]
pub fn build_source(server: Server, client: HttpClient) -> Box<dyn GameSource> {
    match server {
        Server::ChessCom => Box::new(ChessComSource::new(client)),
        Server::Lichess => Box::new(LichessSource::new(client)),
    }
}

/// Downloads into a new file at `path`.
///
/// The file is created before any request is sent and must not exist yet. If
/// the download fails before a single byte reached the file, the empty file
/// is removed again; otherwise the partial file is left for the caller.
///
/// # Errors
///
/// Returns [`DownloadError::OutputExists`] without touching the existing
/// file, or whatever error aborted the download.
#[instrument(skip(source, spec, progress), fields(server = %source.server(), path = %path.display()))]
pub async fn download_to_path(
    source: &dyn GameSource,
    username: &str,
    spec: &FilterSpec,
    path: &Path,
    progress: &dyn ProgressReporter,
) -> Result<DownloadStats, DownloadError> {
    let file = create_exclusive(path).await?;
    let mut writer = BufWriter::new(file);

    match source.download(username, spec, &mut writer, progress).await {
        Ok(stats) => {
            writer
                .flush()
                .await
                .map_err(|e| DownloadError::io(path, e))?;
            info!(games = stats.games, bytes = stats.bytes, "saved games");
            Ok(stats)
        }
        Err(error) => {
            warn!(error = %error, "download aborted");
            let _ = writer.flush().await;
            drop(writer);
            output::remove_if_empty(path).await;
            Err(error)
        }
    }
}
