//! chess.com archive-batch pipeline.
//!
//! chess.com publishes a user's games as one JSON document per month. The
//! pipeline lists the months, skips those entirely outside the date window,
//! fetches the rest in order and filters every game record locally.

mod archive;
mod types;

pub use archive::{ArchiveBatchRef, YearMonth};
pub use types::{GameRecord, STANDARD_RULES, Side};

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, trace, warn};

use crate::download::constants::GAME_SEPARATOR;
use crate::download::{DownloadError, DownloadStats, GameSource, HttpClient, ProgressReporter, Server};
use crate::filter::{FilterSpec, rejections};
use types::{ArchiveBatch, ArchiveList};

/// Production endpoint of the chess.com published-data API.
pub const DEFAULT_BASE_URL: &str = "https://api.chess.com";

/// [`GameSource`] backed by chess.com monthly archives.
#[derive(Debug, Clone)]
pub struct ChessComSource {
    client: HttpClient,
    base_url: String,
}

impl ChessComSource {
    /// Creates a source talking to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Creates a source talking to another API root (used by tests).
    #[must_use]
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// URL listing every monthly archive of `username`.
    #[must_use]
    pub fn archives_url(&self, username: &str) -> String {
        format!(
            "{}/pub/player/{}/games/archives",
            self.base_url,
            urlencoding::encode(username)
        )
    }
}

#[async_trait]
impl GameSource for ChessComSource {
    fn server(&self) -> Server {
        Server::ChessCom
    }

    #[instrument(skip(self, spec, sink, progress), fields(server = "chess.com"))]
    async fn download(
        &self,
        username: &str,
        spec: &FilterSpec,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
        progress: &dyn ProgressReporter,
    ) -> Result<DownloadStats, DownloadError> {
        let spec = spec.for_server(Server::ChessCom);
        let window = spec.window();
        let mut stats = DownloadStats::default();

        let list: ArchiveList = self.client.get_json(&self.archives_url(username)).await?;
        info!(archives = list.archives.len(), "archive list received");

        for url in list.archives {
            let batch_ref = ArchiveBatchRef::parse(url);
            let label = batch_ref.label();

            if batch_ref.month().is_none() {
                warn!(url = batch_ref.url(), "archive URL has no year/month, fetching anyway");
            } else if !batch_ref.overlaps(&window) {
                debug!(batch = %label, "archive outside date window, skipping");
                stats.batches_skipped += 1;
                progress.batch_skipped(&label);
                continue;
            }

            progress.batch_started(&label);
            let batch: ArchiveBatch = self.client.get_json(batch_ref.url()).await?;
            stats.batches_fetched += 1;
            debug!(batch = %label, records = batch.games.len(), "archive fetched");

            write_batch(batch.games, &spec, sink, &mut stats, progress).await?;
        }

        progress.finished(stats.games);
        Ok(stats)
    }
}

/// Filters one month of raw records and writes the accepted PGNs in order.
async fn write_batch(
    games: Vec<serde_json::Value>,
    spec: &FilterSpec,
    sink: &mut (dyn AsyncWrite + Unpin + Send),
    stats: &mut DownloadStats,
    progress: &dyn ProgressReporter,
) -> Result<(), DownloadError> {
    for value in games {
        let Some(record) = GameRecord::from_value(value) else {
            trace!("undecodable game record");
            stats.records_rejected += 1;
            continue;
        };

        let failed = rejections(&record, spec);
        let pgn = match (failed.is_empty(), record.pgn) {
            (true, Some(pgn)) => pgn,
            _ => {
                trace!(url = record.url.as_deref().unwrap_or("-"), reasons = ?failed, "record rejected");
                stats.records_rejected += 1;
                continue;
            }
        };

        sink.write_all(pgn.as_bytes())
            .await
            .map_err(DownloadError::write)?;
        sink.write_all(GAME_SEPARATOR)
            .await
            .map_err(DownloadError::write)?;

        stats.games += 1;
        stats.bytes += (pgn.len() + GAME_SEPARATOR.len()) as u64;
        progress.games_counted(stats.games);
    }
    Ok(())
}
