//! lichess stream pipeline.
//!
//! lichess applies every filter server-side and answers with one PGN stream.
//! The body is copied to the sink as it arrives, never held in memory as a
//! whole, and games are counted on the fly with a [`StreamCounter`].

mod stream;

pub use stream::{StreamCounter, count_separators};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};
use url::Url;

use crate::download::constants::STREAM_CHUNK_SIZE;
use crate::download::{DownloadError, DownloadStats, GameSource, HttpClient, ProgressReporter, Server};
use crate::filter::FilterSpec;

/// Production root of the lichess API.
pub const DEFAULT_BASE_URL: &str = "https://lichess.org/api";

/// Media type of the PGN export.
pub const PGN_MEDIA_TYPE: &str = "application/x-chess-pgn";

const STREAM_LABEL: &str = "game stream";

/// [`GameSource`] backed by the lichess game export endpoint.
#[derive(Debug, Clone)]
pub struct LichessSource {
    client: HttpClient,
    base_url: String,
}

impl LichessSource {
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

    /// Export URL for `username` with `spec` encoded as query parameters.
    ///
    /// # Errors
    ///
    /// Fails only when the configured base URL is not a valid URL.
    pub fn export_url(&self, username: &str, spec: &FilterSpec) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}/games/user/{}",
            self.base_url,
            urlencoding::encode(username)
        ))?;

        {
            let mut query = url.query_pairs_mut();
            let window = spec.window();
            if let Some(since) = window.lower().timestamp_millis() {
                query.append_pair("since", &since.to_string());
            }
            if let Some(until) = window.upper().timestamp_millis() {
                query.append_pair("until", &until.to_string());
            }
            if let Some(color) = spec.color() {
                query.append_pair("color", color.as_str());
            }
            if !spec.modes().is_empty() {
                query.append_pair("perfType", &spec.modes().join(","));
            }
            query.append_pair("sort", "dateAsc");
        }

        Ok(url)
    }
}

#[async_trait]
impl GameSource for LichessSource {
    fn server(&self) -> Server {
        Server::Lichess
    }

    #[instrument(skip(self, spec, sink, progress), fields(server = "lichess"))]
    async fn download(
        &self,
        username: &str,
        spec: &FilterSpec,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
        progress: &dyn ProgressReporter,
    ) -> Result<DownloadStats, DownloadError> {
        let spec = spec.for_server(Server::Lichess);
        let url = self.export_url(username, &spec).map_err(|e| {
            DownloadError::invalid_url(format!("{}/games/user/{username}", self.base_url), e)
        })?;
        let url = url.as_str();
        debug!(url, "requesting game export");

        progress.batch_started(STREAM_LABEL);
        let response = self.client.get(url, Some(PGN_MEDIA_TYPE)).await?;

        let mut stats = DownloadStats::default();
        let mut counter = StreamCounter::new();
        let mut body = response.bytes_stream();

        while let Some(next) = body.next().await {
            let bytes = next.map_err(|e| DownloadError::network(url, e))?;
            for chunk in bytes.chunks(STREAM_CHUNK_SIZE) {
                sink.write_all(chunk).await.map_err(DownloadError::write)?;
                stats.bytes += chunk.len() as u64;

                let before = counter.count();
                if counter.count_chunk(chunk) != before {
                    progress.games_counted(counter.count());
                }
            }
        }

        stats.games = counter.count();
        stats.batches_fetched = 1;
        info!(games = stats.games, bytes = stats.bytes, "game stream finished");
        progress.finished(stats.games);
        Ok(stats)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::calendar::{DateBound, parse_absolute_date};
    use crate::filter::Color;

    fn source() -> LichessSource {
        LichessSource::with_base_url(HttpClient::new().unwrap(), "http://localhost:8080/api/")
    }

    #[test]
    fn test_export_url_without_filters_only_sorts() {
        let url = source().export_url("alice", &FilterSpec::new()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/games/user/alice?sort=dateAsc"
        );
    }

    #[test]
    fn test_export_url_carries_every_filter() {
        let lower = parse_absolute_date("2024-01-01", false).unwrap();
        let upper = parse_absolute_date("2024-01-31", true).unwrap();
        let spec = FilterSpec::new()
            .with_color(Color::Black, "alice")
            .with_modes(["blitz", "correspondence"])
            .with_window(DateBound::At(lower), DateBound::At(upper));

        let url = source().export_url("alice", &spec).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            pairs,
            vec![
                ("since".to_string(), "1704067200000".to_string()),
                ("until".to_string(), "1706745599999".to_string()),
                ("color".to_string(), "black".to_string()),
                ("perfType".to_string(), "blitz,correspondence".to_string()),
                ("sort".to_string(), "dateAsc".to_string()),
            ]
        );
    }

    #[test]
    fn test_export_url_omits_unbounded_side() {
        let lower = parse_absolute_date("2024", false).unwrap();
        let spec = FilterSpec::new().with_window(DateBound::At(lower), DateBound::Unbounded);
        let url = source().export_url("alice", &spec).unwrap();
        assert_eq!(url.query(), Some("since=1704067200000&sort=dateAsc"));
    }

    #[test]
    fn test_default_base_url() {
        let source = LichessSource::new(HttpClient::new().unwrap());
        let url = source.export_url("Bob", &FilterSpec::new()).unwrap();
        assert_eq!(url.path(), "/api/games/user/Bob");
        assert_eq!(url.host_str(), Some("lichess.org"));
    }
}
