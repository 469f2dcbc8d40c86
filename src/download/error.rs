//! Error types for the download module.
//!
//! This module defines structured errors for both download pipelines,
//! providing context-rich error messages for debugging and user feedback.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success HTTP response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Response body was not the JSON document the endpoint promises.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        /// The URL whose body could not be decoded.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A request URL could not be built from the configured base URL.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        /// The URL text that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Output file already exists; nothing was written.
    #[error("output file {path} already exists\n  Suggestion: choose another --output path or remove the file")]
    OutputExists {
        /// The path that was refused.
        path: PathBuf,
    },

    /// File system error while writing the output file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing downloaded games to the sink failed.
    #[error("error writing downloaded games: {source}")]
    Write {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout { url: url.into() };
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Creates an output-exists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a sink write error.
    pub fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }

    /// Returns true for failures talking to a remote server.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::HttpStatus { .. } | Self::Decode { .. }
        )
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// URL or path the source error lacks.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let error = DownloadError::timeout("https://lichess.org/api/games/user/alice");
        assert!(error.to_string().contains("timeout"));
        assert!(error.to_string().contains("/api/games/user/alice"));
        assert!(error.is_transport());
    }

    #[test]
    fn test_http_status_display() {
        let error = DownloadError::http_status("https://api.chess.com/pub/player/x", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("api.chess.com"), "Expected URL in: {msg}");
        assert!(error.is_transport());
    }

    #[test]
    fn test_decode_display() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = DownloadError::decode("https://api.chess.com/archives", source);
        assert!(error.to_string().contains("unexpected response body"));
        assert!(error.is_transport());
    }

    #[test]
    fn test_output_exists_display() {
        let error = DownloadError::output_exists("/tmp/alice.pgn");
        let msg = error.to_string();
        assert!(msg.contains("/tmp/alice.pgn"), "Expected path in: {msg}");
        assert!(msg.contains("already exists"), "Expected reason in: {msg}");
        assert!(!error.is_transport());
    }

    #[test]
    fn test_invalid_url_display() {
        let source = url::Url::parse("not a base").unwrap_err();
        let error = DownloadError::invalid_url("not a base/games/user/alice", source);
        assert!(error.to_string().starts_with("invalid URL not a base"));
        assert!(!error.is_transport());
    }

    #[test]
    fn test_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/alice.pgn"), io_error);
        assert!(error.to_string().contains("/tmp/alice.pgn"));
        assert!(!error.is_transport());
    }
}
