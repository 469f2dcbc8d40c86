//! Constants for the download module (timeouts, chunking).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for long game histories).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Largest slice of a streamed response written to the output in one go.
pub const STREAM_CHUNK_SIZE: usize = 8 * 1024;

/// Separator appended after every game written from a monthly archive.
pub const GAME_SEPARATOR: &[u8] = b"\n\n";
