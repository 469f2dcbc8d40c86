//! Game counting over a PGN byte stream.
//!
//! lichess ends every game with a blank line, so the number of games is the
//! number of non-overlapping `"\n\n"` pairs. Pairs may straddle chunk
//! boundaries, so the last byte of each chunk is carried into the next one
//! whenever it is the unpaired first half of a separator. The total never
//! depends on how the stream was split.

/// Counts game separators across consecutive chunks of one stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamCounter {
    carry: Option<u8>,
    count: u64,
}

impl StreamCounter {
    /// Creates a counter for a fresh stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next chunk and returns the running total.
    pub fn count_chunk(&mut self, chunk: &[u8]) -> u64 {
        let (found, carry) = count_separators(chunk, self.carry);
        self.count += found;
        self.carry = carry;
        self.count
    }

    /// Separators seen so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Counts non-overlapping `"\n\n"` pairs in `chunk`.
///
/// `carry` is the last byte of the previous chunk when that byte is an
/// unpaired `'\n'`, and `None` otherwise (including before the first chunk).
/// Returns the pairs found and the carry for the next chunk.
#[must_use]
pub fn count_separators(chunk: &[u8], carry: Option<u8>) -> (u64, Option<u8>) {
    let mut found = 0;
    let mut pending = carry == Some(b'\n');
    for &byte in chunk {
        if byte == b'\n' {
            if pending {
                found += 1;
            }
            pending = !pending;
        } else {
            pending = false;
        }
    }
    (found, pending.then_some(b'\n'))
}
