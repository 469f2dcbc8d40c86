//! Error types for date expression parsing.

use thiserror::Error;

/// Errors that can occur while resolving a date expression to an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The expression matches neither a relative nor an absolute format.
    #[error("invalid date expression '{input}': {reason}\n  Suggestion: {suggestion}")]
    Invalid {
        /// The expression as supplied by the user.
        input: String,
        /// Why the expression was rejected.
        reason: String,
        /// How to fix the issue.
        suggestion: &'static str,
    },

    /// The expression is well-formed but lands outside the representable calendar.
    #[error("date expression '{input}' is out of the supported calendar range")]
    OutOfRange {
        /// The expression as supplied by the user.
        input: String,
    },
}

const RELATIVE_SUGGESTION: &str =
    "Use a count followed by h, d, m or y (e.g. 12h, 7d, 1.5d, 3m, 1y)";
const ABSOLUTE_SUGGESTION: &str = "Use YYYY, YYYY-MM or YYYY-MM-DD (e.g. 2024, 2024-03, 2024-03-07)";

impl DateParseError {
    /// Creates an error for a relative expression (`3d`, `2m`, ...) that cannot be read.
    #[must_use]
    pub fn relative(input: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            input: input.to_string(),
            reason: reason.into(),
            suggestion: RELATIVE_SUGGESTION,
        }
    }

    /// Creates an error for an absolute expression (`2024-03`, ...) that cannot be read.
    #[must_use]
    pub fn absolute(input: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            input: input.to_string(),
            reason: reason.into(),
            suggestion: ABSOLUTE_SUGGESTION,
        }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(input: &str) -> Self {
        Self::OutOfRange {
            input: input.to_string(),
        }
    }
}
