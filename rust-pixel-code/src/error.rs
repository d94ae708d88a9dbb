/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Describes an error encountered while encoding or decoding pixel codes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pixel code does not follow the `<size><label><col>[_]<color>` grammar. The reason says where it broke.
    #[error("malformed pixel code {input:?}: {reason}")]
    Format {
        /// The offending input
        input: String,
        /// What was expected
        reason: &'static str,
    },
    /// The container document is structurally unusable.
    #[error("malformed document: {0}")]
    Document(&'static str),
    /// A size, row or column lies outside the supported domain.
    #[error("{what} {value} out of range (must be below {max})")]
    Range {
        /// Which quantity was out of range
        what: &'static str,
        /// The rejected value
        value: usize,
        /// Exclusive upper bound
        max: usize,
    },
    /// A row label that is not part of the 32 symbol alphabet.
    #[error("unknown row label {0:?}")]
    UnknownLabel(char),
    /// A well formed code that contradicts the grid it was found in.
    #[error("inconsistent pixel code {code:?}: {reason}")]
    Integrity {
        /// The offending code
        code: String,
        /// How it disagrees with its grid
        reason: &'static str,
    },
    /// There was an error reading or writing the container document
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for grammar and container level format errors.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::Format { .. } | Error::Document(_) | Error::UnknownLabel(_)
        )
    }

    pub(crate) fn format(input: &str, reason: &'static str) -> Self {
        Error::Format {
            input: input.to_string(),
            reason,
        }
    }
}
