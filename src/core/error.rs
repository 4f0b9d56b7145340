//! Error types for the DTRACK protocol client.

use thiserror::Error;

/// Errors raised while parsing a single line of DTRACK output.
///
/// Each carries a short excerpt of the offending line so that a skipped
/// line can be attributed to a datagram position in the logs. A parse
/// error is always scoped to one line; the frame assembler records it and
/// keeps parsing the remaining lines of the datagram.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token that should be numeric did not parse.
    #[error("malformed number {token:?} in line starting {excerpt:?}")]
    MalformedNumber {
        /// The token that failed to parse.
        token: String,
        /// First few characters of the offending line.
        excerpt: String,
    },

    /// A line had fewer whitespace tokens than its grammar requires.
    #[error("expected at least {expected} tokens in line starting {excerpt:?}")]
    MissingTokens {
        /// Minimum number of tokens the grammar requires.
        expected: usize,
        /// First few characters of the offending line.
        excerpt: String,
    },

    /// An entity declared more bracketed sections than the line contains.
    #[error("expected {expected} sections, found {found} in line starting {excerpt:?}")]
    SectionCount {
        /// Sections required by the declared entity count.
        expected: usize,
        /// Sections actually present.
        found: usize,
        /// First few characters of the offending line.
        excerpt: String,
    },

    /// Datagram bytes were not valid ASCII/UTF-8 text.
    #[error("datagram is not valid ASCII text")]
    NotAscii,
}

/// Errors in the transport layer.
#[cfg(feature = "transport")]
#[derive(Debug, Error)]
pub enum TransportError {
    /// Binding the inbound data socket failed; the data interface is
    /// disabled and every receive reports no data.
    #[error("failed to bind data socket: {0}")]
    Bind(std::io::Error),

    /// The transport was closed while an operation was pending.
    #[error("transport closed")]
    Closed,

    /// No sender has been seen yet, so no feedback target exists.
    #[error("no controller address known yet")]
    NoPeer,

    /// Sending on the feedback channel failed; the channel stays open
    /// for retry unless construction itself failed.
    #[error("feedback send failed: {0}")]
    FeedbackSend(std::io::Error),

    /// Hostname resolution for the firewall keepalive failed.
    #[error("cannot resolve controller host {host:?}: {source}")]
    Resolve {
        /// Hostname that failed to resolve.
        host: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// I/O error on the data socket.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level errors of the DTRACK client.
#[derive(Debug, Error)]
pub enum DTrackError {
    /// Parse error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Transport error.
    #[cfg(feature = "transport")]
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Take the first few characters of a line for error context.
pub(crate) fn excerpt(line: &str) -> String {
    line.chars()
        .take(crate::core::constants::ERROR_EXCERPT_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_is_bounded() {
        assert_eq!(excerpt("6d 23 [0 1.0]"), "6d 23 ");
        assert_eq!(excerpt("fr"), "fr");
    }

    #[test]
    fn parse_error_displays_excerpt() {
        let err = ParseError::MalformedNumber {
            token: "1.x".into(),
            excerpt: "6d 1 [".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.x"));
        assert!(msg.contains("6d 1 ["));
    }
}
