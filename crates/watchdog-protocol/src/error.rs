//! Protocol error types.

use thiserror::Error;

use crate::types::Channel;

/// Errors raised while validating or building watchdog protocol frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The reply did not echo the mnemonic that was sent.
    #[error("wrong answer to {}: {}", show(expected), show(actual))]
    UnexpectedReply {
        /// Mnemonic that was sent.
        expected: Vec<u8>,
        /// Full reply as received.
        actual: Vec<u8>,
    },

    /// The ping reply did not start with the acknowledgement prefix.
    #[error("wrong ping answer: expected {}, got {}", show(expected), show(actual))]
    BadAcknowledge {
        /// Expected acknowledgement prefix.
        expected: Vec<u8>,
        /// Reply as received.
        actual: Vec<u8>,
    },

    /// The reply is shorter than the prefix it must carry.
    #[error("reply too short: expected at least {expected} bytes, got {}", actual.len())]
    ReplyTooShort {
        /// Minimum length.
        expected: usize,
        /// Reply as received.
        actual: Vec<u8>,
    },

    /// The command does not accept this channel.
    #[error("{command} does not support channel {channel}")]
    UnsupportedChannel {
        /// Command name.
        command: &'static str,
        /// Rejected channel.
        channel: Channel,
    },

    /// A name did not match any known mode or state.
    #[error("unknown {kind}: {value}")]
    UnknownName {
        /// What was being parsed.
        kind: &'static str,
        /// Input text.
        value: String,
    },
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

fn show(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
