//! Error types for the watchdog driver.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use watchdog_protocol::ProtocolError;

/// Failures of a single serial exchange. None of these are retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The serial port could not be opened.
    #[error("failed to open {port}: {source}")]
    Open {
        /// Port name.
        port: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Writing the command frame failed.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// The port accepted fewer bytes than the frame holds.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite {
        /// Bytes accepted.
        written: usize,
        /// Frame length.
        expected: usize,
    },

    /// Reading the reply failed.
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// The device sent nothing back.
    #[error("no reply from device")]
    NothingRead,
}

/// Errors returned by watchdog operations.
#[derive(Debug, Error)]
pub enum WatchdogError {
    /// Serial exchange failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Reply did not match the protocol.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Listing serial ports failed.
    #[error("port enumeration failed: {0}")]
    Enumerate(#[from] serialport::Error),

    /// A configuration file could not be read or is invalid.
    #[error("config{}: {reason}", source_suffix(path))]
    Config {
        /// File path (empty for inline configuration).
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// A parameter value the block cannot store exactly.
    #[error("invalid {field}: {reason}")]
    InvalidParam {
        /// Parameter file key.
        field: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// Rendering YAML failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn source_suffix(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        String::new()
    } else {
        format!(" {}", path.display())
    }
}

/// Result type alias for watchdog operations.
pub type Result<T> = std::result::Result<T, WatchdogError>;
