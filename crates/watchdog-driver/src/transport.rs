//! Serial transport with one transaction on the wire at a time.
//!
//! The watchdog link is half-duplex and the firmware only answers the last
//! command it saw, so every exchange runs as a single locked session:
//!
//! ```text
//! lock -> open -> write frame -> [sleep settle delay -> read once] -> close -> unlock
//! ```
//!
//! The port is never held open between exchanges. Closing happens when the
//! connection is dropped, which is always before the lock guard is released.

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use serialport::{DataBits, FlowControl, Parity, StopBits};
use tracing::{debug, trace};

use crate::config::DriverConfig;
use crate::error::TransportError;

/// An open byte stream to the device. Dropping it closes the port.
pub trait Connection: Read + Write + Send {}

impl<T: Read + Write + Send + ?Sized> Connection for T {}

/// Opens connections to a device by name.
pub trait Connector: Send + Sync {
    fn open(&self, port: &str, config: &DriverConfig) -> io::Result<Box<dyn Connection>>;
}

/// Opens real serial ports through the `serialport` crate (8N1, no flow control).
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialConnector;

impl Connector for SerialConnector {
    fn open(&self, port: &str, config: &DriverConfig) -> io::Result<Box<dyn Connection>> {
        let serial = serialport::new(port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .parity(Parity::None)
            .flow_control(FlowControl::None)
            .timeout(config.io_timeout())
            .open()?;
        Ok(Box::new(serial))
    }
}

/// A device transport: port name, settings and the exclusive-access lock.
pub struct Transport {
    port: String,
    config: DriverConfig,
    connector: Arc<dyn Connector>,
    lock: Mutex<()>,
}

impl Transport {
    pub fn new(port: impl Into<String>, config: DriverConfig, connector: Arc<dyn Connector>) -> Self {
        Transport {
            port: port.into(),
            config,
            connector,
            lock: Mutex::new(()),
        }
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run one write-then-optional-read transaction.
    ///
    /// Blocks until no other exchange on this transport is in flight. Returns
    /// `Ok(None)` right after the write when no reply is expected, otherwise
    /// the bytes of a single bounded read.
    pub fn exchange(&self, frame: &[u8], expect_reply: bool) -> Result<Option<Vec<u8>>, TransportError> {
        let _guard = self.lock.lock();

        let mut conn = self
            .connector
            .open(&self.port, &self.config)
            .map_err(|source| TransportError::Open {
                port: self.port.clone(),
                source,
            })?;

        debug!(port = %self.port, frame = %String::from_utf8_lossy(frame), "write");
        let written = conn.write(frame).map_err(TransportError::Write)?;
        if written < frame.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }

        if !expect_reply {
            return Ok(None);
        }

        thread::sleep(self.config.settle_delay());

        let mut buf = vec![0u8; self.config.read_buffer_len];
        let read = conn.read(&mut buf).map_err(TransportError::Read)?;
        if read == 0 {
            return Err(TransportError::NothingRead);
        }
        buf.truncate(read);
        trace!(port = %self.port, reply = ?buf, "read");

        Ok(Some(buf))
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("port", &self.port)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
