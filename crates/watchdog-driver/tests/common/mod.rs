//! Scripted in-memory serial device shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use watchdog_driver::{Connection, Connector, DriverConfig, WatchDog};

/// Something that happened on the fake port, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open(String),
    Write(Vec<u8>),
    Read(Vec<u8>),
    Close,
}

/// Canned outcome of one read.
pub enum Reply {
    Data(Vec<u8>),
    Fail(io::ErrorKind),
}

type Responder = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

#[derive(Default)]
struct Shared {
    replies: VecDeque<Reply>,
    events: Vec<Event>,
}

/// Connector whose connections replay scripted replies and log every event.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    shared: Arc<Mutex<Shared>>,
    responder: Option<Responder>,
    open_error: Option<io::ErrorKind>,
    write_delay: Duration,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes returned by the next read.
    pub fn reply(self, data: &[u8]) -> Self {
        self.shared.lock().replies.push_back(Reply::Data(data.to_vec()));
        self
    }

    /// Queue a failing read.
    pub fn fail_read(self, kind: io::ErrorKind) -> Self {
        self.shared.lock().replies.push_back(Reply::Fail(kind));
        self
    }

    /// Answer reads from the last written frame when no reply is queued.
    pub fn respond_with(mut self, responder: impl Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static) -> Self {
        self.responder = Some(Arc::new(responder));
        self
    }

    /// Make every open fail.
    pub fn fail_open(mut self, kind: io::ErrorKind) -> Self {
        self.open_error = Some(kind);
        self
    }

    /// Slow down writes to widen race windows.
    pub fn write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.shared.lock().events.clone()
    }

    /// Frames written, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write(data) => Some(data),
                _ => None,
            })
            .collect()
    }

    pub fn pending_replies(&self) -> usize {
        self.shared.lock().replies.len()
    }
}

impl Connector for ScriptedConnector {
    fn open(&self, port: &str, _config: &DriverConfig) -> io::Result<Box<dyn Connection>> {
        if let Some(kind) = self.open_error {
            return Err(io::Error::new(kind, "scripted open failure"));
        }
        self.shared.lock().events.push(Event::Open(port.to_string()));
        Ok(Box::new(ScriptedConnection {
            shared: Arc::clone(&self.shared),
            responder: self.responder.clone(),
            write_delay: self.write_delay,
            last_write: Vec::new(),
        }))
    }
}

struct ScriptedConnection {
    shared: Arc<Mutex<Shared>>,
    responder: Option<Responder>,
    write_delay: Duration,
    last_write: Vec<u8>,
}

impl Write for ScriptedConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.write_delay.is_zero() {
            thread::sleep(self.write_delay);
        }
        self.last_write = buf.to_vec();
        self.shared.lock().events.push(Event::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for ScriptedConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut shared = self.shared.lock();
        let data = match shared.replies.pop_front() {
            Some(Reply::Data(data)) => data,
            Some(Reply::Fail(kind)) => return Err(io::Error::new(kind, "scripted read failure")),
            None => match &self.responder {
                Some(responder) => responder(&self.last_write),
                None => Vec::new(),
            },
        };
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        shared.events.push(Event::Read(data[..n].to_vec()));
        Ok(n)
    }
}

impl Drop for ScriptedConnection {
    fn drop(&mut self) {
        self.shared.lock().events.push(Event::Close);
    }
}

/// Config with no settle delay so tests run fast.
pub fn fast_config() -> DriverConfig {
    DriverConfig {
        settle_delay_ms: 0,
        ..DriverConfig::default()
    }
}

/// Handle on `ttyACM0` wired to `connector`.
pub fn watchdog(connector: &ScriptedConnector) -> WatchDog {
    watchdog_with(connector, fast_config())
}

pub fn watchdog_with(connector: &ScriptedConnector, config: DriverConfig) -> WatchDog {
    WatchDog::with_connector("ttyACM0", config, Arc::new(connector.clone()))
}
