//! Finding attached watchdogs by USB vendor/product id.
//!
//! No protocol traffic is sent while scanning: a port is a watchdog when its
//! USB ids match. Firmware revisions report the ids in different letter case,
//! so the comparison ignores case.

use serialport::SerialPortType;
use tracing::debug;

use crate::error::Result;

/// USB vendor id of the watchdog (STMicroelectronics).
pub const WATCHDOG_VID: &str = "0483";
/// USB product id of the watchdog.
pub const WATCHDOG_PID: &str = "a26d";

/// An attached serial device and its USB ids as hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortEntry {
    pub name: String,
    pub vid: String,
    pub pid: String,
}

impl PortEntry {
    pub fn new(name: impl Into<String>, vid: impl Into<String>, pid: impl Into<String>) -> Self {
        PortEntry {
            name: name.into(),
            vid: vid.into(),
            pid: pid.into(),
        }
    }

    /// Whether this entry carries the watchdog's USB ids.
    pub fn is_watchdog(&self) -> bool {
        self.vid.eq_ignore_ascii_case(WATCHDOG_VID) && self.pid.eq_ignore_ascii_case(WATCHDOG_PID)
    }
}

/// Names of the watchdogs in `ports`, in input order and original casing.
pub fn discover(ports: &[PortEntry]) -> Vec<String> {
    ports
        .iter()
        .filter(|port| port.is_watchdog())
        .map(|port| port.name.clone())
        .collect()
}

/// List the USB serial ports attached to this machine.
///
/// Ports without USB information (built-in UARTs, Bluetooth, PCI) are skipped.
pub fn scan_ports() -> Result<Vec<PortEntry>> {
    let ports = serialport::available_ports()?;
    let entries = ports
        .into_iter()
        .filter_map(|port| match port.port_type {
            SerialPortType::UsbPort(usb) => Some(PortEntry::new(
                port.port_name,
                format!("{:04x}", usb.vid),
                format!("{:04x}", usb.pid),
            )),
            _ => None,
        })
        .collect::<Vec<_>>();
    debug!(count = entries.len(), "usb serial ports");
    Ok(entries)
}

/// Names of every attached watchdog.
pub fn enumerate() -> Result<Vec<String>> {
    Ok(discover(&scan_ports()?))
}
