//! # watchdog-driver
//!
//! Host-side driver for the USB serial watchdog.
//!
//! This crate owns every side effect of talking to the device:
//! - [`discovery`]: finding attached watchdogs by USB vendor/product id
//! - [`transport`]: the locked open/write/settle/read/close session
//! - [`WatchDog`]: one method per device operation
//! - [`DriverConfig`] and [`ParamsFile`]: YAML configuration
//!
//! Frame building and reply validation live in `watchdog-protocol`.
//!
//! ## Example
//!
//! ```no_run
//! use watchdog_driver::{discovery, WatchDog};
//! use watchdog_protocol::{Channel, SwitchState};
//!
//! for name in discovery::enumerate()? {
//!     let dog = WatchDog::new(name);
//!     println!("{}: {}", dog.name(), dog.version()?);
//!     print!("{}", dog.read_params()?);
//!     dog.ping()?;
//!     dog.touch(Channel::One)?;
//!     dog.pause(SwitchState::Off)?;
//! }
//! # Ok::<(), watchdog_driver::WatchdogError>(())
//! ```

pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod params_file;
pub mod transport;

pub use config::{ChannelPolicy, DriverConfig};
pub use device::WatchDog;
pub use error::{Result, TransportError, WatchdogError};
pub use params_file::ParamsFile;
pub use transport::{Connection, Connector, SerialConnector, Transport};
