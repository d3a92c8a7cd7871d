//! USB Watchdog Serial Protocol
//!
//! This crate provides types and utilities for talking to the USB serial
//! watchdog firmware. It does no I/O: it builds command frames, validates
//! replies and encodes the parameter block.
//!
//! # Protocol Overview
//!
//! The firmware speaks a half-duplex, ASCII protocol at 9600 baud:
//!
//! - **Commands** (host → firmware): a 2-byte mnemonic such as `~F`,
//!   optionally followed by a payload (`~M1`, `~WF262212A050`)
//! - **Replies** (firmware → host): the same mnemonic echoed back, followed
//!   by the reply payload. Ping is answered with `~A` instead.
//! - **Parameter block**: 11 upper-case hex characters, one or two per field
//!
//! # Example
//!
//! ```rust
//! use watchdog_protocol::{split_reply, Command, Params};
//!
//! let frame = Command::ReadParams.encode();
//! assert_eq!(frame, b"~F");
//!
//! let payload = split_reply(Command::ReadParams.mnemonic(), b"~FF262212A050")?;
//! let params = Params::decode(payload);
//! assert_eq!(params.temp_threshold, 80);
//! # Ok::<(), watchdog_protocol::ProtocolError>(())
//! ```

pub mod codec;
mod commands;
mod constants;
mod error;
mod params;
mod responses;
mod types;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use params::*;
pub use responses::*;
pub use types::*;
