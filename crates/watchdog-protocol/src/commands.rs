//! Commands that can be sent to the watchdog firmware.
//!
//! A command frame is a two-byte mnemonic followed by an optional payload:
//!
//! ```text
//! +----+----+-----------------+
//! | ~  | X  | payload[0..n]   |
//! +----+----+-----------------+
//! ```

use bytes::{BufMut, BytesMut};

use crate::constants::*;
use crate::error::{ProtocolError, ProtocolResult};
use crate::params::Params;
use crate::types::{Channel, SwitchState, TestAction};

/// Commands understood by the watchdog firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Liveness check.
    Ping,
    /// Query the firmware version string.
    Version,
    /// Read the stored parameter block.
    ReadParams,
    /// Store a parameter block.
    WriteParams(Params),
    /// Short press on a relay channel.
    Touch(Channel),
    /// Switch a relay channel on.
    TurnOn(Channel),
    /// Switch a relay channel off.
    TurnOff(Channel),
    /// Suspend (`On`) or resume (`Off`) the watchdog timer.
    Pause(SwitchState),
    /// Status LED on or off.
    Light(SwitchState),
    /// Reset, hard reset or power off, all sent as the test mnemonic.
    Test(TestAction),
    /// Reboot into the firmware bootloader.
    Bootloader,
    /// Read the input channel.
    Input,
}

impl Command {
    /// Two-byte mnemonic that starts the frame.
    pub fn mnemonic(&self) -> &'static [u8; MNEMONIC_LEN] {
        match self {
            Command::Ping => CMD_PING,
            Command::Version => CMD_VERSION,
            Command::ReadParams => CMD_READ_PARAMS,
            Command::WriteParams(_) => CMD_WRITE_PARAMS,
            Command::Touch(_) => CMD_TOUCH,
            Command::TurnOn(_) => CMD_TURN_ON,
            Command::TurnOff(_) => CMD_TURN_OFF,
            Command::Pause(_) => CMD_PAUSE,
            Command::Light(_) => CMD_LIGHT,
            Command::Test(_) => CMD_TEST,
            Command::Bootloader => CMD_BOOTLOADER,
            Command::Input => CMD_INPUT,
        }
    }

    /// Human-readable command name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Version => "version",
            Command::ReadParams => "read params",
            Command::WriteParams(_) => "write params",
            Command::Touch(_) => "touch",
            Command::TurnOn(_) => "turn on",
            Command::TurnOff(_) => "turn off",
            Command::Pause(_) => "pause",
            Command::Light(_) => "light",
            Command::Test(TestAction::Reset) => "reset",
            Command::Test(TestAction::HardReset) => "hard reset",
            Command::Test(TestAction::PowerOff) => "power off",
            Command::Bootloader => "bootloader",
            Command::Input => "input",
        }
    }

    /// Payload bytes that follow the mnemonic.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Command::WriteParams(params) => params.encode(),
            Command::Touch(ch) | Command::TurnOn(ch) | Command::TurnOff(ch) => vec![ch.as_byte()],
            Command::Pause(state) | Command::Light(state) => vec![state.as_byte()],
            Command::Test(action) => vec![action.sub_code()],
            Command::Ping
            | Command::Version
            | Command::ReadParams
            | Command::Bootloader
            | Command::Input => Vec::new(),
        }
    }

    /// Whether the firmware answers this command.
    ///
    /// The test mnemonic triggers a physical action and the bootloader
    /// command reboots the device; neither sends a reply.
    pub fn expects_reply(&self) -> bool {
        !matches!(self, Command::Test(_) | Command::Bootloader)
    }

    /// Check that the command's arguments are accepted by the firmware.
    ///
    /// Touch and turn commands only drive the relay channels 1 and 2.
    pub fn validate(&self) -> ProtocolResult<()> {
        match self {
            Command::Touch(ch) | Command::TurnOn(ch) | Command::TurnOff(ch) if !ch.is_relay() => {
                Err(ProtocolError::UnsupportedChannel {
                    command: self.name(),
                    channel: *ch,
                })
            }
            _ => Ok(()),
        }
    }

    /// Encode the full frame: mnemonic followed by payload.
    pub fn encode(&self) -> Vec<u8> {
        let payload = self.payload();
        let mut buf = BytesMut::with_capacity(MNEMONIC_LEN + payload.len());
        buf.put_slice(self.mnemonic());
        buf.put_slice(&payload);
        buf.to_vec()
    }
}
