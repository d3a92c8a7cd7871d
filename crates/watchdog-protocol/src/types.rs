//! Channel, state and mode types shared by commands and the parameter block.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProtocolError;

// ============================================================================
// Channels and States
// ============================================================================

/// A physical control channel on the watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel 1 (relay output).
    One,
    /// Channel 2 (relay output).
    Two,
    /// Channel 3 (input/output line).
    Three,
}

impl Channel {
    /// The identifier byte sent as command payload.
    pub fn as_byte(self) -> u8 {
        match self {
            Channel::One => CHANNEL_1,
            Channel::Two => CHANNEL_2,
            Channel::Three => CHANNEL_3,
        }
    }

    /// Whether the channel drives a relay (accepts touch and turn commands).
    pub fn is_relay(self) -> bool {
        matches!(self, Channel::One | Channel::Two)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

impl FromStr for Channel {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Channel::One),
            "2" => Ok(Channel::Two),
            "3" => Ok(Channel::Three),
            other => Err(ProtocolError::UnknownName {
                kind: "channel",
                value: other.to_string(),
            }),
        }
    }
}

/// On/off argument of the pause and light commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    Off,
    On,
}

impl SwitchState {
    /// The identifier byte sent as command payload.
    pub fn as_byte(self) -> u8 {
        match self {
            SwitchState::Off => STATE_OFF,
            SwitchState::On => STATE_ON,
        }
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchState::Off => write!(f, "OFF"),
            SwitchState::On => write!(f, "ON"),
        }
    }
}

impl FromStr for SwitchState {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "1" => Ok(SwitchState::On),
            "off" | "0" => Ok(SwitchState::Off),
            _ => Err(ProtocolError::UnknownName {
                kind: "state",
                value: s.to_string(),
            }),
        }
    }
}

/// Actions multiplexed onto the test mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestAction {
    /// Short press on the reset line.
    Reset,
    /// Hold, release and press sequence on the power line.
    HardReset,
    /// Hold the power line until the host switches off.
    PowerOff,
}

impl TestAction {
    /// Sub-code byte that follows the test mnemonic.
    pub fn sub_code(self) -> u8 {
        match self {
            TestAction::Reset => TEST_RESET,
            TestAction::HardReset => TEST_HARD_RESET,
            TestAction::PowerOff => TEST_POWER_OFF,
        }
    }
}

// ============================================================================
// Channel Modes
// ============================================================================

/// Operating mode of relay channels 1 and 2.
///
/// Encoded as one hex digit `0..=4`. Any other digit is kept as `Unknown` so
/// that reading and writing back a block preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelayMode {
    #[default]
    Off,
    Reset,
    Power,
    Open,
    Close,
    Unknown(u8),
}

impl RelayMode {
    /// Raw wire digit value.
    pub fn to_raw(self) -> u8 {
        match self {
            RelayMode::Off => 0,
            RelayMode::Reset => 1,
            RelayMode::Power => 2,
            RelayMode::Open => 3,
            RelayMode::Close => 4,
            RelayMode::Unknown(raw) => raw,
        }
    }

    /// Mode for a raw wire digit value.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => RelayMode::Off,
            1 => RelayMode::Reset,
            2 => RelayMode::Power,
            3 => RelayMode::Open,
            4 => RelayMode::Close,
            other => RelayMode::Unknown(other),
        }
    }
}

impl fmt::Display for RelayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelayMode::Off => "OFF",
            RelayMode::Reset => "RESET",
            RelayMode::Power => "POWER",
            RelayMode::Open => "OPEN",
            RelayMode::Close => "CLOSE",
            RelayMode::Unknown(_) => "",
        };
        f.write_str(name)
    }
}

impl FromStr for RelayMode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(RelayMode::Off),
            "reset" => Ok(RelayMode::Reset),
            "power" => Ok(RelayMode::Power),
            "open" => Ok(RelayMode::Open),
            "close" => Ok(RelayMode::Close),
            digit => match u8::from_str_radix(digit, 16) {
                Ok(raw) if raw <= 0x0F => Ok(RelayMode::from_raw(raw)),
                _ => Err(ProtocolError::UnknownName {
                    kind: "relay mode",
                    value: s.to_string(),
                }),
            },
        }
    }
}

impl TryFrom<String> for RelayMode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RelayMode> for String {
    fn from(mode: RelayMode) -> Self {
        match mode {
            RelayMode::Unknown(raw) => format!("{:X}", raw),
            known => known.to_string().to_ascii_lowercase(),
        }
    }
}

/// Operating mode of channel 3.
///
/// Encoded as one hex digit `0..=3`; other digits are kept as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineMode {
    #[default]
    Off,
    Input,
    Output,
    Temp,
    Unknown(u8),
}

impl LineMode {
    /// Raw wire digit value.
    pub fn to_raw(self) -> u8 {
        match self {
            LineMode::Off => 0,
            LineMode::Input => 1,
            LineMode::Output => 2,
            LineMode::Temp => 3,
            LineMode::Unknown(raw) => raw,
        }
    }

    /// Mode for a raw wire digit value.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => LineMode::Off,
            1 => LineMode::Input,
            2 => LineMode::Output,
            3 => LineMode::Temp,
            other => LineMode::Unknown(other),
        }
    }
}

impl fmt::Display for LineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineMode::Off => "OFF",
            LineMode::Input => "INPUT",
            LineMode::Output => "OUTPUT",
            LineMode::Temp => "TEMP",
            LineMode::Unknown(_) => "",
        };
        f.write_str(name)
    }
}

impl FromStr for LineMode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LineMode::Off),
            "input" => Ok(LineMode::Input),
            "output" => Ok(LineMode::Output),
            "temp" => Ok(LineMode::Temp),
            digit => match u8::from_str_radix(digit, 16) {
                Ok(raw) if raw <= 0x0F => Ok(LineMode::from_raw(raw)),
                _ => Err(ProtocolError::UnknownName {
                    kind: "line mode",
                    value: s.to_string(),
                }),
            },
        }
    }
}

impl TryFrom<String> for LineMode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineMode> for String {
    fn from(mode: LineMode) -> Self {
        match mode {
            LineMode::Unknown(raw) => format!("{:X}", raw),
            known => known.to_string().to_ascii_lowercase(),
        }
    }
}
