//! Protocol constants
//!
//! Command mnemonics, the ping acknowledgement, sub-codes and field widths
//! used on the wire by the watchdog firmware. Every value here must match the
//! device byte for byte.

// ============================================================================
// Command Mnemonics (host → firmware)
// ============================================================================

/// Length of every command mnemonic in bytes.
pub const MNEMONIC_LEN: usize = 2;

/// Liveness check. Answered with [`ANS_PING`].
pub const CMD_PING: &[u8; MNEMONIC_LEN] = b"~U";
/// Switch a channel on.
pub const CMD_TURN_ON: &[u8; MNEMONIC_LEN] = b"~S";
/// Switch a channel off.
pub const CMD_TURN_OFF: &[u8; MNEMONIC_LEN] = b"~R";
/// Test action (reset, hard reset, power off) selected by a sub-code.
pub const CMD_TEST: &[u8; MNEMONIC_LEN] = b"~T";
/// Suspend or resume the watchdog timer.
pub const CMD_PAUSE: &[u8; MNEMONIC_LEN] = b"~P";
/// Short press on a channel.
pub const CMD_TOUCH: &[u8; MNEMONIC_LEN] = b"~M";
/// Status LED control.
pub const CMD_LIGHT: &[u8; MNEMONIC_LEN] = b"~L";
/// Reboot into the firmware bootloader.
pub const CMD_BOOTLOADER: &[u8; MNEMONIC_LEN] = b"~D";
/// Firmware version query.
pub const CMD_VERSION: &[u8; MNEMONIC_LEN] = b"~I";
/// Read the input channel.
pub const CMD_INPUT: &[u8; MNEMONIC_LEN] = b"~G";
/// Store a parameter block.
pub const CMD_WRITE_PARAMS: &[u8; MNEMONIC_LEN] = b"~W";
/// Fetch the stored parameter block.
pub const CMD_READ_PARAMS: &[u8; MNEMONIC_LEN] = b"~F";

// ============================================================================
// Answers (firmware → host)
// ============================================================================

/// Acknowledgement prefix sent in reply to [`CMD_PING`].
pub const ANS_PING: &[u8; MNEMONIC_LEN] = b"~A";

/// Trailing byte the firmware appends to its version string.
pub const VERSION_TERMINATOR: u8 = b'\n';

// ============================================================================
// Payload Bytes
// ============================================================================

/// Test sub-code: soft reset.
pub const TEST_RESET: u8 = b'1';
/// Test sub-code: hard reset.
pub const TEST_HARD_RESET: u8 = b'2';
/// Test sub-code: power off.
pub const TEST_POWER_OFF: u8 = b'3';

/// Channel identifier bytes.
pub const CHANNEL_1: u8 = b'1';
pub const CHANNEL_2: u8 = b'2';
pub const CHANNEL_3: u8 = b'3';

/// State identifier bytes.
pub const STATE_OFF: u8 = b'0';
pub const STATE_ON: u8 = b'1';

// ============================================================================
// Parameter Block Layout
// ============================================================================

/// Encoded parameter block length in characters.
pub const PARAMS_LEN: usize = 11;

/// Width of the temperature threshold field.
pub const TEMP_THRESHOLD_WIDTH: usize = 2;
