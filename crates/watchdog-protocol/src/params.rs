//! The watchdog parameter block.
//!
//! The firmware stores its configuration as an 11-character hex record. Field
//! order and widths are fixed by the firmware:
//!
//! ```text
//! offset  width  field               unit
//!   0       1    alarm               1 min
//!   1       1    reset_press         100 ms
//!   2       1    hard_reset_hold     1 s
//!   3       1    hard_reset_release  1 s
//!   4       1    hard_reset_press    100 ms
//!   5       1    channel1            RelayMode
//!   6       1    channel2            RelayMode
//!   7       1    reset_limit         count
//!   8       1    channel3            LineMode
//!   9       2    temp_threshold      degrees
//! ```

use std::fmt;
use std::ops::Range;
use std::time::Duration;

use bytes::{BufMut, BytesMut};

use crate::codec::*;
use crate::constants::{PARAMS_LEN, TEMP_THRESHOLD_WIDTH};
use crate::types::{LineMode, RelayMode};

const ALARM: Range<usize> = 0..1;
const RESET_PRESS: Range<usize> = 1..2;
const HARD_RESET_HOLD: Range<usize> = 2..3;
const HARD_RESET_RELEASE: Range<usize> = 3..4;
const HARD_RESET_PRESS: Range<usize> = 4..5;
const CHANNEL1: Range<usize> = 5..6;
const CHANNEL2: Range<usize> = 6..7;
const RESET_LIMIT: Range<usize> = 7..8;
const CHANNEL3: Range<usize> = 8..9;
const TEMP_THRESHOLD: Range<usize> = 9..11;

/// Device configuration stored in the watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Params {
    /// Time without a ping before the watchdog acts (minute resolution).
    pub alarm: Duration,
    /// Reset button press length (100 ms resolution).
    pub reset_press: Duration,
    /// Power button hold length during a hard reset (second resolution).
    pub hard_reset_hold: Duration,
    /// Pause between release and re-press during a hard reset (second resolution).
    pub hard_reset_release: Duration,
    /// Final power button press during a hard reset (100 ms resolution).
    pub hard_reset_press: Duration,
    pub channel1: RelayMode,
    pub channel2: RelayMode,
    /// Reset attempts before the watchdog gives up (0..=15).
    pub reset_limit: u8,
    pub channel3: LineMode,
    /// Temperature threshold for channel 3 in `Temp` mode.
    pub temp_threshold: u8,
}

impl Params {
    /// Decode a parameter block from its wire form.
    ///
    /// Never fails: a missing or malformed field decodes as zero.
    pub fn decode(raw: &[u8]) -> Params {
        let field = |range: Range<usize>| raw.get(range).unwrap_or(&[]);

        Params {
            alarm: decode_duration(field(ALARM), MINUTE),
            reset_press: decode_duration(field(RESET_PRESS), TICK),
            hard_reset_hold: decode_duration(field(HARD_RESET_HOLD), SECOND),
            hard_reset_release: decode_duration(field(HARD_RESET_RELEASE), SECOND),
            hard_reset_press: decode_duration(field(HARD_RESET_PRESS), TICK),
            channel1: RelayMode::from_raw(decode_field(field(CHANNEL1))),
            channel2: RelayMode::from_raw(decode_field(field(CHANNEL2))),
            reset_limit: decode_field(field(RESET_LIMIT)),
            channel3: LineMode::from_raw(decode_field(field(CHANNEL3))),
            temp_threshold: decode_field(field(TEMP_THRESHOLD)),
        }
    }

    /// Encode the block into exactly [`PARAMS_LEN`] upper-case hex characters.
    ///
    /// Durations are truncated to their field unit; values beyond a field's
    /// range saturate at the field maximum.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(PARAMS_LEN);
        buf.put_slice(&encode_duration(self.alarm, MINUTE, 1));
        buf.put_slice(&encode_duration(self.reset_press, TICK, 1));
        buf.put_slice(&encode_duration(self.hard_reset_hold, SECOND, 1));
        buf.put_slice(&encode_duration(self.hard_reset_release, SECOND, 1));
        buf.put_slice(&encode_duration(self.hard_reset_press, TICK, 1));
        buf.put_slice(&encode_field(self.channel1.to_raw(), 1));
        buf.put_slice(&encode_field(self.channel2.to_raw(), 1));
        buf.put_slice(&encode_field(self.reset_limit, 1));
        buf.put_slice(&encode_field(self.channel3.to_raw(), 1));
        buf.put_slice(&encode_field(self.temp_threshold, TEMP_THRESHOLD_WIDTH));
        debug_assert_eq!(buf.len(), PARAMS_LEN);
        buf.to_vec()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alarm:            {}", DisplayDuration(self.alarm))?;
        writeln!(f, "ResetPress:       {}", DisplayDuration(self.reset_press))?;
        writeln!(f, "HardResetHold:    {}", DisplayDuration(self.hard_reset_hold))?;
        writeln!(f, "HardResetRelease: {}", DisplayDuration(self.hard_reset_release))?;
        writeln!(f, "HardResetPress:   {}", DisplayDuration(self.hard_reset_press))?;
        writeln!(f, "Channel 1:        {}", self.channel1)?;
        writeln!(f, "Channel 2:        {}", self.channel2)?;
        writeln!(f, "Channel 3:        {}", self.channel3)?;
        writeln!(f, "ResetLimit:       {}", self.reset_limit)?;
        writeln!(f, "TempThreshold:    {}", self.temp_threshold)
    }
}

/// Compact duration rendering: `15m`, `6s`, `200ms`, `1m30s`.
struct DisplayDuration(Duration);

impl fmt::Display for DisplayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0.as_millis();
        if millis == 0 {
            return write!(f, "0s");
        }
        if millis < 1000 {
            return write!(f, "{}ms", millis);
        }
        let secs = self.0.as_secs();
        let (mins, secs) = (secs / 60, secs % 60);
        let frac = millis % 1000;
        if mins > 0 {
            write!(f, "{}m", mins)?;
        }
        if secs > 0 || frac > 0 {
            write!(f, "{}", secs)?;
            if frac > 0 {
                let digits = format!("{:03}", frac);
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            write!(f, "s")?;
        }
        Ok(())
    }
}
