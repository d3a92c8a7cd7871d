//! Fixed-width hexadecimal field codec.
//!
//! Every scalar the firmware exchanges is written as upper-case ASCII hex
//! digits in a field of fixed width:
//!
//! ```text
//! width 1:  "0" .. "F"     (0 ..= 15)
//! width 2:  "00" .. "FF"   (0 ..= 255, left-padded with '0')
//! ```
//!
//! Decoding is permissive. A field that is empty or holds anything other than
//! hex digits decodes to `0` instead of failing, so a noisy reply never aborts
//! a whole parameter block.

use std::time::Duration;

/// One minute, the unit of the alarm delay.
pub const MINUTE: Duration = Duration::from_secs(60);
/// One second, the unit of the hard-reset hold and release times.
pub const SECOND: Duration = Duration::from_secs(1);
/// 100 ms tick, the unit of the press durations.
pub const TICK: Duration = Duration::from_millis(100);

/// Decode a hex field into its numeric value.
///
/// Input is case-insensitive. Returns `0` for an empty field, a field
/// containing a non-hex byte, or a value that does not fit in a `u8`.
pub fn decode_field(raw: &[u8]) -> u8 {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_hexdigit) {
        return 0;
    }
    raw.iter()
        .try_fold(0u8, |acc, &digit| {
            let nibble = (digit as char).to_digit(16)? as u8;
            acc.checked_mul(16)?.checked_add(nibble)
        })
        .unwrap_or(0)
}

/// Encode a numeric value into a field of exactly `width` hex digits.
///
/// Values are upper-case and left-padded with `'0'`. A value larger than the
/// field can hold saturates at the field maximum (`F` for width 1).
pub fn encode_field(value: u8, width: usize) -> Vec<u8> {
    let max = field_max(width);
    let text = format!("{:0width$X}", value.min(max), width = width);
    text.into_bytes()
}

/// Decode a duration field: raw value multiplied by `unit`.
pub fn decode_duration(raw: &[u8], unit: Duration) -> Duration {
    unit * u32::from(decode_field(raw))
}

/// Encode a duration as a multiple of `unit`, truncating any remainder.
pub fn encode_duration(value: Duration, unit: Duration, width: usize) -> Vec<u8> {
    let steps = value.as_nanos() / unit.as_nanos().max(1);
    let steps = u8::try_from(steps).unwrap_or(u8::MAX);
    encode_field(steps, width)
}

/// Largest value representable in `width` hex digits, capped to `u8`.
pub fn field_max(width: usize) -> u8 {
    match width {
        0 => 0,
        1 => 0x0F,
        _ => u8::MAX,
    }
}
