//! Reply validation for watchdog commands.
//!
//! Every reply echoes the mnemonic of the command it answers, followed by the
//! payload. The ping command is the exception: it is answered with the
//! acknowledgement prefix `~A`.

use log::warn;

use crate::constants::*;
use crate::error::{ProtocolError, ProtocolResult};
use crate::params::Params;

/// Check that `reply` echoes `mnemonic` and return the payload after it.
///
/// The payload is never looked at when the prefix does not match.
pub fn split_reply<'a>(mnemonic: &[u8], reply: &'a [u8]) -> ProtocolResult<&'a [u8]> {
    if reply.len() < mnemonic.len() {
        warn!("short reply to {}: {:?}", String::from_utf8_lossy(mnemonic), reply);
        return Err(ProtocolError::ReplyTooShort {
            expected: mnemonic.len(),
            actual: reply.to_vec(),
        });
    }

    let (prefix, payload) = reply.split_at(mnemonic.len());
    if prefix != mnemonic {
        warn!("wrong answer to {}: {:?}", String::from_utf8_lossy(mnemonic), reply);
        return Err(ProtocolError::UnexpectedReply {
            expected: mnemonic.to_vec(),
            actual: reply.to_vec(),
        });
    }

    Ok(payload)
}

/// Check a ping reply for the acknowledgement prefix.
pub fn check_ping(reply: &[u8]) -> ProtocolResult<()> {
    match reply.get(..ANS_PING.len()) {
        Some(prefix) if prefix == ANS_PING => Ok(()),
        Some(prefix) => Err(ProtocolError::BadAcknowledge {
            expected: ANS_PING.to_vec(),
            actual: prefix.to_vec(),
        }),
        None => Err(ProtocolError::ReplyTooShort {
            expected: ANS_PING.len(),
            actual: reply.to_vec(),
        }),
    }
}

/// Version string from a version payload, without the trailing line feed.
pub fn parse_version(payload: &[u8]) -> String {
    let text = payload.strip_suffix(&[VERSION_TERMINATOR]).unwrap_or(payload);
    String::from_utf8_lossy(text).into_owned()
}

/// Parameter block from a read-params payload.
pub fn parse_params(payload: &[u8]) -> Params {
    Params::decode(payload)
}
