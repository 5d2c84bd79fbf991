//! Handshake Protocol
//!
//! Version negotiation run once, right after the transport connects.

use std::io::{Read, Write};

use crate::error::{Result, SamError};
use crate::protocol::{Command, Reply, ResultCode, HELLO_TOPIC, PROTOCOL_VERSION};
use super::{Channel, Observer};

/// Send `HELLO VERSION MIN=3.0 MAX=3.0` and validate the reply
///
/// Returns the negotiated version. There is no retry and no fallback.
pub fn hello<R: Read, W: Write>(
    channel: &mut Channel<R, W>,
    observer: Option<&dyn Observer>,
) -> Result<String> {
    let command = Command::hello().to_line()?;
    let reply = channel.send_command(&command, observer)?;
    validate(reply)
}

/// Check a HELLO reply: topic, `RESULT=OK`, `VERSION=3.0`
pub fn validate(reply: Reply) -> Result<String> {
    if reply.topic() != HELLO_TOPIC {
        return Err(rejected(format!("unexpected reply topic {:?}", reply.topic()), reply));
    }

    match reply.result() {
        Some(ResultCode::Ok) => {}
        Some(code) => return Err(rejected(format!("bridge answered RESULT={}", code), reply)),
        None => return Err(rejected("reply has no RESULT".to_string(), reply)),
    }

    match reply.get("VERSION") {
        Some(PROTOCOL_VERSION) => Ok(PROTOCOL_VERSION.to_string()),
        Some(other) => {
            let reason = format!("bridge negotiated version {:?}, wanted {:?}", other, PROTOCOL_VERSION);
            Err(rejected(reason, reply))
        }
        None => Err(rejected("reply has no VERSION".to_string(), reply)),
    }
}

fn rejected(reason: String, reply: Reply) -> SamError {
    tracing::warn!("Handshake rejected: {}", reason);
    SamError::HandshakeFailed {
        reason,
        reply: Box::new(reply),
    }
}
