//! Protocol Module
//!
//! Defines the SAM v3 wire protocol spoken with the bridge.
//!
//! ## Framing
//! One command per line, one reply per line, every line terminated by a
//! single line feed (`\n`).
//!
//! ## Reply Grammar
//! ```text
//! <TOPIC> [<SUBTOPIC>] (<KEY>=<VALUE>)*
//!
//! HELLO REPLY RESULT=OK VERSION=3.0
//! NAMING REPLY RESULT=OK NAME="my site" VALUE=abc
//! ```
//!
//! Values may be wrapped in double quotes to embed whitespace. The quotes
//! are stripped during parsing.
//!
//! ## Handshake
//! - Request: `HELLO VERSION MIN=3.0 MAX=3.0`
//! - Success: `HELLO REPLY RESULT=OK VERSION=3.0`

mod command;
mod reply;
mod parser;
mod result;

pub use command::{Command, HELLO_TOPIC, PROTOCOL_VERSION};
pub use reply::Reply;
pub use parser::{parse_reply, MAX_REPLY_LEN};
pub use result::ResultCode;
