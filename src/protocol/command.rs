//! Command definitions
//!
//! Builds command lines sent to the bridge.

use std::fmt;

use crate::error::{Result, SamError};

/// Topic of the version negotiation exchange
pub const HELLO_TOPIC: &str = "HELLO";

/// The single protocol version this client negotiates
pub const PROTOCOL_VERSION: &str = "3.0";

/// A command line under construction
///
/// `Command::new("NAMING", "LOOKUP").arg("NAME", "ME")` renders as
/// `NAMING LOOKUP NAME=ME`. Values containing whitespace are quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    topic: String,
    subtopic: String,
    args: Vec<(String, String)>,
}

impl Command {
    pub fn new(topic: impl Into<String>, subtopic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            subtopic: subtopic.into(),
            args: Vec::new(),
        }
    }

    /// The handshake request: `HELLO VERSION MIN=3.0 MAX=3.0`
    pub fn hello() -> Self {
        Command::new(HELLO_TOPIC, "VERSION")
            .arg("MIN", PROTOCOL_VERSION)
            .arg("MAX", PROTOCOL_VERSION)
    }

    /// Append a KEY=VALUE argument
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Render the command as a single line without terminator
    ///
    /// # Errors
    /// `InvalidCommand` if a word is empty or contains whitespace, a key
    /// contains `=`, or a value contains a quote or line terminator.
    pub fn to_line(&self) -> Result<String> {
        check_word(&self.topic)?;
        check_word(&self.subtopic)?;
        for (key, value) in &self.args {
            check_word(key)?;
            if key.contains('=') {
                return Err(SamError::InvalidCommand(format!("key {:?} contains '='", key)));
            }
            if value.contains(['"', '\r', '\n']) {
                return Err(SamError::InvalidCommand(format!(
                    "value for {} cannot be encoded: {:?}",
                    key, value
                )));
            }
        }
        Ok(self.to_string())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.topic, self.subtopic)?;
        for (key, value) in &self.args {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                write!(f, " {}=\"{}\"", key, value)?;
            } else {
                write!(f, " {}={}", key, value)?;
            }
        }
        Ok(())
    }
}

fn check_word(word: &str) -> Result<()> {
    if word.is_empty() || word.chars().any(|c| c.is_whitespace() || c == '"') {
        return Err(SamError::InvalidCommand(format!("bad word {:?}", word)));
    }
    Ok(())
}
