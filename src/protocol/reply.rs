//! Reply definitions
//!
//! Represents one parsed reply line from the bridge.

use std::collections::HashMap;
use std::fmt;

use super::ResultCode;

/// A parsed reply line
///
/// Built fresh by [`parse_reply`](super::parse_reply) for every line and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Leading token, names the command family being answered
    topic: String,

    /// Optional bare token after the topic (`REPLY`, `STATUS`, ...)
    subtopic: Option<String>,

    /// KEY=VALUE data, last occurrence of a key wins
    pairs: HashMap<String, String>,
}

impl Reply {
    pub(crate) fn new(
        topic: String,
        subtopic: Option<String>,
        pairs: HashMap<String, String>,
    ) -> Self {
        Self {
            topic,
            subtopic,
            pairs,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn subtopic(&self) -> Option<&str> {
        self.subtopic.as_deref()
    }

    pub fn pairs(&self) -> &HashMap<String, String> {
        &self.pairs
    }

    /// Look up a single value by key (case-sensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// The `RESULT` pair as a typed code, if the reply carries one
    pub fn result(&self) -> Option<ResultCode> {
        self.get("RESULT").map(ResultCode::from_wire)
    }

    /// True when `RESULT=OK`
    pub fn is_ok(&self) -> bool {
        self.result() == Some(ResultCode::Ok)
    }
}

impl fmt::Display for Reply {
    /// Renders keys in sorted order so diagnostics are stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.topic)?;
        if let Some(subtopic) = &self.subtopic {
            write!(f, " {}", subtopic)?;
        }

        let mut keys: Vec<&String> = self.pairs.keys().collect();
        keys.sort();
        for key in keys {
            let value = &self.pairs[key];
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                write!(f, " {}=\"{}\"", key, value)?;
            } else {
                write!(f, " {}={}", key, value)?;
            }
        }
        Ok(())
    }
}
