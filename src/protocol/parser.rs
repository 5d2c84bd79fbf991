//! Reply parser
//!
//! Turns one raw protocol line into a [`Reply`].
//!
//! ## Tokenizing
//! ```text
//! NAMING REPLY RESULT=OK NAME="my site" VALUE=abc
//! └─┬──┘ └─┬─┘ └──┬────┘ └─────┬─────┘ └───┬───┘
//!  topic  sub    pair       pair        pair
//! ```
//!
//! ASCII whitespace separates tokens except inside a double-quoted span. Quote
//! characters are removed; there is no escape sequence for an embedded quote.

use std::collections::HashMap;

use crate::error::{Result, SamError};
use super::Reply;

/// Longest reply line accepted from the bridge, terminator included (64 KB)
pub const MAX_REPLY_LEN: usize = 64 * 1024;

/// Parse one reply line (with or without its trailing terminator)
///
/// # Errors
/// `MalformedReply` when the line is blank, a quote is left open, the topic
/// is missing, or a token after the topic/subtopic is not `KEY=VALUE`.
pub fn parse_reply(line: &str) -> Result<Reply> {
    let trimmed = line.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return Err(SamError::malformed(line, "empty reply"));
    }

    let mut tokens = tokenize(trimmed)
        .ok_or_else(|| SamError::malformed(line, "unterminated quote"))?
        .into_iter();

    let topic = match tokens.next() {
        Some(topic) if !topic.is_empty() && !topic.contains('=') => topic,
        _ => return Err(SamError::malformed(line, "missing topic")),
    };

    let mut rest: Vec<String> = tokens.collect();

    // A bare second token is a subtopic only when pairs follow it
    let subtopic = if rest.len() >= 2 && !rest[0].contains('=') {
        Some(rest.remove(0))
    } else {
        None
    };

    let mut pairs = HashMap::with_capacity(rest.len());
    for token in rest {
        let (key, value) = token.split_once('=').ok_or_else(|| {
            SamError::malformed(line, format!("token {:?} is not a KEY=VALUE pair", token))
        })?;
        if key.is_empty() {
            return Err(SamError::malformed(
                line,
                format!("token {:?} has an empty key", token),
            ));
        }
        pairs.insert(key.to_string(), value.to_string());
    }

    Ok(Reply::new(topic, subtopic, pairs))
}

/// Split on whitespace, keeping double-quoted spans inside one token.
///
/// Returns `None` if a quote is never closed.
fn tokenize(input: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return None;
    }
    if in_token {
        tokens.push(current);
    }
    Some(tokens)
}
