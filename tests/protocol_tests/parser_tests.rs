//! Parser Tests
//!
//! These tests verify:
//! - Topic, subtopic and pair extraction
//! - Quoted value handling
//! - Malformed line rejection

use samwire::{parse_reply, SamError};

// =============================================================================
// Helper Functions
// =============================================================================

fn assert_malformed(line: &str) {
    match parse_reply(line) {
        Err(SamError::MalformedReply { .. }) => {}
        other => panic!("Expected MalformedReply for {:?}, got {:?}", line, other),
    }
}

// =============================================================================
// Well-formed Replies
// =============================================================================

#[test]
fn test_parse_hello_reply() {
    let reply = parse_reply("HELLO REPLY RESULT=OK VERSION=3.0\n").unwrap();

    assert_eq!(reply.topic(), "HELLO");
    assert_eq!(reply.subtopic(), Some("REPLY"));
    assert_eq!(reply.pairs().len(), 2);
    assert_eq!(reply.get("RESULT"), Some("OK"));
    assert_eq!(reply.get("VERSION"), Some("3.0"));
}

#[test]
fn test_parse_topic_and_pairs_without_subtopic() {
    let reply = parse_reply("T K1=V1 K2=V2\n").unwrap();

    assert_eq!(reply.topic(), "T");
    assert_eq!(reply.subtopic(), None);
    assert_eq!(reply.get("K1"), Some("V1"));
    assert_eq!(reply.get("K2"), Some("V2"));
    assert_eq!(reply.pairs().len(), 2);
}

#[test]
fn test_parse_quoted_value_keeps_inner_space() {
    let reply = parse_reply("NAMING REPLY RESULT=OK NAME=\"my site\" VALUE=abc\n").unwrap();

    assert_eq!(reply.topic(), "NAMING");
    assert_eq!(reply.get("RESULT"), Some("OK"));
    assert_eq!(reply.get("NAME"), Some("my site"));
    assert_eq!(reply.get("VALUE"), Some("abc"));
    assert_eq!(reply.pairs().len(), 3);
}

#[test]
fn test_parse_quoted_value_with_multiple_spaces() {
    let reply = parse_reply("SESSION STATUS RESULT=I2P_ERROR MESSAGE=\"tunnel  build   failed\"").unwrap();
    assert_eq!(reply.get("MESSAGE"), Some("tunnel  build   failed"));
}

#[test]
fn test_parse_empty_quoted_value() {
    let reply = parse_reply("X REPLY MESSAGE=\"\"\n").unwrap();
    assert_eq!(reply.get("MESSAGE"), Some(""));
}

#[test]
fn test_parse_empty_unquoted_value() {
    let reply = parse_reply("X REPLY MESSAGE=\n").unwrap();
    assert_eq!(reply.get("MESSAGE"), Some(""));
}

#[test]
fn test_parse_topic_only() {
    let reply = parse_reply("PONG\n").unwrap();

    assert_eq!(reply.topic(), "PONG");
    assert_eq!(reply.subtopic(), None);
    assert!(reply.pairs().is_empty());
}

#[test]
fn test_parse_value_split_on_first_equals() {
    let reply = parse_reply("DEST REPLY PUB=abc=def== PRIV=x=\n").unwrap();
    assert_eq!(reply.get("PUB"), Some("abc=def=="));
    assert_eq!(reply.get("PRIV"), Some("x="));
}

#[test]
fn test_parse_duplicate_key_last_wins() {
    let reply = parse_reply("X REPLY A=1 A=2\n").unwrap();
    assert_eq!(reply.get("A"), Some("2"));
    assert_eq!(reply.pairs().len(), 1);
}

#[test]
fn test_parse_keys_are_case_sensitive() {
    let reply = parse_reply("X REPLY Key=1 KEY=2\n").unwrap();
    assert_eq!(reply.get("Key"), Some("1"));
    assert_eq!(reply.get("KEY"), Some("2"));
    assert_eq!(reply.get("key"), None);
}

#[test]
fn test_parse_ignores_surrounding_whitespace_and_crlf() {
    let reply = parse_reply("  HELLO   REPLY  RESULT=OK\tVERSION=3.0 \r\n").unwrap();
    assert_eq!(reply.topic(), "HELLO");
    assert_eq!(reply.subtopic(), Some("REPLY"));
    assert_eq!(reply.get("VERSION"), Some("3.0"));
}

#[test]
fn test_parse_without_terminator() {
    let with = parse_reply("HELLO REPLY RESULT=OK VERSION=3.0\n").unwrap();
    let without = parse_reply("HELLO REPLY RESULT=OK VERSION=3.0").unwrap();
    assert_eq!(with, without);
}

#[test]
fn test_parse_is_idempotent() {
    let line = "STREAM STATUS RESULT=CANT_REACH_PEER MESSAGE=\"no route\"\n";
    let first = parse_reply(line).unwrap();
    let second = parse_reply(line).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_display_is_stable() {
    let reply = parse_reply("NAMING REPLY VALUE=abc NAME=\"my site\" RESULT=OK\n").unwrap();
    assert_eq!(
        reply.to_string(),
        "NAMING REPLY NAME=\"my site\" RESULT=OK VALUE=abc"
    );
}

// =============================================================================
// Malformed Replies
// =============================================================================

#[test]
fn test_empty_line_is_malformed() {
    assert_malformed("");
    assert_malformed("\n");
    assert_malformed("   \r\n");
}

#[test]
fn test_token_without_equals_is_malformed() {
    assert_malformed("X BADTOKEN\n");
}

#[test]
fn test_bare_token_after_pairs_is_malformed() {
    assert_malformed("X REPLY RESULT=OK STRAY\n");
}

#[test]
fn test_second_bare_token_after_subtopic_is_malformed() {
    assert_malformed("X REPLY EXTRA RESULT=OK\n");
}

#[test]
fn test_empty_key_is_malformed() {
    assert_malformed("X REPLY =value\n");
}

#[test]
fn test_unterminated_quote_is_malformed() {
    assert_malformed("X REPLY NAME=\"my site\n");
}

#[test]
fn test_pair_as_topic_is_malformed() {
    assert_malformed("RESULT=OK VERSION=3.0\n");
}

#[test]
fn test_empty_quoted_topic_is_malformed() {
    assert_malformed("\"\" RESULT=OK\n");
}

#[test]
fn test_malformed_error_carries_line() {
    let err = parse_reply("X BADTOKEN\n").unwrap_err();
    match err {
        SamError::MalformedReply { line, reason } => {
            assert_eq!(line, "X BADTOKEN\n");
            assert!(reason.contains("BADTOKEN"));
        }
        other => panic!("Expected MalformedReply, got {:?}", other),
    }
}

// =============================================================================
// Whitespace Handling
// =============================================================================

#[test]
fn test_only_ascii_whitespace_separates_tokens() {
    // U+00A0 (no-break space) is part of the value, not a separator
    let reply = parse_reply("X REPLY NAME=my\u{00A0}site RESULT=OK\n").unwrap();
    assert_eq!(reply.get("NAME"), Some("my\u{00A0}site"));
    assert_eq!(reply.get("RESULT"), Some("OK"));
}

#[test]
fn test_unicode_whitespace_is_not_trimmed() {
    let reply = parse_reply("PONG\u{2003}\n").unwrap();
    assert_eq!(reply.topic(), "PONG\u{2003}");
}
