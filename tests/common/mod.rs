//! Shared test helpers
//!
//! An in-process SAM bridge stand-in that answers received lines from a
//! fixed script.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Successful handshake reply
pub const HELLO_OK: &str = "HELLO REPLY RESULT=OK VERSION=3.0\n";

/// What the bridge does after it reads one line
pub enum Step {
    /// Write these bytes verbatim (may be several lines, or a partial line)
    Reply(String),

    /// Write nothing and keep reading
    Silent,

    /// Write these bytes and close the connection
    HangUp(String),

    /// Wait, then write these bytes; the client may be gone by then
    Delayed(Duration, String),
}

impl Step {
    pub fn reply(bytes: impl Into<String>) -> Self {
        Step::Reply(bytes.into())
    }

    pub fn hang_up(bytes: impl Into<String>) -> Self {
        Step::HangUp(bytes.into())
    }
}

/// Everything the bridge observed on its single connection
#[derive(Debug)]
pub struct BridgeLog {
    /// Lines received, terminator stripped
    pub received: Vec<String>,

    /// True if the client closed its side
    pub saw_eof: bool,
}

/// Scripted bridge serving exactly one connection on `127.0.0.1:0`
pub struct MockBridge {
    addr: String,
    handle: JoinHandle<BridgeLog>,
}

impl MockBridge {
    pub fn spawn(script: Vec<Step>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

            let mut writer = stream.try_clone().unwrap();
            let mut reader = BufReader::new(stream);
            let mut received = Vec::new();
            let mut script = script.into_iter();

            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => return BridgeLog { received, saw_eof: true },
                    Ok(_) => received.push(line.trim_end_matches(['\r', '\n']).to_string()),
                    Err(_) => return BridgeLog { received, saw_eof: false },
                }

                match script.next() {
                    Some(Step::Reply(bytes)) => {
                        writer.write_all(bytes.as_bytes()).unwrap();
                        writer.flush().unwrap();
                    }
                    Some(Step::HangUp(bytes)) => {
                        writer.write_all(bytes.as_bytes()).unwrap();
                        writer.flush().unwrap();
                        return BridgeLog { received, saw_eof: false };
                    }
                    Some(Step::Delayed(delay, bytes)) => {
                        thread::sleep(delay);
                        let _ = writer.write_all(bytes.as_bytes());
                        let _ = writer.flush();
                    }
                    Some(Step::Silent) | None => {}
                }
            }
        });

        Self { addr, handle }
    }

    /// Bridge that completes the handshake and then answers each reply in turn
    pub fn with_replies(replies: &[&str]) -> Self {
        let mut script = vec![Step::reply(HELLO_OK)];
        script.extend(replies.iter().map(|r| Step::reply(*r)));
        Self::spawn(script)
    }

    pub fn addr(&self) -> String {
        self.addr.clone()
    }

    /// Wait for the connection to end and return what the bridge saw
    pub fn finish(self) -> BridgeLog {
        self.handle.join().unwrap()
    }
}

/// An address nothing is listening on
pub fn unused_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    addr
}
