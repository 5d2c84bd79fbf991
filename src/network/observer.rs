//! Wire observers
//!
//! Sinks for the sent/received line echo. A client only calls its observer
//! while verbose.

use crossbeam::channel::{unbounded, Receiver, Sender};

/// Receives every line exchanged with the bridge
pub trait Observer: Send + Sync {
    /// A command line was written (without terminator)
    fn sent(&self, line: &str);

    /// A reply line was read (raw, terminator included)
    fn received(&self, line: &str);
}

/// Emits lines as `tracing` debug events on the `samwire::wire` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn sent(&self, line: &str) {
        tracing::debug!(target: "samwire::wire", ">Send>'{}'", line);
    }

    fn received(&self, line: &str) {
        tracing::debug!(target: "samwire::wire", "<Rcvd<'{}'", line.trim_end_matches(['\r', '\n']));
    }
}

/// One observed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireEvent {
    Sent(String),
    Received(String),
}

/// Forwards lines over a crossbeam channel
///
/// Events are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: Sender<WireEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, Receiver<WireEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl Observer for ChannelObserver {
    fn sent(&self, line: &str) {
        let _ = self.tx.send(WireEvent::Sent(line.to_string()));
    }

    fn received(&self, line: &str) {
        let _ = self.tx.send(WireEvent::Received(line.to_string()));
    }
}
