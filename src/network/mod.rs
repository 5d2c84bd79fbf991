//! Network Module
//!
//! Command/reply exchange over an established transport.
//!
//! ## Architecture
//! - `Channel` owns one persistent buffered reader and writer
//! - `handshake` runs version negotiation through the channel
//! - `Observer` receives the raw lines when verbosity is enabled

mod channel;
mod observer;
pub mod handshake;

pub use channel::Channel;
pub use observer::{ChannelObserver, Observer, TracingObserver, WireEvent};
