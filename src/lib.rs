//! # samwire
//!
//! A blocking client for the SAM v3 bridge control protocol:
//! - TCP connection to the bridge (default `127.0.0.1:7656`)
//! - Mandatory `HELLO VERSION` handshake for protocol 3.0
//! - Generic "send a command line, read one reply line" exchange
//! - Reply parsing into topic, subtopic and KEY=VALUE pairs
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │          (owns socket, verbosity flag, observer)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Handshake  │─────────▶│   Channel   │
//!   │   (HELLO)   │          │ (BufReader) │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Parser    │
//!                           │   (Reply)   │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use samwire::Client;
//!
//! # fn main() -> samwire::Result<()> {
//! let mut client = Client::open_default()?;
//! let reply = client.send_command("NAMING LOOKUP NAME=ME")?;
//! println!("{}", reply);
//! client.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SamError};
pub use config::{ClientConfig, DEFAULT_ADDRESS};
pub use client::{Client, CloseHandle};
pub use protocol::{parse_reply, Command, Reply, ResultCode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of samwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
