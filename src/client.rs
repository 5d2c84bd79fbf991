//! Client Module
//!
//! One live, handshaken session with a SAM bridge.
//!
//! ## Lifecycle
//! 1. Dial the bridge and apply transport timeouts
//! 2. Run the `HELLO` handshake (the socket is shut down if it fails)
//! 3. Exchange commands through [`Client::send_command`]
//! 4. [`Client::close`] releases the socket; later calls fail with
//!    `ClosedConnection`

use std::fmt;
use std::io;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{Result, SamError};
use crate::network::{handshake, Channel, Observer, TracingObserver};
use crate::protocol::{Command, Reply};

/// A connection to the SAM bridge that has completed the handshake
///
/// ## Concurrency
/// Every exchange and every verbosity change takes `&mut self`, so one
/// command is in flight at a time and toggling cannot race a pending read.
/// Share a client across threads behind a `Mutex`. To abort a blocked read
/// from another thread use a [`CloseHandle`].
pub struct Client {
    /// `None` once closed
    channel: Option<Channel<TcpStream, TcpStream>>,

    /// Echo lines to the observer
    verbose: bool,

    observer: Arc<dyn Observer>,

    /// Version agreed during the handshake
    version: String,

    /// Peer address for logging
    peer_addr: String,

    /// Set by `close()`, any `CloseHandle`, or a transport failure
    closed: Arc<AtomicBool>,
}

impl Client {
    /// Connect to the default bridge at `127.0.0.1:7656`
    pub fn open_default() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Connect to the bridge at `addr` (host:port)
    pub fn open(addr: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::with_address(addr))
    }

    /// Connect using `config`, echoing through a [`TracingObserver`]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Connect using `config` and an injected observer
    ///
    /// Never returns a client whose handshake failed; the socket is shut
    /// down before the error is handed back.
    pub fn with_observer(config: ClientConfig, observer: Arc<dyn Observer>) -> Result<Self> {
        let stream = dial(&config)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.address.clone());

        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let read_stream = stream.try_clone()?;
        let mut channel = Channel::new(read_stream, stream);

        tracing::debug!("Connected to SAM bridge at {}", peer_addr);

        let echo: Option<&dyn Observer> = if config.verbose {
            Some(observer.as_ref())
        } else {
            None
        };

        let version = match handshake::hello(&mut channel, echo) {
            Ok(version) => version,
            Err(e) => {
                if let Err(shutdown_err) = shutdown(channel.get_ref()) {
                    tracing::debug!("Shutdown after failed handshake: {}", shutdown_err);
                }
                return Err(e);
            }
        };

        tracing::debug!("Handshake with {} complete, version {}", peer_addr, version);

        Ok(Self {
            channel: Some(channel),
            verbose: config.verbose,
            observer,
            version,
            peer_addr,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Switch line echo on or off
    pub fn toggle_verbose(&mut self) {
        self.verbose = !self.verbose;
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Send one command line and return the bridge's reply
    ///
    /// # Errors
    /// `ClosedConnection` immediately after close; otherwise whatever the
    /// channel reports (`Transport`, `MalformedReply`, `InvalidCommand`).
    ///
    /// A `Transport` error (including a read timeout) leaves the stream at an
    /// unknown position: the connection is shut down and every later call
    /// returns `ClosedConnection`. A late reply to the failed command can
    /// never be handed out as the answer to the next one.
    pub fn send_command(&mut self, command: &str) -> Result<Reply> {
        if self.closed.load(Ordering::Acquire) {
            self.channel = None;
            return Err(SamError::ClosedConnection);
        }

        let channel = self.channel.as_mut().ok_or(SamError::ClosedConnection)?;
        let echo = if self.verbose {
            Some(self.observer.as_ref())
        } else {
            None
        };

        tracing::trace!("Sending to {}: {}", self.peer_addr, command);
        let result = channel.send_command(command, echo);

        if channel.is_broken() {
            if let Err(e) = shutdown(channel.get_ref()) {
                tracing::debug!("Shutdown after transport failure: {}", e);
            }
            self.channel = None;
            self.closed.store(true, Ordering::Release);
            tracing::debug!("Connection to {} dropped after transport failure", self.peer_addr);
        }
        result
    }

    /// Render and send a [`Command`]
    pub fn send(&mut self, command: &Command) -> Result<Reply> {
        let line = command.to_line()?;
        self.send_command(&line)
    }

    /// A handle that can close this connection from another thread
    pub fn close_handle(&self) -> Result<CloseHandle> {
        if self.is_closed() {
            return Err(SamError::ClosedConnection);
        }
        let channel = self.channel.as_ref().ok_or(SamError::ClosedConnection)?;
        Ok(CloseHandle {
            stream: channel.get_ref().try_clone()?,
            closed: Arc::clone(&self.closed),
        })
    }

    /// Shut down and release the connection
    ///
    /// Returns `ClosedConnection` if the client was already closed, either
    /// explicitly, through a [`CloseHandle`], or after a transport failure.
    pub fn close(&mut self) -> Result<()> {
        let channel = self.channel.take().ok_or(SamError::ClosedConnection)?;
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(SamError::ClosedConnection);
        }

        shutdown(channel.get_ref())?;
        tracing::debug!("Closed connection to {}", self.peer_addr);
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_none() || self.closed.load(Ordering::Acquire)
    }

    /// Protocol version agreed during the handshake
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("peer_addr", &self.peer_addr)
            .field("version", &self.version)
            .field("verbose", &self.verbose)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Closes a [`Client`]'s connection from outside the thread using it
///
/// A read blocked in [`Client::send_command`] fails promptly with a
/// `Transport` error; later calls on the client return `ClosedConnection`.
#[derive(Debug)]
pub struct CloseHandle {
    stream: TcpStream,
    closed: Arc<AtomicBool>,
}

impl CloseHandle {
    pub fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(SamError::ClosedConnection);
        }
        shutdown(&self.stream)?;
        tracing::debug!("Connection closed through handle");
        Ok(())
    }
}

/// Dial the configured address, honouring the connect timeout
fn dial(config: &ClientConfig) -> Result<TcpStream> {
    let Some(timeout) = config.connect_timeout() else {
        return Ok(TcpStream::connect(config.address.as_str())?);
    };

    let mut last_err = None;
    for addr in config.address.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Dial {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) => Err(e.into()),
        None => Err(SamError::Config(format!(
            "address {:?} resolves to no socket addresses",
            config.address
        ))),
    }
}

/// Shut both directions down; a peer that already hung up is not an error
fn shutdown(stream: &TcpStream) -> io::Result<()> {
    match stream.shutdown(Shutdown::Both) {
        Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
        other => other,
    }
}
