//! Command/Reply Channel
//!
//! Sends one command line and reads back exactly one reply line.

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use crate::error::{Result, SamError};
use crate::protocol::{parse_reply, Reply, MAX_REPLY_LEN};
use super::Observer;

/// Line-framed request/reply channel
///
/// The reader is created once and kept for the channel's whole lifetime.
/// Bytes the bridge sends past the current line stay in its buffer for the
/// next read; a fresh `BufReader` per call would throw them away.
///
/// Exactly one exchange is in flight at a time (`&mut self`).
///
/// A transport failure midway through an exchange leaves the stream at an
/// unknown position, so the channel marks itself broken and every later
/// call returns `ClosedConnection`.
pub struct Channel<R: Read, W: Write> {
    /// Persistent buffered reader over the transport
    reader: BufReader<R>,

    /// Buffered writer, flushed after every command
    writer: BufWriter<W>,

    /// Set after any transport error
    broken: bool,
}

impl<R: Read, W: Write> Channel<R, W> {
    /// Wrap the two halves of a duplex transport
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            broken: false,
        }
    }

    /// Write `command` + `\n`, then read and parse one reply line
    ///
    /// # Errors
    /// - `InvalidCommand` if `command` contains a line terminator
    /// - `Transport` on write/read failure or end of stream; the channel is
    ///   broken afterwards
    /// - `ClosedConnection` once the channel is broken
    /// - `MalformedReply` if the reply cannot be parsed; the offending line
    ///   is fully consumed, so the next exchange stays in step
    pub fn send_command(&mut self, command: &str, observer: Option<&dyn Observer>) -> Result<Reply> {
        self.write_line(command, observer)?;
        let line = self.read_line(observer)?;
        let reply = parse_reply(&line)?;
        tracing::trace!(topic = reply.topic(), "Reply parsed");
        Ok(reply)
    }

    /// Write one command line and flush it
    pub fn write_line(&mut self, command: &str, observer: Option<&dyn Observer>) -> Result<()> {
        self.check_usable()?;
        if command.contains(['\r', '\n']) {
            return Err(SamError::InvalidCommand(format!(
                "line terminator inside command {:?}",
                command
            )));
        }

        let written = self
            .writer
            .write_all(command.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush());
        self.note_transport(written)?;

        if let Some(observer) = observer {
            observer.sent(command);
        }
        Ok(())
    }

    /// Read one `\n`-terminated line, terminator included
    pub fn read_line(&mut self, observer: Option<&dyn Observer>) -> Result<String> {
        self.check_usable()?;

        let mut buf = Vec::new();
        let read = (&mut self.reader)
            .take(MAX_REPLY_LEN as u64)
            .read_until(b'\n', &mut buf);
        let read = self.note_transport(read)?;

        if buf.last() != Some(&b'\n') {
            if read >= MAX_REPLY_LEN {
                let skipped = self.discard_line();
                self.note_transport(skipped)?;

                let shown = String::from_utf8_lossy(&buf);
                notify_received(observer, &shown);
                let head: String = shown.chars().take(64).collect();
                return Err(SamError::malformed(
                    &head,
                    format!("reply exceeds {} bytes", MAX_REPLY_LEN),
                ));
            }
            let message = if read == 0 {
                "bridge closed the connection"
            } else {
                "bridge closed the connection mid-line"
            };
            self.broken = true;
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, message).into());
        }

        match String::from_utf8(buf) {
            Ok(line) => {
                notify_received(observer, &line);
                Ok(line)
            }
            Err(e) => {
                let shown = String::from_utf8_lossy(e.as_bytes()).into_owned();
                notify_received(observer, &shown);
                Err(SamError::malformed(&shown, "reply is not valid UTF-8"))
            }
        }
    }

    /// True once a transport error has left the stream out of step
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// The underlying reader half
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// The underlying writer half
    pub fn writer_ref(&self) -> &W {
        self.writer.get_ref()
    }

    fn check_usable(&self) -> Result<()> {
        if self.broken {
            return Err(SamError::ClosedConnection);
        }
        Ok(())
    }

    fn note_transport<T>(&mut self, result: io::Result<T>) -> Result<T> {
        result.map_err(|e| {
            self.broken = true;
            SamError::Transport(e)
        })
    }

    /// Drop input up to and including the next `\n`
    fn discard_line(&mut self) -> io::Result<()> {
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.reader.consume(pos + 1);
                    return Ok(());
                }
                None => {
                    let len = available.len();
                    self.reader.consume(len);
                }
            }
        }
    }
}

fn notify_received(observer: Option<&dyn Observer>, line: &str) {
    if let Some(observer) = observer {
        observer.received(line);
    }
}
