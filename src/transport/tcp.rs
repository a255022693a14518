//! TCP Transport
//!
//! Talks to a monitor through a serial-over-TCP bridge (e.g. ser2net).

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::{AmbientError, Result};
use super::Transport;

/// Upper bound on bytes reported by a single availability check
const PEEK_BUFFER_SIZE: usize = 4096;

/// Transport over a TCP connection to a serial bridge
pub struct TcpTransport {
    stream: TcpStream,

    timeout: Option<Duration>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect to a bridge
    pub fn connect(addr: &str, timeout: Option<Duration>) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Self::from_stream(stream, timeout)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, timeout: Option<Duration>) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Requests are tiny; don't let Nagle hold them back
        stream.set_nodelay(true)?;
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;

        tracing::debug!("Connected to bridge at {}", peer_addr);

        Ok(Self {
            stream,
            timeout,
            peer_addr,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for TcpTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let mut filled = 0;

        while filled < n {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 && n > 0 => return Err(AmbientError::ConnectionClosed),
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                // Read timeout (Windows uses TimedOut instead of WouldBlock)
                Err(ref e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                    tracing::debug!("Read timeout from {} after {} bytes", self.peer_addr, filled);
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        buf.truncate(filled);
        Ok(buf)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let mut buf = [0u8; PEEK_BUFFER_SIZE];

        self.stream.set_nonblocking(true)?;
        let peeked = self.stream.peek(&mut buf);
        self.stream.set_nonblocking(false)?;

        match peeked {
            Ok(0) => Err(AmbientError::ConnectionClosed),
            Ok(n) => Ok(n),
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(timeout)?;
        self.stream.set_write_timeout(timeout)?;
        self.timeout = timeout;
        Ok(())
    }
}
