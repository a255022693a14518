//! Transport Module
//!
//! Byte-stream endpoints the client talks through.
//!
//! ## Contract
//! - `write` sends bytes to the device
//! - `read(n)` returns up to `n` queued bytes
//! - `bytes_available` reports queued bytes without blocking
//! - `timeout` bounds reads; `None` waits indefinitely
//!
//! ## Adapters
//! - [`TcpTransport`]: serial-over-TCP bridge
//! - [`MockTransport`]: scripted in-memory device

mod mock;
mod tcp;

use std::time::Duration;

use crate::error::Result;

pub use mock::{MockHandle, MockTransport};
pub use tcp::TcpTransport;

/// A byte-stream endpoint connected to an ambient monitor
pub trait Transport {
    /// Write all bytes to the device
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read up to `n` bytes
    fn read(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Number of bytes that can be read without blocking
    fn bytes_available(&mut self) -> Result<usize>;

    /// Current read timeout
    fn timeout(&self) -> Option<Duration>;

    /// Change the read timeout
    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).read(n)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }

    fn timeout(&self) -> Option<Duration> {
        (**self).timeout()
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        (**self).set_timeout(timeout)
    }
}
