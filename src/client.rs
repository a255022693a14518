//! Client Module
//!
//! Request/response client for the ambient monitor.
//!
//! ## Request Sequence
//! 1. Flush stale bytes left over from earlier exchanges
//! 2. Write the command
//! 3. Poll until reply bytes are queued or the timeout elapses
//! 4. Read everything queued, decode and validate
//!
//! Requests take `&mut self`, so one request is in flight per client. A failed
//! request leaves nothing behind; the next flush discards stray bytes.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::{check_poll_interval, check_timeout, Config};
use crate::error::{ProtocolError, Result};
use crate::protocol::{decode_text, encode_command, parse_reply, parse_value, Command, Reply};
use crate::transport::Transport;

/// Client for one ambient monitor
pub struct AmbientClient<T: Transport> {
    /// Exclusively owned byte stream to the device
    transport: T,

    /// Sleep between availability checks in `await_reply`
    poll_interval: Duration,

    /// Deadline for `await_reply`, mirrored to the transport on every change
    timeout: Option<Duration>,
}

impl<T: Transport> AmbientClient<T> {
    /// Create a client with the default config
    pub fn new(transport: T) -> Result<Self> {
        Self::with_config(transport, &Config::default())
    }

    /// Create a client with the given config
    ///
    /// The config's timeout is applied to the transport.
    pub fn with_config(mut transport: T, config: &Config) -> Result<Self> {
        config.validate()?;
        transport.set_timeout(config.timeout)?;

        Ok(Self {
            transport,
            poll_interval: config.poll_interval,
            timeout: config.timeout,
        })
    }

    // =========================================================================
    // Timing
    // =========================================================================

    /// Get the poll interval
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Set the poll interval
    ///
    /// Fails with `InvalidConfig` if zero, or not below a set timeout.
    pub fn set_poll_interval(&mut self, interval: Duration) -> Result<()> {
        check_poll_interval(interval, self.timeout())?;
        self.poll_interval = interval;
        Ok(())
    }

    /// Get the reply timeout (`None` waits indefinitely)
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Set the reply timeout
    ///
    /// Fails with `InvalidConfig` if set and not above the poll interval.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        check_timeout(timeout, self.poll_interval)?;
        self.transport.set_timeout(timeout)?;
        self.timeout = timeout;
        Ok(())
    }

    // =========================================================================
    // Exchange Primitives
    // =========================================================================

    /// Discard any bytes already queued on the transport
    ///
    /// Transports may report availability in chunks, so this drains until
    /// nothing is left. No read happens when nothing is queued.
    pub fn flush(&mut self) -> Result<()> {
        let mut discarded = 0;

        loop {
            let stale = self.transport.bytes_available()?;
            if stale == 0 {
                break;
            }
            let read = self.transport.read(stale)?.len();
            if read == 0 {
                break;
            }
            discarded += read;
        }

        if discarded > 0 {
            tracing::debug!("Flushed {} stale bytes", discarded);
        }
        Ok(())
    }

    /// Block until reply bytes are queued or the timeout elapses
    ///
    /// Does not fail on timeout: the empty read that follows fails validation.
    pub fn await_reply(&mut self) -> Result<()> {
        let start = Instant::now();
        let timeout = self.timeout;

        while self.transport.bytes_available()? == 0 {
            if matches!(timeout, Some(limit) if start.elapsed() >= limit) {
                tracing::debug!("No reply within {:?}", timeout);
                break;
            }
            thread::sleep(self.poll_interval);
        }

        Ok(())
    }

    /// Send a command and return the raw reply bytes
    fn exchange(&mut self, command: Command) -> Result<Vec<u8>> {
        self.flush()?;

        tracing::debug!("Sending {}", command.wire());
        self.transport.write(&encode_command(&command))?;
        self.await_reply()?;

        let available = self.transport.bytes_available()?;
        let reply = self.transport.read(available)?;
        tracing::trace!("Reply to {}: {:?}", command.name(), String::from_utf8_lossy(&reply));

        Ok(reply)
    }

    fn request_scalar<V: std::str::FromStr>(&mut self, command: Command) -> Result<V> {
        let bytes = self.exchange(command)?;
        let text = decode_text(&bytes)?;
        match parse_reply(command, text)? {
            Reply::Scalar(value) => Ok(parse_value(command, value)?),
            _ => Err(ProtocolError::generic().into()),
        }
    }

    fn request_pair<V: std::str::FromStr>(&mut self, command: Command) -> Result<(V, V)> {
        let bytes = self.exchange(command)?;
        let text = decode_text(&bytes)?;
        match parse_reply(command, text)? {
            Reply::Pair(low, high) => Ok((parse_value(command, low)?, parse_value(command, high)?)),
            _ => Err(ProtocolError::generic().into()),
        }
    }

    fn request_ack(&mut self, command: Command) -> Result<()> {
        let bytes = self.exchange(command)?;
        let text = decode_text(&bytes)?;
        parse_reply(command, text)?;
        Ok(())
    }

    // =========================================================================
    // Device Operations
    // =========================================================================

    /// Current temperature
    pub fn get_temperature(&mut self) -> Result<f64> {
        self.request_scalar(Command::GetTemperature)
    }

    /// Lowest and highest temperature since the last reset, as reported
    pub fn get_temperature_extremes(&mut self) -> Result<(f64, f64)> {
        self.request_pair(Command::GetTemperatureExtremes)
    }

    /// Current relative humidity
    pub fn get_humidity(&mut self) -> Result<i32> {
        self.request_scalar(Command::GetHumidity)
    }

    /// Lowest and highest humidity since the last reset, as reported
    pub fn get_humidity_extremes(&mut self) -> Result<(i32, i32)> {
        self.request_pair(Command::GetHumidityExtremes)
    }

    /// Reset the device's temperature extremes
    pub fn reset_temperature(&mut self) -> Result<()> {
        self.request_ack(Command::ResetTemperature)
    }

    /// Reset the device's humidity extremes
    pub fn reset_humidity(&mut self) -> Result<()> {
        self.request_ack(Command::ResetHumidity)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the client, returning the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> std::fmt::Debug for AmbientClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientClient")
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

