//! Mock Transport
//!
//! Scripted in-memory ambient monitor.
//!
//! Each write consumes the next scripted reply. A reply may be held back for
//! a number of `bytes_available` checks to exercise reply polling, and
//! availability can be capped per check the way serial drivers report it. A
//! [`MockHandle`] shares the state so tests can inspect what the client did
//! after the transport has been moved into it.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;

use crate::error::Result;
use super::Transport;

/// A reply waiting for the next write
#[derive(Debug, Clone)]
struct Scripted {
    bytes: Bytes,

    /// Availability checks to answer with nothing before delivering
    after_polls: usize,
}

#[derive(Debug, Default)]
struct MockState {
    /// Bytes the client can read
    rx: BytesMut,

    /// Replies for upcoming writes, in order
    script: VecDeque<Scripted>,

    /// Reply for the most recent write, not yet delivered
    in_flight: Option<Scripted>,

    /// Cap on bytes reported by one availability check
    chunk: Option<usize>,

    written: Vec<Vec<u8>>,
    reads: usize,
    polls: usize,
    timeout: Option<Duration>,
}

impl MockState {
    fn deliver_due(&mut self) {
        let due = match self.in_flight.as_mut() {
            Some(reply) if reply.after_polls == 0 => true,
            Some(reply) => {
                reply.after_polls -= 1;
                false
            }
            None => false,
        };
        if due {
            if let Some(reply) = self.in_flight.take() {
                self.rx.extend_from_slice(&reply.bytes);
            }
        }
    }
}

/// Scripted in-memory transport
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a transport with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle sharing this transport's state
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Answer the next write with `reply`
    pub fn reply(self, reply: impl AsRef<[u8]>) -> Self {
        self.handle().push_reply(reply);
        self
    }

    /// Answer the next write with `reply` after `polls` empty availability checks
    pub fn reply_after(self, polls: usize, reply: impl AsRef<[u8]>) -> Self {
        self.handle().push_reply_after(polls, reply);
        self
    }

    /// Leave the next write unanswered
    pub fn silent(self) -> Self {
        self.handle().push_silence();
        self
    }

    /// Report at most `max` bytes per availability check
    pub fn chunked(self, max: usize) -> Self {
        self.state.lock().chunk = Some(max);
        self
    }

    /// Queue bytes that are readable before anything is written
    pub fn stale(self, bytes: impl AsRef<[u8]>) -> Self {
        self.handle().queue_stale(bytes);
        self
    }
}

impl Transport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock();
        state.written.push(bytes.to_vec());
        state.in_flight = state.script.pop_front();
        Ok(())
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut state = self.state.lock();
        state.reads += 1;
        let n = n.min(state.rx.len());
        Ok(state.rx.split_to(n).to_vec())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let mut state = self.state.lock();
        state.polls += 1;
        state.deliver_due();
        let available = state.rx.len();
        Ok(state.chunk.map_or(available, |max| available.min(max)))
    }

    fn timeout(&self) -> Option<Duration> {
        self.state.lock().timeout
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.state.lock().timeout = timeout;
        Ok(())
    }
}

/// Shared view of a [`MockTransport`]
#[derive(Debug, Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    /// Answer the next unanswered write with `reply`
    pub fn push_reply(&self, reply: impl AsRef<[u8]>) {
        self.push_reply_after(0, reply);
    }

    /// Answer the next unanswered write with `reply` after `polls` empty checks
    pub fn push_reply_after(&self, polls: usize, reply: impl AsRef<[u8]>) {
        self.state.lock().script.push_back(Scripted {
            bytes: Bytes::copy_from_slice(reply.as_ref()),
            after_polls: polls,
        });
    }

    /// Leave the next unanswered write without a reply
    pub fn push_silence(&self) {
        self.push_reply(b"");
    }

    /// Make bytes readable immediately
    pub fn queue_stale(&self, bytes: impl AsRef<[u8]>) {
        self.state.lock().rx.extend_from_slice(bytes.as_ref());
    }

    /// Everything written so far, decoded lossily as text
    pub fn written(&self) -> Vec<String> {
        self.state
            .lock()
            .written
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    /// Number of `read` calls so far
    pub fn reads(&self) -> usize {
        self.state.lock().reads
    }

    /// Number of `bytes_available` calls so far
    pub fn polls(&self) -> usize {
        self.state.lock().polls
    }

    /// Bytes currently readable
    pub fn pending(&self) -> usize {
        self.state.lock().rx.len()
    }

    /// Timeout last set on the transport
    pub fn timeout(&self) -> Option<Duration> {
        self.state.lock().timeout
    }
}
