//! Reply definitions
//!
//! Structurally validated replies from the ambient monitor.

/// Token delimiter
pub const DELIMITER: char = ':';

/// Marker token at position 1 of every successful reply
pub const REPLY_MARKER: &str = "REP";

/// Final token of every well-formed message
pub const TERMINATOR: &str = "!";

/// Token preceding each device-reported failure reason
pub const ERROR_MARKER: &str = "ERROR";

/// A reply that passed structural validation
///
/// Value tokens borrow from the decoded reply text and are not yet parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    /// A single value
    Scalar(&'a str),

    /// Low and high values, in reply order
    Pair(&'a str, &'a str),

    /// SET confirmation
    Ack,
}
