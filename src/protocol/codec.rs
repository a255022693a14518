//! Protocol codec
//!
//! Encoding of requests and validation of replies.
//!
//! ## Validation
//! Replies are checked structurally against the [`ReplyShape`] of the command
//! that was sent: token count, the `REP` marker, the echoed command name and
//! the `!` terminator. A well-formed reply for a different command is rejected
//! the same way as garbage. Anything rejected is handed to [`handle_error`].

use std::str::FromStr;

use crate::error::ProtocolError;
use super::{Command, Reply, ReplyShape, DELIMITER, ERROR_MARKER, REPLY_MARKER, TERMINATOR};

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command to bytes
pub fn encode_command(command: &Command) -> Vec<u8> {
    command.wire().into_bytes()
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode raw reply bytes as UTF-8
///
/// Bytes that are not valid UTF-8 cannot be a valid reply.
pub fn decode_text(bytes: &[u8]) -> Result<&str, ProtocolError> {
    std::str::from_utf8(bytes).map_err(|e| {
        tracing::warn!("Reply is not valid UTF-8: {}", e);
        ProtocolError::generic()
    })
}

/// Split reply text into tokens
///
/// Empty text yields a single empty token.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(DELIMITER).collect()
}

/// Validate decoded reply text against the reply shape of `command`
pub fn parse_reply<'a>(command: Command, text: &'a str) -> Result<Reply<'a>, ProtocolError> {
    // SET replies only need to contain the confirmation somewhere
    if command.reply_shape() == ReplyShape::Ack
        && !text.is_empty()
        && text.contains(&command.confirmation())
    {
        return Ok(Reply::Ack);
    }

    let tokens = tokenize(text);
    validate(command, &tokens).ok_or_else(|| handle_error(&tokens))
}

fn validate<'a>(command: Command, tokens: &[&'a str]) -> Option<Reply<'a>> {
    match (command.reply_shape(), tokens) {
        (ReplyShape::Scalar, &[_, REPLY_MARKER, name, value, TERMINATOR])
            if name == command.name() =>
        {
            Some(Reply::Scalar(value))
        }
        (ReplyShape::Pair, &[_, REPLY_MARKER, name, low, high, TERMINATOR])
            if name == command.name() =>
        {
            Some(Reply::Pair(low, high))
        }
        _ => None,
    }
}

/// Parse a value token of a validated reply
pub fn parse_value<T: FromStr>(command: Command, token: &str) -> Result<T, ProtocolError> {
    token.parse().map_err(|_| {
        ProtocolError::new(vec![format!(
            "invalid {} value: {:?}",
            command.name(),
            token
        )])
    })
}

// =============================================================================
// Error Replies
// =============================================================================

/// Build the error for a rejected reply
///
/// Every `ERROR` token followed by another token contributes
/// `"ERROR: <following token>"`. Without any, the error carries the generic
/// reason.
pub fn handle_error(tokens: &[&str]) -> ProtocolError {
    let reasons: Vec<String> = tokens
        .windows(2)
        .filter(|pair| pair[0] == ERROR_MARKER)
        .map(|pair| format!("{}: {}", ERROR_MARKER, pair[1]))
        .collect();

    let error = ProtocolError::new(reasons);
    tracing::warn!(reasons = ?error.reasons(), "Rejected reply");
    error
}
