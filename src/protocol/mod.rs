//! Protocol Module
//!
//! Defines the text protocol spoken by the ambient monitor.
//!
//! ## Protocol Format
//!
//! Messages are UTF-8 text, `:`-delimited, start with `:` and end with `:!`.
//!
//! ### Requests
//! ```text
//! :GET:TEMPERATURE:!
//! :GET:TEMPERATURE_EXTREMES:!
//! :GET:HUMIDITY:!
//! :GET:HUMIDITY_EXTREMES:!
//! :SET:TEMPERATURE_RESET:!
//! :SET:HUMIDITY_RESET:!
//! ```
//!
//! ### Replies
//! ```text
//! :REP:<NAME>:<value>:!
//! :REP:<NAME>:<low>:<high>:!
//! ```
//! - Scalar GET: one value (5 tokens)
//! - Extremes GET: low and high values (6 tokens)
//! - SET: any text containing `:REP:<NAME>:!`
//! - Any reply may carry `ERROR:<reason>` token pairs instead

mod command;
mod reply;
mod codec;

pub use command::{Command, CommandType, ReplyShape};
pub use reply::{Reply, DELIMITER, ERROR_MARKER, REPLY_MARKER, TERMINATOR};
pub use codec::{decode_text, encode_command, handle_error, parse_reply, parse_value, tokenize};
