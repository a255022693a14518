//! Command definitions
//!
//! The fixed set of requests the ambient monitor understands.

use super::{DELIMITER, REPLY_MARKER, TERMINATOR};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Set,
}

impl CommandType {
    /// Wire keyword for this command type
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::Get => "GET",
            CommandType::Set => "SET",
        }
    }
}

/// Expected structure of the reply to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// `:REP:<NAME>:<value>:!`
    Scalar,

    /// `:REP:<NAME>:<low>:<high>:!`
    Pair,

    /// Text containing `:REP:<NAME>:!`
    Ack,
}

/// A request to the ambient monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Current temperature
    GetTemperature,

    /// Lowest and highest temperature since the last reset
    GetTemperatureExtremes,

    /// Current relative humidity
    GetHumidity,

    /// Lowest and highest humidity since the last reset
    GetHumidityExtremes,

    /// Reset the tracked temperature extremes
    ResetTemperature,

    /// Reset the tracked humidity extremes
    ResetHumidity,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::GetTemperature
            | Command::GetTemperatureExtremes
            | Command::GetHumidity
            | Command::GetHumidityExtremes => CommandType::Get,
            Command::ResetTemperature | Command::ResetHumidity => CommandType::Set,
        }
    }

    /// Command name as sent and echoed on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetTemperature => "TEMPERATURE",
            Command::GetTemperatureExtremes => "TEMPERATURE_EXTREMES",
            Command::GetHumidity => "HUMIDITY",
            Command::GetHumidityExtremes => "HUMIDITY_EXTREMES",
            Command::ResetTemperature => "TEMPERATURE_RESET",
            Command::ResetHumidity => "HUMIDITY_RESET",
        }
    }

    /// Full request string, e.g. `:GET:TEMPERATURE:!`
    pub fn wire(&self) -> String {
        format!(
            "{d}{}{d}{}{d}{}",
            self.command_type().keyword(),
            self.name(),
            TERMINATOR,
            d = DELIMITER
        )
    }

    /// Substring of the reply that confirms a SET command
    pub(crate) fn confirmation(&self) -> String {
        format!(
            "{d}{}{d}{}{d}{}",
            REPLY_MARKER,
            self.name(),
            TERMINATOR,
            d = DELIMITER
        )
    }

    /// Expected reply structure
    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            Command::GetTemperature | Command::GetHumidity => ReplyShape::Scalar,
            Command::GetTemperatureExtremes | Command::GetHumidityExtremes => ReplyShape::Pair,
            Command::ResetTemperature | Command::ResetHumidity => ReplyShape::Ack,
        }
    }
}
