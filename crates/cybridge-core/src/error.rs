//! Error types for cybridge-core

use thiserror::Error;

/// Errors produced while decoding a configuration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A numeric field could not be parsed.
    #[error("malformed {field} field in config string: {text:?}")]
    BadField {
        /// Name of the field being decoded.
        field: &'static str,
        /// The offending input, starting at the field.
        text: String,
    },

    /// A numeric field parsed but is outside the legal range for the field.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Name of the field being decoded.
        field: &'static str,
        /// The decoded value.
        value: u64,
    },

    /// The SPI protocol character is not one of `M`, `T`, `N`.
    #[error("Unknown SPI protocol. Must be M/T/N: {0}")]
    UnknownProtocol(char),

    /// The config string ended before a required field.
    #[error("config string ended before {0} field")]
    UnexpectedEnd(&'static str),

    /// The SPI grammar requires the whole string to be consumed.
    #[error("trailing characters after SPI config: {0:?}")]
    TrailingInput(String),
}

/// Errors produced while assembling a bit frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A literal token (or its `:<n>` width suffix) could not be parsed.
    #[error("malformed literal token: {token:?}")]
    BadLiteral {
        /// The offending token.
        token: String,
    },

    /// The supplied tokens carry more bits than the declared frame length.
    #[error("Bit length too short for given value(s): {declared} (need {attempted})")]
    Overflow {
        /// The declared total frame length in bits.
        declared: usize,
        /// The total bit length the tokens would have required.
        attempted: usize,
    },
}

/// Errors produced by a bridge backend while talking to the device.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No matching device attached.
    #[error("bridge device not found")]
    DeviceNotFound,

    /// The device could not be opened or claimed.
    #[error("failed to open bridge device: {0}")]
    OpenFailed(String),

    /// A transfer to or from the device failed.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// The device did not complete the transfer in time.
    #[error("transfer timed out")]
    Timeout,

    /// The backend does not implement the requested bus mode.
    #[error("bus mode not supported by this bridge: {0}")]
    NotSupported(&'static str),
}
