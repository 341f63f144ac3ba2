//! Error types for the cyusb backend

use cybridge_core::error::BridgeError;
use thiserror::Error;

use crate::protocol::I2cStatus;

/// Result type for cyusb operations
pub type Result<T> = std::result::Result<T, CyusbError>;

/// Errors that can occur when driving the CY7C65211 bridge
#[derive(Debug, Error)]
pub enum CyusbError {
    /// No device matched the selector.
    #[error("no matching bridge device found")]
    DeviceNotFound,

    /// The device could not be opened.
    #[error("failed to open device: {0}")]
    OpenFailed(String),

    /// The vendor interface could not be claimed.
    #[error("failed to claim interface: {0}")]
    ClaimFailed(String),

    /// A USB transfer failed.
    #[error("USB transfer failed: {0}")]
    Transfer(#[from] nusb::transfer::TransferError),

    /// The bridge reported an I2C bus error after the data phase.
    #[error("I2C transfer failed, status {0:?}")]
    I2cStatus(I2cStatus),

    /// The device moved fewer bytes than the data phase required.
    #[error("short transfer: {actual} of {expected} bytes")]
    ShortTransfer {
        /// Bytes the data phase asked for.
        expected: usize,
        /// Bytes the device actually moved.
        actual: usize,
    },
}

impl From<CyusbError> for BridgeError {
    fn from(e: CyusbError) -> Self {
        match e {
            CyusbError::DeviceNotFound => BridgeError::DeviceNotFound,
            CyusbError::OpenFailed(msg) | CyusbError::ClaimFailed(msg) => {
                BridgeError::OpenFailed(msg)
            }
            other => BridgeError::TransferFailed(other.to_string()),
        }
    }
}
