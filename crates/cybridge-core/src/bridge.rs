//! Bridge device traits
//!
//! A bridge backend exposes the attached device as a bus master: the
//! caller applies a configuration once, then performs a single data-phase
//! call. Backends are synchronous and blocking; one invocation of the
//! tool performs exactly one configuration followed by one transfer.

use std::time::Duration;

use crate::config::{I2cBusConfig, I2cTransferConfig, SpiBusConfig};
use crate::error::BridgeError;

/// Timeout applied to a data phase unless the caller chooses otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// An I2C master behind a bridge device.
pub trait I2cBridge {
    /// Apply the bus configuration to the bridge.
    fn set_config(&mut self, config: &I2cBusConfig) -> Result<(), BridgeError>;

    /// Read `buf.len()` bytes from the slave addressed by `xfer`.
    ///
    /// Returns the number of bytes actually received.
    fn read(
        &mut self,
        xfer: &I2cTransferConfig,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, BridgeError>;

    /// Write `data` to the slave addressed by `xfer`.
    ///
    /// Returns the number of bytes actually sent.
    fn write(
        &mut self,
        xfer: &I2cTransferConfig,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, BridgeError>;
}

/// An SPI master behind a bridge device.
pub trait SpiBridge {
    /// Apply the bus configuration to the bridge.
    fn set_config(&mut self, config: &SpiBusConfig) -> Result<(), BridgeError>;

    /// Full-duplex transfer: clock out `wbuf` while filling `rbuf`.
    ///
    /// The two buffers have the same length. Returns the number of bytes
    /// received.
    fn transfer(
        &mut self,
        wbuf: &[u8],
        rbuf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, BridgeError>;
}
