//! cybridge-cyusb - Cypress CY7C65211 USB-serial bridge backend
//!
//! This crate drives the vendor (SCB) interface of a Cypress USB-serial
//! bridge in I2C or SPI mode. The bridge ships with VID 0x04B4 / PID
//! 0x0004 by default; boards re-enumerate with their own IDs, which the
//! front end can override.
//!
//! # Protocol Overview
//!
//! Configuration is applied with USB vendor control requests carrying a
//! 16-byte little-endian config block. Data phases are armed with a
//! vendor control request naming the target address and length, then the
//! payload moves over the bulk endpoints. After an I2C data phase the
//! status word is read back and checked for bus errors.
//!
//! # Example
//!
//! ```no_run
//! use cybridge_core::bridge::{I2cBridge, DEFAULT_TIMEOUT};
//! use cybridge_core::config::{I2cBusConfig, I2cTransferConfig};
//! use cybridge_cyusb::{CyBridge, DeviceSelector};
//!
//! let mut bridge = CyBridge::open(&DeviceSelector::default())?;
//! bridge.set_config(&I2cBusConfig::default())?;
//! let mut buf = [0u8; 2];
//! let n = bridge.read(&I2cTransferConfig::default(), &mut buf, DEFAULT_TIMEOUT)?;
//! println!("read {} bytes", n);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod device;
mod error;
mod protocol;

pub use device::{devices, BridgeDeviceInfo, CyBridge, DeviceSelector};
pub use error::{CyusbError, Result};
pub use protocol::I2cStatus;
