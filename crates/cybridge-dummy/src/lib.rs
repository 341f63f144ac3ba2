//! cybridge-dummy - In-memory bridge emulator for testing
//!
//! This crate provides a dummy bridge that emulates the device in memory.
//! It's useful for testing and development without real hardware: SPI
//! transfers loop MOSI back to MISO, and the I2C side models a small
//! register file addressed from offset 0.

use std::time::Duration;

use cybridge_core::bridge::{I2cBridge, SpiBridge};
use cybridge_core::config::{I2cBusConfig, I2cTransferConfig, SpiBusConfig};
use cybridge_core::error::BridgeError;

/// Size of the emulated I2C register file.
const REGISTER_FILE_SIZE: usize = 256;

/// Dummy bridge device.
///
/// Remembers the last configuration applied to each bus so tests can
/// assert on it.
pub struct DummyBridge {
    registers: [u8; REGISTER_FILE_SIZE],
    i2c_config: Option<I2cBusConfig>,
    spi_config: Option<SpiBusConfig>,
}

impl DummyBridge {
    /// Create a dummy bridge with an all-zero register file.
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_FILE_SIZE],
            i2c_config: None,
            spi_config: None,
        }
    }

    /// The I2C configuration last applied, if any.
    pub fn i2c_config(&self) -> Option<&I2cBusConfig> {
        self.i2c_config.as_ref()
    }

    /// The SPI configuration last applied, if any.
    pub fn spi_config(&self) -> Option<&SpiBusConfig> {
        self.spi_config.as_ref()
    }

    /// Direct access to the emulated register file.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }
}

impl Default for DummyBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cBridge for DummyBridge {
    fn set_config(&mut self, config: &I2cBusConfig) -> Result<(), BridgeError> {
        log::debug!("dummy: I2C config {:?}", config);
        self.i2c_config = Some(*config);
        Ok(())
    }

    fn read(
        &mut self,
        xfer: &I2cTransferConfig,
        buf: &mut [u8],
        _timeout: Duration,
    ) -> Result<usize, BridgeError> {
        log::debug!("dummy: I2C read {} bytes from 0x{:02X}", buf.len(), xfer.slave_address);
        let n = buf.len().min(self.registers.len());
        buf[..n].copy_from_slice(&self.registers[..n]);
        Ok(n)
    }

    fn write(
        &mut self,
        xfer: &I2cTransferConfig,
        data: &[u8],
        _timeout: Duration,
    ) -> Result<usize, BridgeError> {
        log::debug!("dummy: I2C write {} bytes to 0x{:02X}", data.len(), xfer.slave_address);
        let n = data.len().min(self.registers.len());
        self.registers[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

impl SpiBridge for DummyBridge {
    fn set_config(&mut self, config: &SpiBusConfig) -> Result<(), BridgeError> {
        log::debug!("dummy: SPI config {:?}", config);
        self.spi_config = Some(*config);
        Ok(())
    }

    fn transfer(
        &mut self,
        wbuf: &[u8],
        rbuf: &mut [u8],
        _timeout: Duration,
    ) -> Result<usize, BridgeError> {
        // MISO wired to MOSI
        let n = wbuf.len().min(rbuf.len());
        rbuf[..n].copy_from_slice(&wbuf[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cybridge_core::bridge::DEFAULT_TIMEOUT;
    use cybridge_core::frame::BitVector;

    #[test]
    fn spi_loopback() {
        let mut bridge = DummyBridge::new();
        SpiBridge::set_config(&mut bridge, &SpiBusConfig::default()).unwrap();

        let frame = BitVector::assemble(16, &["0xBEEF"]).unwrap();
        let mut rbuf = vec![0u8; frame.len()];
        let n = bridge
            .transfer(frame.as_bytes(), &mut rbuf, DEFAULT_TIMEOUT)
            .unwrap();

        assert_eq!(n, 2);
        assert_eq!(rbuf, frame.as_bytes());
        assert!(bridge.spi_config().is_some());
    }

    #[test]
    fn i2c_write_then_read_round_trips() {
        let mut bridge = DummyBridge::new();
        I2cBridge::set_config(&mut bridge, &I2cBusConfig::default()).unwrap();

        let xfer = I2cTransferConfig::decode("0x10:10").unwrap();
        let sent = bridge
            .write(&xfer, &[0x12, 0x34], DEFAULT_TIMEOUT)
            .unwrap();
        assert_eq!(sent, 2);

        let mut buf = [0u8; 2];
        let got = bridge.read(&xfer, &mut buf, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(got, 2);
        assert_eq!(buf, [0x12, 0x34]);
    }

    #[test]
    fn remembers_last_config() {
        let mut bridge = DummyBridge::new();
        let config = I2cBusConfig::decode("400000:0x22:11").unwrap();
        I2cBridge::set_config(&mut bridge, &config).unwrap();
        assert_eq!(bridge.i2c_config(), Some(&config));
    }
}
