//! CY7C65211 vendor protocol constants and wire encodings
//!
//! Request codes and config block layouts follow the vendor serial SDK
//! the bridge firmware speaks. Configuration travels in 16-byte
//! little-endian blocks over control transfers; data phases use the bulk
//! endpoints.

#![allow(dead_code)]

use bitflags::bitflags;
use cybridge_core::config::{I2cBusConfig, I2cTransferConfig, SpiBusConfig, SpiProtocol};

// USB device identifiers (unconfigured bridge)
pub const CYUSB_VID: u16 = 0x04B4;
pub const CYUSB_PID: u16 = 0x0004;

// Bulk endpoints of the vendor interface
pub const BULK_OUT_EP: u8 = 0x01;
pub const BULK_IN_EP: u8 = 0x82;

// Vendor request codes
pub const CY_I2C_GET_CONFIG_CMD: u8 = 0xC4;
pub const CY_I2C_SET_CONFIG_CMD: u8 = 0xC5;
pub const CY_I2C_WRITE_CMD: u8 = 0xC6;
pub const CY_I2C_READ_CMD: u8 = 0xC7;
pub const CY_I2C_GET_STATUS_CMD: u8 = 0xC8;
pub const CY_I2C_RESET_CMD: u8 = 0xC9;
pub const CY_SPI_GET_CONFIG_CMD: u8 = 0xCA;
pub const CY_SPI_SET_CONFIG_CMD: u8 = 0xCB;
pub const CY_SPI_READ_WRITE_CMD: u8 = 0xCC;

/// Serial communication block index, carried in the high bit of wValue.
pub const CY_SCB_INDEX_POS: u16 = 15;

/// Size of a config block on the wire.
pub const CONFIG_LEN: usize = 16;

bitflags! {
    /// I2C status word reported by [`CY_I2C_GET_STATUS_CMD`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct I2cStatus: u8 {
        /// The last transfer ended in a bus error.
        const ERROR            = 1 << 0;
        /// Bus arbitration was lost to another master.
        const ARBITRATION_LOST = 1 << 1;
        /// The slave NAKed a byte.
        const NAK              = 1 << 2;
        /// The bus is hung (SDA or SCL stuck).
        const BUS_HANG         = 1 << 3;
    }
}

/// wValue carrying the SCB index for configuration requests.
pub fn scb_value(scb: u8) -> u16 {
    u16::from(scb) << CY_SCB_INDEX_POS
}

/// wValue for an I2C data phase: slave address in the high byte, framing
/// bits (stop, NAK) in the low byte.
pub fn i2c_transfer_value(xfer: &I2cTransferConfig) -> u16 {
    let mut flags = 0u16;
    if xfer.is_stop_bit {
        flags |= 1 << 0;
    }
    if xfer.is_nak_bit {
        flags |= 1 << 1;
    }
    u16::from(xfer.slave_address) << 8 | flags
}

/// Serialize an I2C bus configuration into its wire block.
pub fn encode_i2c_config(config: &I2cBusConfig) -> [u8; CONFIG_LEN] {
    let mut block = [0u8; CONFIG_LEN];
    block[0..4].copy_from_slice(&config.frequency.to_le_bytes());
    block[4] = config.slave_address;
    block[5] = config.is_master.into();
    block[6] = config.is_clock_stretch.into();
    block
}

/// Serialize an SPI bus configuration into its wire block.
pub fn encode_spi_config(config: &SpiBusConfig) -> [u8; CONFIG_LEN] {
    let mut block = [0u8; CONFIG_LEN];
    block[0..4].copy_from_slice(&config.frequency.to_le_bytes());
    block[4] = config.data_width;
    block[5] = match config.protocol {
        SpiProtocol::Motorola => 0,
        SpiProtocol::Ti => 1,
        SpiProtocol::Ns => 2,
    };
    block[6] = config.is_msb_first.into();
    block[7] = config.is_master.into();
    block[8] = config.is_continuous_mode.into();
    block[9] = config.is_select_precede.into();
    block[10] = config.is_cpha.into();
    block[11] = config.is_cpol.into();
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2c_config_block_layout() {
        let block = encode_i2c_config(&I2cBusConfig {
            frequency: 100_000,
            slave_address: 0x10,
            is_master: true,
            is_clock_stretch: false,
        });
        assert_eq!(&block[0..4], &100_000u32.to_le_bytes());
        assert_eq!(block[4], 0x10);
        assert_eq!(block[5], 1);
        assert_eq!(block[6], 0);
        assert!(block[7..].iter().all(|&b| b == 0));
    }

    #[test]
    fn spi_config_block_layout() {
        let config = SpiBusConfig::decode("1000000:12:T:010101").unwrap();
        let block = encode_spi_config(&config);
        assert_eq!(&block[0..4], &1_000_000u32.to_le_bytes());
        assert_eq!(block[4], 12);
        assert_eq!(block[5], 1); // TI framing
        assert_eq!(
            &block[6..12],
            &[0, 1, 0, 1, 0, 1],
            "flags in grammar order"
        );
    }

    #[test]
    fn i2c_transfer_value_packs_address_and_flags() {
        let xfer = I2cTransferConfig {
            slave_address: 0x50,
            is_stop_bit: true,
            is_nak_bit: false,
        };
        assert_eq!(i2c_transfer_value(&xfer), 0x5001);

        let xfer = I2cTransferConfig::decode("0x10:00").unwrap();
        assert_eq!(i2c_transfer_value(&xfer), 0x1000);
    }
}
