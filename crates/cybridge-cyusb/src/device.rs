//! CY7C65211 device enumeration and bridge implementation

use std::time::Duration;

use cybridge_core::bridge::{I2cBridge, SpiBridge, DEFAULT_TIMEOUT};
use cybridge_core::config::{I2cBusConfig, I2cTransferConfig, SpiBusConfig};
use cybridge_core::error::BridgeError;
use futures_lite::future::block_on;
use nusb::transfer::{Control, ControlType, Recipient, RequestBuffer};
use nusb::Interface;

use crate::error::{CyusbError, Result};
use crate::protocol::*;

/// Selects which attached device to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSelector {
    /// USB vendor ID to match.
    pub vid: u16,
    /// USB product ID to match.
    pub pid: u16,
    /// Which match to take if several devices carry the same IDs.
    pub index: usize,
}

impl Default for DeviceSelector {
    fn default() -> Self {
        Self {
            vid: CYUSB_VID,
            pid: CYUSB_PID,
            index: 0,
        }
    }
}

/// Summary of one attached USB device, yielded by [`devices`].
#[derive(Debug, Clone)]
pub struct BridgeDeviceInfo {
    /// USB vendor ID.
    pub vid: u16,
    /// USB product ID.
    pub pid: u16,
    /// Manufacturer string descriptor, if the device reports one.
    pub manufacturer: Option<String>,
    /// Product string descriptor, if the device reports one.
    pub product: Option<String>,
    /// Serial number string descriptor, if the device reports one.
    pub serial: Option<String>,
}

/// Enumerate all attached USB devices.
///
/// This is the enumeration query the front end's `list` command walks;
/// callers filter it however they like (the C tool's scan callback,
/// turned into an iterator).
pub fn devices() -> Result<impl Iterator<Item = BridgeDeviceInfo>> {
    let iter = nusb::list_devices().map_err(|e| CyusbError::OpenFailed(e.to_string()))?;
    Ok(iter.map(|info| BridgeDeviceInfo {
        vid: info.vendor_id(),
        pid: info.product_id(),
        manufacturer: info.manufacturer_string().map(str::to_owned),
        product: info.product_string().map(str::to_owned),
        serial: info.serial_number().map(str::to_owned),
    }))
}

/// An open CY7C65211 bridge.
///
/// Implements both bus-master traits; which one is meaningful depends on
/// the mode the bridge's SCB is configured for.
pub struct CyBridge {
    interface: Interface,
    scb: u8,
}

impl CyBridge {
    /// Open the device matching `selector` and claim its vendor interface.
    pub fn open(selector: &DeviceSelector) -> Result<Self> {
        let info = nusb::list_devices()
            .map_err(|e| CyusbError::OpenFailed(e.to_string()))?
            .filter(|d| d.vendor_id() == selector.vid && d.product_id() == selector.pid)
            .nth(selector.index)
            .ok_or(CyusbError::DeviceNotFound)?;

        log::info!(
            "opening bridge {:04x}:{:04x} ({})",
            info.vendor_id(),
            info.product_id(),
            info.product_string().unwrap_or("?"),
        );

        let device = info
            .open()
            .map_err(|e| CyusbError::OpenFailed(e.to_string()))?;
        let interface = device
            .claim_interface(0)
            .map_err(|e| CyusbError::ClaimFailed(e.to_string()))?;

        Ok(Self { interface, scb: 0 })
    }

    fn vendor_write(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize> {
        log::debug!(
            "vendor out 0x{:02X} value=0x{:04X} index=0x{:04X} len={}",
            request,
            value,
            index,
            data.len()
        );
        let control = Control {
            control_type: ControlType::Vendor,
            recipient: Recipient::Device,
            request,
            value,
            index,
        };
        Ok(self
            .interface
            .control_out_blocking(control, data, timeout)?)
    }

    fn vendor_read(
        &self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize> {
        let control = Control {
            control_type: ControlType::Vendor,
            recipient: Recipient::Device,
            request,
            value,
            index,
        };
        Ok(self.interface.control_in_blocking(control, buf, timeout)?)
    }

    /// Move `data` out over the bulk endpoint.
    ///
    /// The bulk phase has no native timeout; the armed bridge completes
    /// it, and a stuck bus surfaces through the status check afterwards.
    fn bulk_write(&self, data: &[u8]) -> Result<usize> {
        let completion = block_on(self.interface.bulk_out(BULK_OUT_EP, data.to_vec()));
        Ok(completion.into_result()?.actual_length())
    }

    fn bulk_read(&self, len: usize) -> Result<Vec<u8>> {
        let completion = block_on(self.interface.bulk_in(BULK_IN_EP, RequestBuffer::new(len)));
        Ok(completion.into_result()?)
    }

    fn i2c_status(&self, timeout: Duration) -> Result<I2cStatus> {
        let mut buf = [0u8; 3];
        self.vendor_read(
            CY_I2C_GET_STATUS_CMD,
            scb_value(self.scb),
            0,
            &mut buf,
            timeout,
        )?;
        Ok(I2cStatus::from_bits_truncate(buf[0]))
    }

    /// Check the post-transfer I2C status, resetting the block on error.
    fn check_i2c_status(&self, timeout: Duration) -> Result<()> {
        let status = self.i2c_status(timeout)?;
        if !status.is_empty() {
            log::warn!("I2C error status {:?}, resetting block", status);
            self.vendor_write(CY_I2C_RESET_CMD, scb_value(self.scb), 0, &[], timeout)?;
            return Err(CyusbError::I2cStatus(status));
        }
        Ok(())
    }

    fn i2c_read_impl(
        &self,
        xfer: &I2cTransferConfig,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize> {
        self.vendor_write(
            CY_I2C_READ_CMD,
            i2c_transfer_value(xfer),
            buf.len() as u16,
            &[],
            timeout,
        )?;
        let data = self.bulk_read(buf.len())?;
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        self.check_i2c_status(timeout)?;
        Ok(n)
    }

    fn i2c_write_impl(
        &self,
        xfer: &I2cTransferConfig,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize> {
        self.vendor_write(
            CY_I2C_WRITE_CMD,
            i2c_transfer_value(xfer),
            data.len() as u16,
            &[],
            timeout,
        )?;
        let n = self.bulk_write(data)?;
        if n < data.len() {
            return Err(CyusbError::ShortTransfer {
                expected: data.len(),
                actual: n,
            });
        }
        self.check_i2c_status(timeout)?;
        Ok(n)
    }

    fn spi_transfer_impl(
        &self,
        wbuf: &[u8],
        rbuf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize> {
        self.vendor_write(
            CY_SPI_READ_WRITE_CMD,
            scb_value(self.scb),
            wbuf.len() as u16,
            &[],
            timeout,
        )?;
        let sent = self.bulk_write(wbuf)?;
        if sent < wbuf.len() {
            return Err(CyusbError::ShortTransfer {
                expected: wbuf.len(),
                actual: sent,
            });
        }
        let data = self.bulk_read(rbuf.len())?;
        let n = data.len().min(rbuf.len());
        rbuf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

impl I2cBridge for CyBridge {
    fn set_config(&mut self, config: &I2cBusConfig) -> std::result::Result<(), BridgeError> {
        self.vendor_write(
            CY_I2C_SET_CONFIG_CMD,
            scb_value(self.scb),
            0,
            &encode_i2c_config(config),
            DEFAULT_TIMEOUT,
        )
        .map_err(BridgeError::from)?;
        Ok(())
    }

    fn read(
        &mut self,
        xfer: &I2cTransferConfig,
        buf: &mut [u8],
        timeout: Duration,
    ) -> std::result::Result<usize, BridgeError> {
        self.i2c_read_impl(xfer, buf, timeout).map_err(Into::into)
    }

    fn write(
        &mut self,
        xfer: &I2cTransferConfig,
        data: &[u8],
        timeout: Duration,
    ) -> std::result::Result<usize, BridgeError> {
        self.i2c_write_impl(xfer, data, timeout).map_err(Into::into)
    }
}

impl SpiBridge for CyBridge {
    fn set_config(&mut self, config: &SpiBusConfig) -> std::result::Result<(), BridgeError> {
        self.vendor_write(
            CY_SPI_SET_CONFIG_CMD,
            scb_value(self.scb),
            0,
            &encode_spi_config(config),
            DEFAULT_TIMEOUT,
        )
        .map_err(BridgeError::from)?;
        Ok(())
    }

    fn transfer(
        &mut self,
        wbuf: &[u8],
        rbuf: &mut [u8],
        timeout: Duration,
    ) -> std::result::Result<usize, BridgeError> {
        self.spi_transfer_impl(wbuf, rbuf, timeout).map_err(Into::into)
    }
}
