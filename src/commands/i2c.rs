//! I2C read/write commands

use std::error::Error;
use std::time::Duration;

use cybridge_core::bridge::I2cBridge;
use cybridge_core::config::{I2cBusConfig, I2cTransferConfig};
use cybridge_core::literal;

use super::print_recv;

/// Configure the bus, then read `len` bytes from the addressed slave.
pub fn run_read(
    bridge: &mut dyn I2cBridge,
    config: &I2cBusConfig,
    xfer: &I2cTransferConfig,
    len: usize,
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    bridge.set_config(config)?;

    let mut buf = vec![0u8; len];
    let n = bridge.read(xfer, &mut buf, timeout)?;
    print_recv(&buf[..n]);
    Ok(())
}

/// Configure the bus, then write the given byte literals to the slave.
pub fn run_write(
    bridge: &mut dyn I2cBridge,
    config: &I2cBusConfig,
    xfer: &I2cTransferConfig,
    data: &[String],
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut bytes = Vec::with_capacity(data.len());
    for arg in data {
        let byte = literal::parse_u8(arg).map_err(|_| format!("invalid byte literal: {arg:?}"))?;
        bytes.push(byte);
    }

    bridge.set_config(config)?;

    let n = bridge.write(xfer, &bytes, timeout)?;
    println!("sent: {n} bytes");
    Ok(())
}
