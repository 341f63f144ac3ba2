//! SPI full-duplex transfer command

use std::error::Error;
use std::time::Duration;

use cybridge_core::bridge::SpiBridge;
use cybridge_core::config::SpiBusConfig;
use cybridge_core::frame::BitVector;

use super::print_recv;

/// Assemble the frame, configure the bus, and run one full-duplex
/// transfer of `bitlen` clocks.
pub fn run_rw(
    bridge: &mut dyn SpiBridge,
    config: &SpiBusConfig,
    bitlen: usize,
    tokens: &[String],
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    // frame assembly happens before the device is touched; a bad token
    // or an overflow aborts with nothing on the bus
    let frame = BitVector::assemble(bitlen, tokens)?;

    bridge.set_config(config)?;

    let mut rbuf = vec![0u8; frame.len()];
    let n = bridge.transfer(frame.as_bytes(), &mut rbuf, timeout)?;
    print_recv(&rbuf[..n]);
    Ok(())
}
