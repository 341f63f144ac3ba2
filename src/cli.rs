//! CLI argument parsing

use crate::bridges;
use clap::{Parser, Subcommand};
use cybridge_core::config::{DEFAULT_I2C_CONFIG, DEFAULT_I2C_DATA_CONFIG, DEFAULT_SPI_CONFIG};
use cybridge_core::literal;

/// Parse a `<vid>:<pid>` pair of C-style integers
fn parse_vid_pid(s: &str) -> Result<(u16, u16), String> {
    let (vid, pid) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <vid>:<pid>, got {s:?}"))?;
    let vid = literal::parse_u64(vid)
        .ok()
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| format!("invalid vendor ID: {vid:?}"))?;
    let pid = literal::parse_u64(pid)
        .ok()
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| format!("invalid product ID: {pid:?}"))?;
    Ok((vid, pid))
}

/// Generate dynamic help text for the bridge argument
fn bridge_help() -> String {
    format!(
        "Bridge backend to use [available: {}]",
        bridges::bridge_names_short()
    )
}

#[derive(Parser)]
#[command(name = "cybridge")]
#[command(author, version, about = "I2C/SPI test harness for USB serial bridges", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Select the USB target by vendor and product ID
    #[arg(short, long, value_parser = parse_vid_pid, value_name = "VID:PID", global = true)]
    pub device: Option<(u16, u16)>,

    /// Select the nth device if --device is ambiguous
    #[arg(short, long, default_value_t = 0, global = true)]
    pub index: usize,

    /// Bridge backend to use
    #[arg(short, long, default_value = "cyusb", help = bridge_help(), global = true)]
    pub bridge: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// I2C master transactions
    I2c {
        /// I2C bus configuration (frequency:slaveAddress:isMaster isClockStretch)
        #[arg(short = 'f', long = "config", default_value = DEFAULT_I2C_CONFIG)]
        config: String,

        /// Per-transfer data configuration (slaveAddress:isStopBit isNakBit)
        #[arg(short = 'c', long = "data-config", default_value = DEFAULT_I2C_DATA_CONFIG)]
        data_config: String,

        #[command(subcommand)]
        command: I2cCommands,
    },

    /// SPI master transactions
    Spi {
        /// SPI bus configuration (frequency:dataWidth:M|T|N:6 mode flags)
        #[arg(short, long, default_value = DEFAULT_SPI_CONFIG)]
        config: String,

        #[command(subcommand)]
        command: SpiCommands,
    },

    /// List attached USB devices and compiled-in backends
    List,
}

#[derive(Subcommand)]
pub enum I2cCommands {
    /// Read bytes from the addressed slave
    Read {
        /// Number of bytes to read
        len: usize,
    },

    /// Write bytes to the addressed slave
    Write {
        /// Bytes to send, as C-style integer literals (e.g. 0x12 0x34)
        #[arg(required = true)]
        data: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum SpiCommands {
    /// Run a full-duplex transfer of the given bit length
    Rw {
        /// Total frame length in bits (number of clocks)
        bitlen: usize,

        /// Literal tokens filling the frame: 0b..., 0x... or decimal,
        /// each with an optional :<n> width suffix
        tokens: Vec<String>,
    },
}
