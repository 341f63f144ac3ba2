//! cybridge - I2C/SPI test harness for USB serial bridges
//!
//! A diagnostic tool for exercising serial-bus master transactions
//! against an attached bridge device. One invocation applies exactly one
//! bus configuration and performs one transfer:
//!
//! ```text
//! $ cybridge spi rw 7 0b1011        # run 7 clocks, writing 1011000
//! $ cybridge i2c write 0x12 0x34    # send 2 bytes
//! $ cybridge i2c read 2             # read 2 bytes
//! ```
//!
//! Bus parameters travel in compact positional config strings (see the
//! `-f`/`-c` flags); transmit data is given as mixed-radix literal
//! tokens assembled into a bit frame by `cybridge-core`.

mod bridges;
mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, I2cCommands, SpiCommands};
use cybridge_core::bridge::DEFAULT_TIMEOUT;
use cybridge_core::config::{I2cBusConfig, I2cTransferConfig, SpiBusConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::I2c {
            config,
            data_config,
            command,
        } => {
            // decode both config strings before any device is opened
            let config = I2cBusConfig::decode(&config)?;
            let xfer = I2cTransferConfig::decode(&data_config)?;
            log::debug!("I2C config: {:?}, transfer: {:?}", config, xfer);

            let mut handle = bridges::open_bridge(&cli.bridge, cli.device, cli.index)?;
            match command {
                I2cCommands::Read { len } => {
                    commands::i2c::run_read(handle.as_i2c(), &config, &xfer, len, DEFAULT_TIMEOUT)
                }
                I2cCommands::Write { data } => {
                    commands::i2c::run_write(handle.as_i2c(), &config, &xfer, &data, DEFAULT_TIMEOUT)
                }
            }
        }

        Commands::Spi { config, command } => {
            let config = SpiBusConfig::decode(&config)?;
            log::debug!("SPI config: {:?}", config);

            let mut handle = bridges::open_bridge(&cli.bridge, cli.device, cli.index)?;
            match command {
                SpiCommands::Rw { bitlen, tokens } => {
                    commands::spi::run_rw(handle.as_spi(), &config, bitlen, &tokens, DEFAULT_TIMEOUT)
                }
            }
        }

        Commands::List => {
            commands::list::list_devices(cli.device)?;
            println!();
            commands::list::list_bridges();
            Ok(())
        }
    }
}
