//! cybridge-core - Core library for the cybridge serial-bus test harness
//!
//! This crate provides the bus-independent building blocks of cybridge:
//!
//! - Decoding of the compact positional configuration strings into
//!   structured bus configuration records ([`config`])
//! - Assembly of an arbitrary-bit-length SPI write frame from mixed-radix
//!   literal tokens, including the final wire-order transformation
//!   ([`frame`])
//! - The [`bridge`] traits implemented by the device backend crates
//!
//! Both the config decoder and the frame assembler are pure computations
//! over caller-supplied strings; they perform no I/O and hold no device
//! state.
//!
//! # Example
//!
//! ```
//! use cybridge_core::config::SpiBusConfig;
//! use cybridge_core::frame::BitVector;
//!
//! let config = SpiBusConfig::decode("1000000:8:M:110000").unwrap();
//! assert_eq!(config.frequency, 1_000_000);
//!
//! let frame = BitVector::assemble(7, &["0b1011"]).unwrap();
//! assert_eq!(frame.as_bytes().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bits;
pub mod bridge;
pub mod config;
pub mod error;
pub mod frame;
pub mod literal;

pub use error::{BridgeError, DecodeError, FrameError};
