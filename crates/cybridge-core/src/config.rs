//! Bus configuration records and their compact string grammars
//!
//! Configurations are handed to the tool as compact positional strings,
//! e.g. `100000:0x10:10` for the I2C bus or `1000000:8:M:110000` for SPI.
//! Fields are consumed left to right by an internal cursor; each grammar
//! documents its own leniency:
//!
//! - The two I2C grammars are permissive: if the string runs out early the
//!   remaining fields keep their [`Default`] values.
//! - The SPI grammar is strict: the whole string must be consumed and any
//!   trailing character is a [`DecodeError::TrailingInput`].
//!
//! A 1-character boolean field is true iff the character is `'1'`; any
//! other character, or end of string, is false.

use crate::error::DecodeError;
use crate::literal;

/// Default I2C bus configuration string (100 kHz, slave address 0x10, master).
pub const DEFAULT_I2C_CONFIG: &str = "100000:0x10:10";

/// Default I2C transfer configuration string (address 0x10, no stop, no NAK).
pub const DEFAULT_I2C_DATA_CONFIG: &str = "0x10:00";

/// Default SPI bus configuration string (1 MHz, 8-bit, Motorola, MSB-first master).
pub const DEFAULT_SPI_CONFIG: &str = "1000000:8:M:110000";

/// Cursor over a config string, consuming fields left to right.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consume the next character if it equals `c`.
    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(tail) => {
                self.rest = tail;
                true
            }
            None => false,
        }
    }

    /// Skip one character unconditionally, whatever it is.
    fn skip_any(&mut self) {
        let mut chars = self.rest.chars();
        if chars.next().is_some() {
            self.rest = chars.as_str();
        }
    }

    /// Consume the next character, if any.
    fn next_char(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        self.rest = chars.as_str();
        Some(c)
    }

    /// Consume a 1-character boolean field: `'1'` is true, anything else
    /// (including end of string) is false.
    fn flag(&mut self) -> bool {
        self.next_char() == Some('1')
    }

    /// Consume a plain decimal field.
    fn decimal(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits.parse().map_err(|_| DecodeError::BadField {
            field,
            text: digits.to_string(),
        })
    }

    /// Consume a C-style integer field: `0x` hex, leading-`0` octal, or
    /// decimal.
    fn c_uint(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        let text = if self.rest.starts_with("0x") || self.rest.starts_with("0X") {
            let prefix = &self.rest[..2];
            self.rest = &self.rest[2..];
            let digits = self.take_while(|c| c.is_ascii_hexdigit());
            format!("{prefix}{digits}")
        } else {
            self.take_while(|c| c.is_ascii_digit()).to_string()
        };
        literal::parse_u64(&text).map_err(|_| DecodeError::BadField {
            field,
            text,
        })
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .find(|c| !pred(c))
            .unwrap_or(self.rest.len());
        let (taken, tail) = self.rest.split_at(end);
        self.rest = tail;
        taken
    }
}

/// I2C bus configuration, applied before a transaction.
///
/// Grammar: `<frequency>:<slaveAddress>:<isMaster><isClockStretch>`, with
/// the frequency in decimal and the slave-mode address as a C-style
/// integer. Trailing fields are optional; decoding stops at the first
/// missing `:` and leaves the remaining fields at their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cBusConfig {
    /// Bus clock frequency in Hz.
    pub frequency: u32,
    /// Address the bridge answers to in slave mode.
    pub slave_address: u8,
    /// Whether the bridge acts as bus master.
    pub is_master: bool,
    /// Whether clock stretching is enabled.
    pub is_clock_stretch: bool,
}

impl Default for I2cBusConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000,
            slave_address: 0x10,
            is_master: true,
            is_clock_stretch: false,
        }
    }
}

impl I2cBusConfig {
    /// Decode a configuration string.
    pub fn decode(spec: &str) -> Result<Self, DecodeError> {
        let mut config = Self::default();
        let mut cur = Cursor::new(spec);

        config.frequency = cur.decimal("frequency")?;
        if !cur.eat(':') {
            return Ok(config);
        }

        config.slave_address = read_address(&mut cur)?;
        if !cur.eat(':') {
            return Ok(config);
        }

        config.is_master = cur.flag();
        config.is_clock_stretch = cur.flag();
        Ok(config)
    }
}

/// Per-transfer I2C configuration (target address and framing bits).
///
/// Grammar: `<slaveAddress><delimiter><isStopBit><isNakBit>` — the slave
/// address has no trailing `:` of its own; the single delimiter character
/// after it is skipped unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cTransferConfig {
    /// Address of the slave the transfer targets.
    pub slave_address: u8,
    /// Whether a stop bit terminates the transfer.
    pub is_stop_bit: bool,
    /// Whether the last read byte is NAKed.
    pub is_nak_bit: bool,
}

impl Default for I2cTransferConfig {
    fn default() -> Self {
        Self {
            slave_address: 0x10,
            is_stop_bit: false,
            is_nak_bit: false,
        }
    }
}

impl I2cTransferConfig {
    /// Decode a transfer configuration string.
    pub fn decode(spec: &str) -> Result<Self, DecodeError> {
        let mut config = Self::default();
        let mut cur = Cursor::new(spec);

        config.slave_address = read_address(&mut cur)?;
        cur.skip_any();

        config.is_stop_bit = cur.flag();
        config.is_nak_bit = cur.flag();
        Ok(config)
    }
}

/// SPI framing protocol selected by the 1-character protocol field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpiProtocol {
    /// Motorola SPI framing (`M`).
    #[default]
    Motorola,
    /// Texas Instruments SSP framing (`T`).
    Ti,
    /// National Semiconductor Microwire framing (`N`).
    Ns,
}

impl SpiProtocol {
    /// Map a protocol character to its variant.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(Self::Motorola),
            'T' => Some(Self::Ti),
            'N' => Some(Self::Ns),
            _ => None,
        }
    }
}

/// SPI bus configuration, applied before a transaction.
///
/// Grammar: `<frequency>:<dataWidth>:<M|T|N>:<6 flag chars>` with the flag
/// characters in the order MSB-first, master, continuous, select-precede,
/// CPHA, CPOL. Unlike the I2C grammars, the entire string must be
/// consumed; leftover characters are a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiBusConfig {
    /// Bus clock frequency in Hz.
    pub frequency: u32,
    /// Word width in bits (4..=16).
    pub data_width: u8,
    /// Framing protocol.
    pub protocol: SpiProtocol,
    /// Transmit most significant bit first.
    pub is_msb_first: bool,
    /// Whether the bridge acts as bus master.
    pub is_master: bool,
    /// Continuous (free-running) clock mode.
    pub is_continuous_mode: bool,
    /// Assert chip select before the clock starts.
    pub is_select_precede: bool,
    /// Clock phase.
    pub is_cpha: bool,
    /// Clock polarity.
    pub is_cpol: bool,
}

impl Default for SpiBusConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000,
            data_width: 8,
            protocol: SpiProtocol::Motorola,
            is_msb_first: true,
            is_master: true,
            is_continuous_mode: false,
            is_select_precede: false,
            is_cpha: false,
            is_cpol: false,
        }
    }
}

impl SpiBusConfig {
    /// Decode a configuration string.
    pub fn decode(spec: &str) -> Result<Self, DecodeError> {
        let mut cur = Cursor::new(spec);

        let frequency = cur.decimal("frequency")?;
        cur.skip_any();

        let data_width = cur.decimal("data width")?;
        if !(4..=16).contains(&data_width) {
            return Err(DecodeError::OutOfRange {
                field: "data width",
                value: data_width.into(),
            });
        }
        cur.skip_any();

        let c = cur
            .next_char()
            .ok_or(DecodeError::UnexpectedEnd("protocol"))?;
        let protocol = SpiProtocol::from_char(c).ok_or(DecodeError::UnknownProtocol(c))?;
        cur.skip_any();

        let config = Self {
            frequency,
            data_width: data_width as u8,
            protocol,
            is_msb_first: cur.flag(),
            is_master: cur.flag(),
            is_continuous_mode: cur.flag(),
            is_select_precede: cur.flag(),
            is_cpha: cur.flag(),
            is_cpol: cur.flag(),
        };

        if !cur.at_end() {
            return Err(DecodeError::TrailingInput(cur.rest.to_string()));
        }
        Ok(config)
    }
}

fn read_address(cur: &mut Cursor<'_>) -> Result<u8, DecodeError> {
    let value = cur.c_uint("slave address")?;
    u8::try_from(value).map_err(|_| DecodeError::OutOfRange {
        field: "slave address",
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2c_full_config() {
        let config = I2cBusConfig::decode("100000:0x10:10").unwrap();
        assert_eq!(
            config,
            I2cBusConfig {
                frequency: 100_000,
                slave_address: 0x10,
                is_master: true,
                is_clock_stretch: false,
            }
        );
    }

    #[test]
    fn i2c_truncated_keeps_defaults() {
        let config = I2cBusConfig::decode("400000").unwrap();
        assert_eq!(config.frequency, 400_000);
        assert_eq!(config.slave_address, 0x10);
        assert!(config.is_master);

        let config = I2cBusConfig::decode("400000:0x22").unwrap();
        assert_eq!(config.slave_address, 0x22);
        assert!(config.is_master);
    }

    #[test]
    fn i2c_boolean_chars() {
        // '1' is true, anything else (or nothing) is false
        let config = I2cBusConfig::decode("100000:0x10:11").unwrap();
        assert!(config.is_master && config.is_clock_stretch);

        let config = I2cBusConfig::decode("100000:0x10:x1").unwrap();
        assert!(!config.is_master && config.is_clock_stretch);

        let config = I2cBusConfig::decode("100000:0x10:1").unwrap();
        assert!(config.is_master);
        assert!(!config.is_clock_stretch);
    }

    #[test]
    fn i2c_rejects_bad_numbers() {
        assert!(matches!(
            I2cBusConfig::decode("fast:0x10:10"),
            Err(DecodeError::BadField { field: "frequency", .. })
        ));
        assert!(matches!(
            I2cBusConfig::decode("100000::10"),
            Err(DecodeError::BadField { field: "slave address", .. })
        ));
        assert!(matches!(
            I2cBusConfig::decode("100000:0x100:10"),
            Err(DecodeError::OutOfRange { field: "slave address", value: 0x100 })
        ));
    }

    #[test]
    fn i2c_data_config() {
        let config = I2cTransferConfig::decode("0x10:00").unwrap();
        assert_eq!(config.slave_address, 0x10);
        assert!(!config.is_stop_bit);
        assert!(!config.is_nak_bit);

        // the delimiter after the address is skipped unconditionally
        let config = I2cTransferConfig::decode("0x50x11").unwrap();
        assert_eq!(config.slave_address, 0x50);
        assert!(config.is_stop_bit);
        assert!(config.is_nak_bit);
    }

    #[test]
    fn spi_full_config() {
        let config = SpiBusConfig::decode("1000000:8:M:110000").unwrap();
        assert_eq!(
            config,
            SpiBusConfig {
                frequency: 1_000_000,
                data_width: 8,
                protocol: SpiProtocol::Motorola,
                is_msb_first: true,
                is_master: true,
                is_continuous_mode: false,
                is_select_precede: false,
                is_cpha: false,
                is_cpol: false,
            }
        );

        let config = SpiBusConfig::decode("50000:12:T:010101").unwrap();
        assert_eq!(config.data_width, 12);
        assert_eq!(config.protocol, SpiProtocol::Ti);
        assert!(!config.is_msb_first);
        assert!(config.is_master);
        assert!(!config.is_continuous_mode);
        assert!(config.is_select_precede);
        assert!(!config.is_cpha);
        assert!(config.is_cpol);
    }

    #[test]
    fn spi_short_flags_default_false() {
        let config = SpiBusConfig::decode("1000000:8:N:1").unwrap();
        assert_eq!(config.protocol, SpiProtocol::Ns);
        assert!(config.is_msb_first);
        assert!(!config.is_master);
        assert!(!config.is_cpol);
    }

    #[test]
    fn spi_rejects_trailing_input() {
        assert!(matches!(
            SpiBusConfig::decode("1000000:8:M:110000x"),
            Err(DecodeError::TrailingInput(t)) if t == "x"
        ));
        // ...while the I2C grammar does not require full consumption
        assert!(I2cBusConfig::decode("100000:0x10:10trailing").is_ok());
    }

    #[test]
    fn spi_rejects_unknown_protocol() {
        assert_eq!(
            SpiBusConfig::decode("1000000:8:X:110000"),
            Err(DecodeError::UnknownProtocol('X'))
        );
        assert_eq!(
            SpiBusConfig::decode("1000000:8:"),
            Err(DecodeError::UnexpectedEnd("protocol"))
        );
    }

    #[test]
    fn spi_rejects_bad_width() {
        assert!(matches!(
            SpiBusConfig::decode("1000000:3:M:110000"),
            Err(DecodeError::OutOfRange { field: "data width", value: 3 })
        ));
        assert!(matches!(
            SpiBusConfig::decode("1000000:17:M:110000"),
            Err(DecodeError::OutOfRange { field: "data width", value: 17 })
        ));
    }

    #[test]
    fn defaults_match_default_strings() {
        assert_eq!(
            I2cBusConfig::decode(DEFAULT_I2C_CONFIG).unwrap(),
            I2cBusConfig::default()
        );
        assert_eq!(
            I2cTransferConfig::decode(DEFAULT_I2C_DATA_CONFIG).unwrap(),
            I2cTransferConfig::default()
        );
        assert_eq!(
            SpiBusConfig::decode(DEFAULT_SPI_CONFIG).unwrap(),
            SpiBusConfig::default()
        );
    }
}
