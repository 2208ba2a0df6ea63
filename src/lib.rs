#![no_std]
//! Driver for HD44780 character LCDs wired to an I2C bus through a PCF8574
//! GPIO expander, running the display in 4-bit mode. Tested with the common
//! 20x4 modules, works with 16x2 ones as well. It requires an I2C instance
//! implementing [`embedded_hal::i2c::I2c`] and an instance to delay execution
//! with [`embedded_hal::delay::DelayNs`].
//!
//! Usage:
//! ```ignore
//! const LCD_ADDRESS: u8 = 0x27; // Address depends on hardware, see link below
//!
//! // Create an I2C instance implementing embedded_hal::i2c::I2c, this
//! // particular example uses the rp2040 hal.
//! let mut i2c = hal::I2C::i2c0(
//!     pac.I2C0,
//!     sda_pin,
//!     scl_pin,
//!     400.kHz(),
//!     &mut pac.RESETS,
//!     &clocks.system_clock,
//! );
//! let mut delay = cortex_m::delay::Delay::new(core.SYST, clock_freq);
//!
//! let mut lcd = lcd_hd44780_pcf8574::sync_lcd::Lcd::new(&mut i2c, &mut delay)
//!     .with_address(LCD_ADDRESS)
//!     .with_cols(20)
//!     .with_rows(4)
//!     .init()?;
//!
//! lcd.write_line("Hello from rust!", 0, true)?;
//! ```
//!
//! This [site][lcd address] describes how to find the address of your LCD
//! devices.
//!
//! [lcd address]: https://www.ardumotive.com/i2clcden.html

pub mod sync_lcd;

#[cfg(feature = "async")]
pub mod async_lcd;

/// Errors emitted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The underlying I2C bus write failed.
    Bus(E),
    /// Custom character slot outside `0..=7`.
    InvalidSlot,
    /// A custom character row pattern outside `0..=31`.
    InvalidPatternValue,
    /// More than 8 rows supplied for a custom character.
    InvalidPatternLength,
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Bus(_) => defmt::write!(fmt, "I2C bus error"),
            Error::InvalidSlot => defmt::write!(fmt, "custom character slot out of range"),
            Error::InvalidPatternValue => defmt::write!(fmt, "character pattern row out of range"),
            Error::InvalidPatternLength => defmt::write!(fmt, "character pattern too long"),
        }
    }
}

#[derive(Copy, Clone)]
pub enum Backlight {
    Off = 0x00,
    On = 0x08,
}

/// Font selection, fixed at construction. 5x10 only takes effect on
/// single-row displays, the controller cannot combine it with two-line mode.
#[derive(Copy, Clone, PartialEq)]
pub enum CharacterSize {
    Dots5x8 = 0x00,
    Dots5x10 = 0x04,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum Mode {
    Cmd = 0x00,
    Data = 0x01,
    EntrySet = 0x04,
    DisplayControl = 0x08,
    FunctionSet = 0x20,
    CGRAMAddr = 0x40,
    DDRAMAddr = 0x80,
}

enum Commands {
    Clear = 0x01,
    ReturnHome = 0x02,
    ShiftDisplayLeft = 0x10 | 0x08,
    ShiftDisplayRight = 0x10 | 0x08 | 0x04,
}

enum BitMode {
    Bit4 = 0x00,
    Bit8 = 0x10,
}

enum Lines {
    One = 0x00,
    Two = 0x08,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum DisplayControl {
    Blink = 0x01,
    Cursor = 0x02,
    Display = 0x04,
}

// Entry mode flags.
#[repr(u8)]
#[derive(Copy, Clone)]
enum TextDirection {
    RightToLeft = 0x00,
    LeftToRight = 0x02,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum DisplayShift {
    Decrement = 0x00,
    Increment = 0x01,
}

/// Enable line of the expander, pulsed to latch a nibble.
const ENABLE: u8 = 0b0000_0100;

/// DDRAM base address per row. Valid for the usual 16/20-column modules where
/// rows 0/2 and 1/3 share a controller line.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Matches a `{0xHH}` token at the start of `s` and returns the encoded byte.
/// Anything that is not exactly `{`, `0`, `x` or `X`, two hex digits and `}`
/// is no token.
fn escape_token(s: &str) -> Option<u8> {
    let b = s.as_bytes();
    if b.len() < 6 || b[0] != b'{' || b[1] != b'0' || (b[2] != b'x' && b[2] != b'X') || b[5] != b'}'
    {
        return None;
    }
    let high = hex_digit(b[3])?;
    let low = hex_digit(b[4])?;
    Some(high << 4 | low)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
