//! # Textmode extension for the RGB LCD shield driver
//!
//! Implements `core::fmt::Write`, so the `write!()` and `writeln!()` macros print straight onto
//! the display:
//!
//! ```ignore
//! lcd.set_cursor(0, 0)?;
//! write!(lcd, "{} C", temperature)?;
//! writeln!(lcd)?;
//! write!(lcd, "{}\u{b0}", angle)?;
//! ```
//!
//! The HD44780 moves its cursor by itself, only line breaks are handled here: `\n` goes to the
//! start of the next line (after the last line comes the first one again) and `\r` to the start
//! of the current one. Long lines are not wrapped, the controller keeps writing into the
//! invisible part of its DDRAM line.
use core::fmt::Error as FmtError;
use core::fmt::Result as FmtResult;
use core::fmt::Write;

use hal::blocking::delay::DelayUs;
use hal::blocking::i2c::{Read, Write as I2cWrite};

use crate::display::RgbLcdShield;

/// Character printed for everything the character ROM doesn't have.
pub const FULL_BLOCK: u8 = 0xFF;

impl<I2C, D, E> Write for RgbLcdShield<I2C, D>
where
    I2C: I2cWrite<Error = E> + Read<Error = E>,
    D: DelayUs<u16>,
{
    fn write_str(&mut self, s: &str) -> FmtResult {
        for c in s.chars() {
            match c {
                '\r' => {
                    let line = self.current_line();
                    self.set_cursor(0, line).map_err(|_| FmtError)?;
                }
                '\n' => {
                    let line = (self.current_line() + 1) % self.lines();
                    self.set_cursor(0, line).map_err(|_| FmtError)?;
                }
                _ => {
                    self.write_data(char_to_code(c)).map_err(|_| FmtError)?;
                }
            }
        }
        Ok(())
    }
}

// Character ROM A00 (Japanese standard font) of the HD44780. Below 0x80 it is ASCII, except
// 0x5C (yen instead of backslash), 0x7E and 0x7F (arrows instead of tilde and DEL). 0x00..0x08
// are the custom glyphs.
fn char_to_code(c: char) -> u8 {
    match c {
        '\u{00}'..='\u{7f}' => c as u8,
        '¥' => 0x5C,
        '→' => 0x7E,
        '←' => 0x7F,
        '°' => 0xDF,
        _ => FULL_BLOCK,
    }
}
