//! Driver for the RGB character LCD + keypad shield and the MCP23017 I/O expander it is built on.
//!
//! The shield connects a HD44780 compatible character display (in 4-bit mode), an RGB backlight
//! and five push buttons to a MCP23017, so everything is driven over two I2C wires.
//!
//! ```ignore
//! use core::fmt::Write;
//! use rgb_lcd_shield::{Backlight, Buttons, CharSize, RgbLcdShield};
//!
//! let mut lcd = RgbLcdShield::new(i2c, 0, delay);
//! lcd.begin(16, 2, CharSize::Dots5x8)?;
//! write!(lcd, "Hello, world!")?;
//!
//! if lcd.read_buttons()?.contains(Buttons::SELECT) {
//!     lcd.set_backlight(Backlight::TEAL)?;
//! }
//! ```
//!
//! The expander driver `Mcp23017` works on its own as well, for boards with other things
//! connected to the chip.
#![cfg_attr(not(test), no_std)]

extern crate embedded_hal as hal;

pub mod bus;
pub mod buttons;
pub mod display;
pub mod error;
pub mod expander;
pub mod instructions;
pub mod pins;
pub mod registers;

#[cfg(feature = "textmode")]
pub mod textmode;

#[cfg(test)]
mod testing;

pub use buttons::{Backlight, Buttons};
pub use display::{DeviceState, RgbLcdShield};
pub use error::Error;
pub use expander::{Direction, Level, Mcp23017};
pub use instructions::{CharSize, TextDirection};
pub use pins::{DataPins, PinMap};
pub use registers::{Port, Register};
