//! # Main driver for the RGB LCD shield
//!
//! This module exports the `RgbLcdShield` struct, which drives the HD44780 character display,
//! the RGB backlight and the five buttons of the shield, all of them through the MCP23017 on the
//! board.
//!
//! The HD44780 can't be read back on this shield, so the driver keeps the flags it sent last in
//! a `DeviceState`. Every high level command changes one flag in that copy and sends the whole
//! flag group again. Nothing else writes the flags, so the copy and the chip stay in step as
//! long as all commands go through this driver.
//!
//! Typically you want to look into the following funcions:
//!  - RgbLcdShield::new() to create a new driver instance
//!  - RgbLcdShield::begin() to initialize expander and display
//!  - RgbLcdShield::set_cursor() and `write!()` to put text on the screen
//!  - RgbLcdShield::set_backlight() and RgbLcdShield::read_buttons()
use hal::blocking::delay::DelayUs;
use hal::blocking::i2c::{Read, Write};

use crate::{
    bus::ParallelBus,
    buttons::{Backlight, Buttons},
    error::Error,
    expander::{Direction, Level, Mcp23017},
    instructions::prelude::*,
    pins::{bit, PinMap},
    registers::Port,
};

/// Wait after power on before the first instruction. The HD44780 needs more than 40 ms after
/// VCC rises to 2.7 V.
pub const POWER_ON_DELAY_US: u16 = 50_000;

/// Wait after the first "function set" of the power on sequence, the data sheet asks for more
/// than 4.1 ms.
pub const FUNCTION_SET_DELAY_US: u16 = 4_500;

/// Wait after the second "function set" of the power on sequence, more than 100 us.
pub const FUNCTION_SET_SHORT_DELAY_US: u16 = 150;

/// Clear display and return home take 1.52 ms to execute.
pub const CLEAR_DELAY_US: u16 = 2_000;

/// Highest row count the DDRAM layout supports.
pub const MAX_ROWS: u8 = 4;

/// Longest line the DDRAM layout supports.
pub const MAX_COLUMNS: u8 = 40;

// DDRAM address of the first character of each row
const ROW_OFFSETS: [u8; MAX_ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

/// Flags last sent to the display. The HD44780 can't be asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    pub function: FunctionSet,
    pub control: DisplayControl,
    pub entry: EntryMode,
}

#[derive(Debug)]
/// main struct for state keeping of the shield driver
pub struct RgbLcdShield<I2C, D> {
    bus: ParallelBus<I2C>,
    delay: D,
    state: DeviceState,
    columns: u8,
    lines: u8,
    current_line: u8,
}

impl<I2C, D, E> RgbLcdShield<I2C, D>
where
    I2C: Write<Error = E> + Read<Error = E>,
    D: DelayUs<u16>,
{
    /// Create a new instance of the shield driver, wired as the RGB LCD shield.
    ///
    /// Arguments:
    ///
    /// - i2c: the I2C bus the shield is connected to
    /// - address: the address offset (0..8) of the MCP23017, 0 on an unmodified shield
    /// - delay: a microsecond delay, used for the display timing
    ///
    /// Nothing is sent yet, call `begin()` before using the display.
    pub fn new(i2c: I2C, address: u8, delay: D) -> RgbLcdShield<I2C, D> {
        RgbLcdShield::with_pins(i2c, address, delay, PinMap::default())
    }

    /// Like `new()`, for a display wired differently to the expander.
    pub fn with_pins(i2c: I2C, address: u8, delay: D, pins: PinMap) -> RgbLcdShield<I2C, D> {
        let state = DeviceState {
            function: FunctionSet {
                eight_bit: pins.data.is_eight_bit(),
                two_lines: false,
                large_font: false,
            },
            ..DeviceState::default()
        };
        RgbLcdShield {
            bus: ParallelBus::new(Mcp23017::new(i2c, address), pins),
            delay,
            state,
            columns: 16,
            lines: 1,
            current_line: 0,
        }
    }

    /// Initialize the expander and the display.
    ///
    /// Sets up all expander pins, turns the backlight white, runs the HD44780 power on sequence
    /// and leaves the display on, cleared, cursor hidden, text running left to right.
    ///
    /// The 5x10 font is only used on single line displays, the controller can't do it on two.
    pub fn begin(&mut self, columns: u8, rows: u8, char_size: CharSize) -> Result<(), Error<E>> {
        if !(1..=MAX_ROWS).contains(&rows) || !(1..=MAX_COLUMNS).contains(&columns) {
            return Err(Error::OutOfRange);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("rgb lcd shield: begin {}x{}", columns, rows);

        let pins = *self.bus.pins();
        let expander = self.bus.expander();
        expander.init()?;
        for index in [2, 0, 1] {
            expander.set_pin_direction(pins.backlight[index], Direction::Output)?;
        }
        self.set_backlight(Backlight::WHITE)?;

        self.bus.configure()?;
        let expander = self.bus.expander();
        for pin in pins.buttons {
            expander.set_pin_direction(pin, Direction::Input)?;
            expander.set_pull_up(pin, true)?;
        }

        self.state.function = FunctionSet {
            eight_bit: pins.data.is_eight_bit(),
            two_lines: rows > 1,
            large_font: rows == 1 && char_size == CharSize::Dots5x10,
        };
        self.columns = columns;
        self.lines = rows;
        self.current_line = 0;

        self.delay.delay_us(POWER_ON_DELAY_US);
        self.bus.idle()?;

        // The controller may be in 8-bit or in the middle of a 4-bit transfer after power on.
        // Three "8-bit function sets" get it into a known state from any of those.
        if self.state.function.eight_bit {
            let function_set = Instruction::FunctionSet(self.state.function);
            self.write_command(function_set)?;
            self.delay.delay_us(FUNCTION_SET_DELAY_US);
            self.write_command(function_set)?;
            self.delay.delay_us(FUNCTION_SET_SHORT_DELAY_US);
            self.write_command(function_set)?;
        } else {
            // only D4..D7 are wired, a single nibble is a complete 8-bit instruction here
            self.bus.write_bits(0x03, &mut self.delay)?;
            self.delay.delay_us(FUNCTION_SET_DELAY_US);
            self.bus.write_bits(0x03, &mut self.delay)?;
            self.delay.delay_us(FUNCTION_SET_DELAY_US);
            self.bus.write_bits(0x03, &mut self.delay)?;
            self.delay.delay_us(FUNCTION_SET_SHORT_DELAY_US);
            // switch to 4-bit, still sent as a single nibble
            self.bus.write_bits(0x02, &mut self.delay)?;
        }

        self.write_command(Instruction::FunctionSet(self.state.function))?;

        self.state.control = DisplayControl {
            display: true,
            cursor: false,
            blink: false,
        };
        self.write_command(Instruction::DisplayControl(self.state.control))?;

        self.clear()?;

        self.state.entry = EntryMode {
            left_to_right: true,
            shift: false,
        };
        self.write_command(EntryModeSet(self.state.entry))
    }

    /// Send a raw instruction byte.
    ///
    /// This bypasses the flag bookkeeping, a raw "display control" or "entry mode" byte will be
    /// overwritten by the next high level command. No extra wait is added for clear and home.
    pub fn command(&mut self, value: u8) -> Result<(), Error<E>> {
        self.bus.send(value, false, &mut self.delay)
    }

    /// Send an instruction, waiting as long as it needs to execute.
    pub fn write_command(&mut self, instruction: Instruction) -> Result<(), Error<E>> {
        self.command(instruction.byte())?;
        if instruction.is_slow() {
            self.delay.delay_us(CLEAR_DELAY_US);
        }
        Ok(())
    }

    /// Send one byte of character data to the current DDRAM (or CGRAM) address.
    ///
    /// Codes 0..8 show the custom glyphs defined with `create_char()`.
    pub fn write_data(&mut self, value: u8) -> Result<(), Error<E>> {
        self.bus.send(value, true, &mut self.delay)
    }

    /// Clear the display and move the cursor to (0, 0).
    pub fn clear(&mut self) -> Result<(), Error<E>> {
        self.current_line = 0;
        self.write_command(ClearDisplay)
    }

    /// Move the cursor to (0, 0) and undo scrolling.
    pub fn home(&mut self) -> Result<(), Error<E>> {
        self.current_line = 0;
        self.write_command(ReturnHome)
    }

    /// Move the cursor to `column` in `row`. Rows past the last one land on the last one.
    pub fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), Error<E>> {
        let row = row.min(self.lines - 1);
        self.write_command(SetDdramAddress(column.wrapping_add(ROW_OFFSETS[row as usize])))?;
        self.current_line = row;
        Ok(())
    }

    /// Turn the display on or off. DDRAM content is kept while the display is off.
    pub fn set_display(&mut self, on: bool) -> Result<(), Error<E>> {
        let control = DisplayControl {
            display: on,
            ..self.state.control
        };
        self.send_display_control(control)
    }

    /// Show or hide the underline cursor.
    pub fn show_cursor(&mut self, on: bool) -> Result<(), Error<E>> {
        let control = DisplayControl {
            cursor: on,
            ..self.state.control
        };
        self.send_display_control(control)
    }

    /// Blink the character cell at the cursor.
    pub fn set_blink(&mut self, on: bool) -> Result<(), Error<E>> {
        let control = DisplayControl {
            blink: on,
            ..self.state.control
        };
        self.send_display_control(control)
    }

    /// Shift the whole display one position to the left, without changing DDRAM.
    pub fn scroll_display_left(&mut self) -> Result<(), Error<E>> {
        self.write_command(CursorShift {
            display: true,
            right: false,
        })
    }

    /// Shift the whole display one position to the right, without changing DDRAM.
    pub fn scroll_display_right(&mut self) -> Result<(), Error<E>> {
        self.write_command(CursorShift {
            display: true,
            right: true,
        })
    }

    /// Direction the cursor moves after each character.
    pub fn set_text_direction(&mut self, direction: TextDirection) -> Result<(), Error<E>> {
        let entry = EntryMode {
            left_to_right: direction == TextDirection::LeftToRight,
            ..self.state.entry
        };
        self.send_entry_mode(entry)
    }

    /// With autoscroll on, the display shifts with every character so text is "right
    /// justified" at the cursor.
    pub fn set_autoscroll(&mut self, on: bool) -> Result<(), Error<E>> {
        let entry = EntryMode {
            shift: on,
            ..self.state.entry
        };
        self.send_entry_mode(entry)
    }

    // the copy in `state` only changes once the chip got the flags
    fn send_display_control(&mut self, control: DisplayControl) -> Result<(), Error<E>> {
        self.write_command(Instruction::DisplayControl(control))?;
        self.state.control = control;
        Ok(())
    }

    fn send_entry_mode(&mut self, entry: EntryMode) -> Result<(), Error<E>> {
        self.write_command(EntryModeSet(entry))?;
        self.state.entry = entry;
        Ok(())
    }

    /// Store a custom glyph in one of the 8 CGRAM slots (`location` is taken modulo 8).
    ///
    /// Each byte of `pattern` is a row, top first, with the lowest 5 bits as pixels. The
    /// display is left in CGRAM mode, call `set_cursor()` or `home()` before writing text.
    pub fn create_char(&mut self, location: u8, pattern: &[u8; 8]) -> Result<(), Error<E>> {
        let location = location & 0x7;
        self.write_command(SetCgramAddress(location << 3))?;
        for row in pattern {
            self.write_data(*row)?;
        }
        Ok(())
    }

    /// Set the backlight colour.
    ///
    /// The LEDs are active low, a colour bit that is set pulls its pin low.
    pub fn set_backlight(&mut self, color: Backlight) -> Result<(), Error<E>> {
        let backlight = self.bus.pins().backlight;
        let expander = self.bus.expander();
        for index in [2, 1, 0] {
            expander.set_pin_output(backlight[index], Level::from(!color.channel(index)))?;
        }
        Ok(())
    }

    /// Poll the buttons.
    ///
    /// The buttons pull their pin to ground against the pull-up, so a low pin is a pressed
    /// button. The port carrying the buttons is read in one go.
    pub fn read_buttons(&mut self) -> Result<Buttons, Error<E>> {
        let buttons = self.bus.pins().buttons;
        let expander = self.bus.expander();

        let levels = if buttons.iter().all(|pin| *pin < 8) {
            u16::from(expander.read_port(Port::A)?)
        } else if buttons.iter().all(|pin| (8..16).contains(pin)) {
            u16::from(expander.read_port(Port::B)?) << 8
        } else {
            expander.read_all_pins()?
        };

        let mut pressed = 0u8;
        for (index, pin) in buttons.iter().enumerate() {
            let mask = bit(*pin);
            if mask != 0 && levels & mask == 0 {
                pressed |= 1 << index;
            }
        }
        Ok(Buttons::from_bits(pressed))
    }

    /// The flags last sent to the display.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn lines(&self) -> u8 {
        self.lines
    }

    /// Row the cursor was last put on by `set_cursor()`, `home()`, `clear()` or a line feed.
    pub fn current_line(&self) -> u8 {
        self.current_line
    }

    pub fn pins(&self) -> &PinMap {
        self.bus.pins()
    }

    /// The expander, for the pins the shield leaves free.
    pub fn expander(&mut self) -> &mut Mcp23017<I2C> {
        self.bus.expander()
    }

    /// Give back the I2C bus and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.bus.release().release(), self.delay)
    }
}
