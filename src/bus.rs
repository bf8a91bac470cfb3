//! # Parallel HD44780 interface on top of the expander pins
//!
//! The display is wired to the expander, so every edge on its RS, E and data lines is an I2C
//! write. A transfer of one bus width (a nibble on a 4-bit wired display, a byte on an 8-bit one)
//! is one enable pulse, built as three images of both expander ports:
//!
//! 1. the data bits on the data pins, E low
//! 2. the same with E high
//! 3. E low again, the display latches the data on this falling edge
//!
//! The images start from the current pin levels (`read_all_pins`), so the backlight and all other
//! pins keep their state. Those three writes and the waits between them are the whole protocol,
//! `EnablePulse` builds them without touching the bus.
use hal::blocking::delay::DelayUs;
use hal::blocking::i2c::{Read, Write};

use crate::{
    error::Error,
    expander::{Direction, Level, Mcp23017},
    pins::{bit, PinMap},
};

/// Data setup time before E rises. The data sheet asks for 195 ns (tAS + tDSW), 1 us is the
/// shortest wait `DelayUs` can express.
pub const ENABLE_SETUP_US: u16 = 1;

/// E high time, the data sheet minimum is 450 ns (PWEH).
pub const ENABLE_PULSE_US: u16 = 1;

/// Wait after the falling edge of E. All instructions except clear and home finish within
/// 37 us at 270 kHz, the margin covers slower oscillators.
pub const COMMAND_SETTLE_US: u16 = 100;

/// The three port images written for one enable pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnablePulse {
    frames: [u16; 3],
}

impl EnablePulse {
    /// Build the pulse for the lowest bits of `value` (4 or 8, depending on how many data pins
    /// are wired), starting from the pin levels in `current`.
    pub fn new(current: u16, pins: &PinMap, value: u8) -> EnablePulse {
        let enable = bit(pins.enable);

        let mut out = current;
        for (i, pin) in pins.data.pins().iter().enumerate() {
            out &= !bit(*pin);
            if (value >> i) & 0x01 == 0x01 {
                out |= bit(*pin);
            }
        }
        out &= !enable;

        EnablePulse {
            frames: [out, out | enable, out],
        }
    }

    pub fn frames(&self) -> [u16; 3] {
        self.frames
    }
}

/// The HD44780 interface lines, driven through an expander.
#[derive(Debug)]
pub struct ParallelBus<I2C> {
    expander: Mcp23017<I2C>,
    pins: PinMap,
}

impl<I2C, E> ParallelBus<I2C>
where
    I2C: Write<Error = E> + Read<Error = E>,
{
    pub fn new(expander: Mcp23017<I2C>, pins: PinMap) -> ParallelBus<I2C> {
        ParallelBus { expander, pins }
    }

    pub fn pins(&self) -> &PinMap {
        &self.pins
    }

    /// Direct access to the expander, for the pins that are not part of the display interface.
    pub fn expander(&mut self) -> &mut Mcp23017<I2C> {
        &mut self.expander
    }

    pub fn release(self) -> Mcp23017<I2C> {
        self.expander
    }

    /// Make RW, RS, E and the data pins outputs.
    pub fn configure(&mut self) -> Result<(), Error<E>> {
        if let Some(rw) = self.pins.rw {
            self.expander.set_pin_direction(rw, Direction::Output)?;
        }
        self.expander.set_pin_direction(self.pins.rs, Direction::Output)?;
        self.expander.set_pin_direction(self.pins.enable, Direction::Output)?;
        let data = self.pins.data;
        for pin in data.pins() {
            self.expander.set_pin_direction(*pin, Direction::Output)?;
        }
        Ok(())
    }

    /// Drive RS, E and RW low, the idle state before the power on sequence.
    pub fn idle(&mut self) -> Result<(), Error<E>> {
        self.expander.set_pin_output(self.pins.rs, Level::Low)?;
        self.expander.set_pin_output(self.pins.enable, Level::Low)?;
        if let Some(rw) = self.pins.rw {
            self.expander.set_pin_output(rw, Level::Low)?;
        }
        Ok(())
    }

    /// One transfer of the wired bus width: the lowest 4 or 8 bits of `value`, latched with a
    /// single enable pulse. RS is left as it is.
    pub fn write_bits<D: DelayUs<u16>>(
        &mut self,
        value: u8,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        let current = self.expander.read_all_pins()?;
        let [setup, strobe, latch] = EnablePulse::new(current, &self.pins, value).frames();

        self.expander.write_all_pins(setup)?;
        delay.delay_us(ENABLE_SETUP_US);
        self.expander.write_all_pins(strobe)?;
        delay.delay_us(ENABLE_PULSE_US);
        self.expander.write_all_pins(latch)?;
        delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    /// Send a full byte, as instruction (`data == false`) or character data (`data == true`).
    ///
    /// On a 4-bit wired display the high nibble goes first.
    pub fn send<D: DelayUs<u16>>(
        &mut self,
        value: u8,
        data: bool,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        self.expander.set_pin_output(self.pins.rs, Level::from(data))?;
        if let Some(rw) = self.pins.rw {
            self.expander.set_pin_output(rw, Level::Low)?;
        }

        if self.pins.data.is_eight_bit() {
            self.write_bits(value, delay)
        } else {
            self.write_bits(value >> 4, delay)?;
            self.write_bits(value, delay)
        }
    }
}
