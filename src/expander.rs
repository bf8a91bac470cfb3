//! # Driver for the MCP23017 16-bit I/O expander
//!
//! Every pin operation is a read-modify-write of one port register: the current byte is read
//! from the chip, one bit is changed and the byte is written back, so the other seven pins of
//! that port keep their configuration. Nothing is cached on this side of the bus.
//!
//! Pin numbers above 15 are silently ignored: no bus traffic, `Ok(())`, and reads return
//! `Level::Low`.
use hal::blocking::i2c::{Read, Write};

use crate::{
    error::Error,
    registers::{Port, Register, BASE_ADDRESS, MAX_ADDRESS_OFFSET},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Direction of a virtual pin.
pub enum Direction {
    /// IODIR bit set
    Input,
    /// IODIR bit cleared
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Logic level of a virtual pin.
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Level {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

#[derive(Debug)]
/// MCP23017 on an I2C bus.
pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Mcp23017<I2C>
where
    I2C: Write<Error = E> + Read<Error = E>,
{
    /// Create a driver for the expander with address pins A2..A0 set to `address`.
    ///
    /// Offsets above 7 are clamped to 7. This does not talk to the chip yet, call `init()` for
    /// that.
    pub fn new(i2c: I2C, address: u8) -> Mcp23017<I2C> {
        if address > MAX_ADDRESS_OFFSET {
            #[cfg(feature = "defmt")]
            defmt::warn!("mcp23017: address offset {} clamped to 7", address);
        }
        Mcp23017 {
            i2c,
            address: BASE_ADDRESS | address.min(MAX_ADDRESS_OFFSET),
        }
    }

    /// Put all 16 pins into input direction, the safe default after reset.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.write_register(Register::IoDir(Port::A), 0xFF)?;
        self.write_register(Register::IoDir(Port::B), 0xFF)
    }

    /// The full 7-bit I2C address of the chip.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the I2C bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read a single register.
    ///
    /// The register address is sent in its own transaction (ending with a STOP), followed by a
    /// one-byte read transaction.
    pub fn read_register(&mut self, register: Register) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        self.read_registers(register, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Write a single register.
    pub fn write_register(&mut self, register: Register, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[register.addr(), value])
            .map_err(Error::Bus)
    }

    // multi byte reads rely on the address pointer auto incrementing in the chip
    fn read_registers(&mut self, first: Register, buffer: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[first.addr()])
            .map_err(Error::Bus)?;
        self.i2c.read(self.address, buffer).map_err(Error::Bus)
    }

    // read `from`, change one bit, write the result to `to`
    fn update_bit(
        &mut self,
        from: Register,
        to: Register,
        bit: u8,
        set: bool,
    ) -> Result<(), Error<E>> {
        let mut value = self.read_register(from)?;
        if set {
            value |= 1 << bit;
        } else {
            value &= !(1 << bit);
        }
        self.write_register(to, value)
    }

    /// Configure a pin as input or output.
    pub fn set_pin_direction(&mut self, pin: u8, direction: Direction) -> Result<(), Error<E>> {
        match Port::of_pin(pin) {
            Some((port, bit)) => {
                let register = Register::IoDir(port);
                self.update_bit(register, register, bit, direction == Direction::Input)
            }
            None => Ok(()),
        }
    }

    /// Drive an output pin high or low.
    ///
    /// The current byte is taken from the output latch and written back through the GPIO
    /// register, which the chip stores in the latch.
    pub fn set_pin_output(&mut self, pin: u8, level: Level) -> Result<(), Error<E>> {
        match Port::of_pin(pin) {
            Some((port, bit)) => self.update_bit(
                Register::OLat(port),
                Register::Gpio(port),
                bit,
                level.is_high(),
            ),
            None => Ok(()),
        }
    }

    /// Enable or disable the internal 100 kOhm pull-up of a pin.
    pub fn set_pull_up(&mut self, pin: u8, enabled: bool) -> Result<(), Error<E>> {
        match Port::of_pin(pin) {
            Some((port, bit)) => {
                let register = Register::GpPu(port);
                self.update_bit(register, register, bit, enabled)
            }
            None => Ok(()),
        }
    }

    /// Read the level of a single pin.
    pub fn read_pin(&mut self, pin: u8) -> Result<Level, Error<E>> {
        match Port::of_pin(pin) {
            Some((port, bit)) => {
                let value = self.read_port(port)?;
                Ok(Level::from((value >> bit) & 0x01 == 0x01))
            }
            None => Ok(Level::Low),
        }
    }

    /// Read the pin levels of one port.
    pub fn read_port(&mut self, port: Port) -> Result<u8, Error<E>> {
        self.read_register(Register::Gpio(port))
    }

    /// Read both ports in one transaction. Port A is the low byte, port B the high byte.
    pub fn read_all_pins(&mut self) -> Result<u16, Error<E>> {
        let mut buffer = [0u8; 2];
        self.read_registers(Register::Gpio(Port::A), &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    /// Write both ports in one transaction. Port A gets the low byte, port B the high byte.
    pub fn write_all_pins(&mut self, value: u16) -> Result<(), Error<E>> {
        let [low, high] = value.to_le_bytes();
        self.i2c
            .write(self.address, &[Register::Gpio(Port::A).addr(), low, high])
            .map_err(Error::Bus)
    }
}
