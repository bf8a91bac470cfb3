//! # Register map of the MCP23017
//!
//! The source code is written to resemble the data sheet as close as possible.
//! The data sheet can be found here:
//! <https://ww1.microchip.com/downloads/en/devicedoc/20001952c.pdf>
//!
//! The MCP23017 has two 8-bit ports, A and B. Every function of the chip has one register per
//! port, and with `IOCON.BANK = 0` (the power-on default, which this driver never changes) the
//! A and B registers of a function sit next to each other: the A register at an even address,
//! the B register right after it. The chip increments its internal address pointer after every
//! byte, so reading two bytes starting at `GPIOA` returns `GPIOA` followed by `GPIOB`.
//!
//! ## Virtual pins
//! The 16 GPIO lines are numbered 0..16. Pins 0..8 are GPA0..GPA7 on port A, pins 8..16 are
//! GPB0..GPB7 on port B.
//!
//! ## Direction (IODIR)
//! A set bit makes the pin an input, a cleared bit an output. All pins are inputs after power on.
//!
//! ## Output latch (OLAT) and GPIO
//! Reading `GPIO` returns the level on the pins, reading `OLAT` returns what was last written.
//! Writing either of them writes the output latch.

/// Fixed part of the 7-bit I2C address. The three address pins A2..A0 are OR-ed into the lowest
/// bits.
pub const BASE_ADDRESS: u8 = 0x20;

/// Highest address offset selectable with the A2..A0 pins.
pub const MAX_ADDRESS_OFFSET: u8 = 0b111;

/// Number of virtual pins of the expander.
pub const PIN_COUNT: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One of the two 8-bit ports of the expander.
pub enum Port {
    /// GPA0..GPA7, virtual pins 0..8
    A = 0,
    /// GPB0..GPB7, virtual pins 8..16
    B = 1,
}

impl Port {
    /// The port and bit position of a virtual pin, or `None` for pins above 15.
    pub fn of_pin(pin: u8) -> Option<(Port, u8)> {
        match pin {
            0..=7 => Some((Port::A, pin)),
            8..=15 => Some((Port::B, pin - 8)),
            _ => None,
        }
    }
}

/// MCP23017 registers, in `IOCON.BANK = 0` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// I/O direction, 1 = input, 0 = output
    // A: 0x00, B: 0x01
    IoDir(Port),

    /// input polarity, 1 = the GPIO bit reads inverted
    // A: 0x02, B: 0x03
    IPol(Port),

    /// interrupt-on-change enable
    // A: 0x04, B: 0x05
    GpIntEn(Port),

    /// default compare value for interrupt-on-change
    // A: 0x06, B: 0x07
    DefVal(Port),

    /// interrupt control, compare against DEFVAL (1) or the previous value (0)
    // A: 0x08, B: 0x09
    IntCon(Port),

    /// configuration register, mirrored at both addresses
    // A: 0x0A, B: 0x0B
    IoCon(Port),

    /// 100 kOhm pull-up enable, 1 = pulled up
    // A: 0x0C, B: 0x0D
    GpPu(Port),

    /// interrupt flags
    // A: 0x0E, B: 0x0F
    IntF(Port),

    /// pin levels captured at the last interrupt
    // A: 0x10, B: 0x11
    IntCap(Port),

    /// pin levels, writes go to the output latch
    // A: 0x12, B: 0x13
    Gpio(Port),

    /// output latch
    // A: 0x14, B: 0x15
    OLat(Port),
}

use Register::*;

impl Register {
    /// Returns the register address as sent on the wire.
    pub fn addr(self) -> u8 {
        let (base, port) = match self {
            IoDir(port) => (0x00, port),
            IPol(port) => (0x02, port),
            GpIntEn(port) => (0x04, port),
            DefVal(port) => (0x06, port),
            IntCon(port) => (0x08, port),
            IoCon(port) => (0x0A, port),
            GpPu(port) => (0x0C, port),
            IntF(port) => (0x0E, port),
            IntCap(port) => (0x10, port),
            Gpio(port) => (0x12, port),
            OLat(port) => (0x14, port),
        };
        base | port as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_map_to_port_and_bit() {
        assert_eq!(Port::of_pin(0), Some((Port::A, 0)));
        assert_eq!(Port::of_pin(7), Some((Port::A, 7)));
        assert_eq!(Port::of_pin(8), Some((Port::B, 0)));
        assert_eq!(Port::of_pin(15), Some((Port::B, 7)));
        assert_eq!(Port::of_pin(16), None);
        assert_eq!(Port::of_pin(255), None);
    }

    #[test]
    fn register_addresses_follow_bank_0_layout() {
        assert_eq!(IoDir(Port::A).addr(), 0x00);
        assert_eq!(IoDir(Port::B).addr(), 0x01);
        assert_eq!(IoCon(Port::B).addr(), 0x0B);
        assert_eq!(GpPu(Port::A).addr(), 0x0C);
        assert_eq!(GpPu(Port::B).addr(), 0x0D);
        assert_eq!(Gpio(Port::A).addr(), 0x12);
        assert_eq!(Gpio(Port::B).addr(), 0x13);
        assert_eq!(OLat(Port::A).addr(), 0x14);
        assert_eq!(OLat(Port::B).addr(), 0x15);
    }
}
