//! Host side stand-ins for the hardware, used by the unit tests.
//!
//! `SimulatedChip` answers I2C transactions like an MCP23017 in its power-on configuration. With
//! a `PinMap` attached it also watches the enable line of the display and decodes what an
//! HD44780 would latch, so the tests can check instruction bytes instead of port images.
use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use hal::blocking::delay::DelayUs;
use hal::blocking::i2c::{Read, Write};

use crate::{
    pins::{bit, DataPins, PinMap},
    registers::{Port, Register},
};

// IODIRA .. OLATB
const REGISTER_COUNT: usize = 0x16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// byte latched with RS low
    Command(u8),
    /// byte latched with RS high
    Data(u8),
    /// call of `DelayUs::delay_us`
    Delay(u16),
}

/// Shared, ordered record of what the display saw and how long the driver waited.
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Commands and data only.
    pub fn bytes(&self) -> Vec<Event> {
        self.0
            .borrow()
            .iter()
            .filter(|event| !matches!(event, Event::Delay(_)))
            .copied()
            .collect()
    }

    pub fn delays(&self) -> Vec<u16> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Delay(us) => Some(*us),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Delay that doesn't wait, it only records the call.
#[derive(Debug)]
pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: Log) -> RecordingDelay {
        RecordingDelay { log }
    }
}

impl DelayUs<u16> for RecordingDelay {
    fn delay_us(&mut self, us: u16) {
        self.log.push(Event::Delay(us));
    }
}

#[derive(Debug)]
struct Display {
    pins: PinMap,
    log: Log,
    // the controller starts with 8 data lines after power on
    eight_bit: bool,
    high_nibble: Option<u8>,
}

impl Display {
    fn latch(&mut self, levels: u16) {
        let mut raw = 0u8;
        for (i, pin) in self.pins.data.pins().iter().enumerate() {
            if levels & bit(*pin) != 0 {
                raw |= 1 << i;
            }
        }
        // four wired lines are D4..D7
        if let DataPins::Four(_) = self.pins.data {
            raw <<= 4;
        }

        let byte = if self.eight_bit {
            raw
        } else {
            match self.high_nibble.take() {
                Some(high) => (high << 4) | (raw >> 4),
                None => {
                    self.high_nibble = Some(raw >> 4);
                    return;
                }
            }
        };

        if levels & bit(self.pins.rs) != 0 {
            self.log.push(Event::Data(byte));
        } else {
            if byte & 0xE0 == 0x20 {
                self.eight_bit = byte & 0x10 != 0;
            }
            self.log.push(Event::Command(byte));
        }
    }
}

#[derive(Debug)]
struct Chip {
    registers: [u8; REGISTER_COUNT],
    pointer: usize,
    inputs: [u8; 2],
    display: Option<Display>,
}

impl Chip {
    fn latch_levels(&self) -> u16 {
        u16::from_le_bytes([
            self.registers[Register::OLat(Port::A).addr() as usize],
            self.registers[Register::OLat(Port::B).addr() as usize],
        ])
    }

    fn read(&self, address: usize) -> u8 {
        let gpio_a = Register::Gpio(Port::A).addr() as usize;
        if address == gpio_a || address == gpio_a + 1 {
            let port = address - gpio_a;
            let inputs = self.registers[Register::IoDir(Port::A).addr() as usize + port];
            let polarity = self.registers[Register::IPol(Port::A).addr() as usize + port];
            let latch = self.registers[Register::OLat(Port::A).addr() as usize + port];
            ((self.inputs[port] ^ polarity) & inputs) | (latch & !inputs)
        } else {
            self.registers[address]
        }
    }

    fn write(&mut self, address: usize, value: u8) {
        let gpio_a = Register::Gpio(Port::A).addr() as usize;
        let address = if address == gpio_a || address == gpio_a + 1 {
            address + 2
        } else {
            address
        };

        let before = self.latch_levels();
        self.registers[address] = value;
        let after = self.latch_levels();

        if let Some(display) = self.display.as_mut() {
            let enable = bit(display.pins.enable);
            if before & enable != 0 && after & enable == 0 {
                display.latch(after);
            }
        }
    }
}

/// MCP23017 model behind an I2C interface. Clones share the same chip.
#[derive(Debug, Clone)]
pub struct SimulatedChip(Rc<RefCell<Chip>>);

impl SimulatedChip {
    pub fn new() -> SimulatedChip {
        let mut registers = [0u8; REGISTER_COUNT];
        registers[Register::IoDir(Port::A).addr() as usize] = 0xFF;
        registers[Register::IoDir(Port::B).addr() as usize] = 0xFF;
        SimulatedChip(Rc::new(RefCell::new(Chip {
            registers,
            pointer: 0,
            inputs: [0; 2],
            display: None,
        })))
    }

    /// An expander with an HD44780 wired to it as given in `pins`.
    pub fn with_display(pins: PinMap, log: Log) -> SimulatedChip {
        let chip = SimulatedChip::new();
        chip.0.borrow_mut().display = Some(Display {
            pins,
            log,
            eight_bit: true,
            high_nibble: None,
        });
        chip
    }

    pub fn register(&self, register: Register) -> u8 {
        self.0.borrow().registers[register.addr() as usize]
    }

    pub fn set_register(&self, register: Register, value: u8) {
        self.0.borrow_mut().registers[register.addr() as usize] = value;
    }

    /// Levels driven onto the pins of `port` from outside.
    pub fn set_inputs(&self, port: Port, value: u8) {
        self.0.borrow_mut().inputs[port as usize] = value;
    }
}

impl Write for SimulatedChip {
    type Error = Infallible;

    fn write(&mut self, _address: u8, bytes: &[u8]) -> Result<(), Infallible> {
        let mut chip = self.0.borrow_mut();
        if let Some((first, values)) = bytes.split_first() {
            chip.pointer = *first as usize % REGISTER_COUNT;
            for value in values {
                let address = chip.pointer;
                chip.write(address, *value);
                chip.pointer = (address + 1) % REGISTER_COUNT;
            }
        }
        Ok(())
    }
}

impl Read for SimulatedChip {
    type Error = Infallible;

    fn read(&mut self, _address: u8, buffer: &mut [u8]) -> Result<(), Infallible> {
        let mut chip = self.0.borrow_mut();
        for value in buffer.iter_mut() {
            let address = chip.pointer;
            *value = chip.read(address);
            chip.pointer = (address + 1) % REGISTER_COUNT;
        }
        Ok(())
    }
}
