//! Wiring of the character display, the buttons and the backlight onto the expander pins.
//!
//! `PinMap::default()` is the wiring of the RGB LCD shield:
//!
//! expander pin | shield function
//!  GPA0 .. GPA4    buttons SELECT, RIGHT, DOWN, UP, LEFT (to ground)
//!  GPA6, GPA7      backlight red, green (active low)
//!  GPB0            backlight blue (active low)
//!  GPB1 .. GPB4    LCD D7, D6, D5, D4
//!  GPB5            LCD E
//!  GPB6            LCD RW
//!  GPB7            LCD RS

/// The data lines of the display, in virtual-pin numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataPins {
    /// D4..D7 wired, bytes go over as two nibbles. Index 0 is D4.
    Four([u8; 4]),
    /// D0..D7 wired. Index 0 is D0.
    Eight([u8; 8]),
}

impl DataPins {
    /// The data pins, lowest data bit first.
    pub fn pins(&self) -> &[u8] {
        match self {
            DataPins::Four(pins) => pins,
            DataPins::Eight(pins) => pins,
        }
    }

    pub fn is_eight_bit(&self) -> bool {
        matches!(self, DataPins::Eight(_))
    }
}

/// Assignment of every shield function to an expander pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// register select, low = command, high = character data
    pub rs: u8,
    /// read/write, held low. `None` if RW is tied to ground on the board.
    pub rw: Option<u8>,
    /// enable, data is latched on the falling edge
    pub enable: u8,
    pub data: DataPins,
    /// SELECT, RIGHT, DOWN, UP, LEFT; the index is the bit in `Buttons`
    pub buttons: [u8; 5],
    /// red, green, blue; the index is the bit in `Backlight`
    pub backlight: [u8; 3],
}

impl Default for PinMap {
    fn default() -> Self {
        PinMap {
            rs: 15,
            rw: Some(14),
            enable: 13,
            data: DataPins::Four([12, 11, 10, 9]),
            buttons: [0, 1, 2, 3, 4],
            backlight: [6, 7, 8],
        }
    }
}

impl PinMap {
    /// Mask with the bits of all data pins set, in `read_all_pins` layout.
    pub fn data_mask(&self) -> u16 {
        self.data
            .pins()
            .iter()
            .fold(0u16, |mask, pin| mask | bit(*pin))
    }
}

// bit of a virtual pin in a 16-bit port image, 0 for pins above 15
pub(crate) fn bit(pin: u8) -> u16 {
    if pin < 16 {
        1 << pin
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_wiring() {
        let pins = PinMap::default();
        assert!(!pins.data.is_eight_bit());
        assert_eq!(pins.data_mask(), 0b0001_1110_0000_0000);
        assert_eq!(bit(pins.enable), 0x2000);
    }
}
