//! Keypad and backlight values of the shield.
//!
//! Both are small bit sets. The bit order matches `PinMap::buttons` and `PinMap::backlight`.
use core::ops::{BitOr, BitOrAssign};

/// Buttons pressed at the moment of a `read_buttons()`, one bit per button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0x00);
    pub const SELECT: Buttons = Buttons(0x01);
    pub const RIGHT: Buttons = Buttons(0x02);
    pub const DOWN: Buttons = Buttons(0x04);
    pub const UP: Buttons = Buttons(0x08);
    pub const LEFT: Buttons = Buttons(0x10);

    /// All five buttons.
    pub const ALL: Buttons = Buttons(0x1F);

    /// Keeps only the five button bits.
    pub fn from_bits(bits: u8) -> Buttons {
        Buttons(bits & Buttons::ALL.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// True if every button in `other` is pressed.
    pub fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

/// Backlight colour: bit 0 red, bit 1 green, bit 2 blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backlight(u8);

impl Backlight {
    pub const OFF: Backlight = Backlight(0x0);
    pub const RED: Backlight = Backlight(0x1);
    pub const GREEN: Backlight = Backlight(0x2);
    pub const YELLOW: Backlight = Backlight(0x3);
    pub const BLUE: Backlight = Backlight(0x4);
    pub const VIOLET: Backlight = Backlight(0x5);
    pub const TEAL: Backlight = Backlight(0x6);
    pub const WHITE: Backlight = Backlight(0x7);

    /// Keeps only the three colour bits.
    pub fn from_bits(bits: u8) -> Backlight {
        Backlight(bits & 0x7)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether the LED of colour channel `index` (0 red, 1 green, 2 blue) is lit.
    pub fn channel(self, index: usize) -> bool {
        index < 3 && (self.0 >> index) & 0x1 == 0x1
    }
}

impl BitOr for Backlight {
    type Output = Backlight;

    fn bitor(self, rhs: Backlight) -> Backlight {
        Backlight(self.0 | rhs.0)
    }
}
