//! # Module defining the instruction set of the HD44780
//!
//! All instructions are implemented as enums and the flag arguments as small structs.
//! The source code is written to resemble the data sheet as close as possible.
//! The data sheet can be found here:
//! <https://www.sparkfun.com/datasheets/LCD/HD44780.pdf>
//!
//! The HD44780 is write-only on this shield. The RW line is wired to the expander, but the
//! driver always holds it low, so the chip can never be asked for its current settings. Every
//! instruction that takes flags (entry mode, display control, function set) replaces *all* flags
//! of that group at once, which is why the display driver keeps a copy of what it sent last.
//!
//! It's probably wise to elaborate a bit on some of the settings.
//!
//! ## DDRAM and rows
//! The display data RAM holds 80 characters. On a two line display the first line starts at
//! address 0x00 and the second at 0x40, each 40 characters long, of which 16 (or 20) are
//! visible. Four line displays split those two lines in half: line 3 continues line 1 at 0x14 and
//! line 4 continues line 2 at 0x54.
//!
//! ## Entry mode
//! After every character written, the cursor moves one position. `left_to_right` selects the
//! direction. With `shift` set, the whole display moves instead, so the cursor stays at the same
//! spot on the glass and text appears to be "pushed" out of it (autoscroll).
//!
//! ## CGRAM
//! Character codes 0..8 show user defined glyphs, 5 pixels wide and 8 rows high. Each glyph takes
//! 8 bytes of CGRAM, one per row, with the lowest 5 bits as the pixels.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Font height of the character cells.
pub enum CharSize {
    /// 5x8 dots, the only option on two and four line displays
    Dots5x8,
    /// 5x10 dots, only available when the display is driven as a single line
    Dots5x10,
}

impl Default for CharSize {
    fn default() -> Self {
        CharSize::Dots5x8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Direction the cursor moves after a character is written.
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Flags of the "entry mode set" instruction.
pub struct EntryMode {
    /// I/D, cursor moves right (increment) after each character
    pub left_to_right: bool,
    /// S, the display shifts along with the cursor
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Flags of the "display on/off control" instruction.
pub struct DisplayControl {
    /// D, the whole display on
    pub display: bool,
    /// C, underline cursor visible
    pub cursor: bool,
    /// B, blinking block at the cursor position
    pub blink: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Flags of the "function set" instruction.
pub struct FunctionSet {
    /// DL, 8 data lines instead of 4
    pub eight_bit: bool,
    /// N, two display lines instead of one
    pub two_lines: bool,
    /// F, 5x10 font instead of 5x8
    pub large_font: bool,
}

/// HD44780 instruction set, see data sheet table 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// write spaces to all of DDRAM and return the cursor home; takes 1.52 ms
    // translates to: 0x01
    ClearDisplay,

    /// move the cursor to address 0 and undo any display shift; takes 1.52 ms
    // translates to: 0x02
    ReturnHome,

    /// cursor direction and display shift after each character
    // translates to: 0x04 OR with I/D, S
    EntryModeSet(EntryMode),

    /// display, cursor and blink on/off
    // translates to: 0x08 OR with D, C, B
    DisplayControl(DisplayControl),

    /// move the cursor or shift the whole display by one position, without touching DDRAM
    // translates to: 0x10 OR with S/C, R/L
    CursorShift {
        /// S/C, shift the display instead of moving the cursor
        display: bool,
        /// R/L, to the right instead of to the left
        right: bool,
    },

    /// interface width, number of lines and font
    // translates to: 0x20 OR with DL, N, F
    FunctionSet(FunctionSet),

    /// set the CGRAM address, following data writes go into glyph memory; 0 =< address < 64
    // translates to: 0x40 OR with 6 bit address
    SetCgramAddress(u8),

    /// set the DDRAM address, following data writes go onto the display; 0 =< address < 128
    // translates to: 0x80 OR with 7 bit address
    SetDdramAddress(u8),
}

use Instruction::*;

// Use full binary presentation instead of hex, to look the same as data sheet
impl Instruction {
    /// Returns the specific instruction as a byte (u8) which can be send over a wire
    pub fn byte(self) -> u8 {
        match self {
            ClearDisplay => 0b0000_0001,
            ReturnHome => 0b0000_0010,
            EntryModeSet(mode) => {
                0b0000_0100 | ((mode.left_to_right as u8) << 1) | mode.shift as u8
            }
            Instruction::DisplayControl(control) => {
                0b0000_1000
                    | ((control.display as u8) << 2)
                    | ((control.cursor as u8) << 1)
                    | control.blink as u8
            }
            CursorShift { display, right } => {
                0b0001_0000 | ((display as u8) << 3) | ((right as u8) << 2)
            }
            Instruction::FunctionSet(function) => {
                0b0010_0000
                    | ((function.eight_bit as u8) << 4)
                    | ((function.two_lines as u8) << 3)
                    | ((function.large_font as u8) << 2)
            }
            SetCgramAddress(address) => 0b0100_0000 | (address & 0b0011_1111),
            SetDdramAddress(address) => 0b1000_0000 | (address & 0b0111_1111),
        }
    }

    /// Returns true for the two slow instructions that need the long wait afterwards
    pub fn is_slow(&self) -> bool {
        matches!(self, ClearDisplay | ReturnHome)
    }
}

/// A prelude for convenience, it pulls all enums and structs into scope.
pub mod prelude {
    pub use super::{
        CharSize, DisplayControl, EntryMode, FunctionSet, Instruction, Instruction::*,
        TextDirection,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::{
        ClearDisplay, CursorShift, EntryModeSet, ReturnHome, SetCgramAddress, SetDdramAddress,
    };

    #[test]
    fn instruction_bytes() {
        assert_eq!(ClearDisplay.byte(), 0x01);
        assert_eq!(ReturnHome.byte(), 0x02);
        assert_eq!(
            EntryModeSet(EntryMode {
                left_to_right: true,
                shift: false
            })
            .byte(),
            0x06
        );
        assert_eq!(
            Instruction::DisplayControl(DisplayControl {
                display: true,
                cursor: false,
                blink: true
            })
            .byte(),
            0x0D
        );
        assert_eq!(
            CursorShift {
                display: true,
                right: false
            }
            .byte(),
            0x18
        );
        assert_eq!(
            CursorShift {
                display: true,
                right: true
            }
            .byte(),
            0x1C
        );
        assert_eq!(
            Instruction::FunctionSet(FunctionSet {
                eight_bit: false,
                two_lines: true,
                large_font: false
            })
            .byte(),
            0x28
        );
        assert_eq!(SetCgramAddress(3 << 3).byte(), 0x58);
        assert_eq!(SetDdramAddress(0x40 + 5).byte(), 0xC5);
    }

    #[test]
    fn only_clear_and_home_are_slow() {
        assert!(ClearDisplay.is_slow());
        assert!(ReturnHome.is_slow());
        assert!(!SetDdramAddress(0).is_slow());
    }
}
