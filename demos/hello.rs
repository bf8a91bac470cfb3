use embedded_hal::blocking::{delay, i2c};
use rgb_lcd_shield::{Backlight, CharSize, RgbLcdShield};
use std::convert::Infallible;
use std::fmt::Write;

/// I2C bus with nothing attached. Reads return all pins high, so no button is pressed.
pub struct NullBus;

impl i2c::Write for NullBus {
    type Error = Infallible;

    fn write(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl i2c::Read for NullBus {
    type Error = Infallible;

    fn read(&mut self, _address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        buffer.fill(0xff);
        Ok(())
    }
}

pub struct NoDelay;

impl delay::DelayUs<u16> for NoDelay {
    fn delay_us(&mut self, _us: u16) {}
}

fn main() {
    let mut lcd = RgbLcdShield::new(NullBus, 0, NoDelay);

    lcd.begin(16, 2, CharSize::Dots5x8)
        .expect("Infallible cannot fail");
    lcd.set_backlight(Backlight::TEAL)
        .expect("Infallible cannot fail");

    writeln!(lcd, "Hello World").unwrap();
    write!(lcd, "20\u{b0}C").unwrap();

    let buttons = lcd.read_buttons().expect("Infallible cannot fail");
    println!("buttons pressed: {:#04x}", buttons.bits());
}
