//! Error type shared by the expander and the shield driver.

/// Errors returned by the drivers in this crate.
///
/// `E` is the error type of the I2C implementation handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// An I2C transaction failed. Nothing is retried, the bus error is handed back as is.
    Bus(E),

    /// A display geometry the HD44780 cannot address (rows outside 1..=4, columns outside
    /// 1..=40).
    ///
    /// Pin numbers above 15 are not reported with this, those are silently ignored.
    OutOfRange,
}

impl<E> Error<E> {
    /// Returns the underlying bus error, if there is one.
    pub fn bus_error(self) -> Option<E> {
        match self {
            Error::Bus(e) => Some(e),
            Error::OutOfRange => None,
        }
    }
}
