//! `embedded-hal` 1.0 interop
//!
//! Lets any blocking `embedded_hal::i2c::I2c` implementation (embassy,
//! stm32 HAL crates, linux-embedded-hal, ...) stand in as the bus handle
//! of a [`BusMaster`](super::BusMaster).

use embedded_hal::i2c::I2c;
use periph_hal::i2c::I2cBus;

/// Wraps an `embedded-hal` I2C master
///
/// `embedded-hal` has no per-call timeout; the wrapped driver applies
/// whatever timeout it was configured with, so the `timeout_ms`
/// arguments are ignored here.
pub struct EmbeddedHalBus<T> {
    inner: T,
}

impl<T> EmbeddedHalBus<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cBus for EmbeddedHalBus<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.inner.write(address >> 1, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.inner.read(address >> 1, buf)
    }

    /// Address-only write, repeated up to `trials` times
    fn probe(&mut self, address: u8, trials: u32, _timeout_ms: u32) -> Result<(), Self::Error> {
        let mut result = self.inner.write(address >> 1, &[]);
        for _ in 1..trials {
            if result.is_ok() {
                break;
            }
            result = self.inner.write(address >> 1, &[]);
        }
        result
    }
}
