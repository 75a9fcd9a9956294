//! I2C bus abstractions
//!
//! Provides the blocking master transactions the bus master is built on.
//! Addresses cross this boundary in 8-bit form: the 7-bit device address
//! shifted left by one, with bit 0 left clear for the direction bit.

/// Blocking I2C bus master
///
/// Each call is one complete transaction (start ... stop) that either
/// finishes or fails within `timeout_ms`.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write `data` to the device at `address`
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), Self::Error>;

    /// Fill `buf` with bytes read from the device at `address`
    ///
    /// Must not report success unless every byte of `buf` was received.
    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges `address`
    ///
    /// Tries up to `trials` times, each bounded by `timeout_ms`.
    fn probe(&mut self, address: u8, trials: u32, timeout_ms: u32) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), Self::Error> {
        T::write(self, address, data, timeout_ms)
    }

    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), Self::Error> {
        T::read(self, address, buf, timeout_ms)
    }

    fn probe(&mut self, address: u8, trials: u32, timeout_ms: u32) -> Result<(), Self::Error> {
        T::probe(self, address, trials, timeout_ms)
    }
}

/// I2C configuration
///
/// The clock is programmed by board initialization; `frequency` is kept
/// so drivers can reason about transfer times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Timeout for a blocking write or read, in milliseconds
    pub transfer_timeout_ms: u32,
    /// Timeout for each presence probe attempt, in milliseconds
    pub probe_timeout_ms: u32,
    /// Number of presence probe attempts
    pub probe_trials: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self::with_frequency(100_000);

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self::with_frequency(400_000);

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self::with_frequency(1_000_000);

    /// Default timeouts at the given clock frequency
    pub const fn with_frequency(frequency: u32) -> Self {
        Self {
            frequency,
            transfer_timeout_ms: 100,
            probe_timeout_ms: 10,
            probe_trials: 1,
        }
    }
}
