//! I2C EEPROM with 16-bit memory addressing
//!
//! Byte-organized serial EEPROMs from 4 x 8 bit up to 65536 x 8 bit
//! (M24C32, M24128 and compatibles). Accesses are sequential from the
//! given address; page-aligned writes are the caller's concern, since a
//! write that crosses a page boundary wraps inside the page on the chip.

use alloc::vec::Vec;

use periph_core::AddressedDevice;

use crate::error::{acked, DriverError};

/// Largest array addressable with two address bytes
pub const DEFAULT_MEMORY_SIZE: u32 = 0x10000;

/// Byte-addressed EEPROM
pub struct I2cEeprom<D> {
    device: D,
    memory_size: u32,
}

impl<D: AddressedDevice> I2cEeprom<D> {
    /// Create a driver for a part with `memory_size` bytes
    pub fn new(device: D, memory_size: u32) -> Self {
        Self {
            device,
            memory_size: memory_size.min(DEFAULT_MEMORY_SIZE),
        }
    }

    /// Size of the array in bytes
    pub fn memory_size(&self) -> u32 {
        self.memory_size
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Read `length` bytes starting at `address`
    pub fn read(&self, address: u16, length: usize) -> Result<Vec<u8>, DriverError> {
        self.check_range(address, length)?;
        self.device.read(address, length).ok_or(DriverError::Bus)
    }

    /// Write `data` starting at `address`
    ///
    /// The chip starts its internal write cycle after the stop condition
    /// and ignores the bus until it finishes; poll [`is_ready`](Self::is_ready)
    /// before the next access.
    pub fn write(&self, address: u16, data: &[u8]) -> Result<(), DriverError> {
        self.check_range(address, data.len())?;
        acked(self.device.write(address, data))
    }

    /// Acknowledge polling: `false` while a write cycle is in progress
    pub fn is_ready(&self) -> bool {
        self.device.probe()
    }

    fn check_range(&self, address: u16, length: usize) -> Result<(), DriverError> {
        let end = address as u64 + length as u64;
        if end > self.memory_size as u64 {
            return Err(DriverError::OutOfRange);
        }
        Ok(())
    }
}
