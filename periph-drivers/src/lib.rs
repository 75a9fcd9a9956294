//! Chip drivers for I2C-attached devices
//!
//! Each driver holds the [`AddressedDevice`](periph_core::AddressedDevice)
//! it talks through and exposes named operations on top of its
//! `read`/`write`/`transmit`/`receive`:
//!
//! - Memory (M24Cxx-style EEPROM with 16-bit addressing)
//! - NFC (ST25DV0xK dynamic tag)
//! - Sensors (TMP117 temperature sensor)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod eeprom;
pub mod error;
pub mod nfc;
pub mod sensor;

pub use eeprom::I2cEeprom;
pub use error::DriverError;
pub use nfc::St25dv;
pub use sensor::Tmp117;

#[cfg(test)]
pub(crate) mod testing;
