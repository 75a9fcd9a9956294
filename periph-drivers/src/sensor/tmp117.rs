//! TMP117 high-accuracy digital temperature sensor
//!
//! Registers are 16 bits wide, big-endian on the wire, and addressed with
//! one byte. The temperature result is a two's complement count of
//! 7.8125 m°C.

use periph_core::{AddressedDevice, BusAddress};

use crate::error::{acked, DriverError};

/// Address with ADD0 tied to GND
pub const DEFAULT_ADDRESS: BusAddress = BusAddress::from_7bit(0x48);

/// Device ID field of the `DEVICE_ID` register
pub const DEVICE_ID: u16 = 0x0117;

/// TMP117 register addresses
pub mod reg {
    pub const TEMP_RESULT: u8 = 0x00;
    pub const CONFIGURATION: u8 = 0x01;
    pub const THIGH_LIMIT: u8 = 0x02;
    pub const TLOW_LIMIT: u8 = 0x03;
    pub const EEPROM_UL: u8 = 0x04;
    pub const EEPROM1: u8 = 0x05;
    pub const EEPROM2: u8 = 0x06;
    pub const TEMP_OFFSET: u8 = 0x07;
    pub const EEPROM3: u8 = 0x08;
    /// Revision in bits 15:12, device ID in bits 11:0
    pub const DEVICE_ID: u8 = 0x0F;
}

/// Temperature resolution in °C per LSB
const CELSIUS_PER_LSB: f32 = 0.0078125;

/// TMP117 driver
pub struct Tmp117<D> {
    device: D,
}

impl<D: AddressedDevice> Tmp117<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    /// Read a 16-bit register
    pub fn read_register(&self, register: u8) -> Result<u16, DriverError> {
        let data = self.device.read(register, 2).ok_or(DriverError::Bus)?;
        match data.as_slice() {
            [high, low] => Ok(u16::from_be_bytes([*high, *low])),
            _ => Err(DriverError::Bus),
        }
    }

    /// Write a 16-bit register
    pub fn write_register(&self, register: u8, value: u16) -> Result<(), DriverError> {
        acked(self.device.write(register, &value.to_be_bytes()))
    }

    /// Last conversion result in raw counts
    pub fn temperature_raw(&self) -> Result<i16, DriverError> {
        Ok(self.read_register(reg::TEMP_RESULT)? as i16)
    }

    /// Last conversion result in °C
    pub fn temperature_celsius(&self) -> Result<f32, DriverError> {
        Ok(self.temperature_raw()? as f32 * CELSIUS_PER_LSB)
    }

    /// Last conversion result in m°C, truncated toward zero
    pub fn temperature_millicelsius(&self) -> Result<i32, DriverError> {
        // 7.8125 m°C = 1000 / 128
        Ok(i32::from(self.temperature_raw()?) * 1000 / 128)
    }

    /// Full `DEVICE_ID` register, revision bits included
    pub fn id(&self) -> Result<u16, DriverError> {
        self.read_register(reg::DEVICE_ID)
    }

    pub fn verify_id(&self) -> Result<(), DriverError> {
        let id = self.id()?;
        if id & 0x0FFF != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("TMP117: unexpected device id {=u16:#x}", id);
            return Err(DriverError::UnexpectedId);
        }
        Ok(())
    }

    pub fn configuration(&self) -> Result<u16, DriverError> {
        self.read_register(reg::CONFIGURATION)
    }

    pub fn set_configuration(&self, value: u16) -> Result<(), DriverError> {
        self.write_register(reg::CONFIGURATION, value)
    }
}
