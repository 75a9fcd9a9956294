//! ST25DV0xK dynamic NFC/RFID tag with 4, 16 or 64 kbit EEPROM
//!
//! The chip answers on two bus addresses:
//! - `0xAE` system area: non-volatile configuration registers, device
//!   identification and the I2C password
//! - `0xA6` user area: user EEPROM from `0x0000`, dynamic registers from
//!   `0x2000`, and the 256-byte mailbox from `0x2008`
//!
//! Both use 16-bit memory addresses. A low-power-down (LPD) line, driven
//! high, forces the RF side into its lowest-power state.
//!
//! # Security session
//!
//! System registers only accept writes while an I2C security session is
//! open. Presenting the password opens it; [`St25dv::is_locked`] reports
//! the session state from `I2C_SSO`.

use alloc::vec::Vec;
use core::fmt::Write as _;

use periph_core::{AddressedDevice, BusAddress};
use periph_hal::gpio::OutputPin;

use super::registers::{DynamicRegister, Register, State, SystemRegister};
use crate::error::{acked, DriverError};

/// System-area device address
pub const SYSTEM_ADDRESS: BusAddress = BusAddress::new(0xAE);

/// User-area and dynamic-register device address
pub const USER_ADDRESS: BusAddress = BusAddress::new(0xA6);

/// Factory password
pub const DEFAULT_PASSWORD: u64 = 0;

/// `MANUF_CODE` value for STMicroelectronics
pub const MANUFACTURER_ID: u8 = 0x02;

const MAILBOX_START: u16 = 0x2008;

/// Password frame validation code: present
const PRESENT_PASSWORD: u8 = 0x09;
/// Password frame validation code: write new password
const WRITE_PASSWORD: u8 = 0x07;

/// RF_MNGT bits: RF_DISABLE | RF_SLEEP
const RF_OFF: u8 = 0x03;

/// `MEM_SIZE` content for each density, in kbit
const MEMORY_SIZES: [(u16, u8); 3] = [(0x007F, 4), (0x01FF, 16), (0x07FF, 64)];

/// ST25DV0xK driver
///
/// `S` talks to the system area, `U` to the user area, `P` drives LPD.
pub struct St25dv<S, U, P> {
    system: S,
    user: U,
    lpd: P,
    /// User EEPROM size in kbit
    memory_size: u8,
}

impl<S, U, P> St25dv<S, U, P>
where
    S: AddressedDevice,
    U: AddressedDevice,
    P: OutputPin,
{
    /// Create a driver for a part with `memory_size` kbit of user EEPROM
    ///
    /// Use [`detect_memory_size`](Self::detect_memory_size) to read the
    /// actual density from the chip.
    pub fn new(system: S, user: U, lpd: P, memory_size: u8) -> Self {
        Self {
            system,
            user,
            lpd,
            memory_size,
        }
    }

    /// User EEPROM size in kbit
    pub fn memory_size(&self) -> u8 {
        self.memory_size
    }

    /// User EEPROM size in bytes
    pub fn memory_bytes(&self) -> u32 {
        self.memory_size as u32 * 128
    }

    pub fn into_parts(self) -> (S, U, P) {
        (self.system, self.user, self.lpd)
    }

    pub fn read_register(&self, register: SystemRegister) -> Result<u8, DriverError> {
        read_byte(&self.system, register.address())
    }

    /// Write a system register; needs an open security session
    pub fn write_register(&self, register: SystemRegister, value: u8) -> Result<(), DriverError> {
        acked(self.system.write(register.address(), &[value]))
    }

    pub fn read_dynamic(&self, register: DynamicRegister) -> Result<u8, DriverError> {
        read_byte(&self.user, register.address())
    }

    pub fn write_dynamic(&self, register: DynamicRegister, value: u8) -> Result<(), DriverError> {
        acked(self.user.write(register.address(), &[value]))
    }

    /// Read user EEPROM
    pub fn read_memory(&self, address: u16, length: usize) -> Result<Vec<u8>, DriverError> {
        self.check_range(address, length)?;
        self.user.read(address, length).ok_or(DriverError::Bus)
    }

    /// Write user EEPROM
    ///
    /// Writes stay within one 4-byte RF block per internal cycle; the
    /// chip handles longer sequential writes itself.
    pub fn write_memory(&self, address: u16, data: &[u8]) -> Result<(), DriverError> {
        self.check_range(address, data.len())?;
        acked(self.user.write(address, data))
    }

    /// Manufacturer code; [`MANUFACTURER_ID`] on a genuine part
    pub fn id(&self) -> Result<u8, DriverError> {
        self.read_register(SystemRegister::ManufCode)
    }

    pub fn verify_id(&self) -> Result<(), DriverError> {
        let id = self.id()?;
        if id != MANUFACTURER_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("ST25DV: unexpected manufacturer code {=u8:#x}", id);
            return Err(DriverError::UnexpectedId);
        }
        Ok(())
    }

    /// Drive the LPD line; `On` puts the tag into low-power mode
    pub fn set_low_power(&mut self, state: State) {
        self.lpd.set_state(state.into());
    }

    /// `true` while no security session is open
    pub fn is_locked(&self) -> Result<bool, DriverError> {
        Ok(self.read_dynamic(DynamicRegister::I2cSso)? == 0)
    }

    /// Open a security session
    ///
    /// A wrong password is still acknowledged on the bus; check
    /// [`is_locked`](Self::is_locked) to see whether it was accepted.
    pub fn present_password(&self, password: u64) -> Result<(), DriverError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ST25DV: presenting I2C password");
        let frame = password_frame(password, PRESENT_PASSWORD, password);
        acked(self.system.transmit(&frame))
    }

    /// Replace the I2C password
    ///
    /// Opens a session with `old` first, then writes `new`.
    pub fn change_password(&self, old: u64, new: u64) -> Result<(), DriverError> {
        self.present_password(old)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("ST25DV: writing new I2C password");
        let frame = password_frame(new, WRITE_PASSWORD, new);
        acked(self.system.transmit(&frame))
    }

    /// Enable or disable the RF interface until the next power cycle
    pub fn set_rf(&self, state: State) -> Result<(), DriverError> {
        let value = match state {
            State::On => 0x00,
            State::Off => RF_OFF,
        };
        self.write_dynamic(DynamicRegister::RfMngt, value)
    }

    /// RF interface state; disabled or sleeping both count as `Off`
    pub fn rf(&self) -> Result<State, DriverError> {
        let value = self.read_dynamic(DynamicRegister::RfMngt)?;
        Ok(State::from(value & RF_OFF == 0))
    }

    /// Register content as `0bXXXXXXXX`, for diagnostics
    pub fn format_register(
        &self,
        register: impl Into<Register>,
    ) -> Result<heapless::String<10>, DriverError> {
        let value = match register.into() {
            Register::System(register) => self.read_register(register)?,
            Register::Dynamic(register) => self.read_dynamic(register)?,
        };
        let mut text = heapless::String::new();
        write!(text, "0b{:08b}", value).map_err(|_| DriverError::UnexpectedValue)?;
        Ok(text)
    }

    /// Read the EEPROM density from `MEM_SIZE` and use it for bounds checks
    ///
    /// Returns the size in kbit.
    pub fn detect_memory_size(&mut self) -> Result<u8, DriverError> {
        let raw = self
            .system
            .read(SystemRegister::MemSize.address(), 2)
            .ok_or(DriverError::Bus)?;
        let blocks = match raw.as_slice() {
            [low, high] => u16::from_le_bytes([*low, *high]),
            _ => return Err(DriverError::Bus),
        };

        let kbit = MEMORY_SIZES
            .iter()
            .find(|(value, _)| *value == blocks)
            .map(|(_, kbit)| *kbit)
            .ok_or(DriverError::UnexpectedValue)?;
        self.memory_size = kbit;
        Ok(kbit)
    }

    /// Current mailbox message
    pub fn read_mailbox(&self) -> Result<Vec<u8>, DriverError> {
        let length = self.read_dynamic(DynamicRegister::MbLen)? as usize + 1;
        self.user
            .read(MAILBOX_START, length)
            .ok_or(DriverError::Bus)
    }

    fn check_range(&self, address: u16, length: usize) -> Result<(), DriverError> {
        if address as u64 + length as u64 > self.memory_bytes() as u64 {
            return Err(DriverError::OutOfRange);
        }
        Ok(())
    }
}

fn read_byte(device: &impl AddressedDevice, address: u16) -> Result<u8, DriverError> {
    device
        .read(address, 1)
        .and_then(|data| data.first().copied())
        .ok_or(DriverError::Bus)
}

/// `I2C_PWD address ‖ first ‖ code ‖ second`, passwords least-significant byte first
fn password_frame(first: u64, code: u8, second: u64) -> [u8; 19] {
    let mut frame = [0u8; 19];
    frame[..2].copy_from_slice(&SystemRegister::I2cPwd.address().to_be_bytes());
    frame[2..10].copy_from_slice(&first.to_le_bytes());
    frame[10] = code;
    frame[11..].copy_from_slice(&second.to_le_bytes());
    frame
}
