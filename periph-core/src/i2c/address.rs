//! Bus and memory address types

use heapless::Vec;

/// Device address on the bus, in 8-bit form
///
/// The 7-bit address occupies bits 7..1; bit 0 is the read/write
/// direction bit driven by the bus master and is always clear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress(u8);

impl BusAddress {
    /// Wrap an 8-bit address
    ///
    /// # Panics
    ///
    /// If bit 0 is set. In a `const` context this fails the build.
    pub const fn new(address: u8) -> Self {
        assert!(address & 0x01 == 0, "I2C address bit 0 is the direction bit");
        Self(address)
    }

    /// Wrap an 8-bit address, `None` if bit 0 is set
    pub const fn try_new(address: u8) -> Option<Self> {
        if address & 0x01 != 0 {
            return None;
        }
        Some(Self(address))
    }

    /// Build from a 7-bit address as printed in most datasheets
    ///
    /// # Panics
    ///
    /// If `address` does not fit in 7 bits.
    pub const fn from_7bit(address: u8) -> Self {
        assert!(address < 0x80, "7-bit I2C address out of range");
        Self(address << 1)
    }

    /// 8-bit form, bit 0 clear
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// 7-bit form
    pub const fn as_7bit(self) -> u8 {
        self.0 >> 1
    }
}

/// Address inside a device's memory or register map
///
/// The variant fixes how many address bytes go on the wire. Bytes are
/// always sent most significant first, whatever the host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryAddress {
    /// One address byte (register-mapped sensors, small EEPROMs)
    Byte(u8),
    /// Two address bytes (EEPROMs up to 64 KiB, ST25DV)
    Word(u16),
    /// Four address bytes
    DoubleWord(u32),
}

impl MemoryAddress {
    /// Number of address bytes on the wire
    pub const fn width(self) -> usize {
        match self {
            MemoryAddress::Byte(_) => 1,
            MemoryAddress::Word(_) => 2,
            MemoryAddress::DoubleWord(_) => 4,
        }
    }

    /// Wire encoding, big-endian
    pub fn to_be_bytes(self) -> Vec<u8, 4> {
        let mut bytes = Vec::new();
        let written = match self {
            MemoryAddress::Byte(address) => bytes.extend_from_slice(&[address]),
            MemoryAddress::Word(address) => bytes.extend_from_slice(&address.to_be_bytes()),
            MemoryAddress::DoubleWord(address) => bytes.extend_from_slice(&address.to_be_bytes()),
        };
        // At most four bytes into a four-byte vector
        debug_assert!(written.is_ok());
        bytes
    }

    /// Numeric value, widened
    pub const fn value(self) -> u32 {
        match self {
            MemoryAddress::Byte(address) => address as u32,
            MemoryAddress::Word(address) => address as u32,
            MemoryAddress::DoubleWord(address) => address,
        }
    }
}

impl From<u8> for MemoryAddress {
    fn from(address: u8) -> Self {
        MemoryAddress::Byte(address)
    }
}

impl From<u16> for MemoryAddress {
    fn from(address: u16) -> Self {
        MemoryAddress::Word(address)
    }
}

impl From<u32> for MemoryAddress {
    fn from(address: u32) -> Self {
        MemoryAddress::DoubleWord(address)
    }
}
