//! Addressed device: one bus address plus address-prefixed memory access

use alloc::vec::Vec;

use embassy_sync::blocking_mutex::raw::{NoopRawMutex, RawMutex};
use periph_hal::i2c::I2cBus;

use super::{BusAddress, BusMaster, MemoryAddress};

/// A device reachable at a fixed bus address
///
/// Chip drivers are written against this trait rather than against
/// [`I2cDevice`] so they can be exercised with an in-memory device.
/// Implementors supply the raw [`transmit`](Self::transmit) and
/// [`receive`](Self::receive); the memory-access helpers build on them.
///
/// The integer type of a memory address picks its width on the wire, so
/// an unsuffixed literal does not compile (it defaults to `i32`). Write
/// `device.read(0x10u8, 2)` or `device.read(MemoryAddress::Byte(0x10), 2)`.
pub trait AddressedDevice {
    /// Send `payload` as one write transaction; `true` on acknowledge
    fn transmit(&self, payload: &[u8]) -> bool;

    /// Receive exactly `length` bytes, `None` on any failure
    fn receive(&self, length: usize) -> Option<Vec<u8>>;

    /// Presence check
    fn probe(&self) -> bool {
        self.transmit(&[])
    }

    /// Write `payload` starting at `memory_address`
    ///
    /// The address bytes (big-endian, width set by the address variant)
    /// and the payload go out in a single transaction.
    fn write(&self, memory_address: impl Into<MemoryAddress>, payload: &[u8]) -> bool {
        let address = memory_address.into().to_be_bytes();
        let mut frame = Vec::with_capacity(address.len() + payload.len());
        frame.extend_from_slice(&address);
        frame.extend_from_slice(payload);
        self.transmit(&frame)
    }

    /// Read `length` bytes starting at `memory_address`
    ///
    /// Two transactions: the address bytes are written alone to load the
    /// device's address pointer, then the data is read. If the first one
    /// is not acknowledged the read is never attempted.
    ///
    /// The pair is not atomic. There is no repeated start, so another bus
    /// user that gets in between the two can move the pointer.
    fn read(&self, memory_address: impl Into<MemoryAddress>, length: usize) -> Option<Vec<u8>> {
        let address = memory_address.into().to_be_bytes();
        if !self.transmit(&address) {
            return None;
        }
        self.receive(length)
    }
}

impl<T: AddressedDevice + ?Sized> AddressedDevice for &T {
    fn transmit(&self, payload: &[u8]) -> bool {
        T::transmit(self, payload)
    }

    fn receive(&self, length: usize) -> Option<Vec<u8>> {
        T::receive(self, length)
    }

    fn probe(&self) -> bool {
        T::probe(self)
    }

    fn write(&self, memory_address: impl Into<MemoryAddress>, payload: &[u8]) -> bool {
        T::write(self, memory_address, payload)
    }

    fn read(&self, memory_address: impl Into<MemoryAddress>, length: usize) -> Option<Vec<u8>> {
        T::read(self, memory_address, length)
    }
}

/// Device bound to one address on a [`BusMaster`]
///
/// Small and `Copy`; it borrows the master, which outlives it.
pub struct I2cDevice<'a, B, M: RawMutex = NoopRawMutex> {
    master: &'a BusMaster<B, M>,
    address: BusAddress,
}

impl<'a, B, M: RawMutex> I2cDevice<'a, B, M> {
    pub fn new(master: &'a BusMaster<B, M>, address: BusAddress) -> Self {
        Self { master, address }
    }

    pub fn address(&self) -> BusAddress {
        self.address
    }

    pub fn master(&self) -> &'a BusMaster<B, M> {
        self.master
    }
}

// Manual impls: derives would demand `B: Clone` and `M: Clone`.
impl<B, M: RawMutex> Clone for I2cDevice<'_, B, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, M: RawMutex> Copy for I2cDevice<'_, B, M> {}

impl<B: I2cBus, M: RawMutex> AddressedDevice for I2cDevice<'_, B, M> {
    fn transmit(&self, payload: &[u8]) -> bool {
        self.master.transmit_blocking(self.address, payload)
    }

    fn receive(&self, length: usize) -> Option<Vec<u8>> {
        self.master.receive_blocking(self.address, length)
    }

    fn probe(&self) -> bool {
        self.master.probe(self.address)
    }
}
