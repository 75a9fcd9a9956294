//! Bus master: blocking transactions on one physical bus

use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{NoopRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use periph_hal::i2c::{I2cBus, I2cConfig};

use super::BusAddress;

/// Number of non-reserved 7-bit addresses (`0x08..=0x77`)
pub const MAX_SCAN_RESULTS: usize = 112;

/// Owner of one I2C bus handle
///
/// Pass `&mut handle` to keep the handle owned elsewhere; the master then
/// borrows it for its whole lifetime. Every transaction locks the bus, so
/// calls through different devices on the same master never interleave
/// mid-transaction. Use a critical-section mutex for `M` when the master
/// is shared with interrupt handlers.
pub struct BusMaster<B, M: RawMutex = NoopRawMutex> {
    bus: Mutex<M, RefCell<B>>,
    config: I2cConfig,
}

impl<B: I2cBus, M: RawMutex> BusMaster<B, M> {
    pub fn new(bus: B, config: I2cConfig) -> Self {
        Self {
            bus: Mutex::new(RefCell::new(bus)),
            config,
        }
    }

    /// Configured clock speed in Hz
    pub fn speed(&self) -> u32 {
        self.config.frequency
    }

    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Write `payload` to `address`
    ///
    /// Returns `true` iff the device acknowledged the whole transfer
    /// within the transfer timeout.
    pub fn transmit_blocking(&self, address: BusAddress, payload: &[u8]) -> bool {
        let timeout = self.config.transfer_timeout_ms;
        self.with_bus(|bus| bus.write(address.as_u8(), payload, timeout).is_ok())
    }

    /// Read exactly `length` bytes from `address`
    ///
    /// A zero-length read succeeds with an empty vector without touching
    /// the bus.
    pub fn receive_blocking(&self, address: BusAddress, length: usize) -> Option<Vec<u8>> {
        if length == 0 {
            return Some(Vec::new());
        }

        let timeout = self.config.transfer_timeout_ms;
        let mut data = vec![0u8; length];
        self.with_bus(|bus| bus.read(address.as_u8(), &mut data, timeout))
            .ok()
            .map(|()| data)
    }

    /// Presence check: does anything acknowledge `address`
    pub fn probe(&self, address: BusAddress) -> bool {
        let trials = self.config.probe_trials;
        let timeout = self.config.probe_timeout_ms;
        self.with_bus(|bus| bus.probe(address.as_u8(), trials, timeout).is_ok())
    }

    /// Probe every non-reserved 7-bit address, in ascending order
    pub fn scan(&self) -> heapless::Vec<BusAddress, MAX_SCAN_RESULTS> {
        let mut found = heapless::Vec::new();
        for address in (0x08..=0x77).map(BusAddress::from_7bit) {
            if self.probe(address) {
                // 112 candidates, 112 slots
                let _ = found.push(address);
            }
        }
        found
    }

    fn with_bus<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        self.bus.lock(|bus| f(&mut bus.borrow_mut()))
    }
}
