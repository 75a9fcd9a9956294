//! In-memory bus for tests
//!
//! Emulates one EEPROM-style device: a write's leading `width` bytes set
//! the internal address pointer, the rest are stored from there on, and
//! reads continue from the pointer.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use periph_hal::i2c::I2cBus;

use super::BusAddress;

/// Failure injected into every matching transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    /// Nothing acknowledges
    NackAll,
    /// Every address acknowledges a probe
    AckAll,
    /// Writes fail, reads succeed
    FailWrites,
    /// Reads fail, writes succeed
    FailReads,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Nack;

pub(crate) struct FakeBus {
    pub device: BusAddress,
    pub width: usize,
    pub memory: BTreeMap<u32, u8>,
    pub pointer: u32,
    pub writes: Vec<Vec<u8>>,
    pub read_attempts: usize,
    pub last_timeout_ms: Option<u32>,
    fault: Option<Fault>,
}

impl FakeBus {
    pub fn new(device: BusAddress, width: usize) -> Self {
        Self {
            device,
            width,
            memory: BTreeMap::new(),
            pointer: 0,
            writes: Vec::new(),
            read_attempts: 0,
            last_timeout_ms: None,
            fault: None,
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn preload(&mut self, start: u32, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            self.memory.insert(start + offset as u32, byte);
        }
    }

    fn acknowledges(&self, address: u8) -> bool {
        match self.fault {
            Some(Fault::NackAll) => false,
            Some(Fault::AckAll) => true,
            _ => address == self.device.as_u8(),
        }
    }
}

impl I2cBus for FakeBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), Nack> {
        self.last_timeout_ms = Some(timeout_ms);
        if self.fault == Some(Fault::FailWrites) || !self.acknowledges(address) {
            return Err(Nack);
        }
        self.writes.push(data.to_vec());

        if data.len() >= self.width {
            let (pointer, payload) = data.split_at(self.width);
            self.pointer = pointer
                .iter()
                .fold(0u32, |acc, &byte| (acc << 8) | byte as u32);
            for &byte in payload {
                self.memory.insert(self.pointer, byte);
                self.pointer = self.pointer.wrapping_add(1);
            }
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), Nack> {
        self.last_timeout_ms = Some(timeout_ms);
        self.read_attempts += 1;
        if self.fault == Some(Fault::FailReads) || !self.acknowledges(address) {
            return Err(Nack);
        }
        for byte in buf.iter_mut() {
            *byte = self.memory.get(&self.pointer).copied().unwrap_or(0xFF);
            self.pointer = self.pointer.wrapping_add(1);
        }
        Ok(())
    }

    fn probe(&mut self, address: u8, _trials: u32, timeout_ms: u32) -> Result<(), Nack> {
        self.last_timeout_ms = Some(timeout_ms);
        if self.acknowledges(address) {
            Ok(())
        } else {
            Err(Nack)
        }
    }
}
