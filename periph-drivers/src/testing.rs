//! In-memory addressed device for driver tests
//!
//! Behaves like a register-mapped chip: a transmit's first `width` bytes
//! load the address pointer, the remainder is stored from there, and a
//! receive continues from the pointer. Unwritten cells read as `0xFF`.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::vec::Vec;

use periph_core::AddressedDevice;

pub(crate) struct MemoryDevice {
    width: usize,
    memory: RefCell<BTreeMap<u32, u8>>,
    pointer: Cell<u32>,
    pub transmitted: RefCell<Vec<Vec<u8>>>,
    pub receives: Cell<usize>,
    pub present: Cell<bool>,
}

impl MemoryDevice {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            memory: RefCell::new(BTreeMap::new()),
            pointer: Cell::new(0),
            transmitted: RefCell::new(Vec::new()),
            receives: Cell::new(0),
            present: Cell::new(true),
        }
    }

    pub fn absent(width: usize) -> Self {
        let device = Self::new(width);
        device.present.set(false);
        device
    }

    pub fn preload(&self, start: u32, data: &[u8]) {
        let mut memory = self.memory.borrow_mut();
        for (offset, &byte) in data.iter().enumerate() {
            memory.insert(start + offset as u32, byte);
        }
    }

    pub fn peek(&self, address: u32) -> Option<u8> {
        self.memory.borrow().get(&address).copied()
    }

    pub fn last_transmit(&self) -> Option<Vec<u8>> {
        self.transmitted.borrow().last().cloned()
    }
}

impl AddressedDevice for MemoryDevice {
    fn transmit(&self, payload: &[u8]) -> bool {
        if !self.present.get() {
            return false;
        }
        self.transmitted.borrow_mut().push(payload.to_vec());

        if payload.len() >= self.width {
            let (pointer, data) = payload.split_at(self.width);
            let mut address = pointer
                .iter()
                .fold(0u32, |acc, &byte| (acc << 8) | byte as u32);
            let mut memory = self.memory.borrow_mut();
            for &byte in data {
                memory.insert(address, byte);
                address = address.wrapping_add(1);
            }
            self.pointer.set(address);
        }
        true
    }

    fn receive(&self, length: usize) -> Option<Vec<u8>> {
        self.receives.set(self.receives.get() + 1);
        if !self.present.get() {
            return None;
        }
        let memory = self.memory.borrow();
        let mut address = self.pointer.get();
        let mut data = Vec::with_capacity(length);
        for _ in 0..length {
            data.push(memory.get(&address).copied().unwrap_or(0xFF));
            address = address.wrapping_add(1);
        }
        self.pointer.set(address);
        Some(data)
    }
}
