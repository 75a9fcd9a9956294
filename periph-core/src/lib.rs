//! Board-agnostic peripheral layer
//!
//! Sits between chip drivers and the hardware boundary traits of
//! `periph-hal`:
//!
//! - [`i2c::BusMaster`] - blocking transactions on one physical bus
//! - [`i2c::I2cDevice`] - one bus address plus address-prefixed
//!   memory access ([`i2c::AddressedDevice`])
//! - [`serial::SerialChannel`] - interrupt-driven transmit queue and
//!   byte-at-a-time receive log
//! - [`rtc::Clock`] - calendar clock with wildcard alarms
//! - [`gpio::Pin`] - identified digital pin
//!
//! Transaction buffers and queues are heap allocated; the firmware must
//! register a global allocator (for example `embedded-alloc`).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod gpio;
pub mod i2c;
pub mod rtc;
pub mod serial;

pub use gpio::Pin;
pub use i2c::{AddressedDevice, BusAddress, BusMaster, I2cDevice, MemoryAddress};
pub use rtc::{AlarmMatch, Clock, RtcError};
pub use serial::{SendError, SerialChannel};
