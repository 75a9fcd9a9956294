//! Periph Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary consumed by the periph
//! driver library. A platform crate (or the firmware itself) implements
//! these traits on top of the vendor HAL; everything above them is
//! chip-agnostic and can be tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  periph-drivers (EEPROM, NFC, sensor)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periph-core (bus master, device,       │
//! │  serial channel, clock, pins)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periph-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - Blocking I2C master transactions
//! - [`uart::UartTx`], [`uart::UartRx`] - Interrupt-driven serial
//! - [`rtc::RtcPeripheral`] - Calendar clock with one alarm

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod rtc;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, PinId};
pub use i2c::{I2cBus, I2cConfig};
pub use rtc::{AlarmConfig, AlarmMask, Date, RtcPeripheral, Time, Timestamp};
pub use uart::{UartRx, UartTx};
