//! Addressed I2C transaction layer
//!
//! ```text
//! chip driver ──► AddressedDevice (I2cDevice) ──► BusMaster ──► I2cBus
//! ```
//!
//! Hardware failures (NACK, bus busy, timeout) are not distinguished at
//! this layer: transmits report `false`, receives report `None`. No call
//! retries.

mod adapter;
mod address;
mod device;
mod master;

pub use adapter::EmbeddedHalBus;
pub use address::{BusAddress, MemoryAddress};
pub use device::{AddressedDevice, I2cDevice};
pub use master::{BusMaster, MAX_SCAN_RESULTS};

#[cfg(test)]
pub(crate) mod fake;
