//! NFC tag drivers

pub mod registers;
mod st25dv;

pub use registers::{DynamicRegister, Register, State, SystemRegister};
pub use st25dv::{St25dv, SYSTEM_ADDRESS, USER_ADDRESS};
