//! Sensor drivers

pub mod tmp117;

pub use tmp117::Tmp117;
