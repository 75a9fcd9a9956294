//! Driver error type

/// Errors reported by chip drivers
///
/// The bus layer does not say why a transaction failed, so every bus
/// failure arrives here as [`DriverError::Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Transaction not acknowledged, timed out, or bus busy
    Bus,
    /// Access extends past the end of the device memory
    OutOfRange,
    /// Identification register holds an unexpected value
    UnexpectedId,
    /// Register content has no defined meaning
    UnexpectedValue,
}

/// Map a bus acknowledgement onto a driver result
pub(crate) fn acked(ack: bool) -> Result<(), DriverError> {
    if ack {
        Ok(())
    } else {
        Err(DriverError::Bus)
    }
}
