//! UART serial communication abstractions
//!
//! The non-blocking calls only arm the peripheral. Completion is reported
//! by the platform's interrupt handler, which forwards it to the serial
//! channel's callbacks.

/// UART transmitter
pub trait UartTx {
    /// Error type for blocking transmit
    type Error;

    /// Arm an interrupt-driven transmission of `data`
    ///
    /// Returns immediately. The platform raises the transmission-complete
    /// interrupt once the last byte has left the shift register. An
    /// implementation that keeps transmitting after this call returns must
    /// copy `data` into its own buffer.
    fn start_write(&mut self, data: &[u8]);

    /// Transmit `data` by polling, returning once every byte is sent
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Arm an interrupt-driven reception of exactly one byte
    fn start_read_byte(&mut self);

    /// The byte delivered by the last completed one-byte reception
    fn last_byte(&self) -> u8;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    type Error = T::Error;

    fn start_write(&mut self, data: &[u8]) {
        T::start_write(self, data)
    }

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_blocking(self, data)
    }
}

impl<T: UartRx + ?Sized> UartRx for &mut T {
    fn start_read_byte(&mut self) {
        T::start_read_byte(self)
    }

    fn last_byte(&self) -> u8 {
        T::last_byte(self)
    }
}
