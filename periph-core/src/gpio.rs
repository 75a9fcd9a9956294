//! Identified GPIO pins
//!
//! [`Pin`] pairs a pin driver with its [`PinId`] so drivers can be handed
//! "the LPD line" rather than an anonymous handle, and so two handles to
//! the same line compare equal.

use core::convert::Infallible;

use periph_hal::gpio::{InputPin, OutputPin, PinId};

/// GPIO line with a known port and number
///
/// Levels passed to [`set`](Self::set) and returned by
/// [`read`](Self::read) are logical: an inverted id flips them on the
/// wire.
pub struct Pin<P> {
    id: PinId,
    io: P,
}

impl<P> Pin<P> {
    pub fn new(id: PinId, io: P) -> Self {
        Self { id, io }
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn into_inner(self) -> P {
        self.io
    }
}

impl<P: OutputPin> Pin<P> {
    /// Drive the logical level
    pub fn set(&mut self, active: bool) {
        self.io.set_state(active != self.id.inverted);
    }

    pub fn toggle(&mut self) {
        self.io.toggle();
    }

    /// Logical level currently driven
    pub fn is_active(&self) -> bool {
        self.io.is_set_high() != self.id.inverted
    }
}

impl<P: InputPin> Pin<P> {
    /// Sample the logical level
    pub fn read(&self) -> bool {
        self.io.is_high() != self.id.inverted
    }
}

impl<P: OutputPin> OutputPin for Pin<P> {
    fn set_high(&mut self) {
        self.set(true);
    }

    fn set_low(&mut self) {
        self.set(false);
    }

    fn toggle(&mut self) {
        self.io.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.is_active()
    }
}

impl<P, Q> PartialEq<Pin<Q>> for Pin<P> {
    fn eq(&self, other: &Pin<Q>) -> bool {
        self.id == other.id
    }
}

/// Adapts an infallible `embedded-hal` 1.0 output pin
///
/// Most MCU HALs use `Infallible` for GPIO errors. The driven level is
/// tracked here because `embedded-hal` needs `&mut self` to read the
/// output latch back.
pub struct EmbeddedHalPin<P> {
    pin: P,
    high: bool,
}

impl<P> EmbeddedHalPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    /// Wrap `pin`, driving it to `high` so the tracked level is known
    pub fn new(mut pin: P, high: bool) -> Self {
        let result = if high { pin.set_high() } else { pin.set_low() };
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
        Self { pin, high }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EmbeddedHalPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeLine {
        level: bool,
    }

    impl OutputPin for FakeLine {
        fn set_high(&mut self) {
            self.level = true;
        }

        fn set_low(&mut self) {
            self.level = false;
        }

        fn is_set_high(&self) -> bool {
            self.level
        }
    }

    impl InputPin for FakeLine {
        fn is_high(&self) -> bool {
            self.level
        }
    }

    fn pin(name: &str) -> Pin<FakeLine> {
        Pin::new(PinId::parse(name).unwrap(), FakeLine::default())
    }

    #[test]
    fn test_set_toggle_read() {
        let mut led = pin("PA5");
        led.set(true);
        assert!(led.read());
        led.toggle();
        assert!(!led.read());
        assert!(!led.is_active());
    }

    #[test]
    fn test_inverted_pin_flips_wire_level() {
        let mut lpd = pin("!PB2");
        lpd.set(true);
        assert!(lpd.is_active());
        assert!(lpd.read());
        assert!(!lpd.into_inner().level);
    }

    struct HalLine {
        calls: Vec<bool>,
    }

    impl embedded_hal::digital::ErrorType for HalLine {
        type Error = Infallible;
    }

    impl embedded_hal::digital::OutputPin for HalLine {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.calls.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.calls.push(true);
            Ok(())
        }
    }

    #[test]
    fn test_embedded_hal_pin_tracks_level() {
        let line = EmbeddedHalPin::new(HalLine { calls: Vec::new() }, false);
        let mut pin = Pin::new(PinId::parse("PD1").unwrap(), line);

        pin.set(true);
        assert!(pin.is_active());
        pin.toggle();
        assert!(!pin.is_active());

        assert_eq!(pin.into_inner().into_inner().calls, vec![false, true, false]);
    }

    #[test]
    fn test_equality_by_id_only() {
        let mut a = pin("PC3");
        let b = pin("PC3");
        a.set(true);
        assert!(a == b);
        assert!(pin("PC3") != pin("PC4"));
    }
}
