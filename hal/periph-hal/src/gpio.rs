//! GPIO pin abstractions
//!
//! Pins are configured (mode, pull, speed) by the board initialization
//! step before they reach this layer; these traits only drive and sample
//! logic levels.

use core::fmt;

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Invert the current output level
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Drive the pin to the given level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level currently latched in the output register
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Sampled level is high
    fn is_high(&self) -> bool;

    /// Sampled level is low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that is driven and sampled through the same handle
pub trait IoPin: OutputPin + InputPin {}

impl<T: OutputPin + InputPin> IoPin for T {}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn toggle(&mut self) {
        T::toggle(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&self) -> bool {
        T::is_high(self)
    }
}

/// Port letter and line number of a GPIO, e.g. `PA5`
///
/// Ports run from `A` to `K` and lines from 0 to 15, which covers every
/// STM32 package. `inverted` marks an active-low signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    /// Port letter (`'A'..='K'`)
    pub port: char,
    /// Line number within the port (0-15)
    pub number: u8,
    /// Signal is active-low
    pub inverted: bool,
}

impl PinId {
    /// Create an identifier, `None` if port or number is out of range
    pub const fn new(port: char, number: u8) -> Option<Self> {
        if !matches!(port, 'A'..='K') || number > 15 {
            return None;
        }
        Some(Self {
            port,
            number,
            inverted: false,
        })
    }

    /// Same pin, active-low
    pub const fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// Parse a pin string
    ///
    /// Supports formats:
    /// - "PA0" -> (Port A, Pin 0)
    /// - "!PB1" -> (Port B, Pin 1, inverted)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        let (s, inverted) = match s.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let rest = s.strip_prefix('P')?;
        let mut chars = rest.chars();
        let port = chars.next()?;
        let number: u8 = chars.as_str().parse().ok()?;

        let id = Self::new(port, number)?;
        Some(if inverted { id.inverted() } else { id })
    }

    /// Bit mask of this line within its port register
    pub const fn mask(&self) -> u16 {
        1 << self.number
    }

    /// Zero-based index of the port (`A` = 0)
    pub const fn port_index(&self) -> u8 {
        self.port as u8 - b'A'
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("!")?;
        }
        write!(f, "P{}{}", self.port, self.number)
    }
}
