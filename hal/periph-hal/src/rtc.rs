//! Real-time clock abstractions
//!
//! Field values are binary (not BCD); the platform implementation does
//! any conversion its registers need.

use core::ops::{BitOr, BitOrAssign};

/// Time of day, 24-hour format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Time {
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// All fields within their calendar range
    pub const fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }

    /// Seconds elapsed since midnight
    pub const fn seconds_of_day(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }
}

/// Calendar date, `year` counted from 2000
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub const fn new(year: u8, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Day exists in the given month of the given year
    pub const fn is_valid(&self) -> bool {
        self.year < 100
            && self.month >= 1
            && self.month <= 12
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

const fn days_in_month(year: u8, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Time and date captured together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub time: Time,
    pub date: Date,
}

/// Alarm fields excluded from comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmMask(u8);

impl AlarmMask {
    pub const NONE: Self = Self(0);
    pub const SECONDS: Self = Self(1 << 0);
    pub const MINUTES: Self = Self(1 << 1);
    pub const HOURS: Self = Self(1 << 2);
    pub const DATE_WEEKDAY: Self = Self(1 << 3);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AlarmMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AlarmMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Alarm A configuration as programmed into the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// Match time; masked fields are written as zero
    pub time: Time,
    /// Fields ignored when matching
    pub mask: AlarmMask,
}

/// Calendar RTC peripheral with one interrupt-raising alarm
pub trait RtcPeripheral {
    fn set_time(&mut self, time: Time);

    fn time(&mut self) -> Time;

    fn set_date(&mut self, date: Date);

    fn date(&mut self) -> Date;

    /// Program alarm A and enable its interrupt
    fn set_alarm(&mut self, alarm: AlarmConfig);

    /// Alarm A as currently programmed
    fn alarm(&mut self) -> AlarmConfig;
}

impl<T: RtcPeripheral + ?Sized> RtcPeripheral for &mut T {
    fn set_time(&mut self, time: Time) {
        T::set_time(self, time)
    }

    fn time(&mut self) -> Time {
        T::time(self)
    }

    fn set_date(&mut self, date: Date) {
        T::set_date(self, date)
    }

    fn date(&mut self) -> Date {
        T::date(self)
    }

    fn set_alarm(&mut self, alarm: AlarmConfig) {
        T::set_alarm(self, alarm)
    }

    fn alarm(&mut self) -> AlarmConfig {
        T::alarm(self)
    }
}
