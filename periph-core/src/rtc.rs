//! Calendar clock
//!
//! Thin field mapping over [`RtcPeripheral`]: validates what goes in and
//! turns wildcard alarm fields into hardware mask bits.

use periph_hal::rtc::{AlarmConfig, AlarmMask, Date, RtcPeripheral, Time, Timestamp};

/// Errors from clock operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Hour, minute or second out of range
    InvalidTime,
    /// Day does not exist in the given month, or year beyond 2099
    InvalidDate,
}

/// Alarm trigger; `None` fields match any value
///
/// The date is never compared, so the alarm fires every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmMatch {
    pub hours: Option<u8>,
    pub minutes: Option<u8>,
    pub seconds: Option<u8>,
}

impl AlarmMatch {
    /// Fire once a day at exactly `time`
    pub const fn at(time: Time) -> Self {
        Self {
            hours: Some(time.hours),
            minutes: Some(time.minutes),
            seconds: Some(time.seconds),
        }
    }

    /// Hardware encoding: wildcard fields written as zero and masked
    pub fn to_config(self) -> Result<AlarmConfig, RtcError> {
        let mut mask = AlarmMask::DATE_WEEKDAY;
        let mut field = |value: Option<u8>, limit: u8, bit: AlarmMask| match value {
            Some(v) if v < limit => Ok(v),
            Some(_) => Err(RtcError::InvalidTime),
            None => {
                mask |= bit;
                Ok(0)
            }
        };

        let time = Time::new(
            field(self.hours, 24, AlarmMask::HOURS)?,
            field(self.minutes, 60, AlarmMask::MINUTES)?,
            field(self.seconds, 60, AlarmMask::SECONDS)?,
        );
        Ok(AlarmConfig { time, mask })
    }
}

/// Real-time clock over a platform RTC peripheral
pub struct Clock<R> {
    rtc: R,
}

impl<R: RtcPeripheral> Clock<R> {
    pub fn new(rtc: R) -> Self {
        Self { rtc }
    }

    pub fn set_time(&mut self, time: Time) -> Result<(), RtcError> {
        if !time.is_valid() {
            return Err(RtcError::InvalidTime);
        }
        self.rtc.set_time(time);
        Ok(())
    }

    pub fn time(&mut self) -> Time {
        self.rtc.time()
    }

    pub fn set_date(&mut self, date: Date) -> Result<(), RtcError> {
        if !date.is_valid() {
            return Err(RtcError::InvalidDate);
        }
        self.rtc.set_date(date);
        Ok(())
    }

    pub fn date(&mut self) -> Date {
        self.rtc.date()
    }

    /// Time then date
    ///
    /// The calendar shadow registers latch on the time read, so reading
    /// the date second keeps the two consistent.
    pub fn timestamp(&mut self) -> Timestamp {
        let time = self.rtc.time();
        let date = self.rtc.date();
        Timestamp { time, date }
    }

    /// Program alarm A
    pub fn set_alarm(&mut self, alarm: AlarmMatch) -> Result<(), RtcError> {
        let config = alarm.to_config()?;
        self.rtc.set_alarm(config);
        Ok(())
    }

    /// Alarm A match time; wildcard fields read back as zero
    pub fn alarm(&mut self) -> Time {
        self.rtc.alarm().time
    }

    pub fn into_inner(self) -> R {
        self.rtc
    }
}
