//! Calendar encoding of the report time.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{RestartError, Result};

/// Broken-down report time written to INTEHEAD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimePoint {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub microseconds: i32,
}

impl TimePoint {
    /// ISECND: seconds and sub-second part as one microsecond count.
    pub fn isecnd(&self) -> i32 {
        self.second * 1_000_000 + self.microseconds
    }
}

/// Report time `elapsed_seconds` after `start`.
pub fn simulation_time_point(start: NaiveDateTime, elapsed_seconds: f64) -> Result<TimePoint> {
    if !elapsed_seconds.is_finite() {
        return Err(RestartError::Time(format!(
            "elapsed time {elapsed_seconds} s is not finite"
        )));
    }

    #[allow(clippy::cast_possible_truncation)]
    let micros = (elapsed_seconds * 1.0e6).round() as i64;
    let t = start
        .checked_add_signed(Duration::microseconds(micros))
        .ok_or_else(|| {
            RestartError::Time(format!(
                "{elapsed_seconds} s after {start} is outside the calendar range"
            ))
        })?;

    #[allow(clippy::cast_possible_wrap)]
    Ok(TimePoint {
        year: t.year(),
        month: t.month() as i32,
        day: t.day() as i32,
        hour: t.hour() as i32,
        minute: t.minute() as i32,
        second: t.second() as i32,
        microseconds: (t.nanosecond() / 1_000) as i32,
    })
}

fn spreadsheet_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Days since 1899-12-30, the serial-date origin of DOUBHEAD.
pub fn serial_days(t: NaiveDateTime) -> f64 {
    spreadsheet_epoch().map_or(0.0, |epoch| {
        #[allow(clippy::cast_precision_loss)]
        let seconds = (t - epoch).num_seconds() as f64;
        seconds / 86_400.0
    })
}
