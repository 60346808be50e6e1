//! Civil birth time and its conversion to UTC.
//!
//! Timezone offsets follow the JavaScript `getTimezoneOffset` convention:
//! the offset is the number of minutes to ADD to local time to obtain UTC,
//! so zones east of Greenwich are negative (UTC+8 is `-480`).

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::error::ChartError;

/// Offset used when the caller supplies none (UTC+8).
pub const DEFAULT_TZ_OFFSET_MINUTES: f64 = -480.0;

/// Largest accepted magnitude of a timezone offset, in minutes.
pub const MAX_TZ_OFFSET_MINUTES: f64 = 1440.0;

/// A validated civil date and time of birth, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BirthMoment {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl BirthMoment {
    /// Build a moment, rejecting impossible calendar fields.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, ChartError> {
        let (min_year, max_year) = (NaiveDate::MIN.year(), NaiveDate::MAX.year());
        if !(min_year..=max_year).contains(&year) {
            return Err(ChartError::invalid(
                "year",
                format!("{year} is not in {min_year}..={max_year}"),
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(ChartError::invalid("month", format!("{month} is not in 1..=12")));
        }
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(ChartError::invalid(
                "day",
                format!("{year:04}-{month:02} has no day {day}"),
            ));
        }
        if hour > 23 {
            return Err(ChartError::invalid("hour", format!("{hour} is not in 0..=23")));
        }
        if minute > 59 {
            return Err(ChartError::invalid("minute", format!("{minute} is not in 0..=59")));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// Build a moment from loosely typed numeric fields, as they arrive
    /// from a JSON body or a form.
    pub fn from_raw(year: f64, month: f64, day: f64, hour: f64, minute: f64) -> Result<Self, ChartError> {
        let year = whole_field("year", year, i32::MIN as f64, i32::MAX as f64)?;
        let month = whole_field("month", month, 0.0, u32::MAX as f64)?;
        let day = whole_field("day", day, 0.0, u32::MAX as f64)?;
        let hour = whole_field("hour", hour, 0.0, u32::MAX as f64)?;
        let minute = whole_field("minute", minute, 0.0, u32::MAX as f64)?;
        Self::new(year as i32, month as u32, day as u32, hour as u32, minute as u32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

fn whole_field(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ChartError> {
    if !value.is_finite() {
        return Err(ChartError::invalid(field, "value is not a finite number"));
    }
    if value.fract() != 0.0 {
        return Err(ChartError::invalid(field, format!("{value} is not a whole number")));
    }
    if value < min || value > max {
        return Err(ChartError::invalid(field, format!("{value} is out of range")));
    }
    Ok(value)
}

/// A birth moment expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcInstant {
    pub datetime: DateTime<Utc>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Hour of day including minutes and seconds, in [0, 24).
    pub fractional_hour: f64,
}

impl From<DateTime<Utc>> for UtcInstant {
    fn from(datetime: DateTime<Utc>) -> Self {
        let fractional_hour = datetime.hour() as f64
            + datetime.minute() as f64 / 60.0
            + datetime.second() as f64 / 3600.0;
        Self {
            datetime,
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            fractional_hour,
        }
    }
}

/// Pick the caller's offset when it is usable, else the configured fallback.
pub fn resolve_tz_offset(tz_offset_minutes: Option<f64>, fallback: f64) -> f64 {
    match tz_offset_minutes {
        Some(offset) if offset.is_finite() => offset,
        Some(offset) => {
            log::warn!("Non-finite timezone offset {offset}, using fallback {fallback}");
            fallback
        }
        None => {
            log::debug!("No timezone offset supplied, using fallback {fallback}");
            fallback
        }
    }
}

/// Convert a local birth moment to UTC.
///
/// `utc = civil(fields as if UTC) + tz_offset_minutes`.
pub fn to_utc(birth: &BirthMoment, tz_offset_minutes: f64) -> Result<UtcInstant, ChartError> {
    if !tz_offset_minutes.is_finite() || tz_offset_minutes.abs() > MAX_TZ_OFFSET_MINUTES {
        return Err(ChartError::invalid(
            "tz_offset_minutes",
            format!("{tz_offset_minutes} is not within ±{MAX_TZ_OFFSET_MINUTES} minutes"),
        ));
    }

    let civil = NaiveDate::from_ymd_opt(birth.year, birth.month, birth.day)
        .and_then(|date| date.and_hms_opt(birth.hour, birth.minute, 0))
        .ok_or_else(|| ChartError::invalid("day", "calendar fields do not form a valid date"))?;

    let offset = Duration::milliseconds((tz_offset_minutes * 60_000.0).round() as i64);
    let shifted = civil
        .checked_add_signed(offset)
        .ok_or_else(|| ChartError::invalid("year", "date overflows after applying the offset"))?;

    Ok(UtcInstant::from(Utc.from_utc_datetime(&shifted)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_fields() {
        assert!(BirthMoment::new(2000, 13, 1, 0, 0).is_err());
        assert!(BirthMoment::new(2000, 0, 1, 0, 0).is_err());
        assert!(BirthMoment::new(2001, 2, 29, 0, 0).is_err());
        assert!(BirthMoment::new(2000, 2, 29, 0, 0).is_ok());
        assert!(BirthMoment::new(2000, 1, 1, 24, 0).is_err());
        assert!(BirthMoment::new(2000, 1, 1, 23, 60).is_err());
    }

    #[test]
    fn test_year_outside_calendar_names_year() {
        let err = BirthMoment::new(i32::MAX, 1, 1, 0, 0).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput { field: "year", .. }));
        let err = BirthMoment::from_raw(-1.0e9, 1.0, 1.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput { field: "year", .. }));
    }

    #[test]
    fn test_from_raw_rejects_non_finite() {
        let err = BirthMoment::from_raw(2000.0, f64::NAN, 1.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput { field: "month", .. }));
        assert!(BirthMoment::from_raw(2000.0, 1.0, 1.0, f64::INFINITY, 0.0).is_err());
        assert!(BirthMoment::from_raw(2000.0, 1.0, 1.5, 0.0, 0.0).is_err());
        assert!(BirthMoment::from_raw(2000.0, 1.0, -1.0, 0.0, 0.0).is_err());
        assert_eq!(
            BirthMoment::from_raw(1990.0, 6.0, 15.0, 8.0, 30.0).unwrap(),
            BirthMoment::new(1990, 6, 15, 8, 30).unwrap()
        );
    }

    #[test]
    fn test_shanghai_morning_is_utc_early() {
        // Local 10:00 in UTC+8 is 02:00 UTC
        let birth = BirthMoment::new(2024, 5, 1, 10, 0).unwrap();
        let utc = to_utc(&birth, -480.0).unwrap();
        assert_eq!((utc.year, utc.month, utc.day), (2024, 5, 1));
        assert!((utc.fractional_hour - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset_crosses_year_boundary() {
        let birth = BirthMoment::new(2000, 1, 1, 3, 15).unwrap();
        let utc = to_utc(&birth, -480.0).unwrap();
        assert_eq!((utc.year, utc.month, utc.day), (1999, 12, 31));
        assert!((utc.fractional_hour - 19.25).abs() < 1e-12);
    }

    #[test]
    fn test_west_of_greenwich_adds_hours() {
        // New York winter, UTC-5, offset +300
        let birth = BirthMoment::new(2023, 12, 31, 22, 0).unwrap();
        let utc = to_utc(&birth, 300.0).unwrap();
        assert_eq!((utc.year, utc.month, utc.day), (2024, 1, 1));
        assert!((utc.fractional_hour - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_fractional_offset_keeps_seconds() {
        let birth = BirthMoment::new(2020, 6, 1, 12, 0).unwrap();
        let utc = to_utc(&birth, 0.5).unwrap();
        assert!((utc.fractional_hour - (12.0 + 30.0 / 3600.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_absurd_offset() {
        let birth = BirthMoment::new(2020, 6, 1, 12, 0).unwrap();
        assert!(to_utc(&birth, 5000.0).is_err());
        assert!(to_utc(&birth, f64::NAN).is_err());
    }

    #[test]
    fn test_resolve_tz_offset_fallback() {
        assert_eq!(resolve_tz_offset(Some(60.0), DEFAULT_TZ_OFFSET_MINUTES), 60.0);
        assert_eq!(resolve_tz_offset(None, DEFAULT_TZ_OFFSET_MINUTES), -480.0);
        assert_eq!(resolve_tz_offset(Some(f64::NAN), DEFAULT_TZ_OFFSET_MINUTES), -480.0);
    }
}
