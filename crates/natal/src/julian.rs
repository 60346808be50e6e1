//! Gregorian calendar to Julian Day conversion (Meeus, ch. 7).

use serde::Serialize;

use crate::time::UtcInstant;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 UTC).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// A Julian Day and the matching Julian century count from J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JulianMoment {
    jd: f64,
    century_t: f64,
}

impl JulianMoment {
    pub fn from_jd(jd: f64) -> Self {
        Self {
            jd,
            century_t: (jd - J2000_JD) / DAYS_PER_CENTURY,
        }
    }

    /// Continuous Julian Day, UTC.
    pub fn jd(&self) -> f64 {
        self.jd
    }

    /// Julian centuries since J2000.0.
    pub fn century_t(&self) -> f64 {
        self.century_t
    }
}

impl From<&UtcInstant> for JulianMoment {
    fn from(utc: &UtcInstant) -> Self {
        to_julian_day(utc.year, utc.month, utc.day, utc.fractional_hour)
    }
}

/// Julian Day for a proleptic Gregorian UTC date and fractional hour.
pub fn to_julian_day(year: i32, month: u32, day: u32, fractional_hour: f64) -> JulianMoment {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day_fraction = day as f64 + fractional_hour / 24.0;

    let jd = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_fraction + b
        - 1524.5;
    JulianMoment::from_jd(jd)
}
