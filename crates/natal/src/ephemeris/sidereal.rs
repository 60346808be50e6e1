//! Mean obliquity of the ecliptic and mean sidereal time.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), eq. 12.4 and 22.2
//! (low-order forms).

use crate::angle::normalize_deg;
use crate::julian::{JulianMoment, J2000_JD};

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(century_t: f64) -> f64 {
    23.439291 - 0.0130042 * century_t
}

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
pub fn gmst_deg(moment: &JulianMoment) -> f64 {
    let t = moment.century_t();
    let theta = 280.46061837 + 360.98564736629 * (moment.jd() - J2000_JD) + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_deg(theta)
}

/// Local Sidereal Time in degrees from GMST and east longitude.
pub fn local_sidereal_deg(gmst_deg: f64, longitude_deg: f64) -> f64 {
    normalize_deg(gmst_deg + longitude_deg)
}
