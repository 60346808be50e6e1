//! Self-contained low-precision ephemeris.
//!
//! Mean-element series after Meeus, "Astronomical Algorithms" (2nd ed),
//! ch. 25 (Sun) and ch. 47 (Moon), truncated to the leading terms. Accuracy
//! is on the order of 0.01° for the Sun and a few tenths of a degree for the
//! Moon, enough to place either body in a 30° sign.

use crate::angle::normalize_deg;
use crate::ephemeris::provider::Ephemeris;
use crate::ephemeris::sidereal::{gmst_deg, local_sidereal_deg, mean_obliquity_deg};
use crate::ephemeris::types::{EclipticPositions, GeoCoordinate};
use crate::error::ChartError;
use crate::horizon::{checked_ascendant_deg, midheaven_deg, POLAR_LATITUDE_LIMIT_DEG};
use crate::julian::JulianMoment;

/// Geometric ecliptic longitude of the Sun in degrees, [0, 360).
pub fn sun_longitude_deg(century_t: f64) -> f64 {
    let t = century_t;
    let m = normalize_deg(357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let l0 = normalize_deg(280.46646 + 36000.76983 * t + 0.0003032 * t * t);

    // Equation of center
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    normalize_deg(l0 + c)
}

/// Fundamental lunar arguments in degrees.
#[derive(Debug, Clone, Copy)]
struct LunarArguments {
    /// Moon's mean longitude L'
    mean_longitude: f64,
    /// Sun's mean anomaly M
    sun_anomaly: f64,
    /// Moon's mean anomaly M'
    moon_anomaly: f64,
    /// Argument of latitude F
    latitude_argument: f64,
    /// Mean elongation D
    elongation: f64,
}

impl LunarArguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        Self {
            mean_longitude: normalize_deg(218.3164477 + 481267.88123421 * t - 0.0015786 * t2),
            sun_anomaly: normalize_deg(357.5291092 + 35999.0502909 * t - 0.0001536 * t2),
            moon_anomaly: normalize_deg(134.9633964 + 477198.8675055 * t + 0.0087414 * t2),
            latitude_argument: normalize_deg(93.2720950 + 483202.0175233 * t - 0.0036539 * t2),
            elongation: normalize_deg(297.8501921 + 445267.1114034 * t - 0.0018819 * t2),
        }
    }
}

/// Leading periodic terms of the lunar longitude: (coefficient°, D, M, M', F).
const MOON_LONGITUDE_TERMS: &[(f64, f64, f64, f64, f64)] = &[
    (6.289, 0.0, 0.0, 1.0, 0.0),   // equation of center
    (1.274, 2.0, 0.0, -1.0, 0.0),  // evection
    (0.658, 2.0, 0.0, 0.0, 0.0),   // variation
    (0.214, 0.0, 0.0, 2.0, 0.0),   // second equation of center
    (-0.186, 0.0, 1.0, 0.0, 0.0),  // annual equation
    (-0.114, 0.0, 0.0, 0.0, 2.0),  // reduction to the ecliptic
];

/// Geocentric ecliptic longitude of the Moon in degrees, [0, 360).
pub fn moon_longitude_deg(century_t: f64) -> f64 {
    let args = LunarArguments::at(century_t);

    let correction: f64 = MOON_LONGITUDE_TERMS
        .iter()
        .map(|&(coeff, d, m, mp, f)| {
            let arg = d * args.elongation
                + m * args.sun_anomaly
                + mp * args.moon_anomaly
                + f * args.latitude_argument;
            coeff * arg.to_radians().sin()
        })
        .sum();

    normalize_deg(args.mean_longitude + correction)
}

/// The built-in low-precision engine. Always available.
#[derive(Debug, Clone, Copy)]
pub struct MeanElementEphemeris {
    polar_latitude_limit: f64,
}

impl MeanElementEphemeris {
    pub fn new(polar_latitude_limit: f64) -> Self {
        Self {
            polar_latitude_limit,
        }
    }
}

impl Default for MeanElementEphemeris {
    fn default() -> Self {
        Self::new(POLAR_LATITUDE_LIMIT_DEG)
    }
}

impl Ephemeris for MeanElementEphemeris {
    fn name(&self) -> &str {
        "approximate"
    }

    fn positions(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<EclipticPositions, ChartError> {
        let t = moment.century_t();
        let obliquity = mean_obliquity_deg(t);
        let lst = local_sidereal_deg(gmst_deg(moment), location.lon());

        Ok(EclipticPositions {
            sun: sun_longitude_deg(t),
            moon: moon_longitude_deg(t),
            ascendant: checked_ascendant_deg(lst, location.lat(), obliquity, self.polar_latitude_limit)?,
            midheaven: midheaven_deg(lst, obliquity),
            local_sidereal_deg: lst,
            obliquity_deg: obliquity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::to_julian_day;

    #[test]
    fn test_sun_meeus_example_25a() {
        // 1992 October 13.0: true longitude 199.90988°
        let m = to_julian_day(1992, 10, 13, 0.0);
        assert!((sun_longitude_deg(m.century_t()) - 199.90988).abs() < 0.01);
    }

    #[test]
    fn test_sun_near_equinox() {
        let m = to_julian_day(2000, 3, 20, 7.5);
        let lon = sun_longitude_deg(m.century_t());
        let off = if lon > 180.0 { lon - 360.0 } else { lon };
        assert!(off.abs() < 0.1, "sun at {lon}");
    }

    #[test]
    fn test_moon_meeus_example_47a() {
        // 1992 April 12.0: apparent longitude 133.162655°
        let m = to_julian_day(1992, 4, 12, 0.0);
        assert!((moon_longitude_deg(m.century_t()) - 133.162655).abs() < 0.5);
    }

    #[test]
    fn test_longitudes_normalized_far_from_epoch() {
        for t in [-20.0, -3.3, 0.0, 1.7, 10.0] {
            let sun = sun_longitude_deg(t);
            let moon = moon_longitude_deg(t);
            assert!((0.0..360.0).contains(&sun));
            assert!((0.0..360.0).contains(&moon));
        }
    }

    #[test]
    fn test_engine_positions() {
        let eph = MeanElementEphemeris::default();
        let moment = to_julian_day(2000, 1, 1, 12.0);
        let loc = GeoCoordinate::new(51.48, 0.0).unwrap();
        let pos = eph.positions(&moment, &loc).unwrap();
        assert!((pos.sun - 280.37).abs() < 0.1);
        assert!((pos.local_sidereal_deg - 280.46061837).abs() < 1e-9);
        assert!((0.0..360.0).contains(&pos.ascendant));
    }
}
