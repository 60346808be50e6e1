//! Ascendant and Midheaven from local sidereal time.
//!
//! Formulas (Meeus ch. 13, standard spherical astronomy):
//! `Asc = atan2(-cos θ, sin θ·cos ε + tan φ·sin ε)`
//! `MC  = atan2(sin θ, cos θ·cos ε)`
//!
//! The ascendant diverges as tan φ grows without bound near the poles, so
//! [`checked_ascendant_deg`] refuses latitudes at or beyond a limit.

use crate::angle::normalize_deg;
use crate::error::ChartError;

/// Default |latitude| at which the ascendant is reported as unstable.
pub const POLAR_LATITUDE_LIMIT_DEG: f64 = 89.999;

/// Ecliptic longitude of the ascendant in degrees, [0, 360).
///
/// Unchecked: at |latitude| = 90° the result is meaningless.
pub fn ascendant_deg(local_sidereal_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let theta = local_sidereal_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let y = -theta.cos();
    let x = theta.sin() * eps.cos() + phi.tan() * eps.sin();
    normalize_deg(y.atan2(x).to_degrees())
}

/// Ascendant with the polar edge case surfaced as an error.
pub fn checked_ascendant_deg(
    local_sidereal_deg: f64,
    latitude_deg: f64,
    obliquity_deg: f64,
    polar_latitude_limit: f64,
) -> Result<f64, ChartError> {
    if !latitude_deg.is_finite() || !local_sidereal_deg.is_finite() || !obliquity_deg.is_finite() {
        return Err(ChartError::invalid("latitude", "horizon inputs must be finite"));
    }
    if latitude_deg.abs() >= polar_latitude_limit {
        return Err(ChartError::NumericInstability {
            latitude: latitude_deg,
            detail: format!("|latitude| must be below {polar_latitude_limit}°"),
        });
    }

    let asc = ascendant_deg(local_sidereal_deg, latitude_deg, obliquity_deg);
    if !asc.is_finite() {
        return Err(ChartError::NumericInstability {
            latitude: latitude_deg,
            detail: "ascendant is not finite".to_string(),
        });
    }
    Ok(asc)
}

/// Ecliptic longitude of the Midheaven in degrees, [0, 360).
pub fn midheaven_deg(local_sidereal_deg: f64, obliquity_deg: f64) -> f64 {
    let theta = local_sidereal_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    normalize_deg(theta.sin().atan2(theta.cos() * eps.cos()).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.439291;

    #[test]
    fn test_equator_lst_zero() {
        // atan2(-1, 0) = -90° -> 270°
        assert!((ascendant_deg(0.0, 0.0, EPS) - 270.0).abs() < 1e-10);
    }

    #[test]
    fn test_mc_lst_zero() {
        assert!(midheaven_deg(0.0, EPS).abs() < 1e-10);
    }

    #[test]
    fn test_mc_tracks_lst_at_cardinal_points() {
        assert!((midheaven_deg(90.0, EPS) - 90.0).abs() < 1e-9);
        assert!((midheaven_deg(180.0, EPS) - 180.0).abs() < 1e-9);
        assert!((midheaven_deg(270.0, EPS) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_covers_circle() {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for i in 0..360 {
            let asc = ascendant_deg(i as f64, 28.6, EPS);
            assert!((0.0..360.0).contains(&asc));
            min = min.min(asc);
            max = max.max(asc);
        }
        assert!(min < 3.0, "min {min}");
        assert!(max > 357.0, "max {max}");
    }

    #[test]
    fn test_polar_latitude_is_flagged() {
        let err = checked_ascendant_deg(100.0, 90.0, EPS, POLAR_LATITUDE_LIMIT_DEG).unwrap_err();
        assert!(matches!(err, ChartError::NumericInstability { .. }));
        let err = checked_ascendant_deg(100.0, -89.9995, EPS, POLAR_LATITUDE_LIMIT_DEG).unwrap_err();
        assert!(matches!(err, ChartError::NumericInstability { .. }));
    }

    #[test]
    fn test_near_polar_still_finite() {
        let asc = checked_ascendant_deg(100.0, 89.99, EPS, POLAR_LATITUDE_LIMIT_DEG).unwrap();
        assert!((0.0..360.0).contains(&asc));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(checked_ascendant_deg(f64::NAN, 10.0, EPS, POLAR_LATITUDE_LIMIT_DEG).is_err());
    }
}
