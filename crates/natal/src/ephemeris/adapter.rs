use std::env;
use std::path::{Path, PathBuf};

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::AscMc;

use crate::angle::normalize_deg;
use crate::ephemeris::provider::Ephemeris;
use crate::ephemeris::sidereal::{gmst_deg, local_sidereal_deg, mean_obliquity_deg};
use crate::ephemeris::types::{EclipticPositions, GeoCoordinate};
use crate::error::ChartError;
use crate::julian::JulianMoment;

const PROVIDER: &str = "swiss";

// Swiss Ephemeris body numbers
const SE_SUN: u32 = 0;
const SE_MOON: u32 = 1;

// FLG_SWIEPH: use Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;

// Equal houses; only the angles are read back
const HSYS_EQUAL: i32 = b'E' as i32;

/// Precision backend over the Swiss Ephemeris.
///
/// The library keeps its data path in process-wide state; the last
/// adapter constructed decides where data files are read from.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    polar_latitude_limit: f64,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Without an explicit path, `SWISS_EPHEMERIS_PATH` is consulted, then
    /// `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<&Path>, polar_latitude_limit: f64) -> Result<Self, ChartError> {
        let path = ephemeris_path.map(Path::to_path_buf).unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(provider_error(format!(
                "ephemeris path {} does not exist",
                path.display()
            )));
        }

        set_ephe_path(&path.to_string_lossy());
        log::debug!("Swiss Ephemeris data path set to {}", path.display());

        Ok(Self {
            ephemeris_path: path,
            polar_latitude_limit,
        })
    }

    /// Directory handed to the library for its data files
    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    fn body_longitude(&self, body: u32, jd: f64) -> Result<f64, ChartError> {
        let result = calc_ut(jd, body, FLG_SWIEPH as u32)
            .map_err(|e| provider_error(format!("body {body} at JD {jd}: {e}")))?;
        let lon = result.out[0];
        if !lon.is_finite() {
            return Err(provider_error(format!("body {body} at JD {jd}: non-finite longitude")));
        }
        Ok(normalize_deg(lon))
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn positions(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<EclipticPositions, ChartError> {
        if location.lat().abs() >= self.polar_latitude_limit {
            return Err(ChartError::NumericInstability {
                latitude: location.lat(),
                detail: format!("|latitude| must be below {}°", self.polar_latitude_limit),
            });
        }

        let jd = moment.jd();
        let sun = self.body_longitude(SE_SUN, jd)?;
        let moon = self.body_longitude(SE_MOON, jd)?;

        let (_, angles) = houses_ex(jd, FLG_SWIEPH, location.lat(), location.lon(), HSYS_EQUAL);
        let angles = AscMc::from_array(angles);
        if !angles.ascendant.is_finite() || !angles.mc.is_finite() {
            return Err(provider_error(format!("house angles at JD {jd} are not finite")));
        }

        let t = moment.century_t();
        Ok(EclipticPositions {
            sun,
            moon,
            ascendant: normalize_deg(angles.ascendant),
            midheaven: normalize_deg(angles.mc),
            local_sidereal_deg: local_sidereal_deg(gmst_deg(moment), location.lon()),
            obliquity_deg: mean_obliquity_deg(t),
        })
    }
}

fn provider_error(message: String) -> ChartError {
    ChartError::Provider {
        provider: PROVIDER.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_path_is_a_provider_error() {
        let err = SwissEphemerisAdapter::new(Some(Path::new("/nonexistent/swisseph")), 89.999)
            .err()
            .unwrap();
        assert!(err.is_provider_failure());
    }

    #[test]
    fn test_configured_data_path_is_used() {
        let dir = env::temp_dir();
        let adapter = SwissEphemerisAdapter::new(Some(&dir), 89.999).unwrap();
        assert_eq!(adapter.ephemeris_path(), dir.as_path());
        assert_eq!(adapter.name(), "swiss");
    }
}
