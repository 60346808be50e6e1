use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Geographic location coordinates, degrees (east longitude positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "lng", alias = "longitude")]
    lon: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = ChartError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ChartError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ChartError::invalid("latitude", format!("{lat} is not in [-90, 90]")));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ChartError::invalid("longitude", format!("{lon} is not in [-180, 180]")));
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees, [-90, 90]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// East longitude in degrees, [-180, 180]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Everything an ephemeris backend reports for one instant and place.
/// All longitudes are ecliptic degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticPositions {
    pub sun: f64,
    pub moon: f64,
    pub ascendant: f64,
    pub midheaven: f64,
    /// Local sidereal time, degrees
    pub local_sidereal_deg: f64,
    /// Obliquity of the ecliptic used, degrees
    pub obliquity_deg: f64,
}
