//! Explicit settings for the chart pipeline.
//!
//! Nothing in the pipeline reads the environment or the host timezone;
//! every default lives here and is passed in by the caller.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Ephemeris, MeanElementEphemeris};
use crate::error::ChartError;
use crate::horizon::POLAR_LATITUDE_LIMIT_DEG;
use crate::houses::HouseSystem;
use crate::time::{DEFAULT_TZ_OFFSET_MINUTES, MAX_TZ_OFFSET_MINUTES};
use crate::zodiac::Locale;

/// Which ephemeris answers first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EphemerisBackend {
    #[default]
    Approximate,
    Swiss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Offset used when the caller passes none, minutes to add to local time
    pub fallback_tz_offset_minutes: f64,
    pub house_system: HouseSystem,
    pub ephemeris: EphemerisBackend,
    pub swiss_ephemeris_path: Option<PathBuf>,
    pub locale: Locale,
    /// |latitude| at or above which the ascendant is refused
    pub polar_latitude_limit: f64,
    pub include_diagnostics: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            fallback_tz_offset_minutes: DEFAULT_TZ_OFFSET_MINUTES,
            house_system: HouseSystem::Equal,
            ephemeris: EphemerisBackend::Approximate,
            swiss_ephemeris_path: None,
            locale: Locale::En,
            polar_latitude_limit: POLAR_LATITUDE_LIMIT_DEG,
            include_diagnostics: false,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ChartError> {
        let tz = self.fallback_tz_offset_minutes;
        if !tz.is_finite() || tz.abs() > MAX_TZ_OFFSET_MINUTES {
            return Err(ChartError::invalid(
                "fallback_tz_offset_minutes",
                format!("{tz} is not within ±{MAX_TZ_OFFSET_MINUTES} minutes"),
            ));
        }
        let limit = self.polar_latitude_limit;
        if !limit.is_finite() || limit <= 0.0 || limit > 90.0 {
            return Err(ChartError::invalid(
                "polar_latitude_limit",
                format!("{limit} is not in (0, 90]"),
            ));
        }
        Ok(())
    }

    pub fn fallback_engine(&self) -> MeanElementEphemeris {
        MeanElementEphemeris::new(self.polar_latitude_limit)
    }
}

/// Build the configured ephemeris.
///
/// The low-precision engine is always the fallback. If the precision
/// backend is requested but cannot start, or was not compiled in, the
/// low-precision engine serves alone.
pub fn ephemeris_from_config(config: &ChartConfig) -> Box<dyn Ephemeris> {
    let fallback = config.fallback_engine();
    match config.ephemeris {
        EphemerisBackend::Approximate => Box::new(fallback),
        EphemerisBackend::Swiss => swiss_or_fallback(config, fallback),
    }
}

#[cfg(feature = "swiss")]
fn swiss_or_fallback(config: &ChartConfig, fallback: MeanElementEphemeris) -> Box<dyn Ephemeris> {
    use crate::ephemeris::{FallbackEphemeris, SwissEphemerisAdapter};

    match SwissEphemerisAdapter::new(
        config.swiss_ephemeris_path.as_deref(),
        config.polar_latitude_limit,
    ) {
        Ok(adapter) => Box::new(FallbackEphemeris::new(adapter, fallback)),
        Err(e) => {
            log::warn!("Swiss Ephemeris unavailable ({e}), using {}", fallback.name());
            Box::new(fallback)
        }
    }
}

#[cfg(not(feature = "swiss"))]
fn swiss_or_fallback(_config: &ChartConfig, fallback: MeanElementEphemeris) -> Box<dyn Ephemeris> {
    log::warn!(
        "Swiss Ephemeris backend requested but not compiled in (enable the `swiss` feature), using {}",
        fallback.name()
    );
    Box::new(fallback)
}
