//! Chart assembly: birth time and place in, signs and houses out.
//!
//! The pipeline runs strictly forward: UTC normalization, Julian Day,
//! ephemeris positions, house cusps, sign mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{ephemeris_from_config, ChartConfig};
use crate::ephemeris::{Ephemeris, GeoCoordinate};
use crate::error::ChartError;
use crate::houses::{label_cusps, HouseContext, HouseCusp, HouseStrategy};
use crate::julian::JulianMoment;
use crate::time::{resolve_tz_offset, to_utc, BirthMoment};
use crate::zodiac::{sign_of, Locale, ZodiacSign};

/// Intermediate values of one computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDiagnostics {
    pub tz_offset_minutes: f64,
    pub utc: DateTime<Utc>,
    pub jd: f64,
    pub century_t: f64,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
    pub ascendant_longitude: f64,
    pub midheaven_longitude: f64,
    pub local_sidereal_deg: f64,
    pub obliquity_deg: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Backend that produced the positions
    pub provider: String,
    pub house_system: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub ascendant_sign: ZodiacSign,
    pub ascendant_longitude: f64,
    /// Houses 1..=12 in order
    pub houses: Vec<HouseCusp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<ChartDiagnostics>,
}

impl ChartResult {
    /// One-line summary of the three main placements.
    pub fn prompt_summary(&self, locale: Locale) -> String {
        match locale {
            Locale::En => format!(
                "Sun: {}; Moon: {}; Ascendant: {}",
                self.sun_sign.name(locale),
                self.moon_sign.name(locale),
                self.ascendant_sign.name(locale)
            ),
            Locale::Zh => format!(
                "太阳：{}；月亮：{}；上升：{}",
                self.sun_sign.name(locale),
                self.moon_sign.name(locale),
                self.ascendant_sign.name(locale)
            ),
        }
    }
}

/// Runs the pipeline with a fixed configuration, ephemeris and house strategy.
///
/// Holds no per-request state; one assembler can serve any number of
/// threads or tasks at once.
pub struct ChartAssembler {
    config: ChartConfig,
    ephemeris: Box<dyn Ephemeris>,
    houses: Box<dyn HouseStrategy>,
}

impl ChartAssembler {
    /// Assembler with the ephemeris and house system named in `config`.
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        let ephemeris = ephemeris_from_config(&config);
        let houses = config.house_system.strategy();
        Self::with_parts(config, ephemeris, houses)
    }

    /// Assembler with caller-supplied collaborators, e.g. an external
    /// quadrant house system.
    pub fn with_parts(
        config: ChartConfig,
        ephemeris: Box<dyn Ephemeris>,
        houses: Box<dyn HouseStrategy>,
    ) -> Result<Self, ChartError> {
        config.validate()?;
        Ok(Self {
            config,
            ephemeris,
            houses,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn compute(
        &self,
        birth: &BirthMoment,
        tz_offset_minutes: Option<f64>,
        location: &GeoCoordinate,
    ) -> Result<ChartResult, ChartError> {
        let tz = resolve_tz_offset(tz_offset_minutes, self.config.fallback_tz_offset_minutes);
        let utc = to_utc(birth, tz)?;
        let moment = JulianMoment::from(&utc);
        log::debug!(
            "Chart for {} (tz {tz}): JD {} T {}",
            utc.datetime.to_rfc3339(),
            moment.jd(),
            moment.century_t()
        );

        let (pos, provider) = self.ephemeris.positions_with_source(&moment, location)?;
        log::debug!(
            "{provider}: sun {:.4} moon {:.4} asc {:.4}",
            pos.sun,
            pos.moon,
            pos.ascendant
        );

        let cusps = self.houses.cusps(&HouseContext {
            ascendant: pos.ascendant,
            midheaven: pos.midheaven,
            local_sidereal_deg: pos.local_sidereal_deg,
            latitude: location.lat(),
            obliquity_deg: pos.obliquity_deg,
        })?;

        let diagnostics = self.config.include_diagnostics.then(|| ChartDiagnostics {
            tz_offset_minutes: tz,
            utc: utc.datetime,
            jd: moment.jd(),
            century_t: moment.century_t(),
            sun_longitude: pos.sun,
            moon_longitude: pos.moon,
            ascendant_longitude: pos.ascendant,
            midheaven_longitude: pos.midheaven,
            local_sidereal_deg: pos.local_sidereal_deg,
            obliquity_deg: pos.obliquity_deg,
            latitude: location.lat(),
            longitude: location.lon(),
            provider: provider.to_string(),
            house_system: self.houses.name().to_string(),
        });

        Ok(ChartResult {
            sun_sign: sign_of(pos.sun)?,
            moon_sign: sign_of(pos.moon)?,
            ascendant_sign: sign_of(pos.ascendant)?,
            ascendant_longitude: pos.ascendant,
            houses: label_cusps(&cusps, self.config.locale)?,
            diagnostics,
        })
    }
}

/// Compute a chart with the default configuration.
pub fn compute_chart(
    birth: &BirthMoment,
    tz_offset_minutes: Option<f64>,
    location: &GeoCoordinate,
) -> Result<ChartResult, ChartError> {
    ChartAssembler::new(ChartConfig::default())?.compute(birth, tz_offset_minutes, location)
}
