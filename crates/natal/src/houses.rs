//! House cusp strategies.
//!
//! A strategy turns the horizon state into twelve cusp longitudes. Equal
//! houses are always available; other systems plug in through
//! [`HouseStrategy`] without touching the rest of the pipeline.

use serde::{Deserialize, Serialize};

use crate::angle::normalize_deg;
use crate::error::ChartError;
use crate::zodiac::{house_meaning, sign_of, Locale, ZodiacSign, SIGN_WIDTH_DEG};

/// Number of houses in a chart
pub const HOUSE_COUNT: usize = 12;

/// Built-in house systems selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Equal,
    WholeSign,
}

impl HouseSystem {
    pub fn strategy(self) -> Box<dyn HouseStrategy> {
        match self {
            HouseSystem::Equal => Box::new(EqualHouses),
            HouseSystem::WholeSign => Box::new(WholeSignHouses),
        }
    }
}

/// Horizon state a strategy may use. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseContext {
    pub ascendant: f64,
    pub midheaven: f64,
    pub local_sidereal_deg: f64,
    pub latitude: f64,
    pub obliquity_deg: f64,
}

pub trait HouseStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Cusp longitudes for houses 1..=12, each in [0, 360)
    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; HOUSE_COUNT], ChartError>;
}

/// Each cusp exactly 30° after the previous, starting at the ascendant.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualHouses;

impl HouseStrategy for EqualHouses {
    fn name(&self) -> &str {
        "equal"
    }

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; HOUSE_COUNT], ChartError> {
        evenly_spaced_from(ctx.ascendant)
    }
}

/// House 1 is the whole sign holding the ascendant.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeSignHouses;

impl HouseStrategy for WholeSignHouses {
    fn name(&self) -> &str {
        "whole_sign"
    }

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; HOUSE_COUNT], ChartError> {
        let first = sign_of(ctx.ascendant)?.start_longitude();
        evenly_spaced_from(first)
    }
}

fn evenly_spaced_from(start: f64) -> Result<[f64; HOUSE_COUNT], ChartError> {
    if !start.is_finite() {
        return Err(ChartError::OutOfRange { value: start });
    }
    let mut cusps = [0.0; HOUSE_COUNT];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_deg(start + i as f64 * SIGN_WIDTH_DEG);
    }
    Ok(cusps)
}

/// One house cusp with its sign and descriptive text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseCusp {
    /// 1-based house number
    pub index: u8,
    #[serde(rename = "longitude")]
    pub longitude_deg: f64,
    pub sign: ZodiacSign,
    pub meaning: &'static str,
}

/// Attach signs and meanings to raw cusp longitudes, in house order.
pub fn label_cusps(cusps: &[f64; HOUSE_COUNT], locale: Locale) -> Result<Vec<HouseCusp>, ChartError> {
    cusps
        .iter()
        .zip(1u8..)
        .map(|(&longitude_deg, index)| {
            Ok(HouseCusp {
                index,
                longitude_deg,
                sign: sign_of(longitude_deg)?,
                meaning: house_meaning(index, locale).unwrap_or_default(),
            })
        })
        .collect()
}
