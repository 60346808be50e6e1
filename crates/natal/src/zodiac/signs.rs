//! The twelve tropical signs and the longitude-to-sign mapping.
//!
//! Each sign owns a closed-open 30° band starting at a multiple of 30°
//! measured from 0° Aries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::normalize_deg;
use crate::error::ChartError;

/// Width of one sign, degrees
pub const SIGN_WIDTH_DEG: f64 = 30.0;

/// Display language for sign names and house meanings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const NAMES_EN: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer",
    "Leo", "Virgo", "Libra", "Scorpio",
    "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

const NAMES_ZH: [&str; 12] = [
    "白羊座", "金牛座", "双子座", "巨蟹座",
    "狮子座", "处女座", "天秤座", "天蝎座",
    "射手座", "摩羯座", "水瓶座", "双鱼座",
];

impl ZodiacSign {
    /// All signs in zodiac order, starting at Aries
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in zodiac order, 0 = Aries
    pub fn index(self) -> usize {
        self as usize
    }

    /// Longitude where the sign begins
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH_DEG
    }

    pub fn name(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => NAMES_EN[self.index()],
            Locale::Zh => NAMES_ZH[self.index()],
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Locale::En))
    }
}

/// Sign containing an ecliptic longitude.
///
/// Any finite input is accepted and normalized first; only NaN and
/// infinities are rejected.
pub fn sign_of(longitude_deg: f64) -> Result<ZodiacSign, ChartError> {
    if !longitude_deg.is_finite() {
        return Err(ChartError::OutOfRange {
            value: longitude_deg,
        });
    }
    let index = (normalize_deg(longitude_deg) / SIGN_WIDTH_DEG).floor() as usize;
    ZodiacSign::from_index(index.min(11)).ok_or(ChartError::OutOfRange {
        value: longitude_deg,
    })
}

/// Degrees into the containing sign, [0, 30)
pub fn degree_in_sign(longitude_deg: f64) -> Option<f64> {
    if !longitude_deg.is_finite() {
        return None;
    }
    let lon = normalize_deg(longitude_deg);
    Some(lon - (lon / SIGN_WIDTH_DEG).floor() * SIGN_WIDTH_DEG)
}
