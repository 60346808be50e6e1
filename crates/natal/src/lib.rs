//! Low-precision geocentric chart engine.
//!
//! Given a civil birth time, a timezone offset and a place, computes the
//! tropical signs of the Sun, Moon and ascendant and twelve house cusps.
//! Pure and synchronous; every value is owned by the call that made it.

pub mod angle;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod horizon;
pub mod houses;
pub mod julian;
pub mod time;
pub mod zodiac;

pub use chart::{compute_chart, ChartAssembler, ChartDiagnostics, ChartResult};
pub use config::{ephemeris_from_config, ChartConfig, EphemerisBackend};
pub use ephemeris::{Ephemeris, FallbackEphemeris, GeoCoordinate, MeanElementEphemeris};
pub use error::{ChartError, ResolveError};
pub use geo::{ChainedResolver, CityTable, CoordinateResolver};
pub use houses::{EqualHouses, HouseContext, HouseCusp, HouseStrategy, HouseSystem, WholeSignHouses};
pub use julian::{to_julian_day, JulianMoment};
pub use time::{BirthMoment, UtcInstant};
pub use zodiac::{sign_of, Locale, ZodiacSign};
