pub mod approx;
pub mod provider;
pub mod sidereal;
pub mod types;

#[cfg(feature = "swiss")]
pub mod adapter;

#[cfg(feature = "swiss")]
pub use adapter::SwissEphemerisAdapter;
pub use approx::{moon_longitude_deg, sun_longitude_deg, MeanElementEphemeris};
pub use provider::{Ephemeris, FallbackEphemeris};
pub use sidereal::{gmst_deg, local_sidereal_deg, mean_obliquity_deg};
pub use types::{EclipticPositions, GeoCoordinate};
