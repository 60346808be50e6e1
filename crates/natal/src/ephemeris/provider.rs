use crate::ephemeris::approx::MeanElementEphemeris;
use crate::ephemeris::types::{EclipticPositions, GeoCoordinate};
use crate::error::ChartError;
use crate::julian::JulianMoment;

/// A source of Sun, Moon and horizon positions.
///
/// Implementations must return longitudes normalized to [0, 360) and must
/// be callable from any thread.
pub trait Ephemeris: Send + Sync {
    /// Short backend name, reported in diagnostics
    fn name(&self) -> &str;

    fn positions(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<EclipticPositions, ChartError>;

    /// Positions plus the name of the backend that actually produced them.
    fn positions_with_source(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<(EclipticPositions, &str), ChartError> {
        let pos = self.positions(moment, location)?;
        Ok((pos, self.name()))
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn positions(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<EclipticPositions, ChartError> {
        (**self).positions(moment, location)
    }

    fn positions_with_source(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<(EclipticPositions, &str), ChartError> {
        (**self).positions_with_source(moment, location)
    }
}

/// Wraps a precision backend and answers with the built-in engine whenever
/// the backend itself fails.
///
/// Only [`ChartError::Provider`] triggers the fallback. Invalid input and
/// polar instability are properties of the request and are returned as is.
pub struct FallbackEphemeris<P> {
    primary: P,
    fallback: MeanElementEphemeris,
}

impl<P: Ephemeris> FallbackEphemeris<P> {
    pub fn new(primary: P, fallback: MeanElementEphemeris) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Ephemeris> Ephemeris for FallbackEphemeris<P> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn positions(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<EclipticPositions, ChartError> {
        self.positions_with_source(moment, location).map(|(pos, _)| pos)
    }

    fn positions_with_source(
        &self,
        moment: &JulianMoment,
        location: &GeoCoordinate,
    ) -> Result<(EclipticPositions, &str), ChartError> {
        match self.primary.positions(moment, location) {
            Ok(pos) => Ok((pos, self.primary.name())),
            Err(e) if e.is_provider_failure() => {
                log::warn!(
                    "Ephemeris {} failed ({e}), falling back to {}",
                    self.primary.name(),
                    self.fallback.name()
                );
                let pos = self.fallback.positions(moment, location)?;
                Ok((pos, self.fallback.name()))
            }
            Err(e) => Err(e),
        }
    }
}
