//! Place-name resolution.
//!
//! The chart pipeline only consumes [`GeoCoordinate`]; where it comes from
//! is up to the caller. [`CityTable`] is an offline resolver over a small
//! embedded table. Remote geocoding services implement the same trait.

pub mod city_table;

use async_trait::async_trait;

use crate::ephemeris::GeoCoordinate;
use crate::error::ResolveError;

pub use city_table::{normalize_city, CityTable};

#[async_trait]
pub trait CoordinateResolver: Send + Sync {
    async fn resolve(&self, city: &str) -> Result<GeoCoordinate, ResolveError>;
}

/// Try each resolver in turn, returning the first hit.
pub struct ChainedResolver {
    resolvers: Vec<Box<dyn CoordinateResolver>>,
}

impl ChainedResolver {
    pub fn new(resolvers: Vec<Box<dyn CoordinateResolver>>) -> Self {
        Self { resolvers }
    }
}

#[async_trait]
impl CoordinateResolver for ChainedResolver {
    async fn resolve(&self, city: &str) -> Result<GeoCoordinate, ResolveError> {
        let mut last = ResolveError::NotFound {
            city: city.to_string(),
        };
        for resolver in &self.resolvers {
            match resolver.resolve(city).await {
                Ok(coordinate) => return Ok(coordinate),
                Err(ResolveError::EmptyQuery) => return Err(ResolveError::EmptyQuery),
                Err(e) => {
                    log::debug!("Resolver miss for {city}: {e}");
                    last = e;
                }
            }
        }
        Err(last)
    }
}
