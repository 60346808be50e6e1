use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::ephemeris::GeoCoordinate;
use crate::error::ResolveError;
use crate::geo::CoordinateResolver;

/// `city,lat,lng` rows for provincial capitals and a few other cities
const EMBEDDED_CITIES: &str = include_str!("cities.csv");

const CITY_ALIASES: &[&str] = &["city", "城市", "name", "名称", "地名"];
const LAT_ALIASES: &[&str] = &["lat", "latitude", "纬度"];
const LNG_ALIASES: &[&str] = &["lng", "lon", "long", "经度", "longitude"];

lazy_static! {
    static ref SPACES: Regex = Regex::new(r"[\s\u{3000}]+").expect("valid regex");
    static ref PUNCTUATION: Regex = Regex::new(r"[·•・．.\-_,，。/\\]+").expect("valid regex");
    static ref ADMIN_SUFFIX: Regex =
        Regex::new(r"(特别行政区|自治州|自治区|地区|市辖区|省|市|区|县|盟)$").expect("valid regex");
}

/// Canonical form of a city name for matching: lower case, no BOM,
/// whitespace or punctuation, and no trailing administrative suffix.
pub fn normalize_city(name: &str) -> String {
    let lowered = name.trim_start_matches('\u{feff}').trim().to_lowercase();
    let compact = SPACES.replace_all(&lowered, "");
    let bare = PUNCTUATION.replace_all(&compact, "");
    ADMIN_SUFFIX.replace(&bare, "").into_owned()
}

#[derive(Debug, Clone, PartialEq)]
struct CityEntry {
    key: String,
    coordinate: GeoCoordinate,
}

/// Offline city-name resolver
#[derive(Debug, Clone)]
pub struct CityTable {
    entries: Vec<CityEntry>,
}

impl CityTable {
    /// The table compiled into the crate.
    pub fn embedded() -> Result<Self, ResolveError> {
        Self::from_csv(EMBEDDED_CITIES)
    }

    /// Parse a CSV with a header row. Column order is free; columns are
    /// found by name. Rows with unusable coordinates are skipped.
    pub fn from_csv(text: &str) -> Result<Self, ResolveError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| ResolveError::InvalidTable {
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let (city_idx, lat_idx, lng_idx) = match (
            find_column(&header, CITY_ALIASES),
            find_column(&header, LAT_ALIASES),
            find_column(&header, LNG_ALIASES),
        ) {
            (Some(c), Some(la), Some(ln)) => (c, la, ln),
            _ => {
                return Err(ResolveError::InvalidTable {
                    message: format!("header {header:?} lacks city/lat/lng columns"),
                })
            }
        };

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ResolveError::InvalidTable {
                message: e.to_string(),
            })?;
            let (Some(city), Some(lat), Some(lng)) =
                (record.get(city_idx), record.get(lat_idx), record.get(lng_idx))
            else {
                continue;
            };

            let key = normalize_city(city);
            if key.is_empty() {
                continue;
            }
            let coordinate = match (lat.parse::<f64>(), lng.parse::<f64>()) {
                (Ok(lat), Ok(lng)) => GeoCoordinate::new(lat, lng),
                _ => continue,
            };
            match coordinate {
                Ok(coordinate) => entries.push(CityEntry { key, coordinate }),
                Err(e) => log::debug!("Skipping city row {city}: {e}"),
            }
        }

        if entries.is_empty() {
            return Err(ResolveError::InvalidTable {
                message: "no usable rows".to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First row whose normalized name equals, contains, or is contained
    /// in the normalized query.
    pub fn lookup(&self, city: &str) -> Result<GeoCoordinate, ResolveError> {
        let target = normalize_city(city);
        if target.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }
        self.entries
            .iter()
            .find(|e| e.key == target || target.contains(&e.key) || e.key.contains(&target))
            .map(|e| e.coordinate)
            .ok_or_else(|| ResolveError::NotFound {
                city: city.trim().to_string(),
            })
    }
}

#[async_trait]
impl CoordinateResolver for CityTable {
    async fn resolve(&self, city: &str) -> Result<GeoCoordinate, ResolveError> {
        self.lookup(city)
    }
}

/// Exact alias match first, then a header that contains an alias.
fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| aliases.iter().any(|a| h == a))
        .or_else(|| header.iter().position(|h| aliases.iter().any(|a| h.contains(a))))
}
