use natal::ephemeris::EclipticPositions;
use natal::{
    BirthMoment, ChartAssembler, ChartConfig, ChartError, Ephemeris, EqualHouses,
    FallbackEphemeris, GeoCoordinate, HouseContext, HouseStrategy, JulianMoment,
    MeanElementEphemeris, ZodiacSign,
};

/// Stands in for a precision backend with fixed answers
struct FixedEphemeris {
    positions: EclipticPositions,
}

impl Ephemeris for FixedEphemeris {
    fn name(&self) -> &str {
        "fixed"
    }

    fn positions(&self, _: &JulianMoment, _: &GeoCoordinate) -> Result<EclipticPositions, ChartError> {
        Ok(self.positions)
    }
}

/// Simulates a backend whose data files are missing
struct MissingFiles;

impl Ephemeris for MissingFiles {
    fn name(&self) -> &str {
        "swiss"
    }

    fn positions(&self, _: &JulianMoment, _: &GeoCoordinate) -> Result<EclipticPositions, ChartError> {
        Err(ChartError::Provider {
            provider: "swiss".to_string(),
            message: "seas_18.se1 not found".to_string(),
        })
    }
}

/// Cusps 1 and 10 pinned to the ascendant and midheaven, the rest
/// interpolated evenly per quadrant.
struct QuadrantHouses;

impl HouseStrategy for QuadrantHouses {
    fn name(&self) -> &str {
        "quadrant"
    }

    fn cusps(&self, ctx: &HouseContext) -> Result<[f64; 12], ChartError> {
        let asc = ctx.ascendant;
        let ic = (ctx.midheaven + 180.0) % 360.0;
        let span = (ic - asc).rem_euclid(360.0);
        let mut cusps = [0.0; 12];
        for i in 0..3 {
            cusps[i] = (asc + span * i as f64 / 3.0).rem_euclid(360.0);
            cusps[i + 6] = (cusps[i] + 180.0).rem_euclid(360.0);
        }
        let span = (asc + 180.0 - ic).rem_euclid(360.0);
        for i in 0..3 {
            cusps[i + 3] = (ic + span * i as f64 / 3.0).rem_euclid(360.0);
            cusps[i + 9] = (cusps[i + 3] + 180.0).rem_euclid(360.0);
        }
        Ok(cusps)
    }
}

fn fixed() -> FixedEphemeris {
    FixedEphemeris {
        positions: EclipticPositions {
            sun: 15.0,
            moon: 200.0,
            ascendant: 95.0,
            midheaven: 5.0,
            local_sidereal_deg: 5.5,
            obliquity_deg: 23.44,
        },
    }
}

fn diagnostics_config() -> ChartConfig {
    ChartConfig {
        include_diagnostics: true,
        ..ChartConfig::default()
    }
}

#[test]
fn test_external_provider_drives_signs() {
    let assembler =
        ChartAssembler::with_parts(diagnostics_config(), Box::new(fixed()), Box::new(EqualHouses)).unwrap();
    let birth = BirthMoment::new(2020, 1, 1, 0, 0).unwrap();
    let chart = assembler
        .compute(&birth, Some(0.0), &GeoCoordinate::new(10.0, 10.0).unwrap())
        .unwrap();
    assert_eq!(chart.sun_sign, ZodiacSign::Aries);
    assert_eq!(chart.moon_sign, ZodiacSign::Libra);
    assert_eq!(chart.ascendant_sign, ZodiacSign::Cancer);
    assert_eq!(chart.diagnostics.unwrap().provider, "fixed");
}

#[test]
fn test_failing_provider_falls_back_to_builtin_engine() {
    let primary = FallbackEphemeris::new(MissingFiles, MeanElementEphemeris::default());
    let assembler =
        ChartAssembler::with_parts(diagnostics_config(), Box::new(primary), Box::new(EqualHouses)).unwrap();
    let reference = ChartAssembler::new(diagnostics_config()).unwrap();

    let birth = BirthMoment::new(1999, 12, 31, 23, 59).unwrap();
    let loc = GeoCoordinate::new(51.48, 0.0).unwrap();
    let chart = assembler.compute(&birth, Some(0.0), &loc).unwrap();
    let expected = reference.compute(&birth, Some(0.0), &loc).unwrap();

    assert_eq!(chart.diagnostics.as_ref().unwrap().provider, "approximate");
    assert_eq!(chart.houses, expected.houses);
    assert_eq!(chart.sun_sign, expected.sun_sign);
}

#[test]
fn test_fallback_does_not_hide_polar_instability() {
    let primary = FallbackEphemeris::new(MissingFiles, MeanElementEphemeris::default());
    let assembler =
        ChartAssembler::with_parts(ChartConfig::default(), Box::new(primary), Box::new(EqualHouses)).unwrap();
    let birth = BirthMoment::new(2000, 1, 1, 0, 0).unwrap();
    let err = assembler
        .compute(&birth, Some(0.0), &GeoCoordinate::new(90.0, 0.0).unwrap())
        .unwrap_err();
    assert!(matches!(err, ChartError::NumericInstability { .. }));
}

#[test]
fn test_substituted_house_strategy() {
    let assembler = ChartAssembler::with_parts(
        diagnostics_config(),
        Box::new(fixed()),
        Box::new(QuadrantHouses),
    )
    .unwrap();
    let birth = BirthMoment::new(2020, 1, 1, 0, 0).unwrap();
    let chart = assembler
        .compute(&birth, Some(0.0), &GeoCoordinate::new(10.0, 10.0).unwrap())
        .unwrap();

    assert_eq!(chart.houses[0].longitude_deg, 95.0);
    assert_eq!(chart.houses[3].longitude_deg, 185.0);
    assert_eq!(chart.houses[9].longitude_deg, 5.0);
    assert_eq!(chart.diagnostics.unwrap().house_system, "quadrant");
}

#[test]
fn test_builtin_engine_reports_normalized_positions() {
    let eph = MeanElementEphemeris::default();
    for jd in [2_415_020.5, 2_440_000.25, 2_451_545.0, 2_460_000.75, 2_488_070.0] {
        let pos = eph
            .positions(&JulianMoment::from_jd(jd), &GeoCoordinate::new(-45.0, -170.0).unwrap())
            .unwrap();
        for value in [pos.sun, pos.moon, pos.ascendant, pos.midheaven, pos.local_sidereal_deg] {
            assert!((0.0..360.0).contains(&value), "{value} at JD {jd}");
        }
    }
}
