use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use natal::{
    BirthMoment, ChartAssembler, CityTable, CoordinateResolver, GeoCoordinate, HouseSystem,
    Locale,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "natal")]
#[command(about = "Sun, Moon and ascendant signs with house cusps for a birth time and place")]
struct Args {
    /// Birth date as YYYY-MM-DD
    date: String,

    /// Local clock time as HH:MM
    time: String,

    /// Minutes to add to local time to get UTC (UTC+8 is -480)
    #[arg(long, allow_hyphen_values = true)]
    tz_offset: Option<f64>,

    /// City name, looked up in the built-in table or --cities
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    city: Option<String>,

    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,

    /// CSV with city,lat,lng columns to use instead of the built-in table
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Path to natal.toml (default: NATAL_CONFIG or configs/natal.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured house system
    #[arg(long, value_parser = parse_house_system)]
    houses: Option<HouseSystem>,

    /// Attach intermediate values to the output
    #[arg(long)]
    debug: bool,

    /// Print the one-line summary instead of JSON
    #[arg(long)]
    summary: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    chart: &'a natal::ChartResult,
    summary: String,
}

fn parse_house_system(s: &str) -> Result<HouseSystem, String> {
    match s {
        "equal" => Ok(HouseSystem::Equal),
        "whole_sign" | "whole-sign" => Ok(HouseSystem::WholeSign),
        other => Err(format!("unknown house system {other:?} (equal, whole_sign)")),
    }
}

fn parse_birth(date: &str, time: &str) -> anyhow::Result<BirthMoment> {
    let fields = |s: &str, sep: char| -> anyhow::Result<Vec<u32>> {
        s.split(sep)
            .map(|p| p.trim().parse::<u32>().with_context(|| format!("bad number in {s:?}")))
            .collect()
    };
    let (d, t) = (fields(date, '-')?, fields(time, ':')?);
    let (&[year, month, day], &[hour, minute]) = (d.as_slice(), t.as_slice()) else {
        anyhow::bail!("expected YYYY-MM-DD HH:MM, got {date} {time}");
    };
    let year = i32::try_from(year).context("year out of range")?;
    Ok(BirthMoment::new(year, month, day, hour, minute)?)
}

async fn resolve_location(args: &Args) -> anyhow::Result<GeoCoordinate> {
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        return Ok(GeoCoordinate::new(lat, lng)?);
    }
    let city = args
        .city
        .as_deref()
        .context("either --city or --lat/--lng is required")?;
    let table = match &args.cities {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            CityTable::from_csv(&text)?
        }
        None => CityTable::embedded()?,
    };
    let coordinate = table.resolve(city).await?;
    log::info!("{city} -> ({}, {})", coordinate.lat(), coordinate.lon());
    Ok(coordinate)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => natal_config::load_chart_config_from(path)?,
        None => natal_config::load_chart_config()?,
    };
    if let Some(houses) = args.houses {
        config.house_system = houses;
    }
    config.include_diagnostics |= args.debug;
    let locale: Locale = config.locale;

    let birth = parse_birth(&args.date, &args.time)?;
    let location = resolve_location(&args).await?;
    let assembler = ChartAssembler::new(config)?;
    let chart = assembler.compute(&birth, args.tz_offset, &location)?;

    if args.summary {
        println!("{}", chart.prompt_summary(locale));
    } else {
        let output = Output {
            chart: &chart,
            summary: chart.prompt_summary(locale),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}
