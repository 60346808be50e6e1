//! Loads the chart configuration from `configs/natal.toml`.

use natal::ChartConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the search below with an explicit file
pub const CONFIG_ENV: &str = "NATAL_CONFIG";

const CONFIG_PATHS: [&str; 2] = ["configs/natal.toml", "../../configs/natal.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartConfig>,
}

/// Locate and read the config file.
///
/// `NATAL_CONFIG` must point at a readable file if set. Otherwise the
/// common relative paths are tried and `None` means none exists.
pub fn read_config_text() -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Ok(p) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(p);
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("{CONFIG_ENV}={} is not readable: {e}", path.display()))?;
        return Ok(Some((path, text)));
    }
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), c)));
        }
    }
    Ok(None)
}

/// Parse the `[chart]` table. A document without one yields defaults.
pub fn parse_chart_config(text: &str) -> anyhow::Result<ChartConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;
    let config = root.chart.unwrap_or_default();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [chart] config: {e}"))?;
    Ok(config)
}

pub fn load_chart_config_from(path: &Path) -> anyhow::Result<ChartConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_chart_config(&text)
}

/// Config from the discovered file, or defaults when there is none.
pub fn load_chart_config() -> anyhow::Result<ChartConfig> {
    match read_config_text()? {
        Some((path, text)) => {
            log::info!("Loading chart config from {}", path.display());
            parse_chart_config(&text)
        }
        None => {
            log::debug!("No natal.toml in {:?}, using defaults", CONFIG_PATHS);
            Ok(ChartConfig::default())
        }
    }
}
