//! Scan configuration validation.
//!
//! Reads and validates the [data] and [screen] sections before a scan runs,
//! producing resolved paths and thresholds.

use crate::domain::error::ScreenerError;
use crate::domain::fundamentals::ScreenThresholds;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

/// Resolved, validated scan configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub prices_path: PathBuf,
    pub fundamentals_path: PathBuf,
    pub thresholds: ScreenThresholds,
}

pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<ScanConfig, ScreenerError> {
    let prices_path = required_path(config, "data", "prices_path")?;
    let fundamentals_path = required_path(config, "data", "fundamentals_path")?;
    let thresholds = validate_thresholds(config)?;
    Ok(ScanConfig {
        prices_path,
        fundamentals_path,
        thresholds,
    })
}

fn required_path(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<PathBuf, ScreenerError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s)),
        Some(_) => Err(ScreenerError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{} must not be empty", key),
        }),
        None => Err(ScreenerError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<ScreenThresholds, ScreenerError> {
    let defaults = ScreenThresholds::default();
    let min_roe_pct = config.get_double("screen", "min_roe_pct", defaults.min_roe_pct);
    let max_debt_to_asset_pct = config.get_double(
        "screen",
        "max_debt_to_asset_pct",
        defaults.max_debt_to_asset_pct,
    );
    let min_dividend_yield_pct = config.get_double(
        "screen",
        "min_dividend_yield_pct",
        defaults.min_dividend_yield_pct,
    );

    for (key, value) in [
        ("min_roe_pct", min_roe_pct),
        ("max_debt_to_asset_pct", max_debt_to_asset_pct),
        ("min_dividend_yield_pct", min_dividend_yield_pct),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(ScreenerError::ConfigInvalid {
                section: "screen".to_string(),
                key: key.to_string(),
                reason: format!("{} must be a percentage between 0 and 100", key),
            });
        }
    }

    Ok(ScreenThresholds {
        min_roe_pct,
        max_debt_to_asset_pct,
        min_dividend_yield_pct,
    })
}
