use std::fs;
use std::str::FromStr;
use chrono::FixedOffset;
use chrono_tz::Tz;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::models::zone::ReferenceZone;

#[derive(Deserialize, Debug, Clone)]
pub struct GeoRef {
    pub name: String,
    pub lat: f64,
    pub long: f64,
}

impl Default for GeoRef {
    fn default() -> Self {
        GeoRef { name: "Nazaré".to_string(), lat: 39.60475, long: -9.085443 }
    }
}

/// Business parameters for one pipeline deployment
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PipelineParameters {
    pub hazard_threshold: f64,
    pub forecast_window_hours: usize,
    pub forecast_horizon_hours: usize,
    pub confidence_level: f64,
    pub reference_timezone: String,
}

impl Default for PipelineParameters {
    fn default() -> Self {
        PipelineParameters {
            hazard_threshold: 6.0,
            forecast_window_hours: 72,
            forecast_horizon_hours: 24,
            confidence_level: 0.95,
            reference_timezone: "UTC".to_string(),
        }
    }
}

impl PipelineParameters {
    /// Parses the reference timezone.
    /// Accepts "UTC", "Z", an offset on the form "+01:00"/"-0330" or an IANA name such as "Europe/Lisbon".
    pub fn reference_zone(&self) -> Result<ReferenceZone, ConfigError> {
        parse_zone(&self.reference_timezone)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Files {
    pub observations_file: String,
    pub output_file: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub location: GeoRef,
    #[serde(default)]
    pub pipeline: PipelineParameters,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses configuration from a TOML document
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;
    config.pipeline.reference_zone()?;

    Ok(config)
}

/// Parses a timezone identifier into a reference zone
///
/// # Arguments
///
/// * 'identifier' - "UTC", "Z", an offset such as "+01:00" or an IANA name such as "Europe/Lisbon"
pub fn parse_zone(identifier: &str) -> Result<ReferenceZone, ConfigError> {
    let trimmed = identifier.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return Ok(ReferenceZone::utc());
    }

    if let Ok(offset) = FixedOffset::from_str(trimmed) {
        return Ok(ReferenceZone::Fixed(offset));
    }

    Tz::from_str(trimmed)
        .map(ReferenceZone::Named)
        .map_err(|_| ConfigError::invalid("reference_timezone", identifier))
}
