use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use crate::errors::PipelineError;

/// One record as delivered by the acquisition side, before any validation.
///
/// Field names follow the cleaned warehouse table but snake_case keys are accepted as well.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RawObservation {
    #[serde(alias = "TIMESTAMP", default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
    #[serde(alias = "WAVE_HEIGHT", default)]
    pub wave_height: Option<f64>,
    #[serde(alias = "WIND_SPEED", default)]
    pub wind_speed: Option<f64>,
    #[serde(alias = "SWELL_HEIGHT", default)]
    pub swell_height: Option<f64>,
    #[serde(alias = "WATER_TEMPERATURE", alias = "water_temperature", default)]
    pub water_temp: Option<f64>,
}

/// A single timestamped marine reading
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<FixedOffset>,
    pub wave_height: f64,
    pub wind_speed: f64,
    pub swell_height: f64,
    pub water_temp: Option<f64>,
}

impl Observation {
    /// Returns a new Observation
    ///
    /// # Arguments
    ///
    /// * 'timestamp' - time of the reading, in any offset
    /// * 'wave_height' - significant wave height in meters
    /// * 'wind_speed' - wind speed in m/s
    /// * 'swell_height' - swell height in meters
    /// * 'water_temp' - water temperature in °C if reported
    pub fn new(timestamp: DateTime<FixedOffset>, wave_height: f64, wind_speed: f64, swell_height: f64, water_temp: Option<f64>) -> Observation {
        Observation { timestamp, wave_height, wind_speed, swell_height, water_temp }
    }

    /// Validates a raw record and turns it into an Observation.
    ///
    /// Only structurally impossible records are rejected: a missing timestamp, a missing
    /// mandatory value or a value that isn't a finite number. Range checks (e.g. negative
    /// wave heights) are the responsibility of the acquisition side.
    ///
    /// # Arguments
    ///
    /// * 'index' - position of the record in its batch, reported back in errors
    /// * 'raw' - the record to validate
    pub fn from_raw(index: usize, raw: &RawObservation) -> Result<Observation, PipelineError> {
        let timestamp = raw.timestamp
            .ok_or_else(|| PipelineError::invalid(index, "timestamp", "absent"))?;

        let wave_height = required(index, "wave_height", raw.wave_height)?;
        let wind_speed = required(index, "wind_speed", raw.wind_speed)?;
        let swell_height = required(index, "swell_height", raw.swell_height)?;

        let water_temp = match raw.water_temp {
            Some(v) if !v.is_finite() => return Err(PipelineError::invalid(index, "water_temp", v)),
            other => other,
        };

        Ok(Observation { timestamp, wave_height, wind_speed, swell_height, water_temp })
    }
}

fn required(index: usize, field: &str, value: Option<f64>) -> Result<f64, PipelineError> {
    match value {
        None => Err(PipelineError::invalid(index, field, "absent")),
        Some(v) if !v.is_finite() => Err(PipelineError::invalid(index, field, v)),
        Some(v) => Ok(v),
    }
}
