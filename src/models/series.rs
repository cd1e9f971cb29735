use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use crate::models::observation::Observation;

/// One hour of the normalized series
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HourlySample {
    pub hour: DateTime<FixedOffset>,
    pub wave_height: f64,
    pub wind_speed: f64,
    pub swell_height: f64,
    pub water_temp: Option<f64>,
    pub is_interpolated: bool,
}

impl HourlySample {
    /// Calendar day of the sample in the zone the series was built in
    pub fn day(&self) -> NaiveDate {
        self.hour.date_naive()
    }
}

/// Gap free, strictly hourly series.
///
/// Only the normalizer builds these, which is what guarantees that adjacent samples are
/// exactly one hour apart. Nothing can be changed after construction.
#[derive(Serialize, Clone, Debug)]
pub struct NormalizedSeries {
    samples: Vec<HourlySample>,
}

impl NormalizedSeries {
    pub(crate) fn new(samples: Vec<HourlySample>) -> NormalizedSeries {
        NormalizedSeries { samples }
    }

    pub fn samples(&self) -> &[HourlySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_hour(&self) -> Option<DateTime<FixedOffset>> {
        self.samples.first().map(|s| s.hour)
    }

    pub fn last_hour(&self) -> Option<DateTime<FixedOffset>> {
        self.samples.last().map(|s| s.hour)
    }

    /// Wave heights of the trailing `window` samples, or all of them if the series is shorter
    ///
    /// # Arguments
    ///
    /// * 'window' - number of trailing hours to return
    pub fn trailing_wave_heights(&self, window: usize) -> Vec<f64> {
        let start = self.samples.len().saturating_sub(window);
        self.samples[start..].iter().map(|s| s.wave_height).collect()
    }

    /// Turns the series back into observations, one per observed hour.
    /// Filled hours are left out so that normalizing the result fills (and flags) them again.
    /// Used when a persisted series needs to go through the pipeline again.
    pub fn to_observations(&self) -> Vec<Observation> {
        self.samples
            .iter()
            .filter(|s| !s.is_interpolated)
            .map(|s| Observation::new(s.hour, s.wave_height, s.wind_speed, s.swell_height, s.water_temp))
            .collect()
    }
}
