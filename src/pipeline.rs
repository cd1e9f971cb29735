use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use crate::aggregator::{date_range, detect_hazard, hourly_profile, summarize};
use crate::config::PipelineParameters;
use crate::errors::{ConfigError, PipelineError};
use crate::forecaster::{Forecaster, LinearTrendForecaster};
use crate::models::forecast::ForecastResult;
use crate::models::observation::{Observation, RawObservation};
use crate::models::series::NormalizedSeries;
use crate::models::summary::{DailySummary, HazardSummary, HourlyProfile};
use crate::models::zone::ReferenceZone;
use crate::normalizer::normalize;

/// Everything one run produces, all derived from the same normalized series
#[derive(Serialize, Debug)]
pub struct PipelineResult {
    pub series: NormalizedSeries,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub daily: Vec<DailySummary>,
    pub hazard_threshold: f64,
    pub hazard: Vec<HazardSummary>,
    pub latest_day_profile: Vec<HourlyProfile>,
    pub forecast: Option<ForecastResult>,
}

/// Normalizes a batch of observations and derives aggregates, hazard days and a forecast.
///
/// Holds no state between runs, so one instance can serve many batches (or threads).
pub struct Pipeline {
    hazard_threshold: f64,
    zone: ReferenceZone,
    forecaster: Box<dyn Forecaster>,
}

impl Pipeline {
    /// Returns a pipeline with validated configuration and the linear trend forecaster
    ///
    /// # Arguments
    ///
    /// * 'params' - pipeline parameters, typically from the configuration file
    pub fn new(params: &PipelineParameters) -> Result<Pipeline, ConfigError> {
        if !params.hazard_threshold.is_finite() || params.hazard_threshold < 0.0 {
            return Err(ConfigError::invalid("hazard_threshold", params.hazard_threshold));
        }
        let zone = params.reference_zone()?;
        let forecaster = LinearTrendForecaster::new(
            params.forecast_window_hours,
            params.forecast_horizon_hours,
            params.confidence_level,
        )?;

        Ok(Pipeline { hazard_threshold: params.hazard_threshold, zone, forecaster: Box::new(forecaster) })
    }

    /// Replaces the forecasting strategy
    ///
    /// # Arguments
    ///
    /// * 'forecaster' - the strategy to use instead of the linear trend
    pub fn with_forecaster(mut self, forecaster: Box<dyn Forecaster>) -> Pipeline {
        self.forecaster = forecaster;
        self
    }

    /// Validates raw records and runs the pipeline on them.
    /// The first invalid record aborts the run before anything is normalized.
    ///
    /// # Arguments
    ///
    /// * 'raw' - records as delivered by the acquisition side
    pub fn run_raw(&self, raw: &[RawObservation]) -> Result<PipelineResult, PipelineError> {
        let observations = raw
            .iter()
            .enumerate()
            .map(|(i, r)| Observation::from_raw(i, r))
            .collect::<Result<Vec<Observation>, PipelineError>>()?;

        self.run(&observations)
    }

    /// Runs the pipeline on validated observations.
    ///
    /// Normalization failures are fatal. A series too short for the forecaster still gives
    /// aggregates and hazard days, just without a forecast.
    ///
    /// # Arguments
    ///
    /// * 'observations' - observations in any order
    pub fn run(&self, observations: &[Observation]) -> Result<PipelineResult, PipelineError> {
        let series = normalize(observations, self.zone)?;

        let daily = summarize(&series);
        let hazard = detect_hazard(&series, self.hazard_threshold);
        let range = date_range(&series);
        let latest_day_profile = range
            .map(|(_, last)| hourly_profile(&series, last))
            .unwrap_or_default();

        let forecast = match self.forecaster.forecast(&series) {
            Ok(f) => Some(f),
            Err(PipelineError::InsufficientData { needed, got }) => {
                warn!("skipping {} forecast: need {} hourly samples, got {}", self.forecaster.name(), needed, got);
                None
            },
            Err(e) => return Err(e),
        };

        info!("pipeline run: {} observations, {} hours, {} days, {} hazard days, forecast {}",
            observations.len(), series.len(), daily.len(), hazard.len(),
            if forecast.is_some() { "ready" } else { "skipped" });

        Ok(PipelineResult {
            series,
            date_range: range,
            daily,
            hazard_threshold: self.hazard_threshold,
            hazard,
            latest_day_profile,
            forecast,
        })
    }
}
