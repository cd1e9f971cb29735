//! Marine conditions pipeline: turns irregular wave, wind, swell and water temperature
//! readings into a gap free hourly series, summarizes it per day, flags hazardous wave
//! heights and projects wave height 24 hours ahead with a confidence band.

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod files;
pub mod forecaster;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod pipeline;

pub use errors::{ConfigError, PipelineError};
pub use forecaster::{Forecaster, LinearTrendForecaster};
pub use models::observation::{Observation, RawObservation};
pub use models::zone::ReferenceZone;
pub use pipeline::{Pipeline, PipelineResult};
