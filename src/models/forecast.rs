use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Projected wave heights with a symmetric confidence band.
///
/// `forecast_hours`, `predicted`, `lower_bound` and `upper_bound` are parallel and always
/// the same length.
#[derive(Serialize, Clone, Debug)]
pub struct ForecastResult {
    pub model: String,
    pub confidence_level: f64,
    pub forecast_hours: Vec<DateTime<FixedOffset>>,
    pub predicted: Vec<f64>,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
    pub slope_per_hour: f64,
    pub intercept: f64,
    pub residual_std: f64,
}

impl ForecastResult {
    pub fn horizon(&self) -> usize {
        self.predicted.len()
    }
}
