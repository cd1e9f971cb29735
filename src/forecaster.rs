use chrono::TimeDelta;
use log::debug;
use statrs::distribution::{ContinuousCDF, Normal};
use crate::errors::{ConfigError, PipelineError};
use crate::models::forecast::ForecastResult;
use crate::models::series::NormalizedSeries;

/// A wave height forecasting strategy.
///
/// The pipeline only relies on this trait, so a different model can be dropped in as long
/// as it produces `horizon` hourly predictions with bounds.
pub trait Forecaster: Send + Sync {
    /// Projects the series forward.
    /// Fails with `PipelineError::InsufficientData` when the series is too short for the model.
    fn forecast(&self, series: &NormalizedSeries) -> Result<ForecastResult, PipelineError>;

    fn name(&self) -> &str;
}

/// Straight line fitted with ordinary least squares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub residual_std: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `y = intercept + slope * x` with x being the index 0..y.len().
///
/// The residual standard error uses n - 2 degrees of freedom; with two points or fewer the
/// line passes through every point and the error is zero.
///
/// # Arguments
///
/// * 'y' - values to fit, at least one
pub fn fit_linear_trend(y: &[f64]) -> Result<LinearFit, PipelineError> {
    let n = y.len();
    if n == 0 {
        return Err(PipelineError::InsufficientData { needed: 1, got: 0 });
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let (sxy, sxx) = y
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (i, v)| {
            let dx = i as f64 - x_mean;
            (sxy + dx * (v - y_mean), sxx + dx * dx)
        });

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let residual_std = if n > 2 {
        let sse = y
            .iter()
            .enumerate()
            .map(|(i, v)| (v - (intercept + slope * i as f64)).powi(2))
            .sum::<f64>();
        (sse / (n - 2) as f64).sqrt()
    } else {
        0.0
    };

    Ok(LinearFit { slope, intercept, residual_std })
}

/// Two-sided standard normal quantile for the given confidence level, e.g. 1.96 for 0.95
///
/// # Arguments
///
/// * 'confidence' - confidence level, strictly between 0 and 1
pub fn z_score(confidence: f64) -> Result<f64, ConfigError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ConfigError::invalid("confidence_level", confidence));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ConfigError::invalid("confidence_level", format!("{} ({})", confidence, e)))?;

    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// Linear trend over a trailing window, projected forward with a constant width band.
///
/// The band is `predicted ± z * residual_std` and doesn't widen with lead time, which
/// understates uncertainty towards the end of the horizon. Values are never clamped, a
/// negative lower bound is passed on as is.
#[derive(Debug, Clone)]
pub struct LinearTrendForecaster {
    window: usize,
    horizon: usize,
    confidence: f64,
    z: f64,
}

impl LinearTrendForecaster {
    /// Returns a forecaster with validated parameters
    ///
    /// # Arguments
    ///
    /// * 'window' - trailing number of hours to fit, at least 1
    /// * 'horizon' - number of future hours to predict, at least 1
    /// * 'confidence' - confidence level of the band, in (0, 1)
    pub fn new(window: usize, horizon: usize, confidence: f64) -> Result<LinearTrendForecaster, ConfigError> {
        if window == 0 {
            return Err(ConfigError::invalid("forecast_window_hours", window));
        }
        if horizon == 0 {
            return Err(ConfigError::invalid("forecast_horizon_hours", horizon));
        }
        let z = z_score(confidence)?;

        Ok(LinearTrendForecaster { window, horizon, confidence, z })
    }
}

impl Forecaster for LinearTrendForecaster {
    fn forecast(&self, series: &NormalizedSeries) -> Result<ForecastResult, PipelineError> {
        let last_hour = match series.last_hour() {
            Some(h) if series.len() >= self.window => h,
            _ => return Err(PipelineError::InsufficientData { needed: self.window, got: series.len() }),
        };

        let fit = fit_linear_trend(&series.trailing_wave_heights(self.window))?;
        let margin = self.z * fit.residual_std;
        debug!("linear trend over {} hours: slope {:.4}/h, residual std {:.4}", self.window, fit.slope, fit.residual_std);

        let mut result = ForecastResult {
            model: self.name().to_string(),
            confidence_level: self.confidence,
            forecast_hours: Vec::with_capacity(self.horizon),
            predicted: Vec::with_capacity(self.horizon),
            lower_bound: Vec::with_capacity(self.horizon),
            upper_bound: Vec::with_capacity(self.horizon),
            slope_per_hour: fit.slope,
            intercept: fit.intercept,
            residual_std: fit.residual_std,
        };

        for step in 1..=self.horizon {
            let predicted = fit.at((self.window - 1 + step) as f64);
            result.forecast_hours.push(last_hour + TimeDelta::hours(step as i64));
            result.predicted.push(predicted);
            result.lower_bound.push(predicted - margin);
            result.upper_bound.push(predicted + margin);
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "linear_trend"
    }
}
