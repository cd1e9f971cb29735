use chrono::NaiveDate;
use serde::Serialize;

/// Daily descriptive statistics over the normalized series
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DailySummary {
    pub day: NaiveDate,
    pub avg_wave_height: f64,
    pub max_wave_height: f64,
    pub avg_wind_speed: f64,
    pub avg_swell_height: f64,
    pub sample_count: usize,
}

/// Samples above the hazard threshold for one day
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HazardSummary {
    pub day: NaiveDate,
    pub dangerous_count: usize,
    pub min_danger: Option<f64>,
    pub max_danger: Option<f64>,
    pub avg_danger: Option<f64>,
}

/// Average wave height for one hour of the day
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HourlyProfile {
    pub hour_of_day: u32,
    pub avg_wave_height: f64,
    pub sample_count: usize,
}
