use std::collections::BTreeMap;
use chrono::{NaiveDate, Timelike};
use crate::models::series::{HourlySample, NormalizedSeries};
use crate::models::summary::{DailySummary, HazardSummary, HourlyProfile};

/// Groups samples per calendar day in the series' reference zone, ascending
fn by_day(series: &NormalizedSeries) -> BTreeMap<NaiveDate, Vec<&HourlySample>> {
    let mut days: BTreeMap<NaiveDate, Vec<&HourlySample>> = BTreeMap::new();
    for s in series.samples() {
        days.entry(s.day()).or_default().push(s);
    }

    days
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count > 0 { Some(sum / count as f64) } else { None }
}

/// Computes daily descriptive statistics, one row per day with at least one sample,
/// latest day first.
///
/// Interpolated samples take part in the averages just like observed ones.
///
/// # Arguments
///
/// * 'series' - the normalized series
pub fn summarize(series: &NormalizedSeries) -> Vec<DailySummary> {
    by_day(series)
        .into_iter()
        .rev()
        .map(|(day, samples)| {
            let n = samples.len() as f64;
            DailySummary {
                day,
                avg_wave_height: samples.iter().map(|s| s.wave_height).sum::<f64>() / n,
                max_wave_height: samples.iter().map(|s| s.wave_height).fold(f64::MIN, f64::max),
                avg_wind_speed: samples.iter().map(|s| s.wind_speed).sum::<f64>() / n,
                avg_swell_height: samples.iter().map(|s| s.swell_height).sum::<f64>() / n,
                sample_count: samples.len(),
            }
        })
        .collect()
}

/// Collects, per day, the samples whose wave height is strictly above the threshold.
///
/// Days without a single dangerous sample are left out rather than reported as zero rows,
/// so "no danger observed" can be told apart from "no data". Latest day first.
///
/// # Arguments
///
/// * 'series' - the normalized series
/// * 'threshold' - wave height in meters above which a sample counts as dangerous
pub fn detect_hazard(series: &NormalizedSeries, threshold: f64) -> Vec<HazardSummary> {
    by_day(series)
        .into_iter()
        .rev()
        .filter_map(|(day, samples)| {
            let dangerous = samples
                .iter()
                .map(|s| s.wave_height)
                .filter(|w| *w > threshold)
                .collect::<Vec<f64>>();

            if dangerous.is_empty() {
                return None;
            }

            Some(HazardSummary {
                day,
                dangerous_count: dangerous.len(),
                min_danger: dangerous.iter().copied().reduce(f64::min),
                max_danger: dangerous.iter().copied().reduce(f64::max),
                avg_danger: mean(dangerous.iter().copied()),
            })
        })
        .collect()
}

/// Average wave height per hour of the day for one selected day, ordered by hour.
/// Hours the series doesn't cover on that day are left out.
///
/// # Arguments
///
/// * 'series' - the normalized series
/// * 'day' - the day to build the profile for
pub fn hourly_profile(series: &NormalizedSeries, day: NaiveDate) -> Vec<HourlyProfile> {
    let mut hours: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for s in series.samples().iter().filter(|s| s.day() == day) {
        hours.entry(s.hour.hour()).or_default().push(s.wave_height);
    }

    hours
        .into_iter()
        .filter_map(|(hour_of_day, waves)| {
            let sample_count = waves.len();
            mean(waves.into_iter()).map(|avg_wave_height| HourlyProfile { hour_of_day, avg_wave_height, sample_count })
        })
        .collect()
}

/// First and last calendar day covered by the series
pub fn date_range(series: &NormalizedSeries) -> Option<(NaiveDate, NaiveDate)> {
    match (series.samples().first(), series.samples().last()) {
        (Some(first), Some(last)) => Some((first.day(), last.day())),
        _ => None,
    }
}
