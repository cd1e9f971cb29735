use std::collections::BTreeMap;
use chrono::{DateTime, DurationRound, FixedOffset, TimeDelta};
use log::debug;
use crate::errors::PipelineError;
use crate::models::observation::Observation;
use crate::models::series::{HourlySample, NormalizedSeries};
use crate::models::zone::ReferenceZone;

/// Running sums for all observations that fall within the same hour
#[derive(Default)]
struct HourBucket {
    count: usize,
    wave_height: f64,
    wind_speed: f64,
    swell_height: f64,
    temp_count: usize,
    water_temp: f64,
}

impl HourBucket {
    fn add(&mut self, obs: &Observation) {
        self.count += 1;
        self.wave_height += obs.wave_height;
        self.wind_speed += obs.wind_speed;
        self.swell_height += obs.swell_height;
        if let Some(t) = obs.water_temp {
            self.temp_count += 1;
            self.water_temp += t;
        }
    }

    fn mean(&self, sum: f64) -> f64 {
        sum / self.count as f64
    }

    fn water_temp(&self) -> Option<f64> {
        if self.temp_count > 0 { Some(self.water_temp / self.temp_count as f64) } else { None }
    }
}

/// Converts a batch of observations into a strictly regular hourly series.
///
/// Every observation is moved to the reference zone and truncated to its hour. When several
/// observations share an hour the mean of each field is used, so the result doesn't depend on
/// the order the observations arrived in.
///
/// Hours between the first and last observed hour that have no observation are filled by
/// linear interpolation between the nearest known hours, field by field, and flagged as
/// interpolated. A field that has no value at the start or end of the series (only possible
/// for water temperature) holds the nearest known value instead of being extrapolated.
///
/// Hours are stepped in absolute time, so on a daylight saving change the local day has 23 or
/// 25 samples while adjacent samples stay one hour apart.
///
/// # Arguments
///
/// * 'observations' - observations in any order, possibly with duplicate timestamps
/// * 'zone' - the deployment's reference zone, decides which hour and day a reading belongs to
pub fn normalize(observations: &[Observation], zone: impl Into<ReferenceZone>) -> Result<NormalizedSeries, PipelineError> {
    let zone = zone.into();
    if observations.is_empty() {
        return Err(PipelineError::InsufficientData { needed: 1, got: 0 });
    }

    let mut buckets: BTreeMap<DateTime<FixedOffset>, HourBucket> = BTreeMap::new();
    for (i, obs) in observations.iter().enumerate() {
        let hour = zone
            .localize(&obs.timestamp)
            .duration_trunc(TimeDelta::hours(1))
            .map_err(|e| PipelineError::invalid(i, "timestamp", format!("{} ({})", obs.timestamp, e)))?;

        buckets.entry(zone.localize(&hour)).or_default().add(obs);
    }

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(PipelineError::InsufficientData { needed: 1, got: 0 }),
    };

    let span = (last - first).num_hours() as usize;
    let hours = (0..=span)
        .map(|h| zone.localize(&(first + TimeDelta::hours(h as i64))))
        .collect::<Vec<DateTime<FixedOffset>>>();

    let observed = hours.iter().map(|h| buckets.get(h)).collect::<Vec<Option<&HourBucket>>>();

    let wave_height = fill_gaps(&column(&observed, |b| Some(b.mean(b.wave_height))));
    let wind_speed = fill_gaps(&column(&observed, |b| Some(b.mean(b.wind_speed))));
    let swell_height = fill_gaps(&column(&observed, |b| Some(b.mean(b.swell_height))));
    let water_temp = fill_gaps(&column(&observed, |b| b.water_temp()));

    let samples = hours
        .iter()
        .enumerate()
        .map(|(i, hour)| HourlySample {
            hour: *hour,
            wave_height: wave_height[i].unwrap_or_default(),
            wind_speed: wind_speed[i].unwrap_or_default(),
            swell_height: swell_height[i].unwrap_or_default(),
            water_temp: water_temp[i],
            is_interpolated: observed[i].is_none(),
        })
        .collect::<Vec<HourlySample>>();

    debug!("normalized {} observations into {} hourly samples ({} filled)",
        observations.len(), samples.len(), samples.len() - buckets.len());

    Ok(NormalizedSeries::new(samples))
}

fn column<F>(observed: &[Option<&HourBucket>], value: F) -> Vec<Option<f64>>
where
    F: Fn(&HourBucket) -> Option<f64>,
{
    observed.iter().map(|b| b.and_then(|bucket| value(bucket))).collect()
}

/// Fills missing values by linear interpolation between the nearest known neighbours and
/// holds the first/last known value at the edges. A column without any known value is
/// returned as is.
///
/// # Arguments
///
/// * 'values' - one entry per hour, None where nothing is known
fn fill_gaps(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let known = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect::<Vec<(usize, f64)>>();

    if known.is_empty() {
        return values.to_vec();
    }

    let mut filled: Vec<Option<f64>> = Vec::with_capacity(values.len());
    let mut next: usize = 0;
    for i in 0..values.len() {
        while next < known.len() && known[next].0 < i {
            next += 1;
        }

        let value = if next < known.len() && known[next].0 == i {
            known[next].1
        } else if next == 0 {
            known[0].1
        } else if next == known.len() {
            known[known.len() - 1].1
        } else {
            let (i0, v0) = known[next - 1];
            let (i1, v1) = known[next];
            v0 + (v1 - v0) * (i - i0) as f64 / (i1 - i0) as f64
        };
        filled.push(Some(value));
    }

    filled
}
