use approx::assert_abs_diff_eq;
use chrono::{DateTime, DurationRound, FixedOffset, TimeDelta, TimeZone};
use marinegrid::config::PipelineParameters;
use marinegrid::models::series::NormalizedSeries;
use marinegrid::normalizer::normalize;
use marinegrid::{Observation, Pipeline, PipelineError};

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn base() -> DateTime<FixedOffset> {
    utc().with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
}

/// Deterministic, irregular batch: readings every 20-170 minutes, some shuffled, some
/// sharing an hour, wave heights swinging between roughly 1 and 9 meters.
fn irregular_batch(n: usize) -> Vec<Observation> {
    let mut minutes: i64 = 7;
    let mut batch = Vec::with_capacity(n);
    for i in 0..n {
        minutes += 20 + ((i * 37) % 151) as i64;
        let wave = 5.0 + 4.0 * ((i as f64) * 0.45).sin();
        batch.push(Observation::new(
            base() + TimeDelta::minutes(minutes),
            wave,
            8.0 + ((i as f64) * 0.2).cos(),
            wave * 0.6,
            if i % 3 == 0 { None } else { Some(14.0 + (i % 5) as f64 * 0.1) },
        ));
    }
    batch.reverse();
    batch.swap(0, n / 2);
    batch
}

fn assert_regular(series: &NormalizedSeries) {
    for pair in series.samples().windows(2) {
        assert_eq!(pair[1].hour - pair[0].hour, TimeDelta::hours(1));
    }
}

#[test]
fn normalized_series_is_gap_free_and_spans_observations() {
    let batch = irregular_batch(60);
    let series = normalize(&batch, utc()).unwrap();

    assert_regular(&series);

    let first = batch.iter().map(|o| o.timestamp).min().unwrap().duration_trunc(TimeDelta::hours(1)).unwrap();
    let last = batch.iter().map(|o| o.timestamp).max().unwrap().duration_trunc(TimeDelta::hours(1)).unwrap();
    assert_eq!(series.first_hour(), Some(first));
    assert_eq!(series.last_hour(), Some(last));
    assert_eq!(series.len() as i64, (last - first).num_hours() + 1);
}

#[test]
fn interpolation_flags_match_observed_hours() {
    let batch = irregular_batch(60);
    let series = normalize(&batch, utc()).unwrap();

    for sample in series.samples() {
        let observed = batch.iter().any(|o| {
            let delta = o.timestamp - sample.hour;
            delta >= TimeDelta::zero() && delta < TimeDelta::hours(1)
        });
        assert_eq!(sample.is_interpolated, !observed, "hour {}", sample.hour);
    }
}

#[test]
fn renormalizing_gives_the_same_series() {
    // every reading carries water temperature, so no filled temperature comes back as a reading
    let batch = irregular_batch(40)
        .into_iter()
        .map(|o| Observation::new(o.timestamp, o.wave_height, o.wind_speed, o.swell_height, o.water_temp.or(Some(14.2))))
        .collect::<Vec<_>>();
    let series = normalize(&batch, utc()).unwrap();
    let again = normalize(&series.to_observations(), utc()).unwrap();

    assert!(series.samples().iter().any(|s| s.is_interpolated));
    assert_eq!(series.samples(), again.samples());
}

#[test]
fn renormalizing_keeps_values_when_water_temp_is_sparse() {
    let series = normalize(&irregular_batch(40), utc()).unwrap();
    let again = normalize(&series.to_observations(), utc()).unwrap();

    assert_eq!(series.len(), again.len());
    for (a, b) in series.samples().iter().zip(again.samples()) {
        assert_eq!(a.hour, b.hour);
        assert_eq!(a.is_interpolated, b.is_interpolated);
        assert_eq!(a.wave_height, b.wave_height);
        assert_eq!(a.wind_speed, b.wind_speed);
        assert_eq!(a.swell_height, b.swell_height);
        assert_abs_diff_eq!(a.water_temp.unwrap(), b.water_temp.unwrap(), epsilon = 1e-9);
    }
}

#[test]
fn two_readings_with_missing_hour_in_between() {
    let batch = [
        Observation::new(base(), 2.0, 5.0, 1.0, None),
        Observation::new(base() + TimeDelta::hours(2), 4.0, 5.0, 1.0, None),
    ];
    let series = normalize(&batch, utc()).unwrap();

    let middle = &series.samples()[1];
    assert_eq!(middle.hour, base() + TimeDelta::hours(1));
    assert_abs_diff_eq!(middle.wave_height, 3.0, epsilon = 1e-12);
    assert!(middle.is_interpolated);
}

#[test]
fn hazard_rows_are_ordered_and_above_threshold() {
    let pipeline = Pipeline::new(&PipelineParameters::default()).unwrap();
    let result = pipeline.run(&irregular_batch(120)).unwrap();

    assert!(!result.hazard.is_empty());
    for h in &result.hazard {
        let (min, max, avg) = (h.min_danger.unwrap(), h.max_danger.unwrap(), h.avg_danger.unwrap());
        assert!(h.dangerous_count > 0);
        assert!(min <= avg && avg <= max);
        assert!(min > result.hazard_threshold);
    }
    for pair in result.hazard.windows(2) {
        assert!(pair[0].day > pair[1].day);
    }
    for pair in result.daily.windows(2) {
        assert!(pair[0].day > pair[1].day);
    }
}

#[test]
fn threshold_scenario_from_one_day() {
    let hourly = [3.0, 5.0, 7.0, 8.0]
        .iter()
        .enumerate()
        .map(|(i, w)| Observation::new(base() + TimeDelta::hours(i as i64), *w, 5.0, 1.0, None))
        .collect::<Vec<_>>();
    let result = Pipeline::new(&PipelineParameters::default()).unwrap().run(&hourly).unwrap();

    assert_eq!(result.hazard.len(), 1);
    assert_eq!(result.hazard[0].dangerous_count, 2);
    assert_eq!(result.hazard[0].min_danger, Some(7.0));
    assert_eq!(result.hazard[0].max_danger, Some(8.0));
}

#[test]
fn constant_history_forecast() {
    let batch = (0..72)
        .map(|i| Observation::new(base() + TimeDelta::hours(i), 5.0, 6.0, 3.0, Some(15.0)))
        .collect::<Vec<_>>();
    let result = Pipeline::new(&PipelineParameters::default()).unwrap().run(&batch).unwrap();
    let forecast = result.forecast.unwrap();

    assert_eq!(forecast.forecast_hours.len(), 24);
    assert_eq!(forecast.forecast_hours[0], base() + TimeDelta::hours(72));
    for i in 0..24 {
        assert_abs_diff_eq!(forecast.predicted[i], 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(forecast.upper_bound[i], forecast.lower_bound[i], epsilon = 1e-9);
    }
    assert_abs_diff_eq!(forecast.residual_std, 0.0, epsilon = 1e-9);
}

#[test]
fn forecast_band_brackets_prediction() {
    let result = Pipeline::new(&PipelineParameters::default()).unwrap().run(&irregular_batch(120)).unwrap();
    let forecast = result.forecast.unwrap();

    for i in 0..forecast.horizon() {
        assert!(forecast.lower_bound[i] <= forecast.predicted[i]);
        assert!(forecast.predicted[i] <= forecast.upper_bound[i]);
    }
}

#[test]
fn short_history_keeps_aggregates_without_forecast() {
    let batch = (0..30)
        .map(|i| Observation::new(base() + TimeDelta::hours(i), 6.5, 6.0, 3.0, None))
        .collect::<Vec<_>>();
    let result = Pipeline::new(&PipelineParameters::default()).unwrap().run(&batch).unwrap();

    assert!(result.forecast.is_none());
    assert_eq!(result.daily.len(), 2);
    assert_eq!(result.hazard.len(), 2);
}

#[test]
fn window_and_horizon_follow_configuration() {
    let mut params = PipelineParameters::default();
    params.forecast_window_hours = 12;
    params.forecast_horizon_hours = 6;
    params.confidence_level = 0.8;
    let batch = (0..30)
        .map(|i| Observation::new(base() + TimeDelta::hours(i), 1.0 + 0.05 * i as f64, 6.0, 3.0, None))
        .collect::<Vec<_>>();
    let result = Pipeline::new(&params).unwrap().run(&batch).unwrap();
    let forecast = result.forecast.unwrap();

    assert_eq!(forecast.horizon(), 6);
    assert_eq!(forecast.confidence_level, 0.8);
    assert_abs_diff_eq!(forecast.predicted[0], 1.0 + 0.05 * 30.0, epsilon = 1e-9);
}

#[test]
fn pipelines_can_run_on_separate_threads() {
    let pipeline = std::sync::Arc::new(Pipeline::new(&PipelineParameters::default()).unwrap());
    let handles = (0..4)
        .map(|n| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || pipeline.run(&irregular_batch(50 + n * 10)).map(|r| r.series.len()))
        })
        .collect::<Vec<_>>();

    for h in handles {
        let len: Result<usize, PipelineError> = h.join().unwrap();
        assert!(len.unwrap() > 0);
    }
}
