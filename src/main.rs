use std::env;
use anyhow::{Context, Result};
use log::info;
use marinegrid::config::load_config;
use marinegrid::files::{load_observations, save_result};
use marinegrid::logging::setup_logger;
use marinegrid::pipeline::Pipeline;

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or("config.toml".to_string());

    let config = load_config(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;
    setup_logger(&config.general)?;

    info!("marinegrid version: {}", env!("CARGO_PKG_VERSION"));
    info!("location: {} ({:0.4}, {:0.4})", config.location.name, config.location.lat, config.location.long);

    let pipeline = Pipeline::new(&config.pipeline)?;
    let raw = load_observations(&config.files.observations_file)?;
    let result = pipeline.run_raw(&raw)?;

    for day in &result.daily {
        info!("{}: avg wave {:0.2} m, max wave {:0.2} m, avg wind {:0.2} m/s, avg swell {:0.2} m",
            day.day, day.avg_wave_height, day.max_wave_height, day.avg_wind_speed, day.avg_swell_height);
    }
    for day in &result.hazard {
        info!("{}: {} hours above {:0.1} m", day.day, day.dangerous_count, result.hazard_threshold);
    }

    save_result(&config.files.output_file, &result)?;
    info!("result saved to {}", config.files.output_file);

    Ok(())
}
