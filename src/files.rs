use std::fs;
use std::path::Path;
use crate::errors::FileError;
use crate::models::observation::RawObservation;
use crate::pipeline::PipelineResult;

/// Loads raw observations from a JSON file holding an array of records
///
/// # Arguments
///
/// * 'file_path' - path to the observations file
pub fn load_observations(file_path: &str) -> Result<Vec<RawObservation>, FileError> {
    if !Path::new(file_path).exists() {
        return Err(FileError::Io(format!("observations file not found: {}", file_path)));
    }

    let json = fs::read_to_string(file_path)?;
    let observations: Vec<RawObservation> = serde_json::from_str(&json)?;

    Ok(observations)
}

/// Saves a pipeline result as pretty printed JSON
///
/// # Arguments
///
/// * 'file_path' - path to write the result to, any existing file is replaced
/// * 'result' - the result to save
pub fn save_result(file_path: &str, result: &PipelineResult) -> Result<(), FileError> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(file_path, json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineParameters;
    use crate::pipeline::Pipeline;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("marinegrid_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn observations_are_loaded_and_result_is_saved() {
        let obs_path = temp_path("observations.json");
        let out_path = temp_path("result.json");
        fs::write(&obs_path, r#"[
            {"TIMESTAMP": "2025-01-10T00:10:00+00:00", "WAVE_HEIGHT": 2.0, "WIND_SPEED": 4.0, "SWELL_HEIGHT": 1.0},
            {"timestamp": "2025-01-10T02:00:00Z", "wave_height": 4.0, "wind_speed": 6.0, "swell_height": 2.0, "water_temp": 15.5}
        ]"#).unwrap();

        let raw = load_observations(&obs_path).unwrap();
        assert_eq!(raw.len(), 2);

        let result = Pipeline::new(&PipelineParameters::default()).unwrap().run_raw(&raw).unwrap();
        save_result(&out_path, &result).unwrap();

        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(saved["series"]["samples"].as_array().unwrap().len(), 3);
        assert_eq!(saved["series"]["samples"][1]["wave_height"], 3.0);
        assert_eq!(saved["series"]["samples"][1]["is_interpolated"], true);
        assert!(saved["forecast"].is_null());

        let _ = fs::remove_file(obs_path);
        let _ = fs::remove_file(out_path);
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(load_observations(&temp_path("nope.json")), Err(FileError::Io(_))));
    }

    #[test]
    fn malformed_document_is_reported() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_observations(&path), Err(FileError::Document(_))));
        let _ = fs::remove_file(path);
    }
}
