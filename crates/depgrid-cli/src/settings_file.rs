//! Settings file utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use depgrid_table::EngineSettings;

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("depgrid"))
}

pub fn settings_file() -> Result<PathBuf> {
    config_dir().map(|p| p.join("settings.json"))
}

/// Load engine settings
///
/// An explicit path must exist. Without one the file in the config directory
/// is used when present, and the defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<EngineSettings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match settings_file() {
            Ok(path) if path.exists() => path,
            Ok(_) => return Ok(EngineSettings::default()),
            Err(e) => {
                tracing::debug!("No settings file: {:#}", e);
                return Ok(EngineSettings::default());
            }
        },
    };

    read(&path)
}

/// Read and validate a settings file
pub fn read(path: &Path) -> Result<EngineSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {:?}", path))?;
    let settings: EngineSettings = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {:?}", path))?;

    tracing::debug!(path = %path.display(), "Loaded engine settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgrid_core::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_partial_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r##"{"id_column": "depmap_id", "palette": ["#000000", "#ffffff"]}"##,
        )
        .unwrap();

        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.id_column.as_deref(), Some("depmap_id"));
        assert_eq!(
            settings.palette,
            vec![Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)]
        );
        assert_eq!(settings.histogram_bins, EngineSettings::default().histogram_bins);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"categorical_threshold": 1.5}"#).unwrap();

        let err = read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("categorical_threshold"));
    }

    #[test]
    fn test_oversized_histogram_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"histogram_bins": 1000000000000000000}"#).unwrap();

        let err = read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("histogram_bins"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.json"))).is_err());
    }
}
