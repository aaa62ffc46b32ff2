//! User settings, read from an optional JSON file.
//!
//! ```json
//! {
//!   "wavelength_min": 1480.0,
//!   "wavelength_max": 1515.0,
//!   "frequency_min": 0.0,
//!   "frequency_max": 20.0,
//!   "fit": { "grid_size": 100, "max_iterations": 200 }
//! }
//! ```
//!
//! Missing fields take their default value.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::analysis::fit::FitOptions;
use crate::data::model::Window;
use crate::error::{AnalysisError, AnalysisResult};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "spectral-analysis.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lowest wavelength (nm) a window bound may take.
    pub wavelength_min: f64,
    /// Highest wavelength (nm) a window bound may take.
    pub wavelength_max: f64,
    /// Lowest `E` the fit search range may start at.
    pub frequency_min: f64,
    /// Highest `E` the fit search range may end at.
    pub frequency_max: f64,
    pub fit: FitOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wavelength_min: 1480.0,
            wavelength_max: 1515.0,
            frequency_min: 0.0,
            frequency_max: 20.0,
            fit: FitOptions::default(),
        }
    }
}

impl Settings {
    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// absent or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("{} not found, using default settings", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if !(self.wavelength_min < self.wavelength_max) {
            bail!(
                "wavelength_min ({}) must be below wavelength_max ({})",
                self.wavelength_min,
                self.wavelength_max
            );
        }
        if !(self.frequency_min < self.frequency_max) {
            bail!(
                "frequency_min ({}) must be below frequency_max ({})",
                self.frequency_min,
                self.frequency_max
            );
        }
        if self.fit.grid_size == 0 {
            bail!("fit.grid_size must be at least 1");
        }
        Ok(())
    }

    /// Reject a window reaching outside the configured wavelength range.
    pub fn check_window(&self, window: &Window) -> AnalysisResult<()> {
        if window.start() < self.wavelength_min || window.end() > self.wavelength_max {
            return Err(AnalysisError::invalid(format!(
                "Parameters out of bounds! Window {window} must lie within {} nm to {} nm",
                self.wavelength_min, self.wavelength_max
            )));
        }
        Ok(())
    }

    /// Reject a fit search range reaching outside the configured `E` range.
    pub fn check_search_range(&self, start: f64, end: f64) -> AnalysisResult<()> {
        if start < self.frequency_min || end > self.frequency_max {
            return Err(AnalysisError::invalid(format!(
                "Parameters out of bounds! Search range must lie within {} to {}",
                self.frequency_min, self.frequency_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "wavelength_max": 1600.0, "fit": { "grid_size": 50 } }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.wavelength_min, 1480.0);
        assert_eq!(settings.wavelength_max, 1600.0);
        assert_eq!(settings.fit.grid_size, 50);
        assert_eq!(settings.fit.max_iterations, FitOptions::default().max_iterations);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings {
            frequency_max: 5.0,
            ..Default::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "wavelength_min": 1600.0 }"#).unwrap();

        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        assert_eq!(
            Settings::load_or_default(&dir.path().join("missing.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_window_knobs() {
        let settings = Settings::default();
        assert!(settings.check_window(&Window::new(1490.0, 1500.0).unwrap()).is_ok());
        assert!(settings.check_window(&Window::new(1470.0, 1500.0).unwrap()).is_err());
        assert!(settings.check_window(&Window::new(1490.0, 1520.0).unwrap()).is_err());
        assert!(settings.check_search_range(0.0, 20.0).is_ok());
        assert!(settings.check_search_range(-1.0, 2.0).is_err());
    }
}
