//! The persisted, live-tunable configuration: one Display group and one
//! Control group, stored as pretty-printed JSON. A missing or corrupt file is
//! never fatal; the built-in defaults apply and a warning is logged.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub global_scale: f32,
    pub image_scale: f32,
    pub grid_spacing: f32,
    pub mouse_scale_radius: f32,
    pub mouse_scale_multiplier: f32,
    pub max_zoom_scale: f32,
    pub min_zoom_scale: f32,
    pub noise_speed: f32,
    pub noise_scale: f32,
    pub noise_scale_offset: f32,
    pub refined_to_bin_speed: f32,
    pub header_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            global_scale: 1.0,
            image_scale: 0.75,
            grid_spacing: 200.0,
            mouse_scale_radius: 100.0,
            mouse_scale_multiplier: 2.0,
            max_zoom_scale: 0.8,
            min_zoom_scale: 0.2,
            noise_speed: 0.004,
            noise_scale: 1.0,
            noise_scale_offset: 15.0,
            refined_to_bin_speed: 3.0,
            header_text: "Cold Harbor".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub arrow_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            arrow_sensitivity: 25.0,
            zoom_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub control: ControlSettings,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_settings(path: &Path) -> Result<Settings, StoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads settings, falling back to the defaults when the file is missing or
/// unreadable. Startup never aborts over configuration.
pub fn load_or_default(path: &Path) -> Settings {
    match load_settings(path) {
        Ok(settings) => {
            log::info!("loaded settings from {}", path.display());
            settings
        }
        Err(err) => {
            log::warn!(
                "settings file {} unusable ({err}), using defaults",
                path.display()
            );
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("serializing settings")?;
    fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
    log::info!("settings saved to {}", path.display());
    Ok(())
}
