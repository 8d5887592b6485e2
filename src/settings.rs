//! Application settings.
//!
//! Stored as YAML in the user's config directory
//! (`~/.config/wavgraph/config.yaml` on Linux). A missing file is created
//! with defaults on first run; a file that fails to parse is ignored with a
//! warning and defaults are used instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{DEFAULT_SPAN, Margins};
use crate::processing::DecimationMode;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub view: ViewSettings,
    pub interaction: InteractionSettings,
    pub render: RenderSettings,
    pub colors: ColorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { width: 1200, height: 800 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Samples shown right after a file is opened
    pub default_span: f64,
    /// Space around the draw box inside the graph widget
    pub margins: Margins,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_span: DEFAULT_SPAN,
            margins: Margins::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Zoom multiplier per wheel notch (> 1)
    pub wheel_zoom_step: f64,
    /// Keyboard zoom in / out multipliers
    pub key_zoom_in: f64,
    pub key_zoom_out: f64,
    /// Amplitude gain multiplier per key press (> 1)
    pub amplitude_step: f64,
    pub amplitude_min: f64,
    pub amplitude_max: f64,
    /// Fraction of the window width moved by one pan step
    pub pan_fraction: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            wheel_zoom_step: 1.1,
            key_zoom_in: 1.101,
            key_zoom_out: 0.899,
            amplitude_step: 1.1,
            amplitude_min: 0.1,
            amplitude_max: 50.0,
            pan_fraction: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub decimation: DecimationMode,
    pub show_grid: bool,
    /// Roughly how many labelled ticks to place on the time axis
    pub tick_target: usize,
    pub marker_radius: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            decimation: DecimationMode::Extremum,
            show_grid: true,
            tick_target: 8,
            marker_radius: 4.0,
        }
    }
}

/// Colors as 0xRRGGBB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub background: u32,
    pub frame: u32,
    pub grid: u32,
    pub signal: u32,
    pub curve: u32,
    pub marker: u32,
    pub text: u32,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: 0x1e1e2e,
            frame: 0x585b70,
            grid: 0x45475a,
            signal: 0x89b4fa,
            curve: 0xa6e3a1,
            marker: 0xf38ba8,
            text: 0xa6adc8,
        }
    }
}

impl Settings {
    const DIR_NAME: &'static str = "wavgraph";
    const FILE_NAME: &'static str = "config.yaml";

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::DIR_NAME)
            .join(Self::FILE_NAME)
    }

    /// Read settings from `path`, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        log::info!("load settings: {:?}", path);

        if !path.exists() {
            log::info!("load settings: file doesn't exist, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Settings>(&contents) {
                Ok(settings) => settings.sanitized(),
                Err(e) => {
                    log::warn!("load settings: failed to parse: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("load settings: failed to read: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Like [`Settings::load`], but writes the defaults out when no file exists yet.
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            return Self::load(path);
        }
        let settings = Self::default();
        if let Err(e) = settings.save(path) {
            log::warn!("could not write default settings: {:#}", e);
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let yaml = serde_yaml::to_string(self).context("Failed to serialize settings to YAML")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;
        log::info!("settings saved to {:?}", path);
        Ok(())
    }

    /// Replace values that would break the view model with their defaults.
    fn sanitized(mut self) -> Self {
        let d = InteractionSettings::default();
        let i = &mut self.interaction;
        if !(i.wheel_zoom_step.is_finite() && i.wheel_zoom_step > 1.0) {
            i.wheel_zoom_step = d.wheel_zoom_step;
        }
        if !(i.key_zoom_in.is_finite() && i.key_zoom_in > 0.0) {
            i.key_zoom_in = d.key_zoom_in;
        }
        if !(i.key_zoom_out.is_finite() && i.key_zoom_out > 0.0) {
            i.key_zoom_out = d.key_zoom_out;
        }
        if !(i.amplitude_step.is_finite() && i.amplitude_step > 1.0) {
            i.amplitude_step = d.amplitude_step;
        }
        if !(i.amplitude_min > 0.0 && i.amplitude_max >= i.amplitude_min && i.amplitude_max.is_finite()) {
            i.amplitude_min = d.amplitude_min;
            i.amplitude_max = d.amplitude_max;
        }
        if !(i.pan_fraction.is_finite() && i.pan_fraction > 0.0) {
            i.pan_fraction = d.pan_fraction;
        }
        if !(self.view.default_span.is_finite() && self.view.default_span >= 2.0) {
            self.view.default_span = DEFAULT_SPAN;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.view.default_span, 1200.0);
        assert_eq!(s.window.width, 1200);
        assert_eq!(s.render.decimation, DecimationMode::Extremum);
        assert_eq!(s.interaction.key_zoom_in, 1.101);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut s = Settings::default();
        s.view.default_span = 4096.0;
        s.render.decimation = DecimationMode::Nearest;
        s.save(&path).unwrap();

        assert_eq!(Settings::load(&path), s);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "view:\n  default_span: 600\nrender:\n  decimation: nearest\n").unwrap();

        let s = Settings::load(&path);
        assert_eq!(s.view.default_span, 600.0);
        assert_eq!(s.render.decimation, DecimationMode::Nearest);
        assert_eq!(s.interaction, InteractionSettings::default());
    }

    #[test]
    fn test_bad_values_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "interaction:\n  wheel_zoom_step: 0.5\n  pan_fraction: -1\nview:\n  default_span: 0\n").unwrap();

        let s = Settings::load(&path);
        assert_eq!(s.interaction.wheel_zoom_step, 1.1);
        assert_eq!(s.interaction.pan_fraction, 0.1);
        assert_eq!(s.view.default_span, DEFAULT_SPAN);
    }

    #[test]
    fn test_garbage_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "{{{ not yaml").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavgraph").join("config.yaml");
        let s = Settings::load_or_create(&path);
        assert_eq!(s, Settings::default());
        assert!(path.exists());
    }
}
