use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::color::{parse_hex, BUILTIN_COLORS};
use crate::scene::{SceneMetrics, SceneSettings, DEFAULT_CAPTION, DEFAULT_LABEL};

/// Longest accepted tick period, one minute.
pub const MAX_TICK_MS: u64 = 60_000;
/// Upper bound on wave samples per frame.
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick period must be between 1 and {max}ms, got {0}", max = MAX_TICK_MS)]
    InvalidTick(u64),
    #[error("step must be a finite number of degrees, got {0}")]
    InvalidStep(f32),
    #[error("initial angle must be a finite number of degrees, got {0}")]
    InvalidAngle(f32),
    #[error("wave samples must be at most {max}, got {0}", max = MAX_SAMPLES)]
    TooManySamples(usize),
    #[error("scene scale must be a positive number, got {0}")]
    InvalidScale(f32),
    #[error("phase step must be finite, got {0}")]
    InvalidPhaseStep(f32),
    #[error("color '{name}' has malformed hex value '{value}'")]
    InvalidHex { name: String, value: String },
    #[error("{role} refers to unknown color '{name}'")]
    UnknownColor { role: String, name: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between ticks
    pub tick_ms: u64,
    /// Degrees added per tick
    pub step_degrees: f32,
    pub initial_angle: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            step_degrees: 5.0,
            initial_angle: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub samples: usize,
    pub phase_step: f32,
    /// Multiplier for the fixed pixel metrics (margin, markers, label box...)
    pub scale: f32,
    pub label: String,
    pub wave_caption: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            phase_step: 0.15,
            scale: 0.25,
            label: DEFAULT_LABEL.to_string(),
            wave_caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub axis: String,
    pub label: String,
    pub circle: String,
    pub vector: String,
    pub marker: String,
    pub bold_text: bool,
    /// Palette of name -> "#RRGGBB"
    pub named: HashMap<String, String>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            axis: "white".to_string(),
            label: "white".to_string(),
            circle: "yellow".to_string(),
            vector: "accent".to_string(),
            marker: "white".to_string(),
            bold_text: true,
            named: BUILTIN_COLORS
                .iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string()))
                .collect(),
        }
    }
}

impl ColorConfig {
    /// Color reference assigned to a style role.
    pub fn role(&self, role: &str) -> Option<&str> {
        match role {
            "axis" => Some(self.axis.as_str()),
            "label" => Some(self.label.as_str()),
            "circle" => Some(self.circle.as_str()),
            "vector" => Some(self.vector.as_str()),
            "marker" => Some(self.marker.as_str()),
            _ => None,
        }
    }

    fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("axis", self.axis.as_str()),
            ("label", self.label.as_str()),
            ("circle", self.circle.as_str()),
            ("vector", self.vector.as_str()),
            ("marker", self.marker.as_str()),
        ]
    }

    fn resolves(&self, reference: &str) -> bool {
        self.named.contains_key(reference)
            || BUILTIN_COLORS.iter().any(|(name, _)| *name == reference)
            || parse_hex(reference).is_some()
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/phasor/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("phasor").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("{:#}. Using defaults.", e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# Phasor Configuration
# This file is auto-generated. Edit as needed.

[animation]
# Milliseconds between animation ticks
tick_ms = 100
# Degrees the vector turns per tick
step_degrees = 5.0
# Starting angle in degrees
initial_angle = 10.0

[scene]
# Number of samples in the wave trace
samples = 100
# Phase offset between wave samples (radians)
phase_step = 0.15
# Multiplier for fixed pixel sizes (margin, markers, label box, strokes).
# 1.0 suits full-resolution surfaces; the terminal surface is roughly 1/4.
scale = 0.25
# Caption inside the label box
label = "指数函数与旋转矢量"
# Caption laid along the wave
wave_caption = "贝塞尔曲线"

[colors]
# Each role takes a palette name or a literal "#RRGGBB"
axis = "white"
label = "white"
circle = "yellow"
vector = "accent"
marker = "white"
# Bold caption text
bold_text = true

[colors.named]
white = "#FFFFFF"
yellow = "#FFEB3B"
accent = "#FF4081"
"##
        .to_string()
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let tick_ms = self.animation.tick_ms;
        if tick_ms == 0 || tick_ms > MAX_TICK_MS {
            return Err(ConfigError::InvalidTick(tick_ms));
        }
        if !self.animation.step_degrees.is_finite() {
            return Err(ConfigError::InvalidStep(self.animation.step_degrees));
        }
        if !self.animation.initial_angle.is_finite() {
            return Err(ConfigError::InvalidAngle(self.animation.initial_angle));
        }
        if self.scene.samples > MAX_SAMPLES {
            return Err(ConfigError::TooManySamples(self.scene.samples));
        }
        if !(self.scene.scale.is_finite() && self.scene.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scene.scale));
        }
        if !self.scene.phase_step.is_finite() {
            return Err(ConfigError::InvalidPhaseStep(self.scene.phase_step));
        }
        for (name, value) in &self.colors.named {
            if parse_hex(value).is_none() {
                return Err(ConfigError::InvalidHex {
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }
        for (role, reference) in self.colors.roles() {
            if !self.colors.resolves(reference) {
                return Err(ConfigError::UnknownColor {
                    role: role.to_string(),
                    name: reference.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(ms) = args.tick_ms {
            self.animation.tick_ms = ms;
        }
        if let Some(step) = args.step {
            self.animation.step_degrees = step;
        }
        if let Some(samples) = args.samples {
            self.scene.samples = samples;
        }
        if let Some(scale) = args.scale {
            self.scene.scale = scale;
        }
    }

    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            initial_angle: self.animation.initial_angle,
            step_degrees: self.animation.step_degrees,
            period: Duration::from_millis(self.animation.tick_ms),
            samples: self.scene.samples,
            phase_step: self.scene.phase_step,
            metrics: SceneMetrics::default().scaled(self.scene.scale),
            label: self.scene.label.clone(),
            caption: self.scene.wave_caption.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.animation.tick_ms, defaults.animation.tick_ms);
        assert_eq!(parsed.animation.initial_angle, defaults.animation.initial_angle);
        assert_eq!(parsed.scene.samples, defaults.scene.samples);
        assert_eq!(parsed.scene.scale, defaults.scene.scale);
        assert_eq!(parsed.scene.label, defaults.scene.label);
        assert_eq!(parsed.colors.named, defaults.colors.named);
        assert_eq!(parsed.validate(), Ok(()));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[animation]\ntick_ms = 40\n").unwrap();
        assert_eq!(parsed.animation.tick_ms, 40);
        assert_eq!(parsed.animation.step_degrees, 5.0);
        assert_eq!(parsed.scene.phase_step, 0.15);
        assert_eq!(parsed.colors.circle, "yellow");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.animation.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTick(0)));

        let mut config = Config::default();
        config.animation.tick_ms = MAX_TICK_MS + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTick(MAX_TICK_MS + 1)));

        let mut config = Config::default();
        config.animation.step_degrees = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidStep(s)) if s.is_nan()));

        let mut config = Config::default();
        config.animation.step_degrees = f32::INFINITY;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStep(f32::INFINITY)));

        let mut config = Config::default();
        config.animation.initial_angle = f32::NEG_INFINITY;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAngle(f32::NEG_INFINITY)));

        let mut config = Config::default();
        config.scene.samples = usize::MAX;
        assert_eq!(config.validate(), Err(ConfigError::TooManySamples(usize::MAX)));

        let mut config = Config::default();
        config.scene.samples = MAX_SAMPLES;
        config.animation.step_degrees = -5.0;
        assert_eq!(config.validate(), Ok(()));

        let mut config = Config::default();
        config.scene.scale = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidScale(-1.0)));

        let mut config = Config::default();
        config.colors.vector = "mauve".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownColor {
                role: "vector".to_string(),
                name: "mauve".to_string()
            })
        );

        let mut config = Config::default();
        config.colors.named.insert("bad".to_string(), "#12".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHex { .. })));

        let mut config = Config::default();
        config.colors.marker = "#00AA00".to_string();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_nan_step_in_file_is_rejected() {
        let parsed: Config = toml::from_str("[animation]\nstep_degrees = nan\n").unwrap();
        assert!(matches!(parsed.validate(), Err(ConfigError::InvalidStep(_))));

        let parsed: Config = toml::from_str("[animation]\ninitial_angle = inf\n").unwrap();
        assert!(matches!(parsed.validate(), Err(ConfigError::InvalidAngle(_))));
    }

    #[test]
    fn test_scene_settings_scale_metrics() {
        let mut config = Config::default();
        config.scene.scale = 1.0;
        let settings = config.scene_settings();
        assert_eq!(settings.metrics, SceneMetrics::default());
        assert_eq!(settings.period, Duration::from_millis(100));
        assert_eq!(settings.initial_angle, 10.0);
    }
}
