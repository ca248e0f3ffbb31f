//! Configuration file management for voxtwin.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory.

use crate::render::{Palette, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Waveform display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Bars each waveform panel is partitioned into
    #[serde(default = "default_bar_count")]
    pub bar_count: usize,
    /// Animation frame rate in frames per second (1-60)
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Color of the "original" sample waveform, #RRGGBB
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Color of the "cloned" sample waveform, #RRGGBB
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
}

fn default_bar_count() -> usize {
    crate::render::BAR_COUNT
}

fn default_frame_rate() -> u32 {
    30
}

fn default_primary_color() -> String {
    "#2196F3".to_string()
}

fn default_secondary_color() -> String {
    "#9C27B0".to_string()
}

impl DisplayConfig {
    /// Resolves the configured hex colors into a render palette.
    ///
    /// # Errors
    /// - If either color string is not valid #RRGGBB
    pub fn palette(&self) -> anyhow::Result<Palette> {
        Ok(Palette {
            primary: Rgb::from_hex(&self.primary_color)?,
            secondary: Rgb::from_hex(&self.secondary_color)?,
        })
    }

    /// Frame duration derived from the configured frame rate.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.frame_rate.clamp(1, 60)))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_count: default_bar_count(),
            frame_rate: default_frame_rate(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
        }
    }
}

/// Startup positions of the voice customization sliders (0-100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_slider")]
    pub emotion: u8,
    #[serde(default = "default_slider")]
    pub pace: u8,
    #[serde(default = "default_slider")]
    pub pitch: u8,
}

fn default_slider() -> u8 {
    50
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            emotion: default_slider(),
            pace: default_slider(),
            pitch: default_slider(),
        }
    }
}

/// Similarity meter animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterConfig {
    /// Score the meter settles on (0-100). Presentational only.
    #[serde(default = "default_meter_target")]
    pub target: f32,
    /// Delay before the fill starts moving, in milliseconds
    #[serde(default = "default_meter_delay_ms")]
    pub delay_ms: u64,
    /// Time the fill takes to reach the target, in milliseconds
    #[serde(default = "default_meter_rise_ms")]
    pub rise_ms: u64,
}

fn default_meter_target() -> f32 {
    98.7
}

fn default_meter_delay_ms() -> u64 {
    500
}

fn default_meter_rise_ms() -> u64 {
    2000
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            target: default_meter_target(),
            delay_ms: default_meter_delay_ms(),
            rise_ms: default_meter_rise_ms(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VoxtwinConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub meter: MeterConfig,
}

impl VoxtwinConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file cannot be read
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        let config_path = config_path()?;
        let config_content = fs::read_to_string(&config_path)?;
        let config: VoxtwinConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file, creating the config directory if
/// needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    let config_dir = home.join(".config").join("voxtwin");

    fs::create_dir_all(&config_dir)?;

    Ok(config_dir.join("voxtwin.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let config = VoxtwinConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: VoxtwinConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.display.bar_count, crate::render::BAR_COUNT);
        assert_eq!(parsed.display.frame_rate, 30);
        assert_eq!(parsed.voice.emotion, 50);
        assert!((parsed.meter.target - 98.7).abs() < 1e-6);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let parsed: VoxtwinConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.display.primary_color, "#2196F3");
        assert_eq!(parsed.display.secondary_color, "#9C27B0");
        assert_eq!(parsed.meter.delay_ms, 500);
        assert_eq!(parsed.meter.rise_ms, 2000);
    }

    #[test]
    fn test_palette_resolution() {
        let display = DisplayConfig::default();
        let palette = display.palette().unwrap();
        assert_eq!(palette.primary, Rgb::new(0x21, 0x96, 0xF3));
        assert_eq!(palette.secondary, Rgb::new(0x9C, 0x27, 0xB0));

        let broken = DisplayConfig {
            primary_color: "blue".to_string(),
            ..DisplayConfig::default()
        };
        assert!(broken.palette().is_err());
    }

    #[test]
    fn test_frame_interval_clamps_rate() {
        let mut display = DisplayConfig::default();
        assert_eq!(display.frame_interval().as_millis(), 33);

        display.frame_rate = 0;
        assert_eq!(display.frame_interval().as_millis(), 1000);

        display.frame_rate = 240;
        assert_eq!(display.frame_interval().as_millis(), 16);
    }
}
