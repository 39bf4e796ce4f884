//! Configuration management
//!
//! Settings live in `<config_dir>/flightsync/config.toml`. Every field has a
//! default, so partial files load and a missing file means "all defaults".
//! `FLIGHTSYNC_CONFIG_DIR` overrides the directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sync::controls::{
    GRAPH_DEFAULT_ZOOM, GRAPH_ZOOM_STEP, PLAYBACK_DEFAULT_RATE, PLAYBACK_RATE_STEP,
};
use crate::sync::scheduler::{FIELD_VALUES_INTERVAL, SEEK_BAR_REPAINT_INTERVAL};
use crate::sync::SessionSettings;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "FLIGHTSYNC_CONFIG_DIR";

const APP_DIR: &str = "flightsync";
const CONFIG_FILE: &str = "config.toml";
const PRESETS_DIR: &str = "presets";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub graph: GraphViewConfig,
    pub video: VideoConfig,
    pub display: DisplayConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Playback rate in percent on startup
    pub default_rate: u32,
    /// Length of the back/forward jump
    pub small_jump_ms: u64,
    pub rate_step: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_rate: PLAYBACK_DEFAULT_RATE,
            small_jump_ms: 100,
            rate_step: PLAYBACK_RATE_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphViewConfig {
    /// Graph zoom in percent on startup
    pub default_zoom: u32,
    pub zoom_step: u32,
    /// Visible time window at 100% zoom
    pub window_ms: u64,
}

impl Default for GraphViewConfig {
    fn default() -> Self {
        Self {
            default_zoom: GRAPH_DEFAULT_ZOOM,
            zoom_step: GRAPH_ZOOM_STEP,
            window_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Offset nudges move by one frame at this rate
    pub sync_step_fps: f64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self { sync_step_fps: 15.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub seek_bar_repaint_ms: u64,
    pub field_values_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            seek_bar_repaint_ms: SEEK_BAR_REPAINT_INTERVAL.as_millis() as u64,
            field_values_ms: FIELD_VALUES_INTERVAL.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where presets are kept. Defaults to `presets/` next to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Directory holding the config file and, by default, the presets.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join(APP_DIR))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Resolved preset directory
    pub fn presets_dir(&self) -> Result<PathBuf> {
        match &self.storage.presets_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join(PRESETS_DIR)),
        }
    }

    /// Visible graph window at 100% zoom
    pub fn graph_window(&self) -> Duration {
        Duration::from_millis(self.graph.window_ms.max(1))
    }

    /// Session tunables derived from this configuration.
    ///
    /// Out-of-range rate or zoom values are passed through; the session
    /// ignores them the same way it ignores runtime input. Repaint intervals
    /// shorter than the built-in ones are raised to them.
    pub fn session_settings(&self) -> SessionSettings {
        let sync_step_fps = if self.video.sync_step_fps.is_finite() && self.video.sync_step_fps > 0.0
        {
            self.video.sync_step_fps
        } else {
            VideoConfig::default().sync_step_fps
        };

        SessionSettings {
            playback_rate: self.playback.default_rate,
            rate_step: self.playback.rate_step,
            graph_zoom: self.graph.default_zoom,
            zoom_step: self.graph.zoom_step,
            small_jump: self.playback.small_jump_ms as i64 * 1000,
            sync_step_fps,
            seek_bar_repaint: Duration::from_millis(self.display.seek_bar_repaint_ms)
                .max(SEEK_BAR_REPAINT_INTERVAL),
            field_values: Duration::from_millis(self.display.field_values_ms)
                .max(FIELD_VALUES_INTERVAL),
        }
    }
}
