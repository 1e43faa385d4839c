//! Weft configuration system
//!
//! Settings are loaded from `weft.toml` and can be overridden with
//! `WEFT_*` environment variables.
//!
//! # Example
//!
//! ```ignore
//! let config = weft_config::WeftConfig::load();
//! let renderer = Renderer::<Frame>::with_config(&config);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file, resolved against the working directory.
pub const CONFIG_FILE: &str = "weft.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WeftConfig {
    /// Tween scheduling
    pub animation: AnimationSettings,
    /// Built-in linear layout
    pub layout: LayoutConfig,
    /// Viewport culling
    pub clip: ClipConfig,
    /// Demo binary
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationSettings {
    /// Multiplier applied to frame timestamps before they reach the timeline
    pub time_scale: f64,
    /// End every tween as soon as it joins
    pub reduced_motion: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl LayoutDirection {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("vertical") {
            Some(Self::Vertical)
        } else if value.eq_ignore_ascii_case("horizontal") {
            Some(Self::Horizontal)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: LayoutDirection,
    /// Space between consecutive nodes
    pub gap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClipConfig {
    pub enabled: bool,
    /// Extra space kept around the viewport before culling
    pub margin: f64,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            margin: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Scenario to run (list, virtual); all when unset
    pub scenario: Option<String>,
    pub frames: u32,
    pub frame_interval_ms: f64,
    pub items: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            frames: 40,
            frame_interval_ms: 16.0,
            items: 5,
        }
    }
}

fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl WeftConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `weft.toml` from the current directory, or defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Environment variables take precedence over file values.
    /// Unparseable numbers are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("WEFT_TIME_SCALE") {
            if let Ok(scale) = val.parse::<f64>() {
                self.animation.time_scale = scale;
            }
        }
        if let Ok(val) = std::env::var("WEFT_REDUCED_MOTION") {
            self.animation.reduced_motion = flag(&val);
        }

        if let Ok(val) = std::env::var("WEFT_LAYOUT_DIRECTION") {
            if let Some(direction) = LayoutDirection::parse(&val) {
                self.layout.direction = direction;
            }
        }
        if let Ok(val) = std::env::var("WEFT_LAYOUT_GAP") {
            if let Ok(gap) = val.parse::<f64>() {
                self.layout.gap = gap;
            }
        }

        if let Ok(val) = std::env::var("WEFT_CLIP") {
            self.clip.enabled = flag(&val);
        }
        if let Ok(val) = std::env::var("WEFT_CLIP_MARGIN") {
            if let Ok(margin) = val.parse::<f64>() {
                self.clip.margin = margin;
            }
        }

        if let Ok(scenario) = std::env::var("WEFT_DEMO_SCENARIO") {
            self.demo.scenario = Some(scenario);
        }
        if let Ok(val) = std::env::var("WEFT_DEMO_FRAMES") {
            if let Ok(frames) = val.parse::<u32>() {
                self.demo.frames = frames;
            }
        }
    }

    /// File (or defaults), then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
