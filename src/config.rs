//! Analyzer configuration.
//!
//! Loads settings from config.json. Region layouts, the OCR threshold and
//! external tool paths are all overridable; missing or unreadable config
//! falls back to defaults. The loaded config is passed explicitly into
//! the pipeline rather than held in process-global state, so tests can
//! construct their own.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A rectangle in relative coordinates (0.0 to 1.0).
/// Used for defining frame regions that scale with frame size.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RelativeRect {
    /// X position of top-left corner (0.0 = left edge, 1.0 = right edge)
    pub x: f32,
    /// Y position of top-left corner (0.0 = top edge, 1.0 = bottom edge)
    pub y: f32,
    /// Width as fraction of frame width
    pub width: f32,
    /// Height as fraction of frame height
    pub height: f32,
}

impl RelativeRect {
    /// The top-right sliver of the frame holding the metadata header.
    pub fn header_default() -> Self {
        Self {
            x: 0.75,
            y: 0.03,
            width: 0.25,
            height: 0.035,
        }
    }

    /// The top-center region holding the elapsed-time readout.
    pub fn time_default() -> Self {
        Self {
            x: 0.40,
            y: 0.03,
            width: 0.20,
            height: 0.05,
        }
    }
}

/// Complete analyzer configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Region of the frame containing the version/season/gamemode/map header
    #[serde(default = "RelativeRect::header_default")]
    pub header_region: RelativeRect,
    /// Region of the frame containing the elapsed-time readout
    #[serde(default = "RelativeRect::time_default")]
    pub time_region: RelativeRect,
    /// OCR brightness threshold (pixels with R, G, B all > threshold are kept)
    #[serde(default = "default_ocr_threshold")]
    pub ocr_threshold: u8,
    /// Width frames are scaled to before cropping
    #[serde(default = "default_target_width")]
    pub target_width: u32,
    /// Height frames are scaled to before cropping
    #[serde(default = "default_target_height")]
    pub target_height: u32,
    /// Path to the ffmpeg executable
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
    /// Path to the ffprobe executable
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,
}

fn default_ocr_threshold() -> u8 {
    // Clip frames are compressed video, not clean screenshots
    160
}

fn default_target_width() -> u32 {
    1920
}

fn default_target_height() -> u32 {
    1080
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            header_region: RelativeRect::header_default(),
            time_region: RelativeRect::time_default(),
            ocr_threshold: default_ocr_threshold(),
            target_width: default_target_width(),
            target_height: default_target_height(),
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
        }
    }
}

/// Loads configuration from the given path, or from `config.json` next to
/// the executable when no path is supplied. Missing file or parse failure
/// falls back to defaults.
pub fn load_config(path: Option<&Path>) -> AnalyzerConfig {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => crate::paths::get_exe_dir().join("config.json"),
    };

    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    AnalyzerConfig::default()
}
