// Runtime constants for the recognizer and logging.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Centroid travel (px) before a single-finger drag begins a pan.
    pub pan_slop_px: f64,
    /// Maximum travel (px) for a press to still count as a tap.
    pub tap_slop_px: f64,
    /// Maximum press duration (ms) for a tap.
    pub tap_max_ms: f64,
    /// Two contacts closer than this cannot start a pinch/rotate.
    pub min_pinch_distance_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_slop_px: 8.0,
            tap_slop_px: 10.0,
            tap_max_ms: 350.0,
            min_pinch_distance_px: 4.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub gestures: GestureConfig,
    /// One of the `log::Level` names.
    pub log_level: String,
    /// Surface edge length in px.
    pub surface_size_px: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gestures: GestureConfig::default(),
            log_level: if cfg!(debug_assertions) { "debug" } else { "info" }.to_string(),
            surface_size_px: 160.0,
        }
    }
}

impl AppConfig {
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
