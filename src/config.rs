use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::color::{self, SeriesColor, DEFAULT_SERIES_COLOR};

/// Display and preview preferences handed to the core as explicit values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color for series without a template preference
    #[serde(with = "color::hex")]
    pub default_color: SeriesColor,
    /// Cosine taper width of the preview band-pass, in Hz
    pub taper_hz: f64,
    /// Corner frequencies preselected when a dataset is loaded
    pub initial_low_hz: Option<f64>,
    pub initial_high_hz: Option<f64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_SERIES_COLOR,
            taper_hz: 0.1,
            initial_low_hz: None,
            initial_high_hz: None,
        }
    }
}

impl EditorConfig {
    /// Read a JSON config; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: EditorConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
