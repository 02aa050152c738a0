// Editor configuration
// Zoom limits, row sizes, bar mode and grid line styles, loadable from RON

use crate::sequencer::catalog::Bars;
use crate::sequencer::grid::{GridLineKind, ZoomLevel};
use crate::sequencer::timeline::{TimeSignature, TimingError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid time signature: {0}")]
    TimeSignature(#[from] TimingError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Stroke of one grid line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLineStyle {
    /// Line width in points; for measure text this is the font size
    pub width: f32,
    /// RGBA color
    pub color: [u8; 4],
    /// Dash lengths, solid when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_pattern: Option<Vec<f32>>,
}

impl GridLineStyle {
    pub fn new(width: f32, color: [u8; 4]) -> Self {
        Self {
            width,
            color,
            dash_pattern: None,
        }
    }

    pub fn dashed(mut self, pattern: Vec<f32>) -> Self {
        self.dash_pattern = Some(pattern);
        self
    }
}

impl Default for GridLineStyle {
    fn default() -> Self {
        Self::new(0.5, BLACK)
    }
}

const BLACK: [u8; 4] = [0, 0, 0, 255];
const GRAY: [u8; 4] = [128, 128, 128, 255];

/// Styles for every line the grid draws
///
/// Passed to the renderer explicitly; there are no process-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub default: GridLineStyle,
    pub row_horizontal: GridLineStyle,
    pub row_vertical: GridLineStyle,
    pub measure_bottom: GridLineStyle,
    pub measure_text: GridLineStyle,
    pub bar: GridLineStyle,
    pub half: GridLineStyle,
    pub quarter: GridLineStyle,
    pub eighth: GridLineStyle,
    pub sixteenth: GridLineStyle,
    pub thirty_second: GridLineStyle,
    pub sixty_fourth: GridLineStyle,
}

impl GridStyle {
    /// Style of a vertical grid line
    pub fn line(&self, kind: GridLineKind) -> &GridLineStyle {
        match kind {
            GridLineKind::Bar => &self.bar,
            GridLineKind::Half => &self.half,
            GridLineKind::Quarter => &self.quarter,
            GridLineKind::Eighth => &self.eighth,
            GridLineKind::Sixteenth => &self.sixteenth,
            GridLineKind::ThirtySecond => &self.thirty_second,
            GridLineKind::SixtyFourth => &self.sixty_fourth,
            GridLineKind::Default => &self.default,
        }
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            default: GridLineStyle::default(),
            row_horizontal: GridLineStyle::default(),
            row_vertical: GridLineStyle::default(),
            measure_bottom: GridLineStyle::new(1.0, BLACK),
            measure_text: GridLineStyle::new(13.0, BLACK),
            bar: GridLineStyle::new(1.0, BLACK),
            half: GridLineStyle::new(0.5, GRAY),
            quarter: GridLineStyle::new(0.5, GRAY),
            eighth: GridLineStyle::new(0.5, GRAY),
            sixteenth: GridLineStyle::new(0.5, GRAY),
            thirty_second: GridLineStyle::new(0.5, GRAY),
            sixty_fourth: GridLineStyle::new(0.5, GRAY),
        }
    }
}

/// Horizontal zoom limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Starting zoom level
    pub level: ZoomLevel,
    pub min_level: ZoomLevel,
    pub max_level: ZoomLevel,
    /// Pinch damping, 1.0 follows the fingers exactly
    pub speed: f64,
    /// Starting column width in pixels
    pub beat_width: f64,
    pub min_beat_width: f64,
    pub max_beat_width: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            level: ZoomLevel::QuarterNotes,
            min_level: ZoomLevel::WholeNotes,
            max_level: ZoomLevel::SixteenthNotes,
            speed: 0.4,
            beat_width: 30.0,
            min_beat_width: 20.0,
            max_beat_width: 40.0,
        }
    }
}

/// Key row sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowConfig {
    pub height: f64,
    pub min_height: f64,
    pub max_height: f64,
    /// Width of the key header column on the left
    pub header_width: f64,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            height: 40.0,
            min_height: 30.0,
            max_height: 80.0,
            header_width: 60.0,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub time_signature: TimeSignature,
    pub bars: Bars,
    pub zoom: ZoomConfig,
    pub rows: RowConfig,
    /// Height of the measure ruler
    pub measure_height: f64,
    pub grid: GridStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            time_signature: TimeSignature::default(),
            bars: Bars::Auto,
            zoom: ZoomConfig::default(),
            rows: RowConfig::default(),
            measure_height: 20.0,
            grid: GridStyle::default(),
        }
    }
}

impl EditorConfig {
    /// Parses and validates a RON configuration; missing fields use defaults
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a RON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded editor configuration from {:?}", path);
        Ok(config)
    }

    /// Checks ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_signature.validate()?;

        let zoom = &self.zoom;
        if zoom.min_level > zoom.max_level {
            return Err(ConfigError::Invalid(format!(
                "Zoom min level {:?} is above max level {:?}",
                zoom.min_level, zoom.max_level
            )));
        }
        if !(zoom.min_beat_width > 0.0 && zoom.min_beat_width < zoom.max_beat_width) {
            return Err(ConfigError::Invalid(format!(
                "Beat width limits must satisfy 0 < min < max, got {} and {}",
                zoom.min_beat_width, zoom.max_beat_width
            )));
        }
        if !(zoom.speed > 0.0 && zoom.speed <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "Zoom speed must be in (0, 1], got {}",
                zoom.speed
            )));
        }

        let rows = &self.rows;
        if !(rows.min_height > 0.0 && rows.min_height <= rows.max_height) {
            return Err(ConfigError::Invalid(format!(
                "Row height limits must satisfy 0 < min <= max, got {} and {}",
                rows.min_height, rows.max_height
            )));
        }

        Ok(())
    }
}
