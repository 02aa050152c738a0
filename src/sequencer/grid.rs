// Grid - Pixel mapping, zoom levels and measure lines
// Everything the editor view needs to place positions on screen

use super::position::{
    CENTS_PER_SUBBEAT, NoteValue, PianoRollPosition, SUBBEATS_PER_BEAT,
};
use crate::config::{RowConfig, ZoomConfig};
use serde::{Deserialize, Serialize};

/// Horizontal geometry of the grid at one zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Pixel width of one beat
    pub beat_width: f64,
    /// Beats drawn per bar
    pub beats_per_bar: u8,
}

impl GridMetrics {
    pub fn new(beat_width: f64, beats_per_bar: u8) -> Self {
        Self {
            beat_width,
            beats_per_bar,
        }
    }

    pub fn bar_width(&self) -> f64 {
        self.beat_width * self.beats_per_bar as f64
    }

    pub fn subbeat_width(&self) -> f64 {
        self.beat_width / SUBBEATS_PER_BEAT as f64
    }

    pub fn cent_width(&self) -> f64 {
        self.subbeat_width() / CENTS_PER_SUBBEAT as f64
    }

    /// Horizontal offset of a position, as a plain linear combination
    pub fn x_offset(&self, position: PianoRollPosition) -> f64 {
        position.bar() as f64 * self.bar_width()
            + position.beat() as f64 * self.beat_width
            + position.subbeat() as f64 * self.subbeat_width()
            + position.cent() as f64 * self.cent_width()
    }

    /// Position under a horizontal offset.
    ///
    /// Bars, beats, subbeats and cents are divided out in turn, truncating
    /// at each step and carrying only the remainder to the next finer unit.
    /// Offsets at or left of the origin map to zero.
    pub fn position_at(&self, x: f64) -> PianoRollPosition {
        if !x.is_finite() || x <= 0.0 || !self.is_drawable() {
            return PianoRollPosition::ZERO;
        }

        let mut rest = x;
        let bars = (rest / self.bar_width()).trunc();
        rest -= bars * self.bar_width();
        let beats = (rest / self.beat_width).trunc();
        rest -= beats * self.beat_width;
        let subbeats = (rest / self.subbeat_width()).trunc();
        rest -= subbeats * self.subbeat_width();
        let cents = (rest / self.cent_width()).trunc();

        // Float casts saturate, and a slightly negative remainder becomes 0
        PianoRollPosition::new(bars as u32, beats as u32, subbeats as u32, cents as u32)
    }

    /// Duration covered by a cell of the given pixel width
    pub fn width_to_duration(&self, width: f64) -> PianoRollPosition {
        self.position_at(width)
    }

    /// Pixel width of a note spanning `duration`
    pub fn duration_width(&self, duration: PianoRollPosition) -> f64 {
        self.x_offset(duration)
    }

    fn is_drawable(&self) -> bool {
        self.beat_width.is_finite() && self.beat_width > 0.0 && self.beats_per_bar > 0
    }
}

/// Horizontal offset of `position` for a beat width and bar length
pub fn to_pixel_offset(position: PianoRollPosition, beat_width: f64, beats_per_bar: u8) -> f64 {
    GridMetrics::new(beat_width, beats_per_bar).x_offset(position)
}

/// Position under horizontal offset `x` for a beat width and bar length
pub fn from_pixel_offset(x: f64, beat_width: f64, beats_per_bar: u8) -> PianoRollPosition {
    GridMetrics::new(beat_width, beats_per_bar).position_at(x)
}

/// Number of grid columns drawn per bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoomLevel {
    WholeNotes = 1,
    HalfNotes = 2,
    QuarterNotes = 4,
    EighthNotes = 8,
    SixteenthNotes = 16,
    ThirtySecondNotes = 32,
    SixtyFourthNotes = 64,
}

impl ZoomLevel {
    /// Columns per bar
    pub fn columns_per_bar(self) -> u32 {
        self as u32
    }

    /// Note value spanned by one grid column
    pub fn note_value(self) -> NoteValue {
        match self {
            ZoomLevel::WholeNotes => NoteValue::Whole,
            ZoomLevel::HalfNotes => NoteValue::Half,
            ZoomLevel::QuarterNotes => NoteValue::Quarter,
            ZoomLevel::EighthNotes => NoteValue::Eighth,
            ZoomLevel::SixteenthNotes => NoteValue::Sixteenth,
            ZoomLevel::ThirtySecondNotes => NoteValue::ThirtySecond,
            ZoomLevel::SixtyFourthNotes => NoteValue::SixtyFourth,
        }
    }

    pub fn zoomed_in(self) -> Option<ZoomLevel> {
        match self {
            ZoomLevel::WholeNotes => Some(ZoomLevel::HalfNotes),
            ZoomLevel::HalfNotes => Some(ZoomLevel::QuarterNotes),
            ZoomLevel::QuarterNotes => Some(ZoomLevel::EighthNotes),
            ZoomLevel::EighthNotes => Some(ZoomLevel::SixteenthNotes),
            ZoomLevel::SixteenthNotes => Some(ZoomLevel::ThirtySecondNotes),
            ZoomLevel::ThirtySecondNotes => Some(ZoomLevel::SixtyFourthNotes),
            ZoomLevel::SixtyFourthNotes => None,
        }
    }

    pub fn zoomed_out(self) -> Option<ZoomLevel> {
        match self {
            ZoomLevel::WholeNotes => None,
            ZoomLevel::HalfNotes => Some(ZoomLevel::WholeNotes),
            ZoomLevel::QuarterNotes => Some(ZoomLevel::HalfNotes),
            ZoomLevel::EighthNotes => Some(ZoomLevel::QuarterNotes),
            ZoomLevel::SixteenthNotes => Some(ZoomLevel::EighthNotes),
            ZoomLevel::ThirtySecondNotes => Some(ZoomLevel::SixteenthNotes),
            ZoomLevel::SixtyFourthNotes => Some(ZoomLevel::ThirtySecondNotes),
        }
    }

    /// Note values whose grid lines carry a text label at this level
    pub fn measure_text_values(self) -> &'static [NoteValue] {
        match self {
            ZoomLevel::WholeNotes | ZoomLevel::HalfNotes | ZoomLevel::QuarterNotes => {
                &[NoteValue::Whole]
            }
            ZoomLevel::EighthNotes => &[NoteValue::Whole, NoteValue::Half],
            ZoomLevel::SixteenthNotes => &[NoteValue::Whole, NoteValue::Half, NoteValue::Quarter],
            ZoomLevel::ThirtySecondNotes => &[
                NoteValue::Whole,
                NoteValue::Half,
                NoteValue::Quarter,
                NoteValue::Eighth,
            ],
            ZoomLevel::SixtyFourthNotes => &[
                NoteValue::Whole,
                NoteValue::Half,
                NoteValue::Quarter,
                NoteValue::Eighth,
                NoteValue::Sixteenth,
            ],
        }
    }
}

/// Outcome of a pinch step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    /// Nothing changed
    None,
    /// Column width or row height changed within the current level
    Resized,
    /// The grid switched to a new level; measure lines must be rebuilt
    LevelChanged(ZoomLevel),
}

/// Pinch zoom state: current level, column width and row height
#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    level: ZoomLevel,
    beat_width: f64,
    row_height: f64,
    settings: ZoomConfig,
    rows: RowConfig,
}

impl Zoom {
    pub fn new(settings: ZoomConfig, rows: RowConfig) -> Self {
        let level = settings.level.max(settings.min_level).min(settings.max_level);
        let beat_width = settings
            .beat_width
            .max(settings.min_beat_width)
            .min(settings.max_beat_width);
        let row_height = rows.height.max(rows.min_height).min(rows.max_height);
        Self {
            level,
            beat_width,
            row_height,
            settings,
            rows,
        }
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    /// Width of one grid column in pixels
    pub fn beat_width(&self) -> f64 {
        self.beat_width
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Grid metrics for the current level. A column spans
    /// `level.note_value()`, so a beat is `beat_width * level / 4` wide.
    pub fn metrics(&self, beats_per_bar: u8) -> GridMetrics {
        let beat_width = self.beat_width * self.level.columns_per_bar() as f64 / 4.0;
        GridMetrics::new(beat_width, beats_per_bar)
    }

    /// Applies a horizontal pinch scale.
    ///
    /// Growing past the widest column moves one level in and restarts at the
    /// narrowest width; shrinking past the narrowest moves one level out.
    pub fn apply_horizontal(&mut self, scale: f64) -> ZoomChange {
        let Some(scale) = self.damped(scale) else {
            return ZoomChange::None;
        };
        let min = self.settings.min_beat_width;
        let max = self.settings.max_beat_width;
        let scale = scale.min(max / self.beat_width).max(min / self.beat_width);
        let previous = self.beat_width;
        self.beat_width = (self.beat_width * scale).max(min).min(max);

        if self.beat_width >= max {
            if let Some(level) = self.level.zoomed_in().filter(|l| *l <= self.settings.max_level) {
                return self.switch_level(level, min);
            }
        } else if self.beat_width <= min {
            if let Some(level) = self.level.zoomed_out().filter(|l| *l >= self.settings.min_level)
            {
                return self.switch_level(level, max);
            }
        }

        if self.beat_width == previous {
            ZoomChange::None
        } else {
            ZoomChange::Resized
        }
    }

    /// Applies a vertical pinch scale to the row height
    pub fn apply_vertical(&mut self, scale: f64) -> ZoomChange {
        let Some(scale) = self.damped(scale) else {
            return ZoomChange::None;
        };
        let scale = scale
            .min(self.rows.max_height / self.row_height)
            .max(self.rows.min_height / self.row_height);
        let previous = self.row_height;
        self.row_height = (self.row_height * scale)
            .max(self.rows.min_height)
            .min(self.rows.max_height);

        if self.row_height == previous {
            ZoomChange::None
        } else {
            ZoomChange::Resized
        }
    }

    fn damped(&self, scale: f64) -> Option<f64> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        Some((scale - 1.0) * self.settings.speed + 1.0)
    }

    fn switch_level(&mut self, level: ZoomLevel, beat_width: f64) -> ZoomChange {
        log::debug!("Zoom level {:?} -> {:?}", self.level, level);
        self.level = level;
        self.beat_width = beat_width;
        ZoomChange::LevelChanged(level)
    }
}

/// Style slot of a vertical grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridLineKind {
    Bar,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
    Default,
}

impl GridLineKind {
    /// Line kind for a grid position, from its note value tag
    pub fn from_position(position: PianoRollPosition) -> Self {
        match position.note_value() {
            Some(NoteValue::DoubleWhole) | Some(NoteValue::Whole) => GridLineKind::Bar,
            Some(NoteValue::Half) => GridLineKind::Half,
            Some(NoteValue::Quarter) => GridLineKind::Quarter,
            Some(NoteValue::Eighth) => GridLineKind::Eighth,
            Some(NoteValue::Sixteenth) => GridLineKind::Sixteenth,
            Some(NoteValue::ThirtySecond) => GridLineKind::ThirtySecond,
            Some(NoteValue::SixtyFourth) => GridLineKind::SixtyFourth,
            None => GridLineKind::Default,
        }
    }
}

/// Most ruler lines laid out in one call
pub const MAX_MEASURE_LINES: usize = 1 << 16;

/// One vertical line of the measure ruler
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureLine {
    pub position: PianoRollPosition,
    pub x: f64,
    pub kind: GridLineKind,
    /// Ruler text, present only for note values labelled at this zoom level
    pub label: Option<String>,
}

/// Lays out the ruler lines for `bar_count` bars, one per grid column plus
/// the closing line, stopping at `MAX_MEASURE_LINES`
pub fn measure_lines(bar_count: u32, zoom: &Zoom, beats_per_bar: u8) -> Vec<MeasureLine> {
    let level = zoom.level();
    let metrics = zoom.metrics(beats_per_bar);
    let step = level.note_value().duration();
    let labelled = level.measure_text_values();
    let wanted = (bar_count as u64)
        .saturating_mul(level.columns_per_bar() as u64)
        .saturating_add(1);
    let line_count = wanted.min(MAX_MEASURE_LINES as u64) as usize;
    if (line_count as u64) < wanted {
        log::warn!(
            "{} bars need {} measure lines, laying out the first {}",
            bar_count,
            wanted,
            line_count
        );
    }

    let mut lines = Vec::with_capacity(line_count);
    let mut position = PianoRollPosition::ZERO;
    for _ in 0..line_count {
        let label = position
            .note_value()
            .filter(|value| labelled.contains(value))
            .map(|_| position.to_string());
        lines.push(MeasureLine {
            position,
            x: metrics.x_offset(position),
            kind: GridLineKind::from_position(position),
            label,
        });
        position += step;
    }
    lines
}
