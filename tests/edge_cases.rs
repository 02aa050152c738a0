//! Edge case tests and robustness validation
//!
//! Extreme positions, degenerate pinch gestures and hostile text input must
//! be handled without panics or out-of-range fields.

use pianoroll_core::config::EditorConfig;
use pianoroll_core::sequencer::grid::{
    GridMetrics, MAX_MEASURE_LINES, Zoom, ZoomChange, measure_lines,
};
use pianoroll_core::{
    Bars, NoteCatalog, PianoRollNote, PianoRollPosition, PositionError, ZoomLevel,
};

/// Bar arithmetic at the top of the range saturates instead of wrapping
#[test]
fn test_position_at_max_bar() {
    let last = PianoRollPosition::new(u32::MAX, 3, 3, 239);
    let sum = last + PianoRollPosition::new(10, 0, 0, 0);
    assert_eq!(sum.bar(), u32::MAX);
    assert!(sum.beat() < 4 && sum.subbeat() < 4 && sum.cent() < 240);

    // Carry overflow in the constructor saturates too
    assert_eq!(PianoRollPosition::new(u32::MAX, 400, 0, 0).bar(), u32::MAX);

    assert!(matches!(
        PianoRollPosition::try_new(u32::MAX as i64 + 1, 0, 0, 0),
        Err(PositionError::BarOverflow(_))
    ));
    assert!(matches!(
        PianoRollPosition::try_new(0, 0, 0, -1),
        Err(PositionError::NegativeField { .. })
    ));
}

/// Subtracting far past zero clamps in one step
#[test]
fn test_subtract_huge_from_small() {
    let small = PianoRollPosition::CENT;
    let huge = PianoRollPosition::new(u32::MAX, 3, 3, 239);
    assert_eq!(small - huge, PianoRollPosition::ZERO);
    assert_eq!(huge - huge, PianoRollPosition::ZERO);
    assert_eq!((huge - small).cent(), 238);
}

/// Pixel offsets far right, at infinity or NaN stay in range
#[test]
fn test_pixel_mapping_extremes() {
    let metrics = GridMetrics::new(30.0, 4);

    let far = metrics.position_at(1e15);
    assert_eq!(far.bar(), u32::MAX);
    assert!(far.beat() < 4 && far.subbeat() < 4 && far.cent() < 240);

    assert_eq!(metrics.position_at(f64::INFINITY), PianoRollPosition::ZERO);
    assert_eq!(metrics.position_at(f64::NEG_INFINITY), PianoRollPosition::ZERO);
    assert_eq!(metrics.position_at(f64::NAN), PianoRollPosition::ZERO);
    assert_eq!(GridMetrics::new(f64::NAN, 4).position_at(10.0), PianoRollPosition::ZERO);
    assert_eq!(GridMetrics::new(30.0, 0).position_at(10.0), PianoRollPosition::ZERO);
}

/// Degenerate pinch scales leave the zoom untouched
#[test]
fn test_zoom_ignores_degenerate_scales() {
    let config = EditorConfig::default();
    let mut zoom = Zoom::new(config.zoom, config.rows);
    let before = zoom.clone();

    for scale in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(zoom.apply_horizontal(scale), ZoomChange::None);
        assert_eq!(zoom.apply_vertical(scale), ZoomChange::None);
    }
    assert_eq!(zoom, before);
}

/// Pinching hard in one direction stops at the configured levels
#[test]
fn test_zoom_stays_within_levels() {
    let config = EditorConfig::default();
    let mut zoom = Zoom::new(config.zoom, config.rows);

    for _ in 0..100 {
        zoom.apply_horizontal(50.0);
        assert!(zoom.beat_width() >= config.zoom.min_beat_width);
        assert!(zoom.beat_width() <= config.zoom.max_beat_width);
    }
    assert_eq!(zoom.level(), config.zoom.max_level);

    for _ in 0..100 {
        zoom.apply_horizontal(0.01);
        assert!(zoom.beat_width() >= config.zoom.min_beat_width);
    }
    assert_eq!(zoom.level(), ZoomLevel::WholeNotes);
}

/// An empty grid still has its closing measure line
#[test]
fn test_measure_lines_empty_grid() {
    let config = EditorConfig::default();
    let zoom = Zoom::new(config.zoom, config.rows);
    let lines = measure_lines(0, &zoom, 4);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].position, PianoRollPosition::ZERO);
}

/// A huge bar count is capped instead of allocating a line per column
#[test]
fn test_measure_lines_huge_bar_count() {
    let config = EditorConfig::default();
    let zoom = Zoom::new(config.zoom, config.rows);
    let lines = measure_lines(u32::MAX, &zoom, 4);
    assert_eq!(lines.len(), MAX_MEASURE_LINES);
    assert!(lines.windows(2).all(|w| w[0].position < w[1].position));
    assert!(lines.iter().all(|l| l.x.is_finite()));

    // Small grids are untouched by the cap
    let columns = zoom.level().columns_per_bar() as usize;
    assert_eq!(measure_lines(8, &zoom, 4).len(), 8 * columns + 1);
}

/// Notes far out on the timeline drive the automatic bar count
#[test]
fn test_catalog_far_notes() {
    let far = PianoRollPosition::new(9_999, 3, 0, 0);
    let catalog = NoteCatalog::from_notes([PianoRollNote::new(
        0,
        0,
        far,
        PianoRollPosition::new(0, 2, 0, 0),
    )
    .unwrap()])
    .unwrap();

    assert_eq!(catalog.last_bar(), 10_000);
    assert_eq!(catalog.bar_count(Bars::Auto, 4), 10_001);
}

/// A note ending in the last representable bar saturates the bar count
#[test]
fn test_catalog_note_in_last_bar() {
    let catalog = NoteCatalog::from_notes([PianoRollNote::new(
        60,
        100,
        PianoRollPosition::new(u32::MAX, 0, 0, 0),
        PianoRollPosition::new(0, 1, 0, 0),
    )
    .unwrap()])
    .unwrap();

    assert_eq!(catalog.last_bar(), u32::MAX);
    assert_eq!(catalog.bar_count(Bars::Auto, 4), u32::MAX);
    assert_eq!(catalog.bar_count(Bars::Fixed(2), 4), 2);
}

/// Hostile text never panics the parser
#[test]
fn test_parse_hostile_text() {
    for text in [
        "",
        ".",
        "..",
        "1..2",
        "1.2.3.4.5",
        "-1",
        "1.-2",
        "+1",
        "1 .2",
        "1.4",
        "0.0.4",
        "0.0.0.240",
        "99999999999999999999",
        "1e3",
        "١",
    ] {
        assert!(text.parse::<PianoRollPosition>().is_err(), "{text:?} parsed");
    }
}
