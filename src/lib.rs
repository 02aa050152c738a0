// Piano roll core - Library exports for tests and benchmarks

pub mod config;
pub mod midi;
pub mod project;
pub mod sequencer;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EditorConfig, GridLineStyle, GridStyle};
pub use midi::event::MidiEvent;
pub use midi::export::{ExportError, TimedMidiEvent, export_events, export_smf};
pub use project::{NoteListDocument, ProjectError};
pub use sequencer::{
    Bars, EditDirection, Keys, NoteCatalog, NoteId, NoteValue, PianoRollNote, PianoRollPosition,
    PositionError, Tempo, TimeSignature, Zoom, ZoomLevel,
};
