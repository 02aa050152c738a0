// MIDI module - Note events and Standard MIDI File export

pub mod event;
pub mod export;

pub use event::MidiEvent;
pub use export::{ExportError, TimedMidiEvent, export_events, export_smf};
