// Sequencer module - Piano roll grid model
// Musical positions, notes, keys, zoom and timing

pub mod catalog;
pub mod grid;
pub mod keys;
pub mod note;
pub mod position;
pub mod timeline;

pub use catalog::{Bars, CatalogError, EditDirection, NoteCatalog};
pub use grid::{GridLineKind, GridMetrics, MeasureLine, Zoom, ZoomChange, ZoomLevel};
pub use keys::Keys;
pub use note::{NoteEquality, NoteError, NoteId, PianoRollNote};
pub use position::{NoteValue, PianoRollPosition, PositionError};
pub use timeline::{Tempo, TimeSignature, TimingError};
