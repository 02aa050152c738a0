// Note representation for the piano roll
// A note binds a pitch and velocity to a start position and a duration

use crate::sequencer::position::PianoRollPosition;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Highest MIDI pitch and velocity
pub const MIDI_MAX: u8 = 127;

/// Stable identity of a note, kept across moves, resizes and saves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generates a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors raised when building a note
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error("MIDI pitch must be 0-127, got {0}")]
    InvalidPitch(u8),

    #[error("MIDI velocity must be 0-127, got {0}")]
    InvalidVelocity(u8),

    #[error("Note duration must be at least one cent")]
    ZeroDuration,
}

/// Which sense of equality to compare notes by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEquality {
    /// Same note instance, whatever its current values
    Identity,
    /// Same pitch, velocity, position and duration, whatever the id
    Value,
}

/// A MIDI note on the piano roll grid
///
/// `==` compares identity. Use [`PianoRollNote::same_value`] or
/// [`PianoRollNote::matches`] to compare contents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PianoRollNote {
    /// Unique identifier for this note
    pub id: NoteId,

    /// MIDI note number (0-127, where 60 = C4)
    pub pitch: u8,

    /// MIDI velocity (0-127)
    pub velocity: u8,

    /// Start position on the grid
    pub position: PianoRollPosition,

    /// Length on the grid
    pub duration: PianoRollPosition,
}

impl PianoRollNote {
    /// Creates a new note with a fresh id
    pub fn new(
        pitch: u8,
        velocity: u8,
        position: PianoRollPosition,
        duration: PianoRollPosition,
    ) -> Result<Self, NoteError> {
        Self::with_id(NoteId::new(), pitch, velocity, position, duration)
    }

    /// Creates a note with a known id, e.g. when loading a saved list
    pub fn with_id(
        id: NoteId,
        pitch: u8,
        velocity: u8,
        position: PianoRollPosition,
        duration: PianoRollPosition,
    ) -> Result<Self, NoteError> {
        let note = Self {
            id,
            pitch,
            velocity,
            position,
            duration,
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks pitch and velocity ranges and that the note has a length
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.pitch > MIDI_MAX {
            return Err(NoteError::InvalidPitch(self.pitch));
        }
        if self.velocity > MIDI_MAX {
            return Err(NoteError::InvalidVelocity(self.velocity));
        }
        if self.duration == PianoRollPosition::ZERO {
            return Err(NoteError::ZeroDuration);
        }
        Ok(())
    }

    /// Grid position where the note ends
    pub fn end(&self) -> PianoRollPosition {
        self.position + self.duration
    }

    /// True if `position` falls inside `[start, end)`
    pub fn contains(&self, position: PianoRollPosition) -> bool {
        position >= self.position && position < self.end()
    }

    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    pub fn same_value(&self, other: &Self) -> bool {
        self.pitch == other.pitch
            && self.velocity == other.velocity
            && self.position == other.position
            && self.duration == other.duration
    }

    pub fn matches(&self, other: &Self, equality: NoteEquality) -> bool {
        match equality {
            NoteEquality::Identity => self.same_identity(other),
            NoteEquality::Value => self.same_value(other),
        }
    }

    /// Get the note name (e.g., "C4", "A#5")
    pub fn note_name(&self) -> String {
        pitch_name(self.pitch)
    }
}

impl PartialEq for PianoRollNote {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for PianoRollNote {}

/// Name of a MIDI pitch with octave, middle C (60) being "C4"
pub fn pitch_name(pitch: u8) -> String {
    const NOTE_NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];

    let octave = (pitch / 12) as i32 - 1;
    let note_index = (pitch % 12) as usize;

    format!("{}{}", NOTE_NAMES[note_index], octave)
}
