// Types for note-list persistence

use serde::{Deserialize, Serialize};

use crate::sequencer::catalog::NoteCatalog;
use crate::sequencer::note::PianoRollNote;
use crate::sequencer::timeline::{Tempo, TimeSignature};

/// Document format version
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentVersion {
    pub major: u32,
    pub minor: u32,
}

impl DocumentVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn current() -> Self {
        Self::new(1, 0)
    }

    /// Readable by this build: same major version, minor not newer
    pub fn is_supported(&self) -> bool {
        let current = Self::current();
        self.major == current.major && self.minor <= current.minor
    }
}

impl std::fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A saved piano roll: tempo, meter and notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteListDocument {
    /// Version of the document format
    pub version: DocumentVersion,
    /// Tempo (BPM)
    pub tempo_bpm: f64,
    pub time_signature: TimeSignature,
    /// Notes in catalog order
    #[serde(default)]
    pub notes: Vec<PianoRollNote>,
}

impl NoteListDocument {
    pub fn new(tempo: &Tempo, time_signature: TimeSignature, notes: Vec<PianoRollNote>) -> Self {
        Self {
            version: DocumentVersion::current(),
            tempo_bpm: tempo.bpm(),
            time_signature,
            notes,
        }
    }

    /// Snapshot of a catalog's notes
    pub fn from_catalog(catalog: &NoteCatalog, tempo: &Tempo, time_signature: TimeSignature) -> Self {
        Self::new(tempo, time_signature, catalog.notes().to_vec())
    }

    /// Stored tempo, checked against the accepted BPM range
    pub fn tempo(&self) -> Result<Tempo, crate::project::ProjectError> {
        Tempo::new(self.tempo_bpm)
            .map_err(|e| crate::project::ProjectError::InvalidStructure(e.to_string()))
    }

    /// Rebuilds a sorted catalog from the stored notes
    pub fn to_catalog(&self) -> Result<NoteCatalog, crate::project::ProjectError> {
        NoteCatalog::from_notes(self.notes.iter().copied())
            .map_err(|e| crate::project::ProjectError::InvalidStructure(e.to_string()))
    }
}

impl Default for NoteListDocument {
    fn default() -> Self {
        Self::new(&Tempo::default(), TimeSignature::default(), Vec::new())
    }
}
