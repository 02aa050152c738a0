// Note-list persistence
// Saves and loads piano roll documents as RON files or JSON strings

pub mod serialization;
pub mod types;

pub use serialization::{from_json_str, load_ron, save_ron, to_json_string};
pub use types::{DocumentVersion, NoteListDocument};

use std::collections::HashSet;

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    #[error("RON parse error: {0}")]
    RonSpanned(#[from] ron::error::SpannedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("Unsupported document version {0}")]
    UnsupportedVersion(DocumentVersion),
}

/// Checks a document read from an untrusted source
pub fn validate_document(document: &NoteListDocument) -> Result<(), ProjectError> {
    if !document.version.is_supported() {
        return Err(ProjectError::UnsupportedVersion(document.version));
    }

    document.tempo()?;

    document
        .time_signature
        .validate()
        .map_err(|e| ProjectError::InvalidStructure(format!("Time signature: {}", e)))?;

    let mut note_ids = HashSet::new();
    for note in &document.notes {
        if !note_ids.insert(note.id) {
            return Err(ProjectError::InvalidStructure(format!(
                "Duplicate note ID {}",
                note.id
            )));
        }

        note.validate().map_err(|e| {
            ProjectError::InvalidStructure(format!("Note {}: {}", note.id, e))
        })?;
    }

    Ok(())
}
