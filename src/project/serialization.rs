// Serialization utilities for note-list persistence

use crate::project::types::NoteListDocument;
use crate::project::{ProjectError, validate_document};
use ron::ser::PrettyConfig;
use std::path::Path;

/// Serialize a document to RON
pub fn serialize_to_ron(document: &NoteListDocument) -> Result<String, ProjectError> {
    Ok(ron::ser::to_string_pretty(document, PrettyConfig::default())?)
}

/// Deserialize and validate a document from RON
pub fn deserialize_from_ron(ron_data: &str) -> Result<NoteListDocument, ProjectError> {
    let document: NoteListDocument = ron::from_str(ron_data)?;
    validate_document(&document)?;
    Ok(document)
}

/// Serialize a document to pretty JSON
pub fn to_json_string(document: &NoteListDocument) -> Result<String, ProjectError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Deserialize and validate a document from JSON
pub fn from_json_str(json_data: &str) -> Result<NoteListDocument, ProjectError> {
    let document: NoteListDocument = serde_json::from_str(json_data)?;
    validate_document(&document)?;
    Ok(document)
}

/// Write a document to a RON file
pub fn save_ron<P: AsRef<Path>>(document: &NoteListDocument, path: P) -> Result<(), ProjectError> {
    let path = path.as_ref();
    let ron_data = serialize_to_ron(document)?;
    std::fs::write(path, ron_data)?;
    log::info!("Saved {} notes to {:?}", document.notes.len(), path);
    Ok(())
}

/// Read a document from a RON file
pub fn load_ron<P: AsRef<Path>>(path: P) -> Result<NoteListDocument, ProjectError> {
    let path = path.as_ref();
    let ron_data = std::fs::read_to_string(path)?;
    let document = deserialize_from_ron(&ron_data).inspect_err(|e| {
        log::warn!("Rejected note list {:?}: {}", path, e);
    })?;
    log::info!("Loaded {} notes from {:?}", document.notes.len(), path);
    Ok(document)
}
