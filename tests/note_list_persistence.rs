// Integration test for note-list persistence
// Tests the complete edit, save and load cycle with realistic data

use pianoroll_core::project::{self, NoteListDocument, ProjectError};
use pianoroll_core::{
    EditDirection, NoteCatalog, NoteValue, PianoRollNote, PianoRollPosition, Tempo, TimeSignature,
};
use tempfile::tempdir;

fn build_catalog() -> NoteCatalog {
    let quarter = NoteValue::Quarter.duration();
    let mut catalog = NoteCatalog::new();
    for (i, pitch) in [60u8, 62, 64, 65, 67].into_iter().enumerate() {
        let position = PianoRollPosition::new(0, i as u32, 0, 0);
        catalog
            .insert(PianoRollNote::new(pitch, 100, position, quarter).unwrap())
            .unwrap();
    }
    catalog
}

#[test]
fn test_complete_note_list_persistence() {
    let mut catalog = build_catalog();

    // Edit before saving: push the last two notes back an eighth
    catalog.select_region(
        PianoRollPosition::new(0, 3, 0, 0)..PianoRollPosition::new(2, 0, 0, 0),
        0..=127,
    );
    catalog.move_selection(NoteValue::Eighth.duration(), EditDirection::Forward);

    let tempo = Tempo::new(132.0).unwrap();
    let document = NoteListDocument::from_catalog(&catalog, &tempo, TimeSignature::four_four());

    let dir = tempdir().unwrap();
    let path = dir.path().join("melody.ron");
    project::save_ron(&document, &path).unwrap();

    let loaded = project::load_ron(&path).unwrap();
    assert_eq!(loaded.tempo().unwrap(), tempo);
    assert_eq!(loaded.time_signature, TimeSignature::four_four());

    let restored = loaded.to_catalog().unwrap();
    assert_eq!(restored.len(), catalog.len());
    for (a, b) in restored.iter().zip(catalog.iter()) {
        assert_eq!(a, b);
        assert!(a.same_value(b));
    }
    assert_eq!(restored.notes()[3].position, PianoRollPosition::new(0, 3, 2, 0));
}

#[test]
fn test_json_interchange() {
    let catalog = build_catalog();
    let document =
        NoteListDocument::from_catalog(&catalog, &Tempo::default(), TimeSignature::three_four());

    let json = project::to_json_string(&document).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["notes"][1]["position"]["beat"], 1);
    assert_eq!(value["time_signature"]["numerator"], 3);

    let back = project::from_json_str(&json).unwrap();
    assert_eq!(back.notes, document.notes);
}

#[test]
fn test_tampered_file_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tampered.ron");

    let document = NoteListDocument::from_catalog(
        &build_catalog(),
        &Tempo::default(),
        TimeSignature::four_four(),
    );
    let text = project::serialization::serialize_to_ron(&document)
        .unwrap()
        .replacen("pitch: 60", "pitch: 140", 1);
    std::fs::write(&path, text).unwrap();

    assert!(matches!(
        project::load_ron(&path),
        Err(ProjectError::InvalidStructure(_))
    ));
}

#[test]
fn test_empty_document_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.ron");

    project::save_ron(&NoteListDocument::default(), &path).unwrap();
    let loaded = project::load_ron(&path).unwrap();
    assert!(loaded.notes.is_empty());
    assert!(loaded.to_catalog().unwrap().is_empty());
}
