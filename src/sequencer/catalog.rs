// Note catalog - Ordered collection of piano roll notes
// Holds the notes, the current selection and the move/resize edits

use crate::sequencer::note::{MIDI_MAX, NoteError, NoteId, PianoRollNote};
use crate::sequencer::position::PianoRollPosition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::{Range, RangeInclusive};

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown note: {0}")]
    UnknownNote(NoteId),

    #[error("Note already in catalog: {0}")]
    DuplicateNote(NoteId),

    #[error("Invalid note: {0}")]
    InvalidNote(#[from] NoteError),
}

/// How many bars the editor shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bars {
    /// Always exactly this many bars
    Fixed(u32),
    /// Enough bars to hold every note
    Auto,
}

/// Direction of a move or resize step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDirection {
    Forward,
    Backward,
}

/// All notes of the piano roll, sorted by position then pitch
#[derive(Debug, Clone, Default)]
pub struct NoteCatalog {
    notes: Vec<PianoRollNote>,
    selected: HashSet<NoteId>,
}

impl NoteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from notes in any order
    pub fn from_notes(notes: impl IntoIterator<Item = PianoRollNote>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for note in notes {
            catalog.insert(note)?;
        }
        Ok(catalog)
    }

    /// Get all notes
    pub fn notes(&self) -> &[PianoRollNote] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &PianoRollNote> {
        self.notes.iter()
    }

    /// Adds a note, keeping the catalog sorted
    pub fn insert(&mut self, note: PianoRollNote) -> Result<(), CatalogError> {
        note.validate()?;
        if self.get(note.id).is_some() {
            return Err(CatalogError::DuplicateNote(note.id));
        }

        let index = self.insertion_index(&note);
        self.notes.insert(index, note);
        log::trace!("Inserted note {} at {}", note.id, note.position);
        Ok(())
    }

    /// Remove a note by ID
    pub fn remove(&mut self, id: NoteId) -> Option<PianoRollNote> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        self.selected.remove(&id);
        Some(self.notes.remove(index))
    }

    /// Get a note by ID
    pub fn get(&self, id: NoteId) -> Option<&PianoRollNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Applies `edit` to one note and restores the sort order. The note keeps
    /// its id, and an edit that leaves it invalid is rolled back.
    pub fn update<F>(&mut self, id: NoteId, edit: F) -> Result<&PianoRollNote, CatalogError>
    where
        F: FnOnce(&mut PianoRollNote),
    {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(CatalogError::UnknownNote(id))?;

        let original = self.notes.remove(index);
        let mut note = original;
        edit(&mut note);
        note.id = id;
        if let Err(e) = note.validate() {
            self.notes.insert(index, original);
            return Err(e.into());
        }

        let index = self.insertion_index(&note);
        self.notes.insert(index, note);
        Ok(&self.notes[index])
    }

    /// Moves a note to a new start position and pitch (drag-to-move)
    pub fn move_note(
        &mut self,
        id: NoteId,
        position: PianoRollPosition,
        pitch: u8,
    ) -> Result<&PianoRollNote, CatalogError> {
        log::debug!("Move note {} to {} pitch {}", id, position, pitch);
        self.update(id, |note| {
            note.position = position;
            note.pitch = pitch;
        })
    }

    /// Changes the length of a note (drag-to-resize), never below one cent
    pub fn resize_note(
        &mut self,
        id: NoteId,
        duration: PianoRollPosition,
    ) -> Result<&PianoRollNote, CatalogError> {
        log::debug!("Resize note {} to {}", id, duration);
        self.update(id, |note| note.duration = duration.max(PianoRollPosition::CENT))
    }

    /// Notes overlapping `range`
    pub fn notes_in_range(&self, range: Range<PianoRollPosition>) -> Vec<&PianoRollNote> {
        self.notes
            .iter()
            .filter(|n| n.position < range.end && n.end() > range.start)
            .collect()
    }

    /// Bar in which the furthest note ends, 0 for an empty catalog
    pub fn last_bar(&self) -> u32 {
        self.notes.iter().map(|n| n.end().bar()).max().unwrap_or(0)
    }

    /// Number of bars to lay out. In auto mode this covers every note and at
    /// least `visible_bars`.
    pub fn bar_count(&self, bars: Bars, visible_bars: u32) -> u32 {
        match bars {
            Bars::Fixed(count) => count,
            Bars::Auto => self.last_bar().saturating_add(1).max(visible_bars),
        }
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Adds a note to the selection; unknown ids are ignored
    pub fn select(&mut self, id: NoteId) -> bool {
        self.get(id).is_some() && self.selected.insert(id)
    }

    pub fn deselect(&mut self, id: NoteId) -> bool {
        self.selected.remove(&id)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: NoteId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected notes in catalog order
    pub fn selected(&self) -> Vec<&PianoRollNote> {
        self.notes
            .iter()
            .filter(|n| self.selected.contains(&n.id))
            .collect()
    }

    /// Replaces the selection with every note overlapping a time range and
    /// pitch range (multi-select rectangle). Returns the selection size.
    pub fn select_region(
        &mut self,
        range: Range<PianoRollPosition>,
        pitches: RangeInclusive<u8>,
    ) -> usize {
        self.selected = self
            .notes
            .iter()
            .filter(|n| n.position < range.end && n.end() > range.start)
            .filter(|n| pitches.contains(&n.pitch))
            .map(|n| n.id)
            .collect();
        self.selected.len()
    }

    /// Shifts every selected note by `delta`. Notes stop at the grid start.
    pub fn move_selection(&mut self, delta: PianoRollPosition, direction: EditDirection) -> usize {
        let count = self.edit_selection(|note| {
            note.position = match direction {
                EditDirection::Forward => note.position + delta,
                EditDirection::Backward => note.position - delta,
            };
        });
        log::debug!("Moved {} notes {:?} by {}", count, direction, delta);
        count
    }

    /// Transposes every selected note, clamping to the MIDI pitch range
    pub fn transpose_selection(&mut self, semitones: i16) -> usize {
        self.edit_selection(|note| {
            note.pitch = (note.pitch as i16 + semitones).clamp(0, MIDI_MAX as i16) as u8;
        })
    }

    /// Lengthens or shortens every selected note by `delta`, never below
    /// one cent
    pub fn resize_selection(&mut self, delta: PianoRollPosition, direction: EditDirection) -> usize {
        let count = self.edit_selection(|note| {
            let duration = match direction {
                EditDirection::Forward => note.duration + delta,
                EditDirection::Backward => note.duration - delta,
            };
            note.duration = duration.max(PianoRollPosition::CENT);
        });
        log::debug!("Resized {} notes {:?} by {}", count, direction, delta);
        count
    }

    fn edit_selection<F>(&mut self, mut edit: F) -> usize
    where
        F: FnMut(&mut PianoRollNote),
    {
        let selected = &self.selected;
        let mut count = 0;
        for note in self.notes.iter_mut().filter(|n| selected.contains(&n.id)) {
            edit(note);
            count += 1;
        }
        self.sort();
        count
    }

    fn insertion_index(&self, note: &PianoRollNote) -> usize {
        self.notes
            .binary_search_by(|n| sort_key(n).cmp(&sort_key(note)))
            .unwrap_or_else(|index| index)
    }

    fn sort(&mut self) {
        self.notes.sort_by_key(sort_key);
    }
}

fn sort_key(note: &PianoRollNote) -> (PianoRollPosition, u8) {
    (note.position, note.pitch)
}
