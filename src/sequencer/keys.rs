// Keys - Pitch rows shown by the piano roll
// Rows run top to bottom from the highest pitch

use crate::sequencer::note::MIDI_MAX;
use serde::{Deserialize, Serialize};

/// Which pitches get a row in the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keys {
    /// Every MIDI note between two bounds, inclusive
    Ranged(u8, u8),
    /// An explicit set of MIDI notes
    Custom(Vec<u8>),
}

impl Keys {
    /// Full MIDI range 0-127
    pub fn full() -> Self {
        Keys::Ranged(0, MIDI_MAX)
    }

    /// Row pitches, highest first. Out of range and repeated pitches are
    /// dropped.
    pub fn pitches(&self) -> Vec<u8> {
        match self {
            Keys::Ranged(a, b) => {
                let lo = (*a).min(*b);
                let hi = (*a).max(*b).min(MIDI_MAX);
                (lo..=hi).rev().collect()
            }
            Keys::Custom(pitches) => {
                let mut pitches: Vec<u8> =
                    pitches.iter().copied().filter(|p| *p <= MIDI_MAX).collect();
                pitches.sort_unstable_by(|a, b| b.cmp(a));
                pitches.dedup();
                pitches
            }
        }
    }

    pub fn row_count(&self) -> usize {
        self.pitches().len()
    }

    /// Pitch shown on row `row`, counting from the top
    pub fn pitch_at_row(&self, row: usize) -> Option<u8> {
        self.pitches().get(row).copied()
    }

    /// Row index of `pitch`, or `None` if it has no row
    pub fn row_of(&self, pitch: u8) -> Option<usize> {
        self.pitches().iter().position(|p| *p == pitch)
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::full()
    }
}
