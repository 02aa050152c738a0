// MIDI channel voice events produced from piano roll notes

/// Highest MIDI channel (0-based)
pub const MAX_CHANNEL: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
}

impl MidiEvent {
    /// MIDI note number carried by the event
    pub fn note(&self) -> u8 {
        match self {
            MidiEvent::NoteOn { note, .. } | MidiEvent::NoteOff { note } => *note,
        }
    }

    pub fn is_note_off(&self) -> bool {
        matches!(self, MidiEvent::NoteOff { .. })
    }

    /// Raw three byte message on `channel` (masked to 0-15). Data bytes are
    /// masked to 7 bits.
    pub fn to_bytes(&self, channel: u8) -> [u8; 3] {
        let channel = channel & 0x0F;
        match *self {
            MidiEvent::NoteOn { note, velocity } => [0x90 | channel, note & 0x7F, velocity & 0x7F],
            MidiEvent::NoteOff { note } => [0x80 | channel, note & 0x7F, 0],
        }
    }

    /// Parse a raw MIDI message
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if data.len() < 2 {
            return None;
        }

        match status & 0xF0 {
            0x90 => {
                let note = data[0];
                let velocity = data[1];
                // Velocity 0 = Note Off
                if velocity == 0 {
                    Some(MidiEvent::NoteOff { note })
                } else {
                    Some(MidiEvent::NoteOn { note, velocity })
                }
            }
            0x80 => Some(MidiEvent::NoteOff { note: data[0] }),
            _ => None,
        }
    }
}
