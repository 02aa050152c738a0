// MIDI export - Turns piano roll notes into timed events and Standard MIDI Files

use crate::midi::event::{MAX_CHANNEL, MidiEvent};
use crate::sequencer::note::{NoteError, PianoRollNote};
use crate::sequencer::position::{CENTS_PER_BEAT, CENTS_PER_SUBBEAT, PianoRollPosition};
use crate::sequencer::timeline::{Tempo, TimeSignature};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

/// SMF resolution: one tick per cent
pub const TICKS_PER_QUARTER: u16 = CENTS_PER_BEAT as u16;

/// Largest delta time a variable-length quantity can hold
pub const MAX_DELTA_TICKS: u64 = 0x0FFF_FFFF;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("MIDI channel must be 0-15, got {0}")]
    InvalidChannel(u8),

    #[error("Invalid note: {0}")]
    InvalidNote(#[from] NoteError),

    #[error("Gap of {0} ticks between events is too long for a MIDI file")]
    DeltaOverflow(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A MIDI event at an offset from the start of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedMidiEvent {
    pub seconds: f64,
    pub event: MidiEvent,
}

/// Ticks from the grid start to `position`. Each field is weighted by its own
/// unit so the result stays linear in the fields for any beats per bar.
pub fn position_ticks(position: PianoRollPosition, time_signature: &TimeSignature) -> u64 {
    let bar_ticks = CENTS_PER_BEAT as u64 * time_signature.beats_per_bar() as u64;
    position.bar() as u64 * bar_ticks
        + position.beat() as u64 * CENTS_PER_BEAT as u64
        + position.subbeat() as u64 * CENTS_PER_SUBBEAT as u64
        + position.cent() as u64
}

/// Note-on at the start and note-off at start + duration for every note.
/// Starts and durations are converted separately, then added.
fn note_events(
    notes: &[PianoRollNote],
    time_signature: &TimeSignature,
) -> Vec<(u64, PianoRollNote, MidiEvent)> {
    let mut events = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        let start = position_ticks(note.position, time_signature);
        let end = start + position_ticks(note.duration, time_signature);
        events.push((
            start,
            *note,
            MidiEvent::NoteOn {
                note: note.pitch,
                velocity: note.velocity,
            },
        ));
        events.push((end, *note, MidiEvent::NoteOff { note: note.pitch }));
    }

    // Stable sort: at the same tick, note-offs go first so a repeated pitch
    // is released before it is struck again. The off of a note with no length
    // still follows its own on.
    events.sort_by_key(|(tick, note, event)| (*tick, event_rank(note, event)));
    events
}

fn event_rank(note: &PianoRollNote, event: &MidiEvent) -> u8 {
    match event {
        MidiEvent::NoteOff { .. } if note.duration == PianoRollPosition::ZERO => 2,
        MidiEvent::NoteOff { .. } => 0,
        MidiEvent::NoteOn { .. } => 1,
    }
}

/// Timed note events for `notes`, sorted by time
pub fn export_events(
    notes: &[PianoRollNote],
    tempo: &Tempo,
    time_signature: &TimeSignature,
) -> Vec<TimedMidiEvent> {
    note_events(notes, time_signature)
        .into_iter()
        .map(|(_, note, event)| {
            let start = note.position.seconds(tempo, time_signature);
            let seconds = if event.is_note_off() {
                start + note.duration.seconds(tempo, time_signature)
            } else {
                start
            };
            TimedMidiEvent { seconds, event }
        })
        .collect()
}

/// Builds a single track SMF with tempo and time signature meta events.
/// Every note is validated first since MIDI data bytes only hold 7 bits.
pub fn build_smf(
    notes: &[PianoRollNote],
    tempo: &Tempo,
    time_signature: &TimeSignature,
    channel: u8,
) -> Result<Smf<'static>, ExportError> {
    if channel > MAX_CHANNEL {
        return Err(ExportError::InvalidChannel(channel));
    }
    for note in notes {
        note.validate()?;
    }

    let mut track: Vec<TrackEvent<'static>> = Vec::new();
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(midly::num::u24::from(
            (60_000_000.0 / tempo.bpm()).round() as u32,
        ))),
    });
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TimeSignature(
            time_signature.numerator,
            time_signature.denominator.trailing_zeros() as u8,
            24,
            8,
        )),
    });

    let mut last_tick = 0;
    for (tick, _, event) in note_events(notes, time_signature) {
        let delta = tick - last_tick;
        if delta > MAX_DELTA_TICKS {
            return Err(ExportError::DeltaOverflow(delta));
        }
        last_tick = tick;

        let message = match event {
            MidiEvent::NoteOn { note, velocity } => MidiMessage::NoteOn {
                key: note.into(),
                vel: velocity.into(),
            },
            MidiEvent::NoteOff { note } => MidiMessage::NoteOff {
                key: note.into(),
                vel: 0.into(),
            },
        };
        track.push(TrackEvent {
            delta: (delta as u32).into(),
            kind: TrackEventKind::Midi {
                channel: channel.into(),
                message,
            },
        });
    }
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    Ok(Smf {
        header: Header {
            format: Format::SingleTrack,
            timing: Timing::Metrical(TICKS_PER_QUARTER.into()),
        },
        tracks: vec![track],
    })
}

/// Encodes `notes` as Standard MIDI File bytes
pub fn export_smf(
    notes: &[PianoRollNote],
    tempo: &Tempo,
    time_signature: &TimeSignature,
    channel: u8,
) -> Result<Vec<u8>, ExportError> {
    let smf = build_smf(notes, tempo, time_signature, channel)?;
    let mut out = Vec::new();
    smf.write_std(&mut out)?;
    log::debug!(
        "Exported {} notes as {} bytes of SMF at {}",
        notes.len(),
        out.len(),
        tempo
    );
    Ok(out)
}
