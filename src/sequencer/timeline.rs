// Timeline - Tempo and time signature
// Converts grid positions to wall-clock seconds for MIDI export

use super::position::{CENTS_PER_SUBBEAT, NoteValue, PianoRollPosition, SUBBEATS_PER_BEAT};
use std::fmt;

/// Lowest accepted tempo
pub const MIN_BPM: f64 = 20.0;
/// Highest accepted tempo
pub const MAX_BPM: f64 = 999.0;

/// Errors raised when building timing values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimingError {
    #[error("Time signature numerator must be > 0")]
    ZeroBeats,

    #[error("Time signature denominator must be a power of 2, got {0}")]
    InvalidDenominator(u8),

    #[error("BPM must be between 20 and 999, got {0}")]
    InvalidBpm(f64),
}

/// Time signature (numerator/denominator)
/// Example: 4/4 time = TimeSignature { numerator: 4, denominator: 4 }
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,   // Beats per bar
    pub denominator: u8, // Note value of one beat (4 = quarter note)
}

impl TimeSignature {
    /// Creates a new time signature
    pub fn new(numerator: u8, denominator: u8) -> Result<Self, TimingError> {
        let signature = Self {
            numerator,
            denominator,
        };
        signature.validate()?;
        Ok(signature)
    }

    /// Common 4/4 time signature
    pub fn four_four() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }

    /// Common 3/4 time signature (waltz)
    pub fn three_four() -> Self {
        Self {
            numerator: 3,
            denominator: 4,
        }
    }

    /// Checks a signature that may have been built from raw fields
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.numerator == 0 {
            return Err(TimingError::ZeroBeats);
        }
        if !self.denominator.is_power_of_two() {
            return Err(TimingError::InvalidDenominator(self.denominator));
        }
        Ok(())
    }

    /// Number of beats per bar
    pub fn beats_per_bar(&self) -> u8 {
        self.numerator
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::four_four()
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Tempo in BPM (Beats Per Minute)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
}

impl Tempo {
    /// Creates a new tempo
    /// BPM must be in range [20.0, 999.0]
    pub fn new(bpm: f64) -> Result<Self, TimingError> {
        check_bpm(bpm)?;
        Ok(Self { bpm })
    }

    /// Get BPM value
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Set BPM value
    pub fn set_bpm(&mut self, bpm: f64) -> Result<(), TimingError> {
        check_bpm(bpm)?;
        self.bpm = bpm;
        Ok(())
    }

    /// Duration of one beat in seconds
    pub fn beat_duration_seconds(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Duration of one bar in seconds. On the piano roll grid a whole note
    /// spans exactly one bar, so this is also the whole-note duration.
    pub fn whole_note_seconds(&self, time_signature: &TimeSignature) -> f64 {
        self.beat_duration_seconds() * time_signature.beats_per_bar() as f64
    }

    /// Duration of a note value in seconds
    pub fn duration_of(&self, value: NoteValue, time_signature: &TimeSignature) -> f64 {
        value.duration().seconds(self, time_signature)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self { bpm: 120.0 }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} BPM", self.bpm)
    }
}

fn check_bpm(bpm: f64) -> Result<(), TimingError> {
    if !bpm.is_finite() || !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        return Err(TimingError::InvalidBpm(bpm));
    }
    Ok(())
}

impl PianoRollPosition {
    /// Wall-clock offset of this position from the start of the grid.
    ///
    /// Each field is weighted by the duration of one unit of that field:
    /// a bar, a beat (bar / beats per bar), a subbeat (beat / 4) and a
    /// cent (subbeat / 240).
    pub fn seconds(&self, tempo: &Tempo, time_signature: &TimeSignature) -> f64 {
        let bar_duration = tempo.whole_note_seconds(time_signature);
        let beat_duration = bar_duration / time_signature.beats_per_bar() as f64;
        let subbeat_duration = beat_duration / SUBBEATS_PER_BEAT as f64;
        let cent_duration = subbeat_duration / CENTS_PER_SUBBEAT as f64;

        bar_duration * self.bar() as f64
            + beat_duration * self.beat() as f64
            + subbeat_duration * self.subbeat() as f64
            + cent_duration * self.cent() as f64
    }
}

/// Seconds from the grid start to `position` at `bpm` in a bar of
/// `beats_per_bar` quarter-note beats.
///
/// `bpm` must lie in the same `MIN_BPM..=MAX_BPM` range a [`Tempo`] accepts;
/// anything else is a `TimingError` rather than a silently clamped tempo.
/// Callers holding a `Tempo` already can use [`PianoRollPosition::seconds`].
pub fn to_seconds(
    position: PianoRollPosition,
    bpm: f64,
    beats_per_bar: u8,
) -> Result<f64, TimingError> {
    let tempo = Tempo::new(bpm)?;
    let time_signature = TimeSignature::new(beats_per_bar, 4)?;
    Ok(position.seconds(&tempo, &time_signature))
}
