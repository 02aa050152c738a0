// Piano roll position - Fixed-radix musical time
// bar.beat.subbeat.cent coordinates shared by notes, the grid and MIDI export

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Beats in one bar of the grid
pub const BEATS_PER_BAR: u32 = 4;
/// Subbeats in one beat
pub const SUBBEATS_PER_BEAT: u32 = 4;
/// Cents in one subbeat (1/64 note = 60 cents)
pub const CENTS_PER_SUBBEAT: u32 = 240;
/// Cents in one beat
pub const CENTS_PER_BEAT: u32 = CENTS_PER_SUBBEAT * SUBBEATS_PER_BEAT;
/// Cents in one bar
pub const CENTS_PER_BAR: u32 = CENTS_PER_BEAT * BEATS_PER_BAR;

/// Errors raised when building a position from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Negative {field} value: {value}")]
    NegativeField { field: &'static str, value: i64 },

    #[error("{field} value {value} is out of range (must be below {limit})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        limit: u32,
    },

    #[error("Bar value {0} exceeds the maximum bar")]
    BarOverflow(i64),

    #[error("Invalid position text: {0:?}")]
    Parse(String),
}

/// Canonical note lengths used for grid labels and snapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteValue {
    DoubleWhole,
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl NoteValue {
    /// All note values, longest first
    pub const ALL: [NoteValue; 8] = [
        NoteValue::DoubleWhole,
        NoteValue::Whole,
        NoteValue::Half,
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
        NoteValue::ThirtySecond,
        NoteValue::SixtyFourth,
    ];

    /// Length of this note value on the grid.
    ///
    /// This table is wider than [`PianoRollPosition::note_value`]: a
    /// position is never classified as `DoubleWhole` or `Sixteenth`, yet both
    /// have a duration here.
    pub fn duration(self) -> PianoRollPosition {
        match self {
            NoteValue::DoubleWhole => PianoRollPosition::new(2, 0, 0, 0),
            NoteValue::Whole => PianoRollPosition::new(1, 0, 0, 0),
            NoteValue::Half => PianoRollPosition::new(0, 2, 0, 0),
            NoteValue::Quarter => PianoRollPosition::new(0, 1, 0, 0),
            NoteValue::Eighth => PianoRollPosition::new(0, 0, 2, 0),
            NoteValue::Sixteenth => PianoRollPosition::new(0, 0, 1, 0),
            NoteValue::ThirtySecond => PianoRollPosition::new(0, 0, 0, 120),
            NoteValue::SixtyFourth => PianoRollPosition::new(0, 0, 0, 60),
        }
    }
}

impl fmt::Display for NoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoteValue::DoubleWhole => "2/1",
            NoteValue::Whole => "1/1",
            NoteValue::Half => "1/2",
            NoteValue::Quarter => "1/4",
            NoteValue::Eighth => "1/8",
            NoteValue::Sixteenth => "1/16",
            NoteValue::ThirtySecond => "1/32",
            NoteValue::SixtyFourth => "1/64",
        };
        f.write_str(label)
    }
}

/// Position (or duration) on the piano roll grid
///
/// A single non-negative time value in mixed radix: `bar` is unbounded,
/// `beat` and `subbeat` count 0..4 and `cent` counts 0..240. Every
/// constructor and operator keeps the bounded fields in range, so the
/// derived ordering is the lexicographic order of (bar, beat, subbeat, cent).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "PositionFields", into = "PositionFields")]
pub struct PianoRollPosition {
    bar: u32,
    beat: u8,
    subbeat: u8,
    cent: u16,
}

/// Raw, unvalidated field layout of a position as it appears in documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFields {
    pub bar: u32,
    pub beat: u32,
    pub subbeat: u32,
    pub cent: u32,
}

impl PianoRollPosition {
    /// Start of the grid, identity for addition and floor for subtraction
    pub const ZERO: Self = Self {
        bar: 0,
        beat: 0,
        subbeat: 0,
        cent: 0,
    };

    /// Smallest step on the grid
    pub const CENT: Self = Self {
        bar: 0,
        beat: 0,
        subbeat: 0,
        cent: 1,
    };

    /// Creates a position, carrying digits that exceed their radix.
    ///
    /// `new(1, 4, 2, 232)` is the same position as `new(2, 0, 2, 232)`.
    /// Use [`PianoRollPosition::from_digits`] to reject such input instead.
    pub fn new(bar: u32, beat: u32, subbeat: u32, cent: u32) -> Self {
        Self::carried(bar as u64, beat as u64, subbeat as u64, cent as u64)
    }

    /// Creates a position from digits that must already be in range
    pub fn from_digits(bar: u32, beat: u32, subbeat: u32, cent: u32) -> Result<Self, PositionError> {
        check_digit("beat", beat, BEATS_PER_BAR)?;
        check_digit("subbeat", subbeat, SUBBEATS_PER_BEAT)?;
        check_digit("cent", cent, CENTS_PER_SUBBEAT)?;
        Ok(Self {
            bar,
            beat: beat as u8,
            subbeat: subbeat as u8,
            cent: cent as u16,
        })
    }

    /// Creates a position from signed input, rejecting negative fields
    pub fn try_new(bar: i64, beat: i64, subbeat: i64, cent: i64) -> Result<Self, PositionError> {
        let bar_value = non_negative("bar", bar)?;
        let beat = non_negative("beat", beat)?;
        let subbeat = non_negative("subbeat", subbeat)?;
        let cent = non_negative("cent", cent)?;

        if Self::carry_bar(bar_value, beat, subbeat, cent) > u32::MAX as u64 {
            return Err(PositionError::BarOverflow(bar));
        }
        Ok(Self::carried(bar_value, beat, subbeat, cent))
    }

    /// Creates a position from a flat cent count
    pub fn from_total_cents(total: u64) -> Self {
        Self::carried(0, 0, 0, total)
    }

    pub fn bar(&self) -> u32 {
        self.bar
    }

    pub fn beat(&self) -> u32 {
        self.beat as u32
    }

    pub fn subbeat(&self) -> u32 {
        self.subbeat as u32
    }

    pub fn cent(&self) -> u32 {
        self.cent as u32
    }

    /// Total length of this position in cents
    pub fn total_cents(&self) -> u64 {
        self.bar as u64 * CENTS_PER_BAR as u64
            + self.beat as u64 * CENTS_PER_BEAT as u64
            + self.subbeat as u64 * CENTS_PER_SUBBEAT as u64
            + self.cent as u64
    }

    /// True if the position falls exactly on a bar line
    pub fn is_bar_position(&self) -> bool {
        self.beat == 0 && self.subbeat == 0 && self.cent == 0
    }

    /// Snaps the position to the start of its bar
    pub fn flatten(&mut self) {
        self.beat = 0;
        self.subbeat = 0;
        self.cent = 0;
    }

    /// Copy of this position snapped to the start of its bar
    pub fn flattened(self) -> Self {
        let mut position = self;
        position.flatten();
        position
    }

    /// Position one cent later
    pub fn next(self) -> Self {
        self + Self::CENT
    }

    /// Position one cent earlier, never below [`PianoRollPosition::ZERO`]
    pub fn previous(self) -> Self {
        self - Self::CENT
    }

    /// Subtraction that reports an underflow instead of clamping to zero
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let (cent, borrow) = borrow_digit(self.cent as i64 - rhs.cent as i64, CENTS_PER_SUBBEAT);
        let (subbeat, borrow) = borrow_digit(
            self.subbeat as i64 - rhs.subbeat as i64 - borrow,
            SUBBEATS_PER_BEAT,
        );
        let (beat, borrow) =
            borrow_digit(self.beat as i64 - rhs.beat as i64 - borrow, BEATS_PER_BAR);
        let bar = self.bar as i64 - rhs.bar as i64 - borrow;
        if bar < 0 {
            return None;
        }

        Some(Self {
            bar: bar as u32,
            beat: beat as u8,
            subbeat: subbeat as u8,
            cent: cent as u16,
        })
    }

    /// Note value tag of this position, if it matches one exactly.
    ///
    /// The first matching row wins. Any other combination (a cent of 180,
    /// a lone subbeat of 1 or 3) has no tag.
    pub fn note_value(&self) -> Option<NoteValue> {
        match (self.beat, self.subbeat, self.cent) {
            (0, 0, 0) => Some(NoteValue::Whole),
            (2, 0, 0) => Some(NoteValue::Half),
            (_, 0, 0) => Some(NoteValue::Quarter),
            (_, 2, 0) => Some(NoteValue::Eighth),
            (_, _, 120) => Some(NoteValue::ThirtySecond),
            (_, _, 60) => Some(NoteValue::SixtyFourth),
            _ => None,
        }
    }

    /// Truncates the position down to a multiple of `value`'s duration
    pub fn snapped_to(self, value: NoteValue) -> Self {
        let step = value.duration().total_cents();
        let total = self.total_cents();
        Self::from_total_cents(total - total % step)
    }

    /// Carries each digit into the next coarser one; the bar saturates
    fn carried(bar: u64, beat: u64, subbeat: u64, cent: u64) -> Self {
        let subbeat = subbeat + cent / CENTS_PER_SUBBEAT as u64;
        let beat = beat + subbeat / SUBBEATS_PER_BEAT as u64;
        let bar = bar.saturating_add(beat / BEATS_PER_BAR as u64);

        Self {
            bar: bar.min(u32::MAX as u64) as u32,
            beat: (beat % BEATS_PER_BAR as u64) as u8,
            subbeat: (subbeat % SUBBEATS_PER_BEAT as u64) as u8,
            cent: (cent % CENTS_PER_SUBBEAT as u64) as u16,
        }
    }

    fn carry_bar(bar: u64, beat: u64, subbeat: u64, cent: u64) -> u64 {
        let subbeat = subbeat + cent / CENTS_PER_SUBBEAT as u64;
        let beat = beat + subbeat / SUBBEATS_PER_BEAT as u64;
        bar.saturating_add(beat / BEATS_PER_BAR as u64)
    }
}

fn check_digit(field: &'static str, value: u32, limit: u32) -> Result<(), PositionError> {
    if value >= limit {
        return Err(PositionError::OutOfRange {
            field,
            value,
            limit,
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, PositionError> {
    if value < 0 {
        return Err(PositionError::NegativeField { field, value });
    }
    Ok(value as u64)
}

/// Returns the digit folded back into `0..radix` and the borrow taken
fn borrow_digit(value: i64, radix: u32) -> (i64, i64) {
    let radix = radix as i64;
    (value.rem_euclid(radix), -value.div_euclid(radix))
}

impl Add for PianoRollPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::carried(
            self.bar as u64 + rhs.bar as u64,
            self.beat as u64 + rhs.beat as u64,
            self.subbeat as u64 + rhs.subbeat as u64,
            self.cent as u64 + rhs.cent as u64,
        )
    }
}

impl AddAssign for PianoRollPosition {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for PianoRollPosition {
    type Output = Self;

    /// Saturating subtraction: anything that would go below bar 0 is zero
    fn sub(self, rhs: Self) -> Self {
        match self.checked_sub(rhs) {
            Some(position) => position,
            None => {
                log::trace!("Position {} - {} clamped to zero", self, rhs);
                Self::ZERO
            }
        }
    }
}

impl SubAssign for PianoRollPosition {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl From<PianoRollPosition> for PositionFields {
    fn from(position: PianoRollPosition) -> Self {
        Self {
            bar: position.bar,
            beat: position.beat(),
            subbeat: position.subbeat(),
            cent: position.cent(),
        }
    }
}

impl TryFrom<PositionFields> for PianoRollPosition {
    type Error = PositionError;

    fn try_from(fields: PositionFields) -> Result<Self, Self::Error> {
        Self::from_digits(fields.bar, fields.beat, fields.subbeat, fields.cent)
    }
}

impl fmt::Display for PianoRollPosition {
    /// Shortest dotted form: "3", "1.2", "1.2.3" or "1.2.3.120"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.beat == 0 && self.subbeat == 0 && self.cent == 0 {
            write!(f, "{}", self.bar)
        } else if self.subbeat == 0 && self.cent == 0 {
            write!(f, "{}.{}", self.bar, self.beat)
        } else if self.cent == 0 {
            write!(f, "{}.{}.{}", self.bar, self.beat, self.subbeat)
        } else {
            write!(f, "{}.{}.{}.{}", self.bar, self.beat, self.subbeat, self.cent)
        }
    }
}

impl FromStr for PianoRollPosition {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() > 4 {
            return Err(PositionError::Parse(s.to_string()));
        }

        let mut digits = [0u32; 4];
        for (digit, part) in digits.iter_mut().zip(&parts) {
            // Plain ASCII digits only; `u32::from_str` would also take a sign
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PositionError::Parse(s.to_string()));
            }
            *digit = part
                .parse::<u32>()
                .map_err(|_| PositionError::Parse(s.to_string()))?;
        }

        Self::from_digits(digits[0], digits[1], digits[2], digits[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(bar: u32, beat: u32, subbeat: u32, cent: u32) -> PianoRollPosition {
        PianoRollPosition::new(bar, beat, subbeat, cent)
    }

    #[test]
    fn test_zero() {
        assert_eq!(pos(0, 0, 0, 0), PianoRollPosition::ZERO);
        assert_eq!(PianoRollPosition::default(), PianoRollPosition::ZERO);
        assert!(PianoRollPosition::ZERO.is_bar_position());
    }

    #[test]
    fn test_add_carries_cents_into_subbeat() {
        let result = PianoRollPosition::ZERO + pos(0, 0, 0, 240);
        assert_eq!(result, pos(0, 0, 1, 0));
        assert_eq!(result.subbeat(), 1);
        assert_eq!(result.cent(), 0);
    }

    #[test]
    fn test_add_cascades_to_bar() {
        let result = pos(0, 3, 3, 239) + pos(0, 0, 0, 1);
        assert_eq!(result, pos(1, 0, 0, 0));

        let result = pos(2, 3, 2, 200) + pos(1, 2, 3, 100);
        // cent 300 -> 60 carry 1, subbeat 6 -> 2 carry 1, beat 6 -> 2 carry 1
        assert_eq!(result, pos(4, 2, 2, 60));
    }

    #[test]
    fn test_new_normalizes_overflowing_digits() {
        let position = pos(1, 4, 2, 232);
        assert_eq!(position.bar(), 2);
        assert_eq!(position.beat(), 0);
        assert_eq!(position.subbeat(), 2);
        assert_eq!(position.cent(), 232);
    }

    #[test]
    fn test_subtract_with_borrow() {
        let a = pos(2, 3, 3, 123);
        let b = pos(1, 4, 2, 232);
        assert_eq!(a - b, pos(0, 3, 0, 131));
    }

    #[test]
    fn test_subtract_saturates_at_zero() {
        let a = pos(2, 3, 3, 123);
        let b = pos(1, 4, 2, 232);
        assert_eq!(b - a, PianoRollPosition::ZERO);
        assert_eq!(b.checked_sub(a), None);
        assert!(a > b);
    }

    #[test]
    fn test_subtract_zero_is_identity() {
        let p = pos(5, 1, 2, 77);
        assert_eq!(p - PianoRollPosition::ZERO, p);
        assert_eq!(p + PianoRollPosition::ZERO, p);
    }

    #[test]
    fn test_assign_operators() {
        let mut p = pos(0, 3, 3, 200);
        p += pos(0, 0, 0, 40);
        assert_eq!(p, pos(1, 0, 0, 0));
        p -= pos(0, 0, 0, 1);
        assert_eq!(p, pos(0, 3, 3, 239));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(pos(1, 0, 0, 0) > pos(0, 3, 3, 239));
        assert!(pos(0, 2, 0, 0) > pos(0, 1, 3, 239));
        assert!(pos(0, 0, 2, 0) > pos(0, 0, 1, 239));
        assert!(pos(0, 0, 0, 2) > pos(0, 0, 0, 1));
        assert_eq!(pos(3, 1, 1, 1).cmp(&pos(3, 1, 1, 1)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_next_and_previous() {
        assert_eq!(pos(0, 0, 0, 239).next(), pos(0, 0, 1, 0));
        assert_eq!(pos(0, 3, 3, 239).next(), pos(1, 0, 0, 0));
        assert_eq!(pos(1, 0, 0, 0).previous(), pos(0, 3, 3, 239));
        assert_eq!(pos(1, 0, 0, 0).previous().next(), pos(1, 0, 0, 0));
    }

    #[test]
    fn test_previous_returns_decremented_value() {
        // previous() must not hand back the receiver unchanged
        let p = pos(2, 1, 1, 10);
        assert_ne!(p.previous(), p);
        assert_eq!(p.previous(), pos(2, 1, 1, 9));
    }

    #[test]
    fn test_previous_floors_at_zero() {
        assert_eq!(PianoRollPosition::ZERO.previous(), PianoRollPosition::ZERO);
    }

    #[test]
    fn test_flatten() {
        let mut p = pos(3, 2, 1, 17);
        assert!(!p.is_bar_position());
        p.flatten();
        assert_eq!(p, pos(3, 0, 0, 0));
        assert!(p.is_bar_position());
        assert_eq!(pos(4, 1, 0, 0).flattened(), pos(4, 0, 0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(pos(3, 0, 0, 0).to_string(), "3");
        assert_eq!(pos(1, 2, 0, 0).to_string(), "1.2");
        assert_eq!(pos(1, 2, 3, 0).to_string(), "1.2.3");
        assert_eq!(pos(1, 0, 0, 5).to_string(), "1.0.0.5");
    }

    #[test]
    fn test_parse() {
        assert_eq!("3".parse::<PianoRollPosition>(), Ok(pos(3, 0, 0, 0)));
        assert_eq!("1.2.3.4".parse::<PianoRollPosition>(), Ok(pos(1, 2, 3, 4)));
        assert_eq!(" 0.1 ".parse::<PianoRollPosition>(), Ok(pos(0, 1, 0, 0)));

        let p = pos(7, 3, 1, 99);
        assert_eq!(p.to_string().parse::<PianoRollPosition>(), Ok(p));
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert!(matches!(
            "".parse::<PianoRollPosition>(),
            Err(PositionError::Parse(_))
        ));
        assert!(matches!(
            "1.2.3.4.5".parse::<PianoRollPosition>(),
            Err(PositionError::Parse(_))
        ));
        assert!(matches!(
            "1.-2".parse::<PianoRollPosition>(),
            Err(PositionError::Parse(_))
        ));
        assert_eq!(
            "1.4".parse::<PianoRollPosition>(),
            Err(PositionError::OutOfRange {
                field: "beat",
                value: 4,
                limit: 4
            })
        );
    }

    #[test]
    fn test_try_new_rejects_negative_fields() {
        assert_eq!(
            PianoRollPosition::try_new(0, -1, 0, 0),
            Err(PositionError::NegativeField {
                field: "beat",
                value: -1
            })
        );
        assert_eq!(
            PianoRollPosition::try_new(1, 0, 0, 480),
            Ok(pos(1, 0, 2, 0))
        );
        assert_eq!(
            PianoRollPosition::try_new(u32::MAX as i64 + 1, 0, 0, 0),
            Err(PositionError::BarOverflow(u32::MAX as i64 + 1))
        );
    }

    #[test]
    fn test_from_digits_is_strict() {
        assert!(PianoRollPosition::from_digits(0, 3, 3, 239).is_ok());
        assert!(matches!(
            PianoRollPosition::from_digits(0, 0, 4, 0),
            Err(PositionError::OutOfRange { field: "subbeat", .. })
        ));
        assert!(matches!(
            PianoRollPosition::from_digits(0, 0, 0, 240),
            Err(PositionError::OutOfRange { field: "cent", .. })
        ));
    }

    #[test]
    fn test_note_value_table() {
        assert_eq!(pos(0, 0, 0, 0).note_value(), Some(NoteValue::Whole));
        assert_eq!(pos(5, 0, 0, 0).note_value(), Some(NoteValue::Whole));
        assert_eq!(pos(0, 2, 0, 0).note_value(), Some(NoteValue::Half));
        assert_eq!(pos(0, 1, 0, 0).note_value(), Some(NoteValue::Quarter));
        assert_eq!(pos(0, 3, 0, 0).note_value(), Some(NoteValue::Quarter));
        assert_eq!(pos(0, 1, 2, 0).note_value(), Some(NoteValue::Eighth));
        assert_eq!(pos(0, 1, 1, 120).note_value(), Some(NoteValue::ThirtySecond));
        assert_eq!(pos(0, 0, 3, 60).note_value(), Some(NoteValue::SixtyFourth));
        assert_eq!(pos(0, 1, 0, 30).note_value(), None);
        assert_eq!(pos(0, 0, 1, 0).note_value(), None);
        assert_eq!(pos(0, 0, 0, 180).note_value(), None);
    }

    #[test]
    fn test_note_value_durations() {
        assert_eq!(NoteValue::DoubleWhole.duration(), pos(2, 0, 0, 0));
        assert_eq!(NoteValue::Whole.duration(), pos(1, 0, 0, 0));
        assert_eq!(NoteValue::Half.duration(), pos(0, 2, 0, 0));
        assert_eq!(NoteValue::Quarter.duration(), pos(0, 1, 0, 0));
        assert_eq!(NoteValue::Eighth.duration(), pos(0, 0, 2, 0));
        assert_eq!(NoteValue::Sixteenth.duration(), pos(0, 0, 1, 0));
        assert_eq!(NoteValue::ThirtySecond.duration(), pos(0, 0, 0, 120));
        assert_eq!(NoteValue::SixtyFourth.duration(), pos(0, 0, 0, 60));
    }

    #[test]
    fn test_note_value_table_is_asymmetric() {
        // A sixteenth has a duration but is never produced by classification
        let sixteenth = NoteValue::Sixteenth.duration();
        assert_eq!(sixteenth.note_value(), None);
        // A double whole duration lands on a bar line and reads as whole
        assert_eq!(NoteValue::DoubleWhole.duration().note_value(), Some(NoteValue::Whole));
    }

    #[test]
    fn test_snapped_to() {
        let p = pos(1, 2, 3, 200);
        assert_eq!(p.snapped_to(NoteValue::Whole), pos(1, 0, 0, 0));
        assert_eq!(p.snapped_to(NoteValue::Half), pos(1, 2, 0, 0));
        assert_eq!(p.snapped_to(NoteValue::Quarter), pos(1, 2, 0, 0));
        assert_eq!(p.snapped_to(NoteValue::Eighth), pos(1, 2, 2, 0));
        assert_eq!(p.snapped_to(NoteValue::ThirtySecond), pos(1, 2, 3, 120));
        assert_eq!(pos(1, 0, 0, 0).snapped_to(NoteValue::DoubleWhole), PianoRollPosition::ZERO);
    }

    #[test]
    fn test_total_cents_round_trip() {
        let p = pos(3, 2, 1, 45);
        assert_eq!(p.total_cents(), 3 * 3840 + 2 * 960 + 240 + 45);
        assert_eq!(PianoRollPosition::from_total_cents(p.total_cents()), p);
    }

    #[test]
    fn test_serde_validates_fields() {
        let p = pos(2, 1, 3, 100);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"bar":2,"beat":1,"subbeat":3,"cent":100}"#);
        assert_eq!(serde_json::from_str::<PianoRollPosition>(&json).unwrap(), p);

        let invalid = r#"{"bar":0,"beat":9,"subbeat":0,"cent":0}"#;
        assert!(serde_json::from_str::<PianoRollPosition>(invalid).is_err());
    }

    #[test]
    fn test_note_value_labels() {
        assert_eq!(NoteValue::Quarter.to_string(), "1/4");
        assert_eq!(NoteValue::SixtyFourth.to_string(), "1/64");
    }
}
