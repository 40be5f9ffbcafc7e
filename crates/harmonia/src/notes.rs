//! Twelve-tone equal temperament pitch classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// Octave 4 reference pitches, A4 = 440 Hz.
const OCTAVE_4: [(PitchClass, &str, f64); 12] = [
    (PitchClass::C, "C", 261.63),
    (PitchClass::CSharp, "C#", 277.18),
    (PitchClass::D, "D", 293.66),
    (PitchClass::DSharp, "D#", 311.13),
    (PitchClass::E, "E", 329.63),
    (PitchClass::F, "F", 349.23),
    (PitchClass::FSharp, "F#", 369.99),
    (PitchClass::G, "G", 392.00),
    (PitchClass::GSharp, "G#", 415.30),
    (PitchClass::A, "A", 440.00),
    (PitchClass::ASharp, "A#", 466.16),
    (PitchClass::B, "B", 493.88),
];

impl PitchClass {
    pub fn semitone(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        OCTAVE_4[self.semitone()].1
    }

    /// Frequency in Hz: `freq(name) * 2^(octave - 4)`.
    pub fn frequency(&self, octave: i32) -> f64 {
        OCTAVE_4[self.semitone()].2 * 2f64.powi(octave - 4)
    }

    fn from_semitone(semitone: usize) -> PitchClass {
        OCTAVE_4[semitone % 12].0
    }
}

impl FromStr for PitchClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let letter = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| "Empty note name".to_string())?;
        let natural = OCTAVE_4
            .iter()
            .find(|(_, name, _)| name.len() == 1 && name.starts_with(letter))
            .map(|(pc, _, _)| pc.semitone())
            .ok_or_else(|| format!("Unknown note name: {}", s))?;

        match chars.as_str() {
            "" => Ok(PitchClass::from_semitone(natural)),
            "#" | "♯" => Ok(PitchClass::from_semitone(natural + 1)),
            "b" | "♭" => Ok(PitchClass::from_semitone(natural + 11)),
            _ => Err(format!("Unknown note name: {}", s)),
        }
    }
}

impl TryFrom<String> for PitchClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(value: PitchClass) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sharps_and_flats() {
        assert_eq!("F#".parse::<PitchClass>(), Ok(PitchClass::FSharp));
        assert_eq!("Bb".parse::<PitchClass>(), Ok(PitchClass::ASharp));
        assert_eq!("Cb".parse::<PitchClass>(), Ok(PitchClass::B));
        assert_eq!("e".parse::<PitchClass>(), Ok(PitchClass::E));
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_frequency_doubles_per_octave() {
        assert_eq!(PitchClass::A.frequency(4), 440.0);
        assert_eq!(PitchClass::A.frequency(5), 880.0);
        assert_eq!(PitchClass::A.frequency(2), 110.0);
        assert!((PitchClass::C.frequency(3) - 130.815).abs() < 1e-9);
    }
}
