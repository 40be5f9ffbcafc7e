//! In-place passes over generated phrases.

use crate::phrase::MelodicPhrase;
use aphrodite::{AspectRelation, AspectType, Chart, Modality};
use serde::{Deserialize, Serialize};

/// Interval an aspect imposes between two voices.
pub fn aspect_semitones(aspect_type: AspectType) -> i32 {
    match aspect_type {
        AspectType::Conjunction => 0,
        AspectType::Sextile => 4,
        AspectType::Square => 6,
        AspectType::Trine => 7,
        AspectType::Opposition => 12,
    }
}

pub fn interval_name(aspect_type: AspectType) -> &'static str {
    match aspect_type {
        AspectType::Conjunction => "unison",
        AspectType::Sextile => "major third",
        AspectType::Square => "tritone",
        AspectType::Trine => "perfect fifth",
        AspectType::Opposition => "octave",
    }
}

/// Retune the second planet's phrase against the first for every aspect.
///
/// Only note indices present in both phrases change; relations whose planets
/// have no phrase are ignored.
pub fn apply_harmonic_relationships(phrases: &mut [MelodicPhrase], aspects: &[AspectRelation]) {
    for aspect in aspects {
        let first = phrases.iter().position(|p| p.planet == aspect.planet1);
        let second = phrases.iter().position(|p| p.planet == aspect.planet2);
        let (Some(first), Some(second)) = (first, second) else {
            continue;
        };
        if first == second {
            continue;
        }

        let ratio = 2f64.powf(aspect_semitones(aspect.aspect_type) as f64 / 12.0);
        let source: Vec<f64> = phrases[first].notes.iter().map(|n| n.frequency).collect();
        for (note, frequency) in phrases[second].notes.iter_mut().zip(source) {
            note.frequency = frequency * ratio;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmPattern {
    QuarterNotes,
    WholeNotes,
    EighthNotes,
}

impl RhythmPattern {
    pub fn for_modality(modality: Modality) -> Self {
        match modality {
            Modality::Cardinal => RhythmPattern::QuarterNotes,
            Modality::Fixed => RhythmPattern::WholeNotes,
            Modality::Mutable => RhythmPattern::EighthNotes,
        }
    }

    pub fn duration_multiplier(&self) -> f64 {
        match self {
            RhythmPattern::QuarterNotes => 1.0,
            RhythmPattern::WholeNotes => 2.0,
            RhythmPattern::EighthNotes => 0.5,
        }
    }
}

/// Scale note durations by the modality of each phrase's planet in the chart.
pub fn apply_rhythmic_patterns(phrases: &mut [MelodicPhrase], chart: &Chart) {
    for phrase in phrases.iter_mut() {
        let Some(position) = chart.planet(phrase.planet) else {
            continue;
        };
        let multiplier = RhythmPattern::for_modality(position.sign.modality).duration_multiplier();
        for note in phrase.notes.iter_mut() {
            note.duration *= multiplier;
        }
    }
}
