//! Role-based phrase generation.
//!
//! Every voiced planet gets one phrase. Planets are visited in house order,
//! and each note's pitch is drawn from the scale with a bias towards the
//! planet's degree and house.

use crate::mapping::MusicalRole;
use crate::resolver::{MusicalConfiguration, PlanetVoice};
use crate::selection::{scale_degree_weights, select_weighted};
use aphrodite::{Chart, Element, Modality, Planet};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Beats in a phrase before house and modality scaling.
pub const BASE_PHRASE_BEATS: f64 = 8.0;

/// Octaves a note may occupy after role offsets.
pub const OCTAVE_RANGE: (i32, i32) = (1, 7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Distortion,
    Reverb,
    Filter,
    Drive,
    Delay,
    Lowpass,
    Highpass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodicNote {
    /// Hz
    pub frequency: f64,
    /// Seconds
    pub duration: f64,
    /// [0, 1]
    pub velocity: f64,
    /// Timbre id
    pub instrument: String,
    /// Seconds from the start of the phrase
    pub timestamp: f64,
    pub effects: BTreeSet<Effect>,
}

impl MelodicNote {
    pub fn end_time(&self) -> f64 {
        self.timestamp + self.duration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodicPhrase {
    pub planet: Planet,
    pub role: MusicalRole,
    pub notes: Vec<MelodicNote>,
    /// Seconds from the start of the session
    pub start_time: f64,
    pub duration: f64,
    pub intensity: f64,
    pub variation: f64,
}

impl MelodicPhrase {
    /// Set the duration to the end of the latest note.
    pub fn recompute_duration(&mut self) {
        self.duration = self
            .notes
            .iter()
            .map(MelodicNote::end_time)
            .fold(0.0, f64::max);
    }
}

pub fn modality_length_multiplier(modality: Modality) -> f64 {
    match modality {
        Modality::Cardinal => 1.2,
        Modality::Fixed => 1.5,
        Modality::Mutable => 0.8,
    }
}

/// Phrase length in beats: `8 * (1 + (house - 1) * 0.1) * modality`.
pub fn phrase_length_beats(house: u8, modality: Modality) -> f64 {
    BASE_PHRASE_BEATS
        * (1.0 + (house.max(1) as f64 - 1.0) * 0.1)
        * modality_length_multiplier(modality)
}

/// `floor(length * 2 * role * energy)`, at least one note.
pub fn note_count(phrase_beats: f64, role: MusicalRole, energy: f64) -> usize {
    let count = (phrase_beats * 2.0 * role.note_count_multiplier() * energy).floor();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

pub fn note_velocity(energy: f64, house: u8) -> f64 {
    let energy_term = 0.3 + energy * 0.7;
    let house_term = 0.8 + house as f64 / 12.0 * 0.2;
    ((energy_term + house_term) / 2.0).min(1.0)
}

/// Effect tags; rules accumulate.
pub fn note_effects(planet: Planet, element: Element, house: u8) -> BTreeSet<Effect> {
    let mut effects = BTreeSet::new();
    match planet {
        Planet::Uranus => {
            effects.insert(Effect::Distortion);
        }
        Planet::Neptune => {
            effects.insert(Effect::Reverb);
        }
        Planet::Pluto => {
            effects.insert(Effect::Filter);
        }
        _ => {}
    }
    match element {
        Element::Fire => {
            effects.insert(Effect::Drive);
        }
        Element::Water => {
            effects.insert(Effect::Delay);
        }
        _ => {}
    }
    if house <= 3 {
        effects.insert(Effect::Lowpass);
    }
    if house >= 10 {
        effects.insert(Effect::Highpass);
    }
    effects
}

pub fn note_octave(voice_octave: i32, role: MusicalRole) -> i32 {
    (voice_octave + role.octave_offset()).clamp(OCTAVE_RANGE.0, OCTAVE_RANGE.1)
}

/// Seconds at which a planet's phrase enters: houses spread over the first half.
pub fn phrase_start(house: u8, duration: f64) -> f64 {
    (house.max(1) as f64 - 1.0) / 12.0 * duration * 0.5
}

#[derive(Debug, Clone, Copy)]
pub struct PhraseGenerator {
    tempo: f64,
    duration: f64,
}

impl PhraseGenerator {
    /// `tempo` in BPM, `duration` of the session in seconds.
    pub fn new(tempo: f64, duration: f64) -> Self {
        Self { tempo, duration }
    }

    fn seconds_per_beat(&self) -> f64 {
        60.0 / self.tempo
    }

    /// One phrase per voiced planet with a role, in house order.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        chart: &Chart,
        config: &MusicalConfiguration,
        rng: &mut R,
    ) -> Vec<MelodicPhrase> {
        let mut phrases = Vec::new();
        for (planet, _) in chart.planets_by_house() {
            let Some(voice) = config.voice(planet) else {
                continue;
            };
            let Some(role) = voice.role else {
                log::debug!("{} has no melodic role, skipping", planet);
                continue;
            };
            phrases.push(self.generate_phrase(voice, role, config, rng));
        }
        phrases
    }

    pub fn generate_phrase<R: Rng + ?Sized>(
        &self,
        voice: &PlanetVoice,
        role: MusicalRole,
        config: &MusicalConfiguration,
        rng: &mut R,
    ) -> MelodicPhrase {
        let sign = &voice.position.sign;
        let house = voice.position.house;
        let energy = voice.mapping.energy;

        let beats = phrase_length_beats(house, sign.modality);
        let count = note_count(beats, role, energy);
        let slot = beats / count as f64 * self.seconds_per_beat();
        let note_duration = slot * role.duration_multiplier();

        let octave = note_octave(voice.octave, role);
        let weights = scale_degree_weights(config.scale.notes.len(), sign.degree, house);
        let velocity = note_velocity(energy, house);
        let effects = note_effects(voice.planet, sign.element, house);

        let notes = (0..count)
            .map(|i| {
                let degree = select_weighted(&weights, rng);
                let frequency = config
                    .scale
                    .notes
                    .get(degree)
                    .map(|pc| pc.frequency(octave))
                    .unwrap_or(voice.mapping.base_frequency);
                MelodicNote {
                    frequency,
                    duration: note_duration,
                    velocity,
                    instrument: voice.instrument.clone(),
                    timestamp: i as f64 * slot,
                    effects: effects.clone(),
                }
            })
            .collect();

        let mut phrase = MelodicPhrase {
            planet: voice.planet,
            role,
            notes,
            start_time: phrase_start(house, self.duration),
            duration: 0.0,
            intensity: energy,
            variation: sign.degree / 30.0,
        };
        phrase.recompute_duration();
        phrase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_length() {
        assert!((phrase_length_beats(1, Modality::Cardinal) - 9.6).abs() < 1e-9);
        assert!((phrase_length_beats(11, Modality::Fixed) - 24.0).abs() < 1e-9);
        assert!((phrase_length_beats(1, Modality::Mutable) - 6.4).abs() < 1e-9);
    }

    #[test]
    fn test_note_count_has_a_floor() {
        // 9.6 * 2 * 1.0 * 0.9
        assert_eq!(note_count(9.6, MusicalRole::LeadMelody, 0.9), 17);
        assert_eq!(note_count(6.4, MusicalRole::AmbientPad, 0.0), 1);
        assert_eq!(note_count(6.4, MusicalRole::AmbientPad, 0.1), 1);
    }

    #[test]
    fn test_velocity_is_clamped() {
        assert!((note_velocity(0.0, 12) - 0.65).abs() < 1e-9);
        assert!(note_velocity(1.0, 12) <= 1.0);
        assert!((note_velocity(1.0, 12) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_effects_accumulate() {
        let effects = note_effects(Planet::Neptune, Element::Water, 12);
        assert_eq!(
            effects.into_iter().collect::<Vec<_>>(),
            vec![Effect::Reverb, Effect::Delay, Effect::Highpass]
        );
        assert!(note_effects(Planet::Venus, Element::Earth, 6).is_empty());
    }

    #[test]
    fn test_octave_offsets_are_clamped() {
        assert_eq!(note_octave(4, MusicalRole::LeadMelody), 5);
        assert_eq!(note_octave(2, MusicalRole::Bassline), 1);
        assert_eq!(note_octave(6, MusicalRole::Effects), 7);
    }
}
