//! Flat compositions: one sequential note per planet, optionally followed by
//! one note per aspect.

use crate::genre::Genre;
use crate::mapping::MappingTables;
use aphrodite::{calculate_aspects, AspectRelation, AspectType, Chart, Planet, PlanetPosition};
use audio_synth::{AudioComposition, AudioNote, DEFAULT_SAMPLE_RATE};
use std::collections::HashMap;

pub const BASE_VOLUME: f64 = 0.3;
pub const MAX_VOLUME: f64 = 0.8;
/// Share of a planet's slot its note sounds for.
pub const NOTE_FILL: f64 = 0.8;
pub const ASPECT_NOTE_DURATION: f64 = 3.0;
pub const ASPECT_BASE_VOLUME: f64 = 0.5;
/// Square-aspect difference tones below this fall back to the average.
pub const MIN_DIFFERENCE_TONE: f64 = 20.0;

/// Lengths of the named flat variants, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantDurations {
    pub preview: f64,
    pub daily: f64,
    pub sandbox: f64,
}

impl Default for VariantDurations {
    fn default() -> Self {
        Self {
            preview: 15.0,
            daily: 30.0,
            sandbox: 45.0,
        }
    }
}

pub fn planet_frequency(base_frequency: f64, position: &PlanetPosition) -> f64 {
    base_frequency
        * (1.0 + position.sign.degree / 30.0 * 0.5)
        * (1.0 + (position.house as f64 - 1.0) * 0.1)
}

pub fn planet_volume(energy: f64, house: u8) -> f64 {
    (BASE_VOLUME + energy * 0.4 + (house as f64 - 1.0) * 0.05).min(MAX_VOLUME)
}

/// Blend of two base frequencies for an aspect note.
pub fn aspect_frequency(aspect_type: AspectType, f1: f64, f2: f64) -> f64 {
    let average = (f1 + f2) / 2.0;
    match aspect_type {
        AspectType::Conjunction => average,
        AspectType::Opposition => f1.max(f2) * 1.5,
        AspectType::Trine => (f1 + f2) * 0.75,
        AspectType::Square => {
            let difference = (f1 - f2).abs() * 2.0;
            if difference < MIN_DIFFERENCE_TONE {
                average
            } else {
                difference
            }
        }
        AspectType::Sextile => average,
    }
}

pub fn aspect_volume_multiplier(aspect_type: AspectType) -> f64 {
    match aspect_type {
        AspectType::Conjunction => 1.2,
        AspectType::Opposition => 1.0,
        AspectType::Trine => 0.9,
        AspectType::Square => 0.8,
        AspectType::Sextile => 0.7,
    }
}

/// Closeness to exact conjunction, `max(0, 1 - |angle| / 10)`.
///
/// Measured from 0 degrees for every aspect type, so anything but a tight
/// conjunction scores 0.
pub fn angle_strength(angle: f64) -> f64 {
    (1.0 - angle.abs() / 10.0).max(0.0)
}

pub fn aspect_volume(aspect: &AspectRelation) -> f64 {
    (ASPECT_BASE_VOLUME * aspect_volume_multiplier(aspect.aspect_type) * angle_strength(aspect.angle))
        .min(MAX_VOLUME)
}

pub struct FlatGenerator<'a> {
    tables: &'a MappingTables,
    sample_rate: u32,
    durations: VariantDurations,
}

impl<'a> FlatGenerator<'a> {
    pub fn new(tables: &'a MappingTables) -> Self {
        Self {
            tables,
            sample_rate: DEFAULT_SAMPLE_RATE,
            durations: VariantDurations::default(),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_durations(mut self, durations: VariantDurations) -> Self {
        self.durations = durations;
        self
    }

    /// One note per mapped planet in house order, back to back.
    pub fn generate(&self, chart: &Chart, duration: f64, genre: Genre) -> AudioComposition {
        let notes: Vec<AudioNote> = self
            .planet_notes(chart, duration, genre)
            .into_iter()
            .map(|(_, note)| note)
            .collect();
        log::info!("Flat composition: {} notes over {}s ({})", notes.len(), duration, genre);
        AudioComposition::new(notes, duration, self.sample_rate)
    }

    /// Planet notes plus one note per aspect between mapped planets.
    pub fn generate_sandbox(&self, chart: &Chart, duration: f64, genre: Genre) -> AudioComposition {
        let planet_notes = self.planet_notes(chart, duration, genre);
        let by_planet: HashMap<Planet, &AudioNote> =
            planet_notes.iter().map(|(planet, note)| (*planet, note)).collect();

        let mut aspect_notes = Vec::new();
        if !by_planet.is_empty() {
            for aspect in calculate_aspects(chart) {
                let Some(first) = by_planet.get(&aspect.planet1) else {
                    continue;
                };
                if !by_planet.contains_key(&aspect.planet2) {
                    continue;
                }
                let (Some(m1), Some(m2)) = (
                    self.tables.planet(aspect.planet1),
                    self.tables.planet(aspect.planet2),
                ) else {
                    continue;
                };
                aspect_notes.push(AudioNote {
                    frequency: aspect_frequency(aspect.aspect_type, m1.base_frequency, m2.base_frequency),
                    duration: ASPECT_NOTE_DURATION,
                    volume: aspect_volume(&aspect),
                    instrument: first.instrument,
                    start_time: first.start_time,
                });
            }
        }

        let mut notes: Vec<AudioNote> = planet_notes.into_iter().map(|(_, note)| note).collect();
        log::info!(
            "Sandbox composition: {} planet notes, {} aspect notes ({})",
            notes.len(),
            aspect_notes.len(),
            genre
        );
        notes.extend(aspect_notes);
        AudioComposition::new(notes, duration, self.sample_rate)
    }

    pub fn preview(&self, chart: &Chart, genre: Genre) -> AudioComposition {
        self.generate(chart, self.durations.preview, genre)
    }

    /// Flat rendering of a transit chart.
    pub fn daily(&self, transit_chart: &Chart, genre: Genre) -> AudioComposition {
        self.generate(transit_chart, self.durations.daily, genre)
    }

    pub fn sandbox(&self, chart: &Chart, genre: Genre) -> AudioComposition {
        self.generate_sandbox(chart, self.durations.sandbox, genre)
    }

    fn planet_notes(&self, chart: &Chart, duration: f64, genre: Genre) -> Vec<(Planet, AudioNote)> {
        if !duration.is_finite() || duration <= 0.0 {
            return Vec::new();
        }
        let mapped: Vec<_> = chart
            .planets_by_house()
            .into_iter()
            .filter_map(|(planet, position)| match self.tables.planet(planet) {
                Some(mapping) => Some((planet, position, mapping)),
                None => {
                    log::debug!("No mapping for {}, leaving it silent", planet);
                    None
                }
            })
            .collect();
        if mapped.is_empty() {
            return Vec::new();
        }

        let slot = duration / mapped.len() as f64;
        mapped
            .into_iter()
            .enumerate()
            .map(|(index, (planet, position, mapping))| {
                let note = AudioNote {
                    frequency: planet_frequency(mapping.base_frequency, position),
                    duration: slot * NOTE_FILL,
                    volume: planet_volume(mapping.energy, position.house),
                    instrument: self.tables.waveform(genre, planet),
                    start_time: index as f64 * slot,
                };
                (planet, note)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_is_capped() {
        assert!((planet_volume(0.0, 1) - 0.3).abs() < 1e-12);
        assert_eq!(planet_volume(1.0, 12), MAX_VOLUME);
    }

    #[test]
    fn test_aspect_frequency_blends() {
        assert_eq!(aspect_frequency(AspectType::Conjunction, 200.0, 300.0), 250.0);
        assert_eq!(aspect_frequency(AspectType::Sextile, 200.0, 300.0), 250.0);
        assert_eq!(aspect_frequency(AspectType::Opposition, 200.0, 300.0), 450.0);
        assert_eq!(aspect_frequency(AspectType::Trine, 200.0, 300.0), 375.0);
        assert_eq!(aspect_frequency(AspectType::Square, 200.0, 300.0), 200.0);
        // difference tone would be inaudible
        assert_eq!(aspect_frequency(AspectType::Square, 200.0, 205.0), 202.5);
    }

    #[test]
    fn test_angle_strength_is_centred_on_zero() {
        assert_eq!(angle_strength(0.0), 1.0);
        assert_eq!(angle_strength(5.0), 0.5);
        assert_eq!(angle_strength(120.0), 0.0);
        assert_eq!(angle_strength(354.0), 0.0);
    }
}
