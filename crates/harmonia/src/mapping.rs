//! Planetary mapping tables.
//!
//! The tables are data, not code: a TOML document parsed once into typed maps.
//! The built-in document is embedded at compile time and cached; callers may
//! load their own from a string or a path.

use crate::genre::Genre;
use crate::notes::PitchClass;
use aphrodite::{Element, Modality, Planet, Sign};
use audio_synth::Waveform;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const DEFAULT_MAPPINGS: &str = include_str!("../data/mappings.toml");

lazy_static! {
    static ref DEFAULT_TABLES: MappingTables = MappingTables::from_toml_str(DEFAULT_MAPPINGS)
        .expect("embedded mapping tables are valid");
}

/// Errors that can occur when loading mapping tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Invalid TOML: {0}")]
    InvalidToml(String),
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("Unknown planet key: {0}")]
    UnknownPlanet(String),
    #[error("Unknown genre key: {0}")]
    UnknownGenre(String),
    #[error("Unknown element key: {0}")]
    UnknownElement(String),
    #[error("Missing fallback genre: {0}")]
    MissingFallbackGenre(Genre),
    #[error("Missing default scale for {0}")]
    MissingScale(Element),
    #[error("Invalid mapping for {planet}: {reason}")]
    InvalidMapping { planet: Planet, reason: String },
}

/// Fixed musical function of a planet in the melodic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicalRole {
    LeadMelody,
    CounterMelody,
    Harmony,
    Rhythm,
    Bassline,
    Effects,
    AmbientPad,
    Modulation,
}

impl MusicalRole {
    pub fn name(&self) -> &'static str {
        match self {
            MusicalRole::LeadMelody => "lead melody",
            MusicalRole::CounterMelody => "counter melody",
            MusicalRole::Harmony => "harmony",
            MusicalRole::Rhythm => "rhythm",
            MusicalRole::Bassline => "bassline",
            MusicalRole::Effects => "effects",
            MusicalRole::AmbientPad => "ambient pad",
            MusicalRole::Modulation => "modulation",
        }
    }

    /// Scales the number of notes in a phrase.
    pub fn note_count_multiplier(&self) -> f64 {
        match self {
            MusicalRole::LeadMelody => 1.0,
            MusicalRole::CounterMelody => 0.8,
            MusicalRole::Harmony => 0.6,
            MusicalRole::Rhythm => 2.0,
            MusicalRole::Bassline => 0.5,
            MusicalRole::Effects => 3.0,
            MusicalRole::AmbientPad => 0.3,
            MusicalRole::Modulation => 0.4,
        }
    }

    /// Scales each note's share of the phrase.
    pub fn duration_multiplier(&self) -> f64 {
        match self {
            MusicalRole::LeadMelody => 1.0,
            MusicalRole::CounterMelody => 1.0,
            MusicalRole::Harmony => 1.5,
            MusicalRole::Rhythm => 0.5,
            MusicalRole::Bassline => 2.0,
            MusicalRole::Effects => 0.3,
            MusicalRole::AmbientPad => 1.8,
            MusicalRole::Modulation => 1.2,
        }
    }

    /// Octaves added to the planet's base octave.
    pub fn octave_offset(&self) -> i32 {
        match self {
            MusicalRole::LeadMelody => 1,
            MusicalRole::CounterMelody => 0,
            MusicalRole::Harmony => 0,
            MusicalRole::Rhythm => 0,
            MusicalRole::Bassline => -2,
            MusicalRole::Effects => 2,
            MusicalRole::AmbientPad => -1,
            MusicalRole::Modulation => -1,
        }
    }
}

/// A planet's instrument and octave in one genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreVariation {
    pub instrument: String,
    pub octave: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetaryMapping {
    pub base_frequency: f64,
    /// [0, 1]
    pub energy: f64,
    pub element: Element,
    pub modality: Modality,
    /// Signs of domicile
    pub dignity: Vec<Sign>,
    pub musical_role: Option<MusicalRole>,
    pub genre_variations: HashMap<Genre, GenreVariation>,
}

impl PlanetaryMapping {
    pub fn is_domicile(&self, sign: Sign) -> bool {
        self.dignity.contains(&sign)
    }
}

/// Instrument family per voice of a genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSet {
    pub melody: String,
    pub harmony: String,
    pub rhythm: String,
    pub bass: String,
    pub effects: String,
}

impl InstrumentSet {
    /// Family a role draws its instrument from when a planet has no variation.
    pub fn for_role(&self, role: Option<MusicalRole>) -> &str {
        match role {
            Some(MusicalRole::LeadMelody) | Some(MusicalRole::CounterMelody) | None => {
                &self.melody
            }
            Some(MusicalRole::Harmony) | Some(MusicalRole::AmbientPad) => &self.harmony,
            Some(MusicalRole::Rhythm) => &self.rhythm,
            Some(MusicalRole::Bassline) => &self.bass,
            Some(MusicalRole::Effects) | Some(MusicalRole::Modulation) => &self.effects,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreSettings {
    pub base_octave: i32,
    /// Default BPM
    pub tempo: f64,
    pub instruments: InstrumentSet,
}

/// A seven-note mode; the first note is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub mode: String,
    pub notes: Vec<PitchClass>,
}

impl ScaleDefinition {
    pub fn key(&self) -> PitchClass {
        self.notes.first().copied().unwrap_or(PitchClass::C)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationTemplates {
    pub title: String,
    pub overview: String,
    /// Planets with a melodic role
    pub planet: String,
    /// Planets that sound only in the flat generator
    pub unvoiced: String,
    pub aspect: String,
}

// Document shape. Keys stay strings until validated.

#[derive(Deserialize)]
struct RawTables {
    planets: HashMap<String, RawPlanetaryMapping>,
    genres: HashMap<String, GenreSettings>,
    scales: RawScales,
    #[serde(default)]
    waveforms: HashMap<String, HashMap<String, Waveform>>,
    #[serde(default)]
    timbres: HashMap<String, Waveform>,
    narration: NarrationTemplates,
}

#[derive(Deserialize)]
struct RawPlanetaryMapping {
    base_frequency: f64,
    energy: f64,
    element: Element,
    modality: Modality,
    #[serde(default)]
    dignity: Vec<String>,
    #[serde(default)]
    musical_role: Option<MusicalRole>,
    #[serde(default)]
    genre_variations: HashMap<String, GenreVariation>,
}

#[derive(Deserialize)]
struct RawScales {
    default: HashMap<String, ScaleDefinition>,
    #[serde(default)]
    genres: HashMap<String, HashMap<String, ScaleDefinition>>,
}

/// Every static lookup the generators need. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTables {
    pub planets: HashMap<Planet, PlanetaryMapping>,
    pub genres: HashMap<Genre, GenreSettings>,
    pub scales: HashMap<Element, ScaleDefinition>,
    pub genre_scales: HashMap<Genre, HashMap<Element, ScaleDefinition>>,
    pub waveforms: HashMap<Genre, HashMap<Planet, Waveform>>,
    pub timbres: HashMap<String, Waveform>,
    pub narration: NarrationTemplates,
}

fn parse_planet(key: &str) -> Result<Planet, MappingError> {
    key.parse()
        .map_err(|_| MappingError::UnknownPlanet(key.to_string()))
}

fn parse_genre(key: &str) -> Result<Genre, MappingError> {
    key.parse()
        .map_err(|_| MappingError::UnknownGenre(key.to_string()))
}

fn parse_element(key: &str) -> Result<Element, MappingError> {
    key.parse()
        .map_err(|_| MappingError::UnknownElement(key.to_string()))
}

fn parse_scales(
    raw: HashMap<String, ScaleDefinition>,
) -> Result<HashMap<Element, ScaleDefinition>, MappingError> {
    raw.into_iter()
        .map(|(key, scale)| Ok((parse_element(&key)?, scale)))
        .collect()
}

impl MappingTables {
    /// The built-in tables.
    pub fn builtin() -> &'static MappingTables {
        &DEFAULT_TABLES
    }

    pub fn from_toml_str(text: &str) -> Result<Self, MappingError> {
        let raw: RawTables =
            toml::from_str(text).map_err(|e| MappingError::InvalidToml(e.to_string()))?;

        let mut planets = HashMap::new();
        for (key, raw_mapping) in raw.planets {
            let planet = parse_planet(&key)?;
            let mut dignity = Vec::new();
            for sign in &raw_mapping.dignity {
                dignity.push(sign.parse::<Sign>().map_err(|_| {
                    MappingError::InvalidMapping {
                        planet,
                        reason: format!("unknown dignity sign {:?}", sign),
                    }
                })?);
            }
            let mut genre_variations = HashMap::new();
            for (genre, variation) in raw_mapping.genre_variations {
                genre_variations.insert(parse_genre(&genre)?, variation);
            }
            planets.insert(
                planet,
                PlanetaryMapping {
                    base_frequency: raw_mapping.base_frequency,
                    energy: raw_mapping.energy,
                    element: raw_mapping.element,
                    modality: raw_mapping.modality,
                    dignity,
                    musical_role: raw_mapping.musical_role,
                    genre_variations,
                },
            );
        }

        let genres = raw
            .genres
            .into_iter()
            .map(|(key, settings)| Ok((parse_genre(&key)?, settings)))
            .collect::<Result<HashMap<_, _>, MappingError>>()?;

        let scales = parse_scales(raw.scales.default)?;
        let genre_scales = raw
            .scales
            .genres
            .into_iter()
            .map(|(key, scales)| Ok((parse_genre(&key)?, parse_scales(scales)?)))
            .collect::<Result<HashMap<_, _>, MappingError>>()?;

        let mut waveforms = HashMap::new();
        for (genre, table) in raw.waveforms {
            let table = table
                .into_iter()
                .map(|(planet, waveform)| Ok((parse_planet(&planet)?, waveform)))
                .collect::<Result<HashMap<_, _>, MappingError>>()?;
            waveforms.insert(parse_genre(&genre)?, table);
        }

        let tables = MappingTables {
            planets,
            genres,
            scales,
            genre_scales,
            waveforms,
            timbres: raw.timbres,
            narration: raw.narration,
        };
        tables.validate()?;
        Ok(tables)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MappingError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), MappingError> {
        if !self.genres.contains_key(&Genre::FALLBACK) {
            return Err(MappingError::MissingFallbackGenre(Genre::FALLBACK));
        }

        let scale_sets = std::iter::once(&self.scales).chain(self.genre_scales.values());
        for (index, scales) in scale_sets.enumerate() {
            for element in Element::ALL {
                match scales.get(&element) {
                    Some(scale) if scale.notes.is_empty() => {
                        return Err(MappingError::MissingScale(element))
                    }
                    None if index == 0 => return Err(MappingError::MissingScale(element)),
                    _ => {}
                }
            }
        }

        for (planet, mapping) in &self.planets {
            if !(mapping.base_frequency.is_finite() && mapping.base_frequency > 0.0) {
                return Err(MappingError::InvalidMapping {
                    planet: *planet,
                    reason: format!("base frequency {} is not positive", mapping.base_frequency),
                });
            }
            if !(0.0..=1.0).contains(&mapping.energy) {
                return Err(MappingError::InvalidMapping {
                    planet: *planet,
                    reason: format!("energy {} is outside [0, 1]", mapping.energy),
                });
            }
        }
        Ok(())
    }

    pub fn planet(&self, planet: Planet) -> Option<&PlanetaryMapping> {
        self.planets.get(&planet)
    }

    /// Settings for a genre, or the fallback genre's.
    pub fn genre_settings(&self, genre: Genre) -> &GenreSettings {
        match self.genres.get(&genre) {
            Some(settings) => settings,
            None => {
                log::debug!("No settings for genre {}, using {}", genre, Genre::FALLBACK);
                &self.genres[&Genre::FALLBACK]
            }
        }
    }

    /// Scale for a dominant element, honouring genre overrides.
    pub fn scale(&self, genre: Genre, element: Element) -> &ScaleDefinition {
        self.genre_scales
            .get(&genre)
            .and_then(|scales| scales.get(&element))
            .unwrap_or(&self.scales[&element])
    }

    /// A planet's instrument and octave in a genre.
    ///
    /// Without an explicit variation the genre's instrument family for the
    /// planet's role is used at the genre's base octave.
    pub fn variation(&self, planet: Planet, genre: Genre) -> Option<GenreVariation> {
        let mapping = self.planet(planet)?;
        if let Some(variation) = mapping.genre_variations.get(&genre) {
            return Some(variation.clone());
        }
        let settings = self.genre_settings(genre);
        Some(GenreVariation {
            instrument: settings.instruments.for_role(mapping.musical_role).to_string(),
            octave: settings.base_octave,
        })
    }

    /// Flat-generator oscillator: genre table, then ambient, then sine.
    pub fn waveform(&self, genre: Genre, planet: Planet) -> Waveform {
        [genre, Genre::FALLBACK]
            .iter()
            .find_map(|g| self.waveforms.get(g).and_then(|table| table.get(&planet)))
            .copied()
            .unwrap_or_default()
    }

    /// Oscillator for a timbre id; unknown ids sound as sine.
    pub fn timbre_waveform(&self, instrument: &str) -> Waveform {
        self.timbres
            .get(instrument)
            .copied()
            .unwrap_or_else(|| Waveform::from_name_or_sine(instrument))
    }
}
