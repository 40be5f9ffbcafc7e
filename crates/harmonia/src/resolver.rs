//! Musical configuration: what a chart sounds like in a genre before any
//! notes are chosen.

use crate::genre::Genre;
use crate::mapping::{InstrumentSet, MappingTables, MusicalRole, PlanetaryMapping, ScaleDefinition};
use crate::notes::PitchClass;
use aphrodite::western::DignitiesService;
use aphrodite::western::DignityType;
use aphrodite::{calculate_aspects, AspectRelation, Chart, Element, Planet, PlanetPosition};
use serde::Serialize;
use std::collections::BTreeMap;

/// A planet's mapping merged with its genre variant and chart placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetVoice {
    pub planet: Planet,
    pub mapping: PlanetaryMapping,
    pub role: Option<MusicalRole>,
    pub instrument: String,
    pub octave: i32,
    pub position: PlanetPosition,
    pub dignity: DignityType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicalConfiguration {
    pub genre: Genre,
    pub aspects: Vec<AspectRelation>,
    pub element_counts: BTreeMap<Element, usize>,
    pub dominant_element: Element,
    pub scale: ScaleDefinition,
    pub key: PitchClass,
    pub instruments: InstrumentSet,
    pub base_octave: i32,
    pub tempo: f64,
    /// Only planets present in both the chart and the mapping tables
    pub voices: BTreeMap<Planet, PlanetVoice>,
}

impl MusicalConfiguration {
    pub fn voice(&self, planet: Planet) -> Option<&PlanetVoice> {
        self.voices.get(&planet)
    }
}

/// Count sign elements across every planet in the chart.
pub fn element_counts(chart: &Chart) -> BTreeMap<Element, usize> {
    let mut counts = BTreeMap::new();
    for position in chart.planets.values() {
        *counts.entry(position.sign.element).or_insert(0) += 1;
    }
    counts
}

/// Most frequent sign element. Ties go to the earlier of Fire, Earth, Air,
/// Water; a chart with no planets resolves to Fire.
pub fn dominant_element(chart: &Chart) -> Element {
    let counts = element_counts(chart);
    let mut best = Element::ALL[0];
    let mut best_count = 0;
    for element in Element::ALL {
        let count = counts.get(&element).copied().unwrap_or(0);
        if count > best_count {
            best = element;
            best_count = count;
        }
    }
    best
}

pub struct ConfigurationResolver<'a> {
    tables: &'a MappingTables,
    dignities: DignitiesService,
}

impl<'a> ConfigurationResolver<'a> {
    pub fn new(tables: &'a MappingTables) -> Self {
        Self {
            tables,
            dignities: DignitiesService,
        }
    }

    /// Essential dignity from the sign tables. Bodies those tables leave
    /// peregrine still rule the signs their mapping lists as domicile.
    fn dignity(&self, planet: Planet, mapping: &PlanetaryMapping, position: &PlanetPosition) -> DignityType {
        let sign = position.sign.name;
        match self.dignities.primary_dignity(planet, sign) {
            DignityType::Peregrine if mapping.is_domicile(sign) => DignityType::Rulership,
            dignity => dignity,
        }
    }

    pub fn resolve(&self, chart: &Chart, genre: Genre) -> MusicalConfiguration {
        let settings = self.tables.genre_settings(genre);
        let dominant = dominant_element(chart);
        let scale = self.tables.scale(genre, dominant).clone();

        let mut voices = BTreeMap::new();
        for (planet, position) in &chart.planets {
            let (Some(mapping), Some(variation)) =
                (self.tables.planet(*planet), self.tables.variation(*planet, genre))
            else {
                log::debug!("No mapping for {}, leaving it silent", planet);
                continue;
            };
            voices.insert(
                *planet,
                PlanetVoice {
                    planet: *planet,
                    mapping: mapping.clone(),
                    role: mapping.musical_role,
                    instrument: variation.instrument,
                    octave: variation.octave,
                    position: position.clone(),
                    dignity: self.dignity(*planet, mapping, position),
                },
            );
        }

        MusicalConfiguration {
            genre,
            aspects: calculate_aspects(chart),
            element_counts: element_counts(chart),
            dominant_element: dominant,
            key: scale.key(),
            scale,
            instruments: settings.instruments.clone(),
            base_octave: settings.base_octave,
            tempo: settings.tempo,
            voices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aphrodite::Sign;

    #[test]
    fn test_ties_follow_element_priority() {
        let chart = Chart::default()
            .with_planet(Planet::Sun, PlanetPosition::new(Sign::Pisces, 1.0, 1))
            .with_planet(Planet::Moon, PlanetPosition::new(Sign::Gemini, 1.0, 2));
        // one water, one air: air ranks first
        assert_eq!(dominant_element(&chart), Element::Air);
        assert_eq!(dominant_element(&Chart::default()), Element::Fire);
    }

    #[test]
    fn test_unmapped_planets_have_no_voice() {
        let chart = Chart::default()
            .with_planet(Planet::Sun, PlanetPosition::new(Sign::Leo, 3.0, 5))
            .with_planet(Planet::Lilith, PlanetPosition::new(Sign::Leo, 9.0, 5));
        let config = ConfigurationResolver::new(MappingTables::builtin()).resolve(&chart, Genre::Rock);

        assert!(config.voice(Planet::Lilith).is_none());
        let sun = config.voice(Planet::Sun).unwrap();
        assert_eq!(sun.instrument, "electric_guitar");
        assert_eq!(sun.dignity, DignityType::Rulership);
        // Lilith still counts towards the element tally
        assert_eq!(config.element_counts[&Element::Fire], 2);
    }

    #[test]
    fn test_mapping_domicile_covers_bodies_outside_the_dignity_tables() {
        let chart = Chart::default()
            .with_planet(Planet::Chiron, PlanetPosition::new(Sign::Virgo, 4.0, 6))
            .with_planet(Planet::Mars, PlanetPosition::new(Sign::Libra, 4.0, 7));
        let config = ConfigurationResolver::new(MappingTables::builtin()).resolve(&chart, Genre::Ambient);

        assert_eq!(config.voice(Planet::Chiron).unwrap().dignity, DignityType::Rulership);
        // the sign tables still decide where they have an opinion
        assert_eq!(config.voice(Planet::Mars).unwrap().dignity, DignityType::Detriment);

        let elsewhere = Chart::default()
            .with_planet(Planet::Chiron, PlanetPosition::new(Sign::Leo, 4.0, 6));
        let config = ConfigurationResolver::new(MappingTables::builtin()).resolve(&elsewhere, Genre::Ambient);
        assert_eq!(config.voice(Planet::Chiron).unwrap().dignity, DignityType::Peregrine);
    }
}
