use crate::chart::planet::Planet;
use crate::western::signs::{Element, Modality, Sign};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    #[serde(default)]
    pub birth_datetime: Option<DateTime<Utc>>,
    /// "tropical" or "sidereal"
    #[serde(default = "default_coordinate_system")]
    pub coordinate_system: String,
}

fn default_coordinate_system() -> String {
    "tropical".to_string()
}

impl Default for ChartMetadata {
    fn default() -> Self {
        Self {
            birth_datetime: None,
            coordinate_system: default_coordinate_system(),
        }
    }
}

/// Sign placement of a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub name: Sign,
    pub element: Element,
    pub modality: Modality,
    /// Degree within the sign, [0, 30)
    pub degree: f64,
}

impl SignPosition {
    /// Placement with element and modality taken from the sign itself.
    pub fn new(name: Sign, degree: f64) -> Self {
        Self {
            name,
            element: name.element(),
            modality: name.modality(),
            degree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Ecliptic longitude as reported by the provider, [0, 360)
    pub longitude: f64,
    pub sign: SignPosition,
    /// House 1..=12
    pub house: u8,
    #[serde(default)]
    pub retrograde: bool,
}

impl PlanetPosition {
    pub fn new(sign: Sign, degree: f64, house: u8) -> Self {
        Self {
            longitude: sign.start_longitude() + degree,
            sign: SignPosition::new(sign, degree),
            house,
            retrograde: false,
        }
    }

    pub fn retrograde(mut self, retrograde: bool) -> Self {
        self.retrograde = retrograde;
        self
    }

    /// Longitude rebuilt from the sign placement: `degree + (signIndex - 1) * 30`.
    ///
    /// Aspects are measured on this value rather than on `longitude`.
    pub fn absolute_longitude(&self) -> f64 {
        self.sign.degree + (self.sign.name.index() as f64 - 1.0) * 30.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub longitude: f64,
    pub sign: Sign,
}

impl HouseCusp {
    pub fn new(longitude: f64) -> Self {
        Self {
            longitude,
            sign: Sign::from_longitude(longitude),
        }
    }
}

/// A chart as produced by the chart provider. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub planets: BTreeMap<Planet, PlanetPosition>,
    /// House number 1..=12 -> cusp
    #[serde(default)]
    pub houses: BTreeMap<u8, HouseCusp>,
}

impl Chart {
    pub fn new(metadata: ChartMetadata) -> Self {
        Self {
            metadata,
            planets: BTreeMap::new(),
            houses: BTreeMap::new(),
        }
    }

    pub fn with_planet(mut self, planet: Planet, position: PlanetPosition) -> Self {
        self.planets.insert(planet, position);
        self
    }

    pub fn with_house(mut self, number: u8, cusp: HouseCusp) -> Self {
        self.houses.insert(number, cusp);
        self
    }

    pub fn planet(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.planets.get(&planet)
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Planets ordered by house; ties keep declaration order.
    pub fn planets_by_house(&self) -> Vec<(Planet, &PlanetPosition)> {
        let mut ordered: Vec<(Planet, &PlanetPosition)> =
            self.planets.iter().map(|(p, pos)| (*p, pos)).collect();
        // stable sort keeps the BTreeMap order within a house
        ordered.sort_by_key(|(_, pos)| pos.house);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_longitude_uses_sign_index() {
        let pos = PlanetPosition::new(Sign::Libra, 12.5, 7);
        assert_eq!(pos.absolute_longitude(), 192.5);
        assert_eq!(pos.longitude, 192.5);
        assert_eq!(pos.sign.element, Element::Air);
    }

    #[test]
    fn test_planets_by_house_is_stable() {
        let chart = Chart::default()
            .with_planet(Planet::Mars, PlanetPosition::new(Sign::Aries, 1.0, 3))
            .with_planet(Planet::Sun, PlanetPosition::new(Sign::Leo, 1.0, 3))
            .with_planet(Planet::Moon, PlanetPosition::new(Sign::Cancer, 1.0, 1));

        let order: Vec<Planet> = chart.planets_by_house().into_iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec![Planet::Moon, Planet::Sun, Planet::Mars]);
    }
}
